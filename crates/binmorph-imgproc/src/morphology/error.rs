use thiserror::Error;

use crate::parallel::ParallelError;

/// Errors related to morphological operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MorphologyError {
    /// The structuring element data does not describe a `width x height` binary mask.
    #[error("structuring element must hold {expected} binary values, got {actual}")]
    InvalidMask {
        /// Number of values implied by the declared element dimensions.
        expected: usize,
        /// Number of values actually provided.
        actual: usize,
    },

    /// The structuring element (or the shape it is built from) has a degenerate size.
    #[error("invalid structuring element dimensions {width}x{height}")]
    InvalidDimensions {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
    },

    /// The image buffer length does not match its declared size.
    #[error("image buffer must hold {expected} bytes, got {actual}")]
    InvalidImage {
        /// `width * height * 4`.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// The execution strategy could not run.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
