//! Binary morphology on RGBA images.
//!
//! Every operation decodes the image into a [`BinaryImage`](crate::binary::BinaryImage)
//! from its red channel, runs one or more neighborhood scans with a
//! [`StructuringElement`] and writes the result back as 0/255 into the red, green
//! and blue channels. Alpha is never touched.

/// Error types used for morphological operations.
pub mod error;
pub use error::MorphologyError;

/// Structuring elements and the shapes they are built from.
pub mod element;
pub use element::{ElementShape, StructuringElement};

/// The neighborhood scan shared by dilation and erosion.
pub mod scan;
pub use scan::{neighborhood_scan, ScanRule};

/// In-place morphological operations on RGBA buffers.
pub mod ops;
pub use ops::{close, close_with, dilate, dilate_with, erode, erode_with, open, open_with};
