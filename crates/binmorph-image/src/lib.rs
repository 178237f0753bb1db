#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image representation for binary image processing.
pub mod image;

/// borrowed, unchecked views over caller-owned pixel buffers.
pub mod image_data;

/// Error types for the image module.
pub mod error;

/// traits describing the buffers consumed by the processing crates.
pub mod traits;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::image_data::ImageData;
pub use crate::traits::RgbaBuffer;
