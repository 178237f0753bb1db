//! Binary morphology on RGBA images.
//!
//! ```
//! use binmorph::image::{Image, ImageSize};
//! use binmorph::imgproc::morphology::{self, ElementShape, StructuringElement};
//!
//! let mut image = Image::<u8, 4>::from_size_val(ImageSize { width: 8, height: 8 }, 0).unwrap();
//! let element = StructuringElement::from_shape(ElementShape::Disk { radius: 2 }).unwrap();
//! morphology::dilate(&mut image, &element).unwrap();
//! ```

#[doc(inline)]
pub use binmorph_image as image;

#[doc(inline)]
pub use binmorph_imgproc as imgproc;
