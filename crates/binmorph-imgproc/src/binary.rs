use binmorph_image::{ImageSize, RgbaBuffer};

use crate::morphology::MorphologyError;

/// Byte written to the red, green and blue channels of a foreground pixel.
pub const FOREGROUND: u8 = 255;

/// Byte written to the red, green and blue channels of a background pixel.
pub const BACKGROUND: u8 = 0;

const RGBA: usize = 4;

/// A binary plane with one boolean per pixel, `true` meaning foreground.
///
/// This is both the decoded form of an RGBA buffer and the scratch buffer the
/// morphology scan writes into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    size: ImageSize,
    data: Vec<bool>,
}

/// The tightest axis-aligned box enclosing all foreground pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    /// Left-most foreground column.
    pub x: usize,
    /// Top-most foreground row.
    pub y: usize,
    /// Width of the box in pixels.
    pub width: usize,
    /// Height of the box in pixels.
    pub height: usize,
}

impl BinaryImage {
    /// Create a plane of the given size with every pixel set to `fill`.
    pub fn new(size: ImageSize, fill: bool) -> Self {
        Self {
            size,
            data: vec![fill; size.area()],
        }
    }

    /// Create a plane from a row-major vector of pixel states.
    ///
    /// Returns `None` when the vector length does not match the size.
    pub fn from_vec(size: ImageSize, data: Vec<bool>) -> Option<Self> {
        (data.len() == size.area()).then_some(Self { size, data })
    }

    /// Decode the binary state of every pixel of an RGBA buffer.
    ///
    /// A pixel is foreground when its red channel is nonzero; the other channels
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::InvalidImage`] when the buffer does not hold
    /// exactly `width * height * 4` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use binmorph_image::{Image, ImageSize};
    /// use binmorph_imgproc::binary::BinaryImage;
    ///
    /// let image = Image::<u8, 4>::new(
    ///     ImageSize { width: 2, height: 1 },
    ///     vec![0, 255, 255, 255, 1, 0, 0, 0],
    /// ).unwrap();
    ///
    /// let plane = BinaryImage::from_rgba(&image).unwrap();
    /// assert!(!plane.get(0, 0));
    /// assert!(plane.get(1, 0));
    /// ```
    pub fn from_rgba<B: RgbaBuffer + ?Sized>(src: &B) -> Result<Self, MorphologyError> {
        let size = src.size();
        let rgba = src.as_rgba();
        check_rgba_len(size, rgba.len())?;

        let data = rgba.chunks_exact(RGBA).map(|px| px[0] != 0).collect();
        Ok(Self { size, data })
    }

    /// Encode the plane back into an RGBA buffer of the same size.
    ///
    /// Red, green and blue are set to [`FOREGROUND`] or [`BACKGROUND`]; alpha is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::InvalidImage`] if the buffer is malformed or its
    /// size differs from the plane's.
    pub fn write_rgba<B: RgbaBuffer + ?Sized>(&self, dst: &mut B) -> Result<(), MorphologyError> {
        let size = dst.size();
        check_rgba_len(size, dst.as_rgba().len())?;
        if size != self.size {
            return Err(MorphologyError::InvalidImage {
                expected: self.size.area() * RGBA,
                actual: size.area() * RGBA,
            });
        }

        dst.as_rgba_mut()
            .chunks_exact_mut(RGBA)
            .zip(self.data.iter())
            .for_each(|(px, &on)| {
                let v = if on { FOREGROUND } else { BACKGROUND };
                px[0] = v;
                px[1] = v;
                px[2] = v;
            });

        Ok(())
    }

    /// Get the size of the plane in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the plane in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the plane in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Row-major pixel states.
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Row-major pixel states, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [bool] {
        &mut self.data
    }

    /// State of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the plane.
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width() && y < self.height());
        self.data[y * self.width() + x]
    }

    /// Set the state of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the plane.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        assert!(x < self.width() && y < self.height());
        let width = self.width();
        self.data[y * width + x] = value;
    }

    /// State at signed coordinates, with everything outside the plane reading as
    /// background.
    #[inline]
    pub fn sample(&self, ix: isize, iy: isize) -> bool {
        if ix < 0 || iy < 0 || ix >= self.width() as isize || iy >= self.height() as isize {
            return false;
        }
        self.data[iy as usize * self.width() + ix as usize]
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&on| on).count()
    }

    /// Swap foreground and background for every pixel.
    pub fn invert(&mut self) {
        self.data.iter_mut().for_each(|on| *on = !*on);
    }

    /// The bounding box of the foreground, or `None` if the plane is empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let width = self.width();
        let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
        let (mut max_x, mut max_y) = (0, 0);
        let mut found = false;

        for (idx, _) in self.data.iter().enumerate().filter(|(_, on)| **on) {
            let (x, y) = (idx % width, idx / width);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            found = true;
        }

        if !found {
            return None;
        }

        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// Render the plane as ASCII art, `#` for foreground and `.` for background.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for row in self.data.chunks(self.width().max(1)) {
            out.extend(row.iter().map(|&on| if on { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

/// Complement the binary state of an RGBA buffer in place.
///
/// Every pixel is decoded from its red channel and rewritten with the opposite
/// state; alpha is preserved.
pub fn invert_rgba<B: RgbaBuffer + ?Sized>(image: &mut B) -> Result<(), MorphologyError> {
    let mut plane = BinaryImage::from_rgba(&*image)?;
    plane.invert();
    plane.write_rgba(image)
}

pub(crate) fn check_rgba_len(size: ImageSize, len: usize) -> Result<(), MorphologyError> {
    let expected = size.area() * RGBA;
    if len != expected {
        return Err(MorphologyError::InvalidImage {
            expected,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use binmorph_image::{Image, ImageData};

    fn rgba(size: ImageSize, reds: &[u8], alpha: u8) -> Image<u8, 4> {
        let data = reds.iter().flat_map(|&r| [r, 7, 9, alpha]).collect();
        Image::new(size, data).unwrap()
    }

    #[test]
    fn decode_uses_red_channel_only() -> Result<(), MorphologyError> {
        let size = ImageSize::from([3, 1]);
        let image = Image::<u8, 4>::new(size, vec![0, 255, 255, 255, 3, 0, 0, 0, 0, 0, 0, 0])
            .unwrap();
        let plane = BinaryImage::from_rgba(&image)?;
        assert_eq!(plane.as_slice(), &[false, true, false]);
        Ok(())
    }

    #[test]
    fn encode_preserves_alpha() -> Result<(), MorphologyError> {
        let size = ImageSize::from([2, 1]);
        let mut image = rgba(size, &[0, 10], 42);
        let plane = BinaryImage::from_vec(size, vec![true, false]).unwrap();
        plane.write_rgba(&mut image)?;
        assert_eq!(image.as_slice(), &[255, 255, 255, 42, 0, 0, 0, 42]);
        Ok(())
    }

    #[test]
    fn malformed_buffer_is_rejected() {
        let mut bytes = vec![0u8; 7];
        let view = ImageData::new(2, 1, &mut bytes);
        assert_eq!(
            BinaryImage::from_rgba(&view),
            Err(MorphologyError::InvalidImage {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn write_rejects_size_mismatch() {
        let plane = BinaryImage::new(ImageSize::from([2, 2]), true);
        let mut image = rgba(ImageSize::from([1, 4]), &[0, 0, 0, 0], 255);
        assert!(matches!(
            plane.write_rgba(&mut image),
            Err(MorphologyError::InvalidImage { .. })
        ));
    }

    #[test]
    fn sample_out_of_bounds_is_background() {
        let plane = BinaryImage::new(ImageSize::from([2, 2]), true);
        assert!(plane.sample(0, 0));
        assert!(plane.sample(1, 1));
        assert!(!plane.sample(-1, 0));
        assert!(!plane.sample(0, -1));
        assert!(!plane.sample(2, 0));
        assert!(!plane.sample(0, 2));
    }

    #[test]
    fn count_invert_and_bounding_box() {
        let size = ImageSize::from([4, 3]);
        let mut plane = BinaryImage::new(size, false);
        assert_eq!(plane.bounding_box(), None);

        plane.set(1, 0, true);
        plane.set(2, 2, true);
        assert_eq!(plane.foreground_count(), 2);
        assert_eq!(
            plane.bounding_box(),
            Some(BoundingBox {
                x: 1,
                y: 0,
                width: 2,
                height: 3
            })
        );

        plane.invert();
        assert_eq!(plane.foreground_count(), 10);
        assert!(!plane.get(1, 0));
    }

    #[test]
    fn bounding_box_of_empty_plane() {
        assert_eq!(
            BinaryImage::new(ImageSize::from([5, 2]), false).bounding_box(),
            None
        );
        assert_eq!(
            BinaryImage::new(ImageSize::from([0, 0]), false).bounding_box(),
            None
        );
        assert_eq!(
            BinaryImage::new(ImageSize::from([5, 2]), true).bounding_box(),
            Some(BoundingBox {
                x: 0,
                y: 0,
                width: 5,
                height: 2
            })
        );
    }

    #[test]
    fn invert_rgba_in_place() -> Result<(), MorphologyError> {
        let size = ImageSize::from([2, 1]);
        let mut image = rgba(size, &[0, 128], 17);
        invert_rgba(&mut image)?;
        assert_eq!(image.as_slice(), &[255, 255, 255, 17, 0, 0, 0, 17]);
        Ok(())
    }

    #[test]
    fn ascii_rendering() {
        let size = ImageSize::from([3, 2]);
        let plane =
            BinaryImage::from_vec(size, vec![true, false, false, false, true, true]).unwrap();
        assert_eq!(plane.to_ascii(), "#..\n.##\n");
    }
}
