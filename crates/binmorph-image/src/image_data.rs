use crate::{ImageSize, RgbaBuffer};

/// A borrowed RGBA view over a caller-owned byte buffer.
///
/// This mirrors the image-data objects handed out by canvas-like hosts: a width, a
/// height and a flat byte slice with four channels per pixel. Nothing ties the slice
/// length to the declared dimensions, so consumers must validate it.
///
/// # Examples
///
/// ```
/// use binmorph_image::{ImageData, ImageSize, RgbaBuffer};
///
/// let mut bytes = vec![0u8; 3 * 2 * 4];
/// let view = ImageData::new(3, 2, &mut bytes);
/// assert_eq!(view.size(), ImageSize { width: 3, height: 2 });
/// assert_eq!(view.as_rgba().len(), 24);
/// ```
#[derive(Debug)]
pub struct ImageData<'a> {
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
    /// Interleaved RGBA bytes.
    pub data: &'a mut [u8],
}

impl<'a> ImageData<'a> {
    /// Wrap a byte buffer with the given dimensions.
    pub fn new(width: usize, height: usize, data: &'a mut [u8]) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Number of bytes a well-formed buffer of this size holds.
    pub fn expected_len(&self) -> usize {
        self.width * self.height * 4
    }
}

impl RgbaBuffer for ImageData<'_> {
    fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }

    fn as_rgba(&self) -> &[u8] {
        &*self.data
    }

    fn as_rgba_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_data_does_not_validate() {
        let mut bytes = vec![0u8; 5];
        let view = ImageData::new(2, 2, &mut bytes);
        assert_eq!(view.expected_len(), 16);
        assert_eq!(view.as_rgba().len(), 5);
    }

    #[test]
    fn image_data_writes_through() {
        let mut bytes = vec![0u8; 4];
        {
            let mut view = ImageData::new(1, 1, &mut bytes);
            view.as_rgba_mut()[3] = 200;
        }
        assert_eq!(bytes, vec![0, 0, 0, 200]);
    }
}
