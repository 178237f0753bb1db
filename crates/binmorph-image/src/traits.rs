use crate::{Image, ImageSize};

/// A 4-channel, 8-bit pixel buffer laid out row-major as red, green, blue, alpha.
///
/// The reported [`ImageSize`] is the only source of dimensions for consumers of this
/// trait. Implementations are not required to guarantee that the buffer length
/// matches the size; consumers are expected to check it before addressing pixels.
pub trait RgbaBuffer {
    /// The intrinsic size of the image in pixels.
    fn size(&self) -> ImageSize;

    /// The raw interleaved RGBA bytes.
    fn as_rgba(&self) -> &[u8];

    /// The raw interleaved RGBA bytes, mutable.
    fn as_rgba_mut(&mut self) -> &mut [u8];
}

impl RgbaBuffer for Image<u8, 4> {
    fn size(&self) -> ImageSize {
        Image::size(self)
    }

    fn as_rgba(&self) -> &[u8] {
        self.as_slice()
    }

    fn as_rgba_mut(&mut self) -> &mut [u8] {
        self.as_slice_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::RgbaBuffer;
    use crate::{Image, ImageError, ImageSize};

    #[test]
    fn rgba_buffer_for_image() -> Result<(), ImageError> {
        let mut image = Image::<u8, 4>::from_size_val(ImageSize::from([2, 3]), 9)?;
        assert_eq!(RgbaBuffer::size(&image), ImageSize::from([2, 3]));
        assert_eq!(image.as_rgba().len(), 24);

        image.as_rgba_mut()[0] = 1;
        assert_eq!(image.get_pixel(0, 0, 0)?, 1);
        Ok(())
    }
}
