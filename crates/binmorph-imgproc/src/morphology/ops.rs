use binmorph_image::RgbaBuffer;
use log::{debug, trace};

use super::scan::{neighborhood_scan, ScanRule};
use super::{MorphologyError, StructuringElement};
use crate::binary::BinaryImage;
use crate::parallel::ExecutionStrategy;

/// Dilate a binary RGBA image in place using a [`StructuringElement`].
///
/// A pixel becomes foreground if any enabled offset of the element lands on a
/// foreground pixel. Pixels outside the image count as background.
///
/// The binary state of each pixel is read from its red channel (nonzero means
/// foreground). On return the red, green and blue channels hold 255 or 0 and the
/// alpha channel is unchanged. The image dimensions are taken from the image
/// itself.
///
/// # Arguments
///
/// * `image` - The image to dilate, modified in place.
/// * `element` - The morphological structuring element.
///
/// # Errors
///
/// [`MorphologyError::InvalidImage`] if the image buffer does not hold
/// `width * height * 4` bytes; the image is left untouched in that case.
///
/// # Example
///
/// ```
/// use binmorph_image::{Image, ImageSize};
/// use binmorph_imgproc::morphology::{dilate, StructuringElement};
///
/// let mut data = vec![0u8; 3 * 3 * 4];
/// data[4 * 4] = 255;
/// let mut image = Image::<u8, 4>::new(ImageSize { width: 3, height: 3 }, data).unwrap();
///
/// let element = StructuringElement::new(vec![1; 9], 3, 3).unwrap();
/// dilate(&mut image, &element).unwrap();
///
/// assert!(image.as_slice().chunks_exact(4).all(|px| px[..3] == [255, 255, 255]));
/// ```
pub fn dilate<B>(image: &mut B, element: &StructuringElement) -> Result<(), MorphologyError>
where
    B: RgbaBuffer + ?Sized,
{
    dilate_with(image, element, ExecutionStrategy::default())
}

/// Erode a binary RGBA image in place using a [`StructuringElement`].
///
/// A pixel stays foreground only if every enabled offset of the element lands
/// on a foreground pixel. Pixels outside the image count as background, so
/// foreground touching the border erodes away whenever the element reaches past
/// it.
///
/// Decoding, encoding and error behavior are the same as for [`dilate`].
pub fn erode<B>(image: &mut B, element: &StructuringElement) -> Result<(), MorphologyError>
where
    B: RgbaBuffer + ?Sized,
{
    erode_with(image, element, ExecutionStrategy::default())
}

/// Opening: erosion followed by dilation.
///
/// Removes foreground specks smaller than the element.
pub fn open<B>(image: &mut B, element: &StructuringElement) -> Result<(), MorphologyError>
where
    B: RgbaBuffer + ?Sized,
{
    open_with(image, element, ExecutionStrategy::default())
}

/// Closing: dilation followed by erosion.
///
/// Fills background gaps smaller than the element.
pub fn close<B>(image: &mut B, element: &StructuringElement) -> Result<(), MorphologyError>
where
    B: RgbaBuffer + ?Sized,
{
    close_with(image, element, ExecutionStrategy::default())
}

/// [`dilate`] with an explicit [`ExecutionStrategy`].
pub fn dilate_with<B>(
    image: &mut B,
    element: &StructuringElement,
    strategy: ExecutionStrategy,
) -> Result<(), MorphologyError>
where
    B: RgbaBuffer + ?Sized,
{
    apply(image, element, &[ScanRule::Dilate], strategy)
}

/// [`erode`] with an explicit [`ExecutionStrategy`].
pub fn erode_with<B>(
    image: &mut B,
    element: &StructuringElement,
    strategy: ExecutionStrategy,
) -> Result<(), MorphologyError>
where
    B: RgbaBuffer + ?Sized,
{
    apply(image, element, &[ScanRule::Erode], strategy)
}

/// [`open`] with an explicit [`ExecutionStrategy`].
pub fn open_with<B>(
    image: &mut B,
    element: &StructuringElement,
    strategy: ExecutionStrategy,
) -> Result<(), MorphologyError>
where
    B: RgbaBuffer + ?Sized,
{
    apply(image, element, &[ScanRule::Erode, ScanRule::Dilate], strategy)
}

/// [`close`] with an explicit [`ExecutionStrategy`].
pub fn close_with<B>(
    image: &mut B,
    element: &StructuringElement,
    strategy: ExecutionStrategy,
) -> Result<(), MorphologyError>
where
    B: RgbaBuffer + ?Sized,
{
    apply(image, element, &[ScanRule::Dilate, ScanRule::Erode], strategy)
}

// decode once, chain the scans on the binary plane, encode once
fn apply<B>(
    image: &mut B,
    element: &StructuringElement,
    rules: &[ScanRule],
    strategy: ExecutionStrategy,
) -> Result<(), MorphologyError>
where
    B: RgbaBuffer + ?Sized,
{
    let mut plane = BinaryImage::from_rgba(&*image)?;

    debug!(
        "{:?} on {} with {}x{} element ({} enabled), {:?}",
        rules,
        plane.size(),
        element.width(),
        element.height(),
        element.num_enabled(),
        strategy,
    );

    for &rule in rules {
        plane = neighborhood_scan(&plane, element, rule, strategy)?;
        trace!("{:?}: {} foreground pixels", rule, plane.foreground_count());
    }

    plane.write_rgba(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::ElementShape;
    use binmorph_image::{Image, ImageData, ImageSize};

    /// RGBA image from per-pixel binary states with a distinct alpha per pixel.
    fn rgba_from_bits(width: usize, height: usize, bits: &[u8]) -> Image<u8, 4> {
        let data = bits
            .iter()
            .enumerate()
            .flat_map(|(i, &b)| {
                let v = if b != 0 { 255 } else { 0 };
                [v, v, v, i as u8]
            })
            .collect();
        Image::new(ImageSize { width, height }, data).unwrap()
    }

    fn bits(image: &Image<u8, 4>) -> Vec<u8> {
        image
            .as_slice()
            .chunks_exact(4)
            .map(|px| u8::from(px[0] != 0))
            .collect()
    }

    fn full_square(size: usize) -> StructuringElement {
        StructuringElement::from_shape(ElementShape::Square { size }).unwrap()
    }

    #[test]
    fn test_dilate_single_center() -> Result<(), MorphologyError> {
        let mut image = rgba_from_bits(3, 3, &[0, 0, 0, 0, 1, 0, 0, 0, 0]);
        dilate(&mut image, &full_square(3))?;
        assert_eq!(bits(&image), vec![1; 9]);
        Ok(())
    }

    #[test]
    fn test_erode_single_center() -> Result<(), MorphologyError> {
        let mut image = rgba_from_bits(3, 3, &[0, 0, 0, 0, 1, 0, 0, 0, 0]);
        erode(&mut image, &full_square(3))?;
        assert_eq!(bits(&image), vec![0; 9]);
        Ok(())
    }

    #[test]
    fn test_identity_element() -> Result<(), MorphologyError> {
        let src = rgba_from_bits(4, 2, &[1, 0, 0, 1, 0, 1, 1, 0]);
        let element = StructuringElement::new(vec![1], 1, 1)?;

        let mut dilated = src.clone();
        dilate(&mut dilated, &element)?;
        assert_eq!(dilated, src);

        let mut eroded = src.clone();
        erode(&mut eroded, &element)?;
        assert_eq!(eroded, src);
        Ok(())
    }

    #[test]
    fn test_all_zero_element() -> Result<(), MorphologyError> {
        let src = rgba_from_bits(3, 2, &[1, 0, 1, 0, 1, 0]);
        let element = StructuringElement::new(vec![0; 9], 3, 3)?;

        let mut dilated = src.clone();
        dilate(&mut dilated, &element)?;
        assert_eq!(bits(&dilated), vec![0; 6]);

        let mut eroded = src.clone();
        erode(&mut eroded, &element)?;
        assert_eq!(bits(&eroded), vec![1; 6]);
        Ok(())
    }

    #[test]
    fn test_write_back_encoding() -> Result<(), MorphologyError> {
        // red decides the state, green/blue are normalised, alpha survives
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let mut image = Image::<u8, 4>::new(size, vec![7, 1, 2, 33, 0, 200, 100, 44]).unwrap();
        let element = StructuringElement::new(vec![1], 1, 1)?;
        erode(&mut image, &element)?;
        assert_eq!(image.as_slice(), &[255, 255, 255, 33, 0, 0, 0, 44]);
        Ok(())
    }

    #[test]
    fn test_invalid_image_is_untouched() {
        let mut bytes = vec![255u8; 10];
        let mut view = ImageData::new(2, 2, &mut bytes);
        let element = full_square(3);
        assert_eq!(
            dilate(&mut view, &element),
            Err(MorphologyError::InvalidImage {
                expected: 16,
                actual: 10
            })
        );
        assert_eq!(bytes, vec![255u8; 10]);
    }

    #[test]
    fn test_image_data_view() -> Result<(), MorphologyError> {
        let mut bytes = vec![0u8; 3 * 4];
        bytes[4] = 255;
        let mut view = ImageData::new(3, 1, &mut bytes);
        let element = StructuringElement::new(vec![1, 1, 1], 3, 1)?;
        dilate(&mut view, &element)?;
        assert!(bytes.chunks_exact(4).all(|px| px[0] == 255));
        Ok(())
    }

    #[test]
    fn test_open_removes_speck() -> Result<(), MorphologyError> {
        #[rustfmt::skip]
        let mut image = rgba_from_bits(5, 5, &[
            1, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
        ]);
        open(&mut image, &full_square(3))?;
        assert_eq!(bits(&image), vec![0; 25]);
        Ok(())
    }

    #[test]
    fn test_close_fills_hole() -> Result<(), MorphologyError> {
        #[rustfmt::skip]
        let mut image = rgba_from_bits(5, 5, &[
            0, 0, 0, 0, 0,
            0, 1, 1, 1, 0,
            0, 1, 0, 1, 0,
            0, 1, 1, 1, 0,
            0, 0, 0, 0, 0,
        ]);
        close(&mut image, &full_square(3))?;
        #[rustfmt::skip]
        let expected = vec![
            0, 0, 0, 0, 0,
            0, 1, 1, 1, 0,
            0, 1, 1, 1, 0,
            0, 1, 1, 1, 0,
            0, 0, 0, 0, 0,
        ];
        assert_eq!(bits(&image), expected);
        Ok(())
    }

    #[test]
    fn test_fixed_strategy_error() {
        let mut image = rgba_from_bits(2, 2, &[1, 0, 0, 1]);
        let res = dilate_with(&mut image, &full_square(3), ExecutionStrategy::Fixed(0));
        assert_eq!(
            res,
            Err(MorphologyError::Parallel(
                crate::parallel::ParallelError::InvalidThreadCount(0)
            ))
        );
    }
}
