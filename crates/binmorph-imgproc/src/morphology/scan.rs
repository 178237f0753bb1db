use super::{MorphologyError, StructuringElement};
use crate::binary::BinaryImage;
use crate::parallel::{ExecuteRowsExt, ExecutionStrategy};

/// The predicate a neighborhood scan applies.
///
/// Dilation and erosion share the scan; they only differ in the value the output
/// starts from and in which sample polarity flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanRule {
    /// Start from background, turn foreground if any enabled offset hits foreground.
    Dilate,
    /// Start from foreground, turn background if any enabled offset hits background.
    Erode,
}

impl ScanRule {
    /// Value every output pixel holds before the scan.
    pub fn initial(self) -> bool {
        matches!(self, ScanRule::Erode)
    }

    /// Sample value that flips the output pixel away from [`ScanRule::initial`].
    pub fn trigger(self) -> bool {
        matches!(self, ScanRule::Dilate)
    }
}

/// Run one neighborhood scan of `src` with `element`.
///
/// For every pixel `(x, y)` each enabled offset `(sx, sy)` of the element samples
/// `src` at `(x + sx - csx, y + sy - csy)`, where `(csx, csy)` is the element
/// anchor. Samples outside the plane read as background. The output pixel starts
/// at [`ScanRule::initial`] and is flipped as soon as one sample equals
/// [`ScanRule::trigger`].
///
/// The source plane is only read, so rows of the output are computed
/// independently according to `strategy`.
///
/// # Arguments
///
/// * `src` - The binary plane to scan.
/// * `element` - The structuring element.
/// * `rule` - Whether to dilate or erode.
/// * `strategy` - How output rows are distributed over threads.
///
/// # Returns
///
/// A new plane of the same size as `src`.
pub fn neighborhood_scan(
    src: &BinaryImage,
    element: &StructuringElement,
    rule: ScanRule,
    strategy: ExecutionStrategy,
) -> Result<BinaryImage, MorphologyError> {
    let initial = rule.initial();
    let trigger = rule.trigger();
    let offsets = element.offsets();

    let mut dst = BinaryImage::new(src.size(), initial);

    dst.as_slice_mut()
        .execute_rows_with(strategy, src.width(), |y, row| {
            let y = y as isize;
            for (x, out) in row.iter_mut().enumerate() {
                let x = x as isize;
                if offsets
                    .iter()
                    .any(|&(dx, dy)| src.sample(x + dx, y + dy) == trigger)
                {
                    *out = !initial;
                }
            }
        })?;

    Ok(dst)
}
