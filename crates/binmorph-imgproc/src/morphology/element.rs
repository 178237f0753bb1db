use super::MorphologyError;

/// Shapes of morphological [`StructuringElement`]s.
///
/// Every shape produces an element whose anchor is at `(width / 2, height / 2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElementShape {
    /// A filled square.
    ///
    /// Even sizes are padded to the next odd side, leaving the last row and
    /// column disabled, so the square sits on the top-left of the anchor.
    Square {
        /// Side length of the filled area.
        size: usize,
    },

    /// A filled rectangle, padded to odd sides the same way as [`ElementShape::Square`].
    Rectangle {
        /// Width of the filled area.
        width: usize,
        /// Height of the filled area.
        height: usize,
    },

    /// A plus shape: the centre row and the centre column.
    Cross {
        /// Side length of the square element.
        size: usize,
    },

    /// A diamond with side `2 * radius - 1`, enabled where `|dx| + |dy| < radius`.
    Diamond {
        /// Distance from the centre to a tip, plus one.
        radius: usize,
    },

    /// A disk with side `2 * radius - 1`, enabled where `dx^2 + dy^2 < radius^2`.
    Disk {
        /// Disk radius.
        radius: usize,
    },

    /// An octagon with side `2 * radius - 1`.
    ///
    /// The radius must be a multiple of 3.
    Octagon {
        /// Distance from the centre to a tip, plus one.
        radius: usize,
    },

    /// A straight bar of the given length and thickness, rotated by `theta` radians.
    Line {
        /// Length of the bar along its axis.
        length: f64,
        /// Thickness of the bar across its axis.
        thickness: f64,
        /// Rotation angle in radians.
        theta: f64,
    },
}

/// A binary structuring element.
///
/// The element is a row-major mask of `width * height` values, where `1` marks an
/// offset that takes part in the morphological predicate and `0` one that does
/// not. Offsets are relative to the anchor, `(width / 2, height / 2)`.
///
/// # Example
///
/// ```rust
/// use binmorph_imgproc::morphology::{ElementShape, StructuringElement};
///
/// let element = StructuringElement::from_shape(ElementShape::Cross { size: 3 }).unwrap();
/// assert_eq!(element.width(), 3);
/// assert_eq!(element.height(), 3);
/// assert_eq!(element.anchor(), (1, 1));
/// assert_eq!(element.data(), &[0, 1, 0, 1, 1, 1, 0, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "ElementParts", into = "ElementParts")
)]
pub struct StructuringElement {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl StructuringElement {
    /// Create a structuring element from a row-major 0/1 mask.
    ///
    /// # Arguments
    ///
    /// * `data` - The mask values, `width * height` of them, each 0 or 1.
    /// * `width` - The width of the element.
    /// * `height` - The height of the element.
    ///
    /// # Errors
    ///
    /// * [`MorphologyError::InvalidDimensions`] if `width` or `height` is zero, or
    ///   `width * height` overflows.
    /// * [`MorphologyError::InvalidMask`] if the mask length is not `width * height`
    ///   or a value other than 0 or 1 is present.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> Result<Self, MorphologyError> {
        let expected = area(width, height)?;
        if data.len() != expected || data.iter().any(|&v| v > 1) {
            return Err(MorphologyError::InvalidMask {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a structuring element from a shape.
    ///
    /// # Errors
    ///
    /// [`MorphologyError::InvalidDimensions`] if the shape parameters describe an
    /// empty element (zero sizes or radii, non-positive line extents), an element
    /// too large to address, or an octagon whose radius is not a multiple of 3.
    pub fn from_shape(shape: ElementShape) -> Result<Self, MorphologyError> {
        match shape {
            ElementShape::Square { size } => rectangle(size, size),
            ElementShape::Rectangle { width, height } => rectangle(width, height),
            ElementShape::Cross { size } => cross(size),
            ElementShape::Diamond { radius } => {
                radial(radius, |dx, dy| dx.abs() + dy.abs() < radius as isize)
            }
            ElementShape::Disk { radius } => {
                let r2 = radius
                    .checked_mul(radius)
                    .and_then(|v| isize::try_from(v).ok())
                    .ok_or(MorphologyError::InvalidDimensions {
                        width: radius,
                        height: radius,
                    })?;
                radial(radius, |dx, dy| dx * dx + dy * dy < r2)
            }
            ElementShape::Octagon { radius } => {
                if radius % 3 != 0 {
                    return Err(MorphologyError::InvalidDimensions {
                        width: radius,
                        height: radius,
                    });
                }
                let r = radius as isize;
                radial(radius, |dx, dy| {
                    dx.abs() < r / 3 || dy.abs() < r / 3 || dx.abs() + dy.abs() < r
                })
            }
            ElementShape::Line {
                length,
                thickness,
                theta,
            } => line(length, thickness, theta),
        }
    }

    /// Get a reference to the mask data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the width of the element.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the element.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the anchor `(x, y)` of the element.
    pub fn anchor(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Whether the offset at column `sx`, row `sy` takes part in the predicate.
    pub fn is_enabled(&self, sx: usize, sy: usize) -> bool {
        sx < self.width && sy < self.height && self.data[sy * self.width + sx] == 1
    }

    /// Number of enabled offsets.
    pub fn num_enabled(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    /// Enabled offsets relative to the anchor, in row-major order.
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        let (csx, csy) = self.anchor();
        (0..self.height)
            .flat_map(|sy| (0..self.width).map(move |sx| (sx, sy)))
            .filter(|&(sx, sy)| self.is_enabled(sx, sy))
            .map(|(sx, sy)| (sx as isize - csx as isize, sy as isize - csy as isize))
            .collect()
    }
}

/// Serialized form of a [`StructuringElement`], validated on the way in.
#[cfg(feature = "serde")]
#[doc(hidden)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ElementParts {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<ElementParts> for StructuringElement {
    type Error = MorphologyError;

    fn try_from(parts: ElementParts) -> Result<Self, Self::Error> {
        StructuringElement::new(parts.data, parts.width, parts.height)
    }
}

#[cfg(feature = "serde")]
impl From<StructuringElement> for ElementParts {
    fn from(element: StructuringElement) -> Self {
        ElementParts {
            data: element.data,
            width: element.width,
            height: element.height,
        }
    }
}

/// Number of cells of a `width` x `height` element, rejecting empty or overflowing sizes.
fn area(width: usize, height: usize) -> Result<usize, MorphologyError> {
    match width.checked_mul(height) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(MorphologyError::InvalidDimensions { width, height }),
    }
}

// usize::MAX is odd, so this never wraps
fn odd_ceil(n: usize) -> usize {
    n | 1
}

fn rectangle(width: usize, height: usize) -> Result<StructuringElement, MorphologyError> {
    if width == 0 || height == 0 {
        return Err(MorphologyError::InvalidDimensions { width, height });
    }

    let (w, h) = (odd_ceil(width), odd_ceil(height));
    area(w, h)?;
    let data = (0..h)
        .flat_map(|y| (0..w).map(move |x| u8::from(x < width && y < height)))
        .collect();

    StructuringElement::new(data, w, h)
}

fn cross(size: usize) -> Result<StructuringElement, MorphologyError> {
    let mut data = vec![0u8; area(size, size)?];
    let mid = size / 2;

    // fill horizontal line
    for j in 0..size {
        data[mid * size + j] = 1;
    }

    // fill vertical line
    for i in 0..size {
        data[i * size + mid] = 1;
    }

    StructuringElement::new(data, size, size)
}

/// Square element of side `2 * radius - 1`, enabled where `inside(dx, dy)` holds for
/// the offset from the centre cell.
fn radial(
    radius: usize,
    inside: impl Fn(isize, isize) -> bool,
) -> Result<StructuringElement, MorphologyError> {
    let w = match radius.checked_mul(2) {
        Some(d) if radius > 0 && d - 1 <= isize::MAX as usize => d - 1,
        _ => {
            return Err(MorphologyError::InvalidDimensions {
                width: radius,
                height: radius,
            })
        }
    };
    area(w, w)?;
    let c = (w / 2) as isize;
    let data = (0..w as isize)
        .flat_map(|y| (0..w as isize).map(move |x| (x, y)))
        .map(|(x, y)| u8::from(inside(x - c, y - c)))
        .collect();

    StructuringElement::new(data, w, w)
}

fn line(length: f64, thickness: f64, theta: f64) -> Result<StructuringElement, MorphologyError> {
    let finite = length.is_finite() && thickness.is_finite() && theta.is_finite();
    if !finite || length <= 0.0 || thickness <= 0.0 {
        return Err(MorphologyError::InvalidDimensions {
            width: 0,
            height: 0,
        });
    }

    let (sin, cos) = theta.sin_cos();
    let (half_len, half_thick) = (length / 2.0, thickness / 2.0);

    // half extents of the rotated bar along each axis
    let ex = half_len * cos.abs() + half_thick * sin.abs();
    let ey = half_len * sin.abs() + half_thick * cos.abs();
    let side = |e: f64| {
        (e.ceil() as usize)
            .checked_mul(2)
            .map(|d| d.saturating_sub(1).max(1))
    };
    let (w, h) = match (side(ex), side(ey)) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(MorphologyError::InvalidDimensions {
                width: usize::MAX,
                height: usize::MAX,
            })
        }
    };
    area(w, h)?;

    let ox = (w / 2) as f64 + 0.5;
    let oy = (h / 2) as f64 + 0.5;

    let mut data = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            let dx = (x as f64 + 0.5) - ox;
            let dy = (y as f64 + 0.5) - oy;
            let rx = dx * cos - dy * sin;
            let ry = dx * sin + dy * cos;
            data.push(u8::from(rx.abs() < half_len && ry.abs() < half_thick));
        }
    }

    StructuringElement::new(data, w, h)
}
