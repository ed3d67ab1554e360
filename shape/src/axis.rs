//! Shapes with a fixed axis convention.
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::{ShapeDefect, ShapeError};
use crate::index::{self, PlaneCoordinate, PlanePositions};

/// The meaning of one axis of a sampled array.
///
/// The order of the variants is the canonical axis order of a plane stack. The plane itself is
/// spanned by `X` and `Y`, the remaining roles select planes with `Channel` varying fastest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisRole {
    /// Columns of a plane.
    X,
    /// Rows of a plane.
    Y,
    /// Color or spectral channels.
    Channel,
    /// Focal planes, slices of a volume.
    Depth,
    /// Time points.
    Time,
}

/// One axis of a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Axis {
    pub role: AxisRole,
    pub length: usize,
}

/// A validated shape of a sampled array.
///
/// The invariants are:
/// - There are at least two axes and the first two are [`AxisRole::X`] and [`AxisRole::Y`].
/// - All other axes strictly follow the canonical order of [`AxisRole`]. In particular, no role
///   appears twice.
/// - Every axis has a non-zero length.
/// - The total number of samples fits into a `usize`.
///
/// Checking the roles once, here, means that the index arithmetic never has to guess which
/// axis is which.
///
/// ```
/// use image_shape::{Axis, AxisRole, Shape};
///
/// let shape = Shape::new(&[
///     Axis { role: AxisRole::X, length: 32 },
///     Axis { role: AxisRole::Y, length: 16 },
///     Axis { role: AxisRole::Time, length: 4 },
/// ])?;
///
/// assert_eq!(shape.plane_len(), 512);
/// assert_eq!(shape.plane_count(), 4);
/// assert_eq!(shape.axis_of(AxisRole::Time), Some(2));
/// assert_eq!(shape.axis_of(AxisRole::Depth), None);
///
/// // Depth may not follow time.
/// assert!(Shape::new(&[
///     Axis { role: AxisRole::X, length: 32 },
///     Axis { role: AxisRole::Y, length: 16 },
///     Axis { role: AxisRole::Time, length: 4 },
///     Axis { role: AxisRole::Depth, length: 4 },
/// ]).is_err());
/// # Ok::<(), image_shape::ShapeError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    roles: Box<[AxisRole]>,
    lengths: Box<[usize]>,
    /// The product of all lengths, as proof of calculation basically.
    samples: usize,
}

impl Shape {
    /// The roles assigned by [`Shape::from_lengths`], by number of extra axes.
    const DEFAULT_ROLES: [&'static [AxisRole]; 4] = [
        &[],
        &[AxisRole::Depth],
        &[AxisRole::Depth, AxisRole::Time],
        &[AxisRole::Channel, AxisRole::Depth, AxisRole::Time],
    ];

    /// Validate a shape from explicitly tagged axes.
    pub fn new(axes: &[Axis]) -> Result<Self, ShapeError> {
        if axes.len() < 2 {
            return Err(ShapeDefect::TooFewAxes { rank: axes.len() }.into());
        }

        let mut previous = None;
        for (idx, axis) in axes.iter().enumerate() {
            if axis.length == 0 {
                return Err(ShapeDefect::EmptyAxis { axis: idx }.into());
            }

            let in_place = match idx {
                0 => axis.role == AxisRole::X,
                1 => axis.role == AxisRole::Y,
                _ => previous.is_some_and(|previous| axis.role > previous),
            };

            if !in_place {
                return Err(ShapeDefect::MisplacedAxis {
                    axis: idx,
                    role: axis.role,
                }
                .into());
            }

            previous = Some(axis.role);
        }

        let lengths: Box<[usize]> = axes.iter().map(|axis| axis.length).collect();
        let samples = index::checked_product(&lengths)?;

        Ok(Shape {
            roles: axes.iter().map(|axis| axis.role).collect(),
            lengths,
            samples,
        })
    }

    /// Create a shape from lengths alone, assigning the canonical roles.
    ///
    /// The first two axes are `X` and `Y`. Any further axes are, by their number:
    ///
    /// | extra axes | roles |
    /// |---|---|
    /// | 1 | `Depth` |
    /// | 2 | `Depth`, `Time` |
    /// | 3 | `Channel`, `Depth`, `Time` |
    ///
    /// More than five axes can not be interpreted and are rejected.
    ///
    /// ```
    /// use image_shape::{AxisRole, Shape};
    ///
    /// let shape = Shape::from_lengths(&[8, 8, 3, 2])?;
    /// assert_eq!(shape.roles(), &[AxisRole::X, AxisRole::Y, AxisRole::Depth, AxisRole::Time]);
    /// assert!(Shape::from_lengths(&[8, 8, 1, 1, 1, 1]).is_err());
    /// # Ok::<(), image_shape::ShapeError>(())
    /// ```
    pub fn from_lengths(lengths: &[usize]) -> Result<Self, ShapeError> {
        let extra = index::extra_axis_lengths(lengths)?;
        let extra_roles = *Self::DEFAULT_ROLES
            .get(extra.len())
            .ok_or(ShapeDefect::TooManyAxes {
                rank: lengths.len(),
            })?;

        let axes: Vec<Axis> = [AxisRole::X, AxisRole::Y]
            .iter()
            .chain(extra_roles)
            .zip(lengths)
            .map(|(&role, &length)| Axis { role, length })
            .collect();

        Shape::new(&axes)
    }

    /// A single plane of the given dimensions.
    pub fn with_width_and_height(width: usize, height: usize) -> Result<Self, ShapeError> {
        Shape::from_lengths(&[width, height])
    }

    /// The number of axes.
    pub fn rank(&self) -> usize {
        self.lengths.len()
    }

    /// The number of samples along a row of a plane.
    pub fn width(&self) -> usize {
        self.lengths[0]
    }

    /// The number of rows of a plane.
    pub fn height(&self) -> usize {
        self.lengths[1]
    }

    /// The lengths of all axes, starting with width and height.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// The lengths of the axes that select a plane.
    pub fn extra_lengths(&self) -> &[usize] {
        &self.lengths[2..]
    }

    pub fn roles(&self) -> &[AxisRole] {
        &self.roles
    }

    pub fn axes(&self) -> impl ExactSizeIterator<Item = Axis> + '_ {
        self.roles
            .iter()
            .zip(self.lengths.iter())
            .map(|(&role, &length)| Axis { role, length })
    }

    /// Find the index of the axis with a role, if any.
    pub fn axis_of(&self, role: AxisRole) -> Option<usize> {
        self.roles.iter().position(|&r| r == role)
    }

    /// The number of samples in one plane.
    pub fn plane_len(&self) -> usize {
        // Does not overflow, bounded by the total sample count.
        self.width() * self.height()
    }

    /// The number of samples in all planes.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// The number of planes this shape describes.
    ///
    /// This is the product of the extra axis lengths, exactly.
    pub fn plane_count(&self) -> usize {
        self.samples / self.plane_len()
    }

    /// Find the position of a plane along all extra axes.
    pub fn coordinate_of(&self, plane: usize) -> Result<PlaneCoordinate, ShapeError> {
        index::decompose_plane_number(self.extra_lengths(), plane)
    }

    /// Find the plane number at a position along all extra axes.
    pub fn plane_of(&self, coordinate: &[usize]) -> Result<usize, ShapeError> {
        index::compose_raster_index(self.extra_lengths(), coordinate)
    }

    /// Iterate all plane coordinates in plane number order.
    pub fn positions(&self) -> PlanePositions<'_> {
        PlanePositions::over_valid(self.extra_lengths(), self.plane_count())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lengths = self.lengths.iter();
        if let Some(first) = lengths.next() {
            write!(f, "{first}")?;
        }

        for length in lengths {
            write!(f, "x{length}")?;
        }

        Ok(())
    }
}

#[test]
fn role_order_validation() {
    use AxisRole::*;

    let axes = |roles: &[AxisRole]| -> Vec<Axis> {
        roles
            .iter()
            .map(|&role| Axis { role, length: 2 })
            .collect()
    };

    assert!(Shape::new(&axes(&[X, Y])).is_ok());
    assert!(Shape::new(&axes(&[X, Y, Channel, Depth, Time])).is_ok());
    assert!(Shape::new(&axes(&[X, Y, Channel, Time])).is_ok());

    assert_eq!(
        Shape::new(&axes(&[Y, X])),
        Err(ShapeError::InvalidShape(ShapeDefect::MisplacedAxis {
            axis: 0,
            role: Y
        }))
    );
    assert_eq!(
        Shape::new(&axes(&[X, Y, Depth, Depth])),
        Err(ShapeError::InvalidShape(ShapeDefect::MisplacedAxis {
            axis: 3,
            role: Depth
        }))
    );
    assert_eq!(
        Shape::new(&axes(&[X, Y, Time, Channel])),
        Err(ShapeError::InvalidShape(ShapeDefect::MisplacedAxis {
            axis: 3,
            role: Channel
        }))
    );
    assert_eq!(
        Shape::new(&axes(&[X, Y, X])),
        Err(ShapeError::InvalidShape(ShapeDefect::MisplacedAxis {
            axis: 2,
            role: X
        }))
    );
    assert_eq!(
        Shape::new(&axes(&[X])),
        Err(ShapeError::InvalidShape(ShapeDefect::TooFewAxes { rank: 1 }))
    );
}

#[test]
fn length_validation() {
    assert_eq!(
        Shape::from_lengths(&[4, 3, 0]),
        Err(ShapeError::InvalidShape(ShapeDefect::EmptyAxis { axis: 2 }))
    );
    assert_eq!(
        Shape::from_lengths(&[usize::MAX, 2, 1]),
        Err(ShapeError::InvalidShape(ShapeDefect::Overflow))
    );
    assert_eq!(
        Shape::from_lengths(&[1, 1, 1, 1, 1, 1]),
        Err(ShapeError::InvalidShape(ShapeDefect::TooManyAxes { rank: 6 }))
    );
}

#[test]
fn display_lengths() {
    use alloc::string::ToString;

    let shape = Shape::from_lengths(&[640, 480, 3]).expect("Valid shape");
    assert_eq!(shape.to_string(), "640x480x3");
}
