//! Conversions between plane numbers, plane coordinates and raster indices.
//!
//! All functions here are pure. They work on raw length slices so that they can be used before
//! any storage is materialized, and against storage that groups its axes differently from the
//! shape that produced a coordinate.
use alloc::vec::Vec;
use core::ops::Deref;

use crate::error::{ShapeDefect, ShapeError};

/// How to treat a sample count that is not a whole number of planes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaneCountPolicy {
    /// Round down, ignoring the trailing samples.
    ///
    /// This is what legacy plane consumers do and the default.
    #[default]
    Truncate,
    /// Reject the count with [`ShapeDefect::InexactSampleCount`].
    Exact,
}

/// The position of one plane, one entry per extra axis.
///
/// Entry `i` is the position along axis `i + 2` of the shape that produced it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlaneCoordinate(Vec<usize>);

/// Iterates the coordinates of all planes in plane number order.
///
/// Created by [`plane_positions`].
#[derive(Clone, Debug)]
pub struct PlanePositions<'lt> {
    lengths: &'lt [usize],
    next: Vec<usize>,
    remaining: usize,
}

/// Count the planes of `total_samples` samples arranged with a given shape.
///
/// This divides by the number of samples in one plane, `shape[0] * shape[1]`, rounding down. A
/// count that is not a whole number of planes is *silently truncated*, matching the legacy
/// consumers of plane stacks. Use [`plane_count_with`] to reject such counts instead.
///
/// Note that the result is not checked against the extra axes of the shape. A sample count
/// larger than the shape describes yields planes that can not be decomposed.
///
/// ```
/// use image_shape::plane_count;
///
/// assert_eq!(plane_count(&[4, 3], 12)?, 1);
/// assert_eq!(plane_count(&[4, 3, 5], 60)?, 5);
/// // The trailing 11 samples do not form a plane.
/// assert_eq!(plane_count(&[4, 3, 5], 71)?, 5);
/// # Ok::<(), image_shape::ShapeError>(())
/// ```
pub fn plane_count(shape: &[usize], total_samples: usize) -> Result<usize, ShapeError> {
    plane_count_with(shape, total_samples, PlaneCountPolicy::Truncate)
}

/// Count the planes of `total_samples` samples, with an explicit rounding policy.
///
/// ```
/// use image_shape::{plane_count_with, PlaneCountPolicy, ShapeDefect, ShapeError};
///
/// let exact = plane_count_with(&[4, 3, 5], 60, PlaneCountPolicy::Exact);
/// assert_eq!(exact, Ok(5));
///
/// let inexact = plane_count_with(&[4, 3, 5], 71, PlaneCountPolicy::Exact);
/// assert_eq!(
///     inexact,
///     Err(ShapeError::InvalidShape(ShapeDefect::InexactSampleCount {
///         total: 71,
///         plane_len: 12,
///     })),
/// );
/// ```
pub fn plane_count_with(
    shape: &[usize],
    total_samples: usize,
    policy: PlaneCountPolicy,
) -> Result<usize, ShapeError> {
    let plane_len = plane_len(shape)?;

    if policy == PlaneCountPolicy::Exact && total_samples % plane_len != 0 {
        return Err(ShapeDefect::InexactSampleCount {
            total: total_samples,
            plane_len,
        }
        .into());
    }

    Ok(total_samples / plane_len)
}

/// The lengths of all axes that select a plane, i.e. all but the first two.
///
/// A 2-D shape has no extra axes and consists of exactly one plane.
///
/// ```
/// use image_shape::extra_axis_lengths;
///
/// assert_eq!(extra_axis_lengths(&[640, 480, 3, 7])?, &[3, 7]);
/// assert!(extra_axis_lengths(&[640, 480])?.is_empty());
/// assert!(extra_axis_lengths(&[640]).is_err());
/// # Ok::<(), image_shape::ShapeError>(())
/// ```
pub fn extra_axis_lengths(shape: &[usize]) -> Result<&[usize], ShapeError> {
    match shape.get(2..) {
        Some(extra) => Ok(extra),
        None => Err(ShapeDefect::TooFewAxes { rank: shape.len() }.into()),
    }
}

/// Split a plane number into one position per extra axis.
///
/// The first of `extra_lengths` varies fastest, like the digits of a number written with a
/// different base for each digit.
///
/// ```
/// use image_shape::{decompose_plane_number, ShapeError};
///
/// // 7 = 2 + 1·5
/// let coordinate = decompose_plane_number(&[5, 2], 7)?;
/// assert_eq!(coordinate.as_slice(), &[2, 1]);
///
/// let beyond = decompose_plane_number(&[5, 2], 10);
/// assert_eq!(beyond, Err(ShapeError::PlaneOutOfRange { plane: 10, count: 10 }));
/// # Ok::<(), image_shape::ShapeError>(())
/// ```
pub fn decompose_plane_number(
    extra_lengths: &[usize],
    plane: usize,
) -> Result<PlaneCoordinate, ShapeError> {
    let count = checked_product(extra_lengths)?;

    if plane >= count {
        return Err(ShapeError::PlaneOutOfRange { plane, count });
    }

    let mut remaining = plane;
    let coordinate = extra_lengths
        .iter()
        .map(|&length| {
            let position = remaining % length;
            remaining /= length;
            position
        })
        .collect();

    debug_assert_eq!(remaining, 0, "Plane {} beyond {}", plane, count);
    Ok(PlaneCoordinate(coordinate))
}

/// Combine one position per axis into a single linear index.
///
/// This is the inverse of [`decompose_plane_number`] with the same `axis_lengths`. The lengths
/// are a separate argument from the shape that produced the coordinate, so the index can also
/// address storage that groups its axes differently.
///
/// ```
/// use image_shape::{compose_raster_index, ShapeError};
///
/// assert_eq!(compose_raster_index(&[5, 2], &[2, 1])?, 7);
/// assert_eq!(compose_raster_index(&[], &[])?, 0);
///
/// let beyond = compose_raster_index(&[5, 2], &[5, 0]);
/// assert_eq!(
///     beyond,
///     Err(ShapeError::CoordinateOutOfRange { axis: 0, position: 5, length: 5 }),
/// );
/// # Ok::<(), image_shape::ShapeError>(())
/// ```
pub fn compose_raster_index(
    axis_lengths: &[usize],
    coordinate: &[usize],
) -> Result<usize, ShapeError> {
    if axis_lengths.len() != coordinate.len() {
        return Err(ShapeError::CoordinateRank {
            expected: axis_lengths.len(),
            found: coordinate.len(),
        });
    }

    for (axis, (&position, &length)) in coordinate.iter().zip(axis_lengths).enumerate() {
        if position >= length {
            return Err(ShapeError::CoordinateOutOfRange {
                axis,
                position,
                length,
            });
        }
    }

    // Horner's scheme from the slowest axis, never computes the full product.
    coordinate
        .iter()
        .zip(axis_lengths)
        .rev()
        .try_fold(0usize, |index, (&position, &length)| {
            index.checked_mul(length)?.checked_add(position)
        })
        .ok_or(ShapeDefect::Overflow.into())
}

/// Iterate the coordinates of all planes with the given extra axis lengths.
///
/// The n-th item is the same as `decompose_plane_number(extra_lengths, n)`.
///
/// ```
/// use image_shape::plane_positions;
///
/// let all: Vec<_> = plane_positions(&[2, 2])?
///     .map(|coordinate| coordinate.into_vec())
///     .collect();
/// assert_eq!(all, [[0, 0], [1, 0], [0, 1], [1, 1]]);
/// # Ok::<(), image_shape::ShapeError>(())
/// ```
pub fn plane_positions(extra_lengths: &[usize]) -> Result<PlanePositions<'_>, ShapeError> {
    let count = checked_product(extra_lengths)?;
    Ok(PlanePositions::over_valid(extra_lengths, count))
}

/// The number of samples in one plane.
pub(crate) fn plane_len(shape: &[usize]) -> Result<usize, ShapeError> {
    let (width, height) = match shape {
        [width, height, ..] => (*width, *height),
        _ => return Err(ShapeDefect::TooFewAxes { rank: shape.len() }.into()),
    };

    if width == 0 {
        return Err(ShapeDefect::EmptyAxis { axis: 0 }.into());
    }

    if height == 0 {
        return Err(ShapeDefect::EmptyAxis { axis: 1 }.into());
    }

    width
        .checked_mul(height)
        .ok_or(ShapeDefect::Overflow.into())
}

pub(crate) fn checked_product(lengths: &[usize]) -> Result<usize, ShapeError> {
    lengths
        .iter()
        .try_fold(1usize, |acc, &length| acc.checked_mul(length))
        .ok_or(ShapeDefect::Overflow.into())
}

impl PlaneCoordinate {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for PlaneCoordinate {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl AsRef<[usize]> for PlaneCoordinate {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for PlaneCoordinate {
    fn from(positions: Vec<usize>) -> Self {
        PlaneCoordinate(positions)
    }
}

impl From<PlaneCoordinate> for Vec<usize> {
    fn from(coordinate: PlaneCoordinate) -> Self {
        coordinate.0
    }
}

impl<'lt> PlanePositions<'lt> {
    /// Iterate with a count that was already checked to be the product of the lengths.
    pub(crate) fn over_valid(lengths: &'lt [usize], count: usize) -> Self {
        PlanePositions {
            lengths,
            next: alloc::vec![0; lengths.len()],
            remaining: count,
        }
    }
}

impl Iterator for PlanePositions<'_> {
    type Item = PlaneCoordinate;

    fn next(&mut self) -> Option<PlaneCoordinate> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        let current = self.next.clone();

        // Odometer increment, the first axis is the fastest digit.
        for (position, &length) in self.next.iter_mut().zip(self.lengths) {
            *position += 1;
            if *position < length {
                break;
            }
            *position = 0;
        }

        Some(PlaneCoordinate(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PlanePositions<'_> {}

#[test]
fn plane_len_rejects_degenerate() {
    assert_eq!(
        plane_len(&[3]),
        Err(ShapeError::InvalidShape(ShapeDefect::TooFewAxes { rank: 1 }))
    );
    assert_eq!(
        plane_len(&[3, 0, 2]),
        Err(ShapeError::InvalidShape(ShapeDefect::EmptyAxis { axis: 1 }))
    );
    assert_eq!(
        plane_len(&[usize::MAX, 2]),
        Err(ShapeError::InvalidShape(ShapeDefect::Overflow))
    );
    assert_eq!(plane_len(&[4, 3, 0]), Ok(12), "Extra axes are not inspected");
}

#[test]
fn empty_extra_axis_has_no_planes() {
    assert_eq!(
        decompose_plane_number(&[3, 0], 0),
        Err(ShapeError::PlaneOutOfRange { plane: 0, count: 0 })
    );
    assert_eq!(plane_positions(&[3, 0]).map(|it| it.len()), Ok(0));
}

#[test]
fn compose_overflow() {
    let lengths = [usize::MAX, usize::MAX];
    assert_eq!(compose_raster_index(&lengths, &[1, 0]), Ok(1));
    assert_eq!(
        compose_raster_index(&lengths, &[0, 2]),
        Err(ShapeError::InvalidShape(ShapeDefect::Overflow))
    );
}
