use core::fmt;

use image_shape::ShapeError;

use crate::sample::SampleKind;

/// Error that occurs when accessing the planes of an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlaneError {
    /// Computing the plane index failed.
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// The array does not store its samples as one buffer per plane.
    #[error("the array has no planar storage")]
    UnsupportedStorage,
    /// A buffer does not have the size or sample type of the array's planes.
    #[error(
        "plane buffer holds {found_len} samples of {found_kind}, \
         expected {expected_len} samples of {expected_kind}"
    )]
    BufferShapeMismatch {
        expected_kind: SampleKind,
        expected_len: usize,
        found_kind: SampleKind,
        found_len: usize,
    },
    /// The storage holds no buffer at a raster index that the shape describes.
    #[error("no plane buffer at raster index {raster}, storage has {slots}")]
    MissingBuffer { raster: usize, slots: usize },
    /// A number of planes that does not match the shape.
    #[error("{found} plane buffers given for a shape of {expected} planes")]
    PlaneCountMismatch { expected: usize, found: usize },
    /// The operation is deliberately not offered by the plane bridge.
    #[error("{0} is not implemented")]
    NotImplemented(Operation),
}

/// The categories of [`PlaneError`].
///
/// Each is either a caller bug, an internal inconsistency, or a capability the array lacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The shape can not be unfolded into planes.
    InvalidShape,
    /// A plane number beyond the plane count.
    PlaneOutOfRange,
    /// A coordinate or raster index beyond its axis, indicates inconsistent storage.
    CoordinateOutOfRange,
    /// The array has no planar storage, callers must fall back or refuse.
    UnsupportedStorage,
    /// A plane buffer of the wrong size or sample type.
    BufferShapeMismatch,
    /// Plane labels, insertion and deletion.
    NotImplemented,
}

/// The plane stack operations that are never supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    PlaneLabel,
    SetPlaneLabel,
    InsertPlane,
    DeletePlane,
}

impl PlaneError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlaneError::Shape(ShapeError::InvalidShape(_)) => ErrorKind::InvalidShape,
            PlaneError::Shape(ShapeError::PlaneOutOfRange { .. }) => ErrorKind::PlaneOutOfRange,
            PlaneError::Shape(ShapeError::CoordinateOutOfRange { .. })
            | PlaneError::Shape(ShapeError::CoordinateRank { .. })
            | PlaneError::MissingBuffer { .. } => ErrorKind::CoordinateOutOfRange,
            PlaneError::UnsupportedStorage => ErrorKind::UnsupportedStorage,
            PlaneError::BufferShapeMismatch { .. } => ErrorKind::BufferShapeMismatch,
            PlaneError::PlaneCountMismatch { .. } => ErrorKind::InvalidShape,
            PlaneError::NotImplemented(_) => ErrorKind::NotImplemented,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::PlaneLabel => "reading a plane label",
            Operation::SetPlaneLabel => "writing a plane label",
            Operation::InsertPlane => "inserting a plane",
            Operation::DeletePlane => "deleting a plane",
        })
    }
}
