use crate::axis::AxisRole;

/// Error that occurs when converting between plane numbers, coordinates and raster indices.
///
/// All of these indicate a caller bug or an inconsistent shape. None of them are transient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ShapeError {
    /// The shape can not be unfolded into planes.
    #[error("invalid shape: {0}")]
    InvalidShape(ShapeDefect),
    /// The plane number is not below the number of planes.
    #[error("plane {plane} is out of range for {count} planes")]
    PlaneOutOfRange { plane: usize, count: usize },
    /// A coordinate entry is not below the length of its axis.
    #[error("position {position} on axis {axis} is out of range for length {length}")]
    CoordinateOutOfRange {
        axis: usize,
        position: usize,
        length: usize,
    },
    /// A coordinate does not have one entry per axis.
    #[error("coordinate has {found} entries for {expected} axes")]
    CoordinateRank { expected: usize, found: usize },
}

/// The reason a shape was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ShapeDefect {
    #[error("{rank} axes given, a plane needs at least 2")]
    TooFewAxes { rank: usize },
    #[error("{rank} axes given, only up to 5 have a default role")]
    TooManyAxes { rank: usize },
    #[error("axis {axis} has length zero")]
    EmptyAxis { axis: usize },
    #[error("axis {axis} can not have the role {role:?}")]
    MisplacedAxis { axis: usize, role: AxisRole },
    #[error("{total} samples are not a whole number of planes with {plane_len} samples")]
    InexactSampleCount { total: usize, plane_len: usize },
    #[error("the number of samples overflows")]
    Overflow,
}

impl From<ShapeDefect> for ShapeError {
    fn from(defect: ShapeDefect) -> Self {
        ShapeError::InvalidShape(defect)
    }
}
