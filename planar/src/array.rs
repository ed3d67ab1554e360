use image_shape::Shape;

use crate::buffer::PlaneBuffer;
use crate::error::PlaneError;
use crate::sample::SampleKind;
use crate::storage::{PlanarStorage, SampledArray};

/// An in-memory array that stores each plane in its own buffer.
///
/// Buffers are kept in raster index order, which for this storage is the plane number order
/// of the shape.
///
/// ```
/// use image_planar::{PlanarArray, SampleKind};
/// use image_shape::Shape;
///
/// let shape = Shape::from_lengths(&[4, 3, 5])?;
/// let array = PlanarArray::new(shape, SampleKind::U8);
///
/// assert_eq!(array.planes().len(), 5);
/// assert!(array.planes().iter().all(|plane| plane.len() == 12));
/// # Ok::<(), image_shape::ShapeError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarArray {
    shape: Shape,
    kind: SampleKind,
    planes: Vec<PlaneBuffer>,
}

impl PlanarArray {
    /// Allocate an array with all samples zero.
    pub fn new(shape: Shape, kind: SampleKind) -> Self {
        let planes = (0..shape.plane_count())
            .map(|_| PlaneBuffer::zeroed(kind, shape.plane_len()))
            .collect();

        PlanarArray {
            shape,
            kind,
            planes,
        }
    }

    /// Assemble an array from existing plane buffers, in raster index order.
    ///
    /// There must be one buffer for each plane of the shape, each holding one plane of samples of
    /// the given kind.
    pub fn from_planes(
        shape: Shape,
        kind: SampleKind,
        planes: Vec<PlaneBuffer>,
    ) -> Result<Self, PlaneError> {
        if planes.len() != shape.plane_count() {
            return Err(PlaneError::PlaneCountMismatch {
                expected: shape.plane_count(),
                found: planes.len(),
            });
        }

        let plane_len = shape.plane_len();
        if let Some(bad) = planes.iter().find(|plane| !plane.fits(kind, plane_len)) {
            return Err(PlaneError::BufferShapeMismatch {
                expected_kind: kind,
                expected_len: plane_len,
                found_kind: bad.kind(),
                found_len: bad.len(),
            });
        }

        Ok(PlanarArray {
            shape,
            kind,
            planes,
        })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> SampleKind {
        self.kind
    }

    /// The plane buffers, in raster index order.
    pub fn planes(&self) -> &[PlaneBuffer] {
        &self.planes
    }

    pub fn into_planes(self) -> Vec<PlaneBuffer> {
        self.planes
    }
}

impl SampledArray for PlanarArray {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn sample_kind(&self) -> SampleKind {
        self.kind
    }

    fn planar(&self) -> Option<&dyn PlanarStorage> {
        Some(&self.planes)
    }

    fn planar_mut(&mut self) -> Option<&mut dyn PlanarStorage> {
        Some(&mut self.planes)
    }
}
