//! Plane number addressed access to an N-dimensional array.
use image_shape::{
    compose_raster_index, decompose_plane_number, extra_axis_lengths, plane_count_with,
    PlaneCoordinate, PlaneCountPolicy, ShapeError,
};
use log::{debug, trace, warn};

use crate::buffer::PlaneBuffer;
use crate::error::{Operation, PlaneError};
use crate::storage::{PlanarStorage, SampledArray};

/// Configures a [`PlaneAccess`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccessOptions {
    /// How to count planes when the samples are not a whole number of planes.
    pub plane_count: PlaneCountPolicy,
}

/// A flat stack of 2-D planes, as consumed by code that knows nothing of further axes.
///
/// A consumer iterates the planes `0..plane_count()` and treats each as an independent raster
/// of `plane_width() × plane_height()` samples.
pub trait PlaneStack {
    fn plane_count(&self) -> Result<usize, PlaneError>;

    fn plane_width(&self) -> usize;

    fn plane_height(&self) -> usize;

    /// Borrow the samples of one plane.
    fn plane(&self, plane: usize) -> Result<&PlaneBuffer, PlaneError>;

    /// Replace the samples of one plane, returning the previous samples.
    fn set_plane(&mut self, plane: usize, buffer: PlaneBuffer) -> Result<PlaneBuffer, PlaneError>;

    /// Plane labels are not stored, this always fails.
    fn plane_label(&self, _: usize) -> Result<&str, PlaneError> {
        Err(PlaneError::NotImplemented(Operation::PlaneLabel))
    }

    /// Plane labels are not stored, this always fails.
    fn set_plane_label(&mut self, _: usize, _: &str) -> Result<(), PlaneError> {
        Err(PlaneError::NotImplemented(Operation::SetPlaneLabel))
    }

    /// The number of planes is fixed by the shape, this always fails.
    fn insert_plane(&mut self, _: usize, _: PlaneBuffer) -> Result<(), PlaneError> {
        Err(PlaneError::NotImplemented(Operation::InsertPlane))
    }

    /// The number of planes is fixed by the shape, this always fails.
    fn delete_plane(&mut self, _: usize) -> Result<PlaneBuffer, PlaneError> {
        Err(PlaneError::NotImplemented(Operation::DeletePlane))
    }
}

/// Presents an N-dimensional array as a [`PlaneStack`].
///
/// Plane numbers are decomposed into a position along the extra axes of the array's shape,
/// which is then composed into the raster index of the plane's buffer in the planar storage.
/// The adapter holds no state besides the array. Reads borrow the buffer from the storage,
/// writes move the new buffer into the storage without copying samples.
///
/// The array may be owned, or borrowed with `&mut`.
///
/// ```
/// use image_planar::{PlaneAccess, PlaneBuffer, PlanarArray, SampleKind};
/// use image_shape::Shape;
///
/// let shape = Shape::from_lengths(&[4, 3, 5, 2])?;
/// let mut stack = PlaneAccess::new(PlanarArray::new(shape, SampleKind::U16));
/// assert_eq!(stack.plane_count()?, 10);
///
/// let previous = stack.set_plane(7, PlaneBuffer::from(vec![7u16; 12]))?;
/// assert_eq!(previous.as_slice::<u16>(), Some(&[0u16; 12][..]));
///
/// assert_eq!(stack.coordinate_of(7)?.as_slice(), &[2, 1]);
/// assert_eq!(stack.plane(7)?.as_slice::<u16>(), Some(&[7u16; 12][..]));
/// # Ok::<(), image_planar::PlaneError>(())
/// ```
pub struct PlaneAccess<A> {
    array: A,
    options: AccessOptions,
    /// Whether the array offered planar storage when the adapter was created.
    planar: bool,
}

impl<A: SampledArray> PlaneAccess<A> {
    /// Bridge an array with the default options.
    pub fn new(array: A) -> Self {
        Self::with_options(array, AccessOptions::default())
    }

    pub fn with_options(array: A, options: AccessOptions) -> Self {
        let planar = array.planar().is_some();
        let shape = array.shape();
        let total = array.total_samples();

        debug!(
            "bridging {} array of shape {} ({} samples), planar storage: {}",
            array.sample_kind(),
            shape,
            total,
            planar,
        );

        let plane_len = shape.plane_len();
        if options.plane_count == PlaneCountPolicy::Truncate && total % plane_len != 0 {
            warn!(
                "{} trailing samples do not form a plane of {}x{} and are ignored",
                total % plane_len,
                shape.width(),
                shape.height(),
            );
        }

        PlaneAccess {
            array,
            options,
            planar,
        }
    }

    /// The number of planes, derived from the total sample count of the array.
    pub fn plane_count(&self) -> Result<usize, PlaneError> {
        let count = plane_count_with(
            self.array.shape().lengths(),
            self.array.total_samples(),
            self.options.plane_count,
        )?;
        Ok(count)
    }

    pub fn plane_width(&self) -> usize {
        self.array.shape().width()
    }

    pub fn plane_height(&self) -> usize {
        self.array.shape().height()
    }

    /// The number of samples in each plane.
    pub fn plane_len(&self) -> usize {
        self.array.shape().plane_len()
    }

    /// Find the position of a plane along the extra axes of the array.
    ///
    /// When the array holds more samples than its shape describes, the planes past the shape
    /// are counted but have no position. They fail with [`ShapeError::PlaneOutOfRange`] that
    /// reports the same count as [`Self::plane_count`].
    pub fn coordinate_of(&self, plane: usize) -> Result<PlaneCoordinate, PlaneError> {
        let count = self.plane_count()?;
        let out_of_range = ShapeError::PlaneOutOfRange { plane, count };
        if plane >= count {
            return Err(out_of_range.into());
        }

        let extra = extra_axis_lengths(self.array.shape().lengths())?;
        decompose_plane_number(extra, plane).map_err(|err| match err {
            ShapeError::PlaneOutOfRange { .. } => PlaneError::from(out_of_range),
            err => PlaneError::from(err),
        })
    }

    /// Find the raster index of a plane's buffer in planar storage.
    pub fn raster_index(&self, plane: usize) -> Result<usize, PlaneError> {
        let coordinate = self.coordinate_of(plane)?;
        let extra = extra_axis_lengths(self.array.shape().lengths())?;
        Ok(compose_raster_index(extra, &coordinate)?)
    }

    /// Borrow the samples of one plane.
    ///
    /// Fails with [`PlaneError::UnsupportedStorage`] for any plane if the array has no planar
    /// storage.
    pub fn plane(&self, plane: usize) -> Result<&PlaneBuffer, PlaneError> {
        let storage = self.storage()?;
        let raster = self.raster_index(plane)?;
        trace!("get plane {plane} at raster index {raster}");

        storage
            .buffer_at(raster)
            .ok_or_else(|| PlaneError::MissingBuffer {
                raster,
                slots: storage.slots(),
            })
    }

    /// Replace the samples of one plane, returning the previous samples.
    ///
    /// The buffer must hold exactly one plane of samples of the array's sample kind. All checks
    /// are done before the storage is touched, on error the plane is unchanged.
    pub fn set_plane(
        &mut self,
        plane: usize,
        buffer: PlaneBuffer,
    ) -> Result<PlaneBuffer, PlaneError> {
        self.storage()?;
        let raster = self.raster_index(plane)?;

        let expected_kind = self.array.sample_kind();
        let expected_len = self.plane_len();
        if !buffer.fits(expected_kind, expected_len) {
            return Err(PlaneError::BufferShapeMismatch {
                expected_kind,
                expected_len,
                found_kind: buffer.kind(),
                found_len: buffer.len(),
            });
        }

        trace!("set plane {plane} at raster index {raster}");
        let storage = self.storage_mut()?;
        let slots = storage.slots();
        storage
            .replace_buffer_at(raster, buffer)
            .map_err(|_| PlaneError::MissingBuffer { raster, slots })
    }

    /// Whether the array offered planar storage when this adapter was created.
    pub fn has_planar_storage(&self) -> bool {
        self.planar
    }

    pub fn options(&self) -> AccessOptions {
        self.options
    }

    pub fn array(&self) -> &A {
        &self.array
    }

    /// Unwrap the array.
    pub fn into_inner(self) -> A {
        self.array
    }

    fn storage(&self) -> Result<&dyn PlanarStorage, PlaneError> {
        if !self.planar {
            return Err(PlaneError::UnsupportedStorage);
        }

        self.array.planar().ok_or(PlaneError::UnsupportedStorage)
    }

    fn storage_mut(&mut self) -> Result<&mut dyn PlanarStorage, PlaneError> {
        if !self.planar {
            return Err(PlaneError::UnsupportedStorage);
        }

        self.array
            .planar_mut()
            .ok_or(PlaneError::UnsupportedStorage)
    }
}

impl<A: SampledArray> PlaneStack for PlaneAccess<A> {
    fn plane_count(&self) -> Result<usize, PlaneError> {
        PlaneAccess::plane_count(self)
    }

    fn plane_width(&self) -> usize {
        PlaneAccess::plane_width(self)
    }

    fn plane_height(&self) -> usize {
        PlaneAccess::plane_height(self)
    }

    fn plane(&self, plane: usize) -> Result<&PlaneBuffer, PlaneError> {
        PlaneAccess::plane(self, plane)
    }

    fn set_plane(
        &mut self,
        plane: usize,
        buffer: PlaneBuffer,
    ) -> Result<PlaneBuffer, PlaneError> {
        PlaneAccess::set_plane(self, plane, buffer)
    }
}
