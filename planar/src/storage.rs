//! The capabilities an N-dimensional array offers to the plane bridge.
use image_shape::Shape;

use crate::buffer::PlaneBuffer;
use crate::sample::SampleKind;

/// An N-dimensional array of samples.
///
/// Only the shape and sample type are required. Whether the samples can be reached plane by
/// plane is an optional capability, see [`SampledArray::planar`]. Arrays that are sparse,
/// virtual, or chunked across planes do not offer it.
pub trait SampledArray {
    /// The shape, with the plane axes first.
    fn shape(&self) -> &Shape;

    /// The primitive type of every sample.
    fn sample_kind(&self) -> SampleKind;

    /// The total number of samples across all axes.
    ///
    /// This is what a plane count is derived from. The default is the product of the shape.
    fn total_samples(&self) -> usize {
        self.shape().sample_count()
    }

    /// Access the samples as one buffer per plane, if they are stored that way.
    fn planar(&self) -> Option<&dyn PlanarStorage> {
        None
    }

    /// Mutably access the samples as one buffer per plane, if they are stored that way.
    ///
    /// This should return `Some` exactly if [`SampledArray::planar`] does.
    fn planar_mut(&mut self) -> Option<&mut dyn PlanarStorage> {
        None
    }
}

/// Storage with one contiguous buffer per plane, addressed by raster index.
pub trait PlanarStorage {
    /// The number of plane buffers.
    fn slots(&self) -> usize;

    /// Borrow the buffer at a raster index.
    fn buffer_at(&self, raster: usize) -> Option<&PlaneBuffer>;

    /// Swap the buffer at a raster index, returning the previous one.
    ///
    /// When there is no such index the argument is returned as the error and nothing changes.
    fn replace_buffer_at(
        &mut self,
        raster: usize,
        buffer: PlaneBuffer,
    ) -> Result<PlaneBuffer, PlaneBuffer>;
}

impl PlanarStorage for Vec<PlaneBuffer> {
    fn slots(&self) -> usize {
        self.len()
    }

    fn buffer_at(&self, raster: usize) -> Option<&PlaneBuffer> {
        self.get(raster)
    }

    fn replace_buffer_at(
        &mut self,
        raster: usize,
        buffer: PlaneBuffer,
    ) -> Result<PlaneBuffer, PlaneBuffer> {
        match self.get_mut(raster) {
            Some(slot) => Ok(core::mem::replace(slot, buffer)),
            None => Err(buffer),
        }
    }
}

impl<A> SampledArray for &'_ mut A
where
    A: SampledArray + ?Sized,
{
    fn shape(&self) -> &Shape {
        A::shape(*self)
    }

    fn sample_kind(&self) -> SampleKind {
        A::sample_kind(*self)
    }

    fn total_samples(&self) -> usize {
        A::total_samples(*self)
    }

    fn planar(&self) -> Option<&dyn PlanarStorage> {
        A::planar(*self)
    }

    fn planar_mut(&mut self) -> Option<&mut dyn PlanarStorage> {
        A::planar_mut(*self)
    }
}

impl<A> SampledArray for Box<A>
where
    A: SampledArray + ?Sized,
{
    fn shape(&self) -> &Shape {
        A::shape(self)
    }

    fn sample_kind(&self) -> SampleKind {
        A::sample_kind(self)
    }

    fn total_samples(&self) -> usize {
        A::total_samples(self)
    }

    fn planar(&self) -> Option<&dyn PlanarStorage> {
        A::planar(self)
    }

    fn planar_mut(&mut self) -> Option<&mut dyn PlanarStorage> {
        A::planar_mut(self)
    }
}
