//! Owned sample buffers of single planes, with their type erased to a tag.
use crate::sample::{Sample, SampleKind};

/// The samples of one plane, tagged by their primitive type.
///
/// A buffer is moved into and out of planar storage as a whole. Exchanging planes never copies
/// the samples.
///
/// ```
/// use image_planar::{PlaneBuffer, SampleKind};
///
/// let buffer = PlaneBuffer::from(vec![0u16; 12]);
/// assert_eq!(buffer.kind(), SampleKind::U16);
/// assert_eq!(buffer.len(), 12);
/// assert_eq!(buffer.as_bytes().len(), 24);
///
/// assert!(buffer.as_slice::<u8>().is_none());
/// assert_eq!(buffer.into_vec::<u16>(), Ok(vec![0u16; 12]));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum PlaneBuffer {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Evaluate an expression with the typed samples of any buffer variant.
macro_rules! with_samples {
    ($buffer:expr, $samples:ident => $body:expr) => {
        match $buffer {
            PlaneBuffer::U8($samples) => $body,
            PlaneBuffer::I8($samples) => $body,
            PlaneBuffer::U16($samples) => $body,
            PlaneBuffer::I16($samples) => $body,
            PlaneBuffer::U32($samples) => $body,
            PlaneBuffer::I32($samples) => $body,
            PlaneBuffer::F32($samples) => $body,
            PlaneBuffer::F64($samples) => $body,
        }
    };
}

impl PlaneBuffer {
    /// Take ownership of typed samples.
    pub fn new<T: Sample>(samples: Vec<T>) -> Self {
        T::into_buffer(samples)
    }

    /// Allocate `len` samples of a kind, all zero.
    pub fn zeroed(kind: SampleKind, len: usize) -> Self {
        match kind {
            SampleKind::U8 => PlaneBuffer::U8(vec![0; len]),
            SampleKind::I8 => PlaneBuffer::I8(vec![0; len]),
            SampleKind::U16 => PlaneBuffer::U16(vec![0; len]),
            SampleKind::I16 => PlaneBuffer::I16(vec![0; len]),
            SampleKind::U32 => PlaneBuffer::U32(vec![0; len]),
            SampleKind::I32 => PlaneBuffer::I32(vec![0; len]),
            SampleKind::F32 => PlaneBuffer::F32(vec![0.0; len]),
            SampleKind::F64 => PlaneBuffer::F64(vec![0.0; len]),
        }
    }

    /// The primitive type of the samples.
    pub fn kind(&self) -> SampleKind {
        match self {
            PlaneBuffer::U8(_) => SampleKind::U8,
            PlaneBuffer::I8(_) => SampleKind::I8,
            PlaneBuffer::U16(_) => SampleKind::U16,
            PlaneBuffer::I16(_) => SampleKind::I16,
            PlaneBuffer::U32(_) => SampleKind::U32,
            PlaneBuffer::I32(_) => SampleKind::I32,
            PlaneBuffer::F32(_) => SampleKind::F32,
            PlaneBuffer::F64(_) => SampleKind::F64,
        }
    }

    /// The number of samples, not bytes.
    pub fn len(&self) -> usize {
        with_samples!(self, samples => samples.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the samples, if they have type `T`.
    pub fn as_slice<T: Sample>(&self) -> Option<&[T]> {
        T::as_samples(self)
    }

    /// Mutably view the samples, if they have type `T`.
    ///
    /// The length of the buffer can not be changed through this view.
    pub fn as_mut_slice<T: Sample>(&mut self) -> Option<&mut [T]> {
        T::as_samples_mut(self)
    }

    /// Unwrap the typed samples, or return the buffer if it holds another type.
    pub fn into_vec<T: Sample>(self) -> Result<Vec<T>, Self> {
        T::from_buffer(self)
    }

    /// View the samples as native endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        with_samples!(self, samples => bytemuck::cast_slice(samples.as_slice()))
    }

    /// Mutably view the samples as native endian bytes.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        with_samples!(self, samples => bytemuck::cast_slice_mut(samples.as_mut_slice()))
    }

    /// Check this buffer can serve as a plane of `len` samples of a kind.
    pub(crate) fn fits(&self, kind: SampleKind, len: usize) -> bool {
        self.kind() == kind && self.len() == len
    }
}

impl<T: Sample> From<Vec<T>> for PlaneBuffer {
    fn from(samples: Vec<T>) -> Self {
        PlaneBuffer::new(samples)
    }
}

#[test]
fn zeroed_buffers() {
    let kinds = [
        SampleKind::U8,
        SampleKind::I8,
        SampleKind::U16,
        SampleKind::I16,
        SampleKind::U32,
        SampleKind::I32,
        SampleKind::F32,
        SampleKind::F64,
    ];

    for kind in kinds {
        let buffer = PlaneBuffer::zeroed(kind, 12);
        assert_eq!(buffer.kind(), kind);
        assert_eq!(buffer.len(), 12);
        assert_eq!(buffer.as_bytes().len(), 12 * kind.size());
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
        assert!(buffer.fits(kind, 12));
        assert!(!buffer.fits(kind, 11));
    }
}

#[test]
fn typed_access() {
    let mut buffer = PlaneBuffer::new(vec![1.0f32, 2.0, 3.0]);
    assert!(buffer.as_mut_slice::<u32>().is_none());

    buffer.as_mut_slice::<f32>().expect("Float buffer")[1] = 4.0;
    assert_eq!(buffer.as_slice::<f32>(), Some(&[1.0f32, 4.0, 3.0][..]));

    let bytes = buffer.as_mut_bytes();
    bytes[..4].copy_from_slice(&8.0f32.to_ne_bytes());
    assert_eq!(buffer.as_slice::<f32>(), Some(&[8.0f32, 4.0, 3.0][..]));

    let buffer = match buffer.into_vec::<i32>() {
        Ok(_) => panic!("Converted to the wrong type"),
        Err(buffer) => buffer,
    };
    assert_eq!(buffer.kind(), SampleKind::F32);
}
