//! The primitive sample types a plane can hold.
use core::fmt;

use crate::buffer::PlaneBuffer;

/// The primitive type of every sample in a plane, untyped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SampleKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

/// A primitive type that can be stored in a [`PlaneBuffer`].
///
/// This trait is sealed, the set of sample types is closed by the variants of [`SampleKind`].
pub trait Sample: bytemuck::Pod + sealed::Sealed {
    /// The tag of buffers holding this type.
    const KIND: SampleKind;

    #[doc(hidden)]
    fn into_buffer(samples: Vec<Self>) -> PlaneBuffer;
    #[doc(hidden)]
    fn from_buffer(buffer: PlaneBuffer) -> Result<Vec<Self>, PlaneBuffer>;
    #[doc(hidden)]
    fn as_samples(buffer: &PlaneBuffer) -> Option<&[Self]>;
    #[doc(hidden)]
    fn as_samples_mut(buffer: &mut PlaneBuffer) -> Option<&mut [Self]>;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! sample_kind {
    ($(($variant:ident, $type:ty)),*) => {
        $(impl sealed::Sealed for $type {}

          impl Sample for $type {
              const KIND: SampleKind = SampleKind::$variant;

              fn into_buffer(samples: Vec<Self>) -> PlaneBuffer {
                  PlaneBuffer::$variant(samples)
              }

              fn from_buffer(buffer: PlaneBuffer) -> Result<Vec<Self>, PlaneBuffer> {
                  match buffer {
                      PlaneBuffer::$variant(samples) => Ok(samples),
                      other => Err(other),
                  }
              }

              fn as_samples(buffer: &PlaneBuffer) -> Option<&[Self]> {
                  match buffer {
                      PlaneBuffer::$variant(samples) => Some(samples),
                      _ => None,
                  }
              }

              fn as_samples_mut(buffer: &mut PlaneBuffer) -> Option<&mut [Self]> {
                  match buffer {
                      PlaneBuffer::$variant(samples) => Some(samples),
                      _ => None,
                  }
              }
          }
        )*

        impl SampleKind {
            /// The number of bytes of one sample.
            pub const fn size(self) -> usize {
                match self {
                    $(SampleKind::$variant => core::mem::size_of::<$type>(),)*
                }
            }

            /// A name of the primitive type, as spelled in Rust.
            pub const fn name(self) -> &'static str {
                match self {
                    $(SampleKind::$variant => stringify!($type),)*
                }
            }
        }
    }
}

sample_kind!(
    (U8, u8),
    (I8, i8),
    (U16, u16),
    (I16, i16),
    (U32, u32),
    (I32, i32),
    (F32, f32),
    (F64, f64)
);

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn kind_sizes() {
    assert_eq!(SampleKind::U8.size(), 1);
    assert_eq!(SampleKind::I16.size(), 2);
    assert_eq!(SampleKind::F32.size(), 4);
    assert_eq!(SampleKind::F64.size(), 8);
    assert_eq!(<u16 as Sample>::KIND, SampleKind::U16);
    assert_eq!(SampleKind::I32.to_string(), "i32");
}
