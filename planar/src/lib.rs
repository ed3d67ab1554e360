// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `image-rs` developers
//! Presents N-dimensional sampled arrays as a flat stack of 2-D planes.
//!
//! Many consumers of scientific image data understand only a sequence of planes, each a raster
//! of width × height samples. This crate bridges such consumers to arrays with any number of
//! further axes, such as channels, focal depth or time. It does so without copying: planes are
//! handed out by reference and replaced by moving in a new buffer.
//!
//! The pieces are:
//! 1. An array implementing [`SampledArray`], optionally offering [`PlanarStorage`].
//! 2. The [`PlaneAccess`] adapter translating plane numbers to raster indices of the storage.
//! 3. Consumers programming against [`PlaneStack`].
//!
//! # Usage
//!
//! ```
//! use image_planar::{PlaneAccess, PlaneBuffer, PlaneStack, PlanarArray, SampleKind};
//! use image_shape::Shape;
//!
//! fn brightest_plane(stack: &impl PlaneStack) -> Result<usize, image_planar::PlaneError> {
//!     let mut best = (0, 0u8);
//!     for plane in 0..stack.plane_count()? {
//!         let samples = stack.plane(plane)?.as_slice::<u8>().unwrap_or(&[]);
//!         let max = samples.iter().copied().max().unwrap_or(0);
//!         if max > best.1 {
//!             best = (plane, max);
//!         }
//!     }
//!     Ok(best.0)
//! }
//!
//! // 8×8 pixels, 3 channels, 4 slices.
//! let shape = Shape::from_lengths(&[8, 8, 3, 4, 1])?;
//! let mut stack = PlaneAccess::new(PlanarArray::new(shape, SampleKind::U8));
//!
//! stack.set_plane(5, PlaneBuffer::from(vec![0xffu8; 64]))?;
//! assert_eq!(brightest_plane(&stack)?, 5);
//! # Ok::<(), image_planar::PlaneError>(())
//! ```
//!
//! Arrays that do not keep one buffer per plane can still be bridged. Every plane access then
//! fails with [`PlaneError::UnsupportedStorage`], it never yields partial or zeroed data.
#![deny(unsafe_code)]

mod access;
mod array;
mod buffer;
mod error;
mod sample;
mod storage;

#[cfg(test)]
mod tests;

pub use self::access::{AccessOptions, PlaneAccess, PlaneStack};
pub use self::array::PlanarArray;
pub use self::buffer::PlaneBuffer;
pub use self::error::{ErrorKind, Operation, PlaneError};
pub use self::sample::{Sample, SampleKind};
pub use self::storage::{PlanarStorage, SampledArray};

/// Re-exported index arithmetic.
pub mod shape {
    pub use image_shape::*;
}
