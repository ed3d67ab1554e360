// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `image-rs` developers
//! # Shape
//!
//! Index arithmetic for unfolding an N-dimensional sampled array into a flat stack of 2-D
//! planes.
//!
//! The first two axes of a shape span a single plane (width, then height). Every other axis
//! selects one plane among many. A plane can be addressed in three equivalent ways:
//!
//! - A *plane number*, the position of the plane in the flat stack.
//! - A [`PlaneCoordinate`], one position per extra axis.
//! - A *raster index*, the offset of the plane's buffer in planar storage.
//!
//! Conversions use mixed-radix arithmetic where the lowest extra axis varies fastest. Getting
//! them wrong does not crash, it swaps planes, so all conversions check their inputs.
//!
//! ## Usage
//!
//! ```
//! use image_shape::{compose_raster_index, decompose_plane_number, Shape};
//!
//! // 64×48 pixels, 3 channels, 10 slices, 2 time points.
//! let shape = Shape::from_lengths(&[64, 48, 3, 10, 2])?;
//! assert_eq!(shape.plane_count(), 60);
//!
//! let coordinate = decompose_plane_number(shape.extra_lengths(), 7)?;
//! assert_eq!(coordinate.as_slice(), &[1, 2, 0]);
//!
//! let raster = compose_raster_index(shape.extra_lengths(), &coordinate)?;
//! assert_eq!(raster, 7);
//! # Ok::<(), image_shape::ShapeError>(())
//! ```
// Be std for doctests, avoids a weird warning about missing allocator.
#![cfg_attr(not(doctest), no_std)]
#![deny(unsafe_code)]
extern crate alloc;

mod axis;
mod error;
mod index;

pub use self::axis::{Axis, AxisRole, Shape};
pub use self::error::{ShapeDefect, ShapeError};
pub use self::index::{
    compose_raster_index, decompose_plane_number, extra_axis_lengths, plane_count,
    plane_count_with, plane_positions, PlaneCoordinate, PlaneCountPolicy, PlanePositions,
};
