//! Benchmarks translating plane numbers and exchanging plane buffers.
use brunch::Bench;

use image_planar::{PlaneAccess, PlaneBuffer, PlaneError, PlanarArray, SampleKind};
use image_shape::{compose_raster_index, decompose_plane_number, Shape};

struct Stack {
    lengths: &'static [usize],
}

impl Stack {
    fn name(&self) -> String {
        format!("{:?}", self.lengths)
    }

    fn roundtrip(&self) -> Result<impl FnMut() -> usize, PlaneError> {
        let shape = Shape::from_lengths(self.lengths)?;
        let count = shape.plane_count();

        Ok(move || {
            let extra = shape.extra_lengths();
            (0..count)
                .map(|plane| {
                    let coordinate = decompose_plane_number(extra, plane).unwrap();
                    compose_raster_index(extra, &coordinate).unwrap()
                })
                .sum()
        })
    }

    fn exchange(&self) -> Result<impl FnMut(), PlaneError> {
        let shape = Shape::from_lengths(self.lengths)?;
        let len = shape.plane_len();
        let count = shape.plane_count();
        let mut stack = PlaneAccess::new(PlanarArray::new(shape, SampleKind::U16));
        let mut spare = Some(PlaneBuffer::zeroed(SampleKind::U16, len));

        Ok(move || {
            for plane in 0..count {
                let buffer = spare.take().unwrap();
                spare = Some(stack.set_plane(plane, buffer).unwrap());
            }
        })
    }
}

fn main() {
    let tests = [
        Stack {
            lengths: &[512, 512],
        },
        Stack {
            lengths: &[512, 512, 32],
        },
        Stack {
            lengths: &[256, 256, 3, 8, 4],
        },
        Stack {
            lengths: &[64, 64, 4, 16, 16],
        },
    ];

    let mut benches = brunch::Benches::default();
    benches.extend(tests.iter().map(|stack| {
        Bench::new(format!("planar::raster::roundtrip::{}", stack.name()))
            .run(stack.roundtrip().expect("Failed to setup benchmark"))
    }));
    benches.extend(tests.iter().map(|stack| {
        Bench::new(format!("planar::raster::exchange::{}", stack.name()))
            .run(stack.exchange().expect("Failed to setup benchmark"))
    }));
    benches.finish();
}
