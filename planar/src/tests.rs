use image_shape::{PlaneCountPolicy, Shape, ShapeDefect, ShapeError};

use crate::{
    AccessOptions, ErrorKind, Operation, PlanarArray, PlanarStorage, PlaneAccess, PlaneBuffer,
    PlaneError, PlaneStack, SampleKind, SampledArray,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An array where each sample of a plane holds that plane's number.
fn numbered(lengths: &[usize]) -> Result<PlanarArray, PlaneError> {
    let shape = Shape::from_lengths(lengths)?;
    let planes = (0..shape.plane_count())
        .map(|plane| PlaneBuffer::from(vec![plane as u32; shape.plane_len()]))
        .collect();
    PlanarArray::from_planes(shape, SampleKind::U32, planes)
}

/// An array without planar storage, e.g. stored in chunks spanning planes.
struct Chunked {
    shape: Shape,
}

impl SampledArray for Chunked {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn sample_kind(&self) -> SampleKind {
        SampleKind::F32
    }
}

/// An array claiming more samples than its shape describes.
struct Padded {
    inner: PlanarArray,
    extra_samples: usize,
}

impl SampledArray for Padded {
    fn shape(&self) -> &Shape {
        self.inner.shape()
    }

    fn sample_kind(&self) -> SampleKind {
        self.inner.kind()
    }

    fn total_samples(&self) -> usize {
        self.inner.shape().sample_count() + self.extra_samples
    }

    fn planar(&self) -> Option<&dyn PlanarStorage> {
        SampledArray::planar(&self.inner)
    }

    fn planar_mut(&mut self) -> Option<&mut dyn PlanarStorage> {
        SampledArray::planar_mut(&mut self.inner)
    }
}

#[test]
fn plane_counts() -> Result<(), PlaneError> {
    init();

    let flat = PlaneAccess::new(numbered(&[4, 3])?);
    assert_eq!(flat.plane_count()?, 1);
    assert_eq!(flat.plane_width(), 4);
    assert_eq!(flat.plane_height(), 3);

    let stack = PlaneAccess::new(numbered(&[4, 3, 5])?);
    assert_eq!(stack.plane_count()?, 5);

    let hyper = PlaneAccess::new(numbered(&[4, 3, 2, 5, 3])?);
    assert_eq!(hyper.plane_count()?, 30);
    assert_eq!(hyper.plane_len(), 12);

    Ok(())
}

#[test]
fn planes_follow_raster_order() -> Result<(), PlaneError> {
    init();

    let stack = PlaneAccess::new(numbered(&[3, 2, 2, 3, 4])?);
    for plane in 0..stack.plane_count()? {
        assert_eq!(stack.raster_index(plane)?, plane);
        let samples = stack.plane(plane)?.as_slice::<u32>().expect("u32 planes");
        assert_eq!(samples.len(), 6);
        assert!(samples.iter().all(|&s| s == plane as u32), "plane {}", plane);
    }

    assert_eq!(stack.coordinate_of(7)?.as_slice(), &[1, 0, 1]);
    assert_eq!(stack.coordinate_of(23)?.as_slice(), &[1, 2, 3]);

    Ok(())
}

#[test]
fn set_plane_swaps_buffers() -> Result<(), PlaneError> {
    init();

    let mut stack = PlaneAccess::new(numbered(&[4, 3, 5, 2])?);

    let previous = stack.set_plane(7, PlaneBuffer::from(vec![99u32; 12]))?;
    assert_eq!(previous.into_vec::<u32>(), Ok(vec![7u32; 12]));
    assert_eq!(stack.plane(7)?.as_slice::<u32>(), Some(&[99u32; 12][..]));

    // No other plane was touched.
    for plane in (0..10).filter(|&p| p != 7) {
        assert_eq!(
            stack.plane(plane)?.as_slice::<u32>(),
            Some(&vec![plane as u32; 12][..])
        );
    }

    let planes = stack.into_inner().into_planes();
    assert_eq!(planes[7], PlaneBuffer::from(vec![99u32; 12]));

    Ok(())
}

#[test]
fn planes_are_moved_not_copied() -> Result<(), PlaneError> {
    init();

    let mut stack = PlaneAccess::new(numbered(&[4, 3, 5])?);
    let stored = stack.plane(3)?.as_slice::<u32>().unwrap().as_ptr();

    let incoming = vec![42u32; 12];
    let incoming_ptr = incoming.as_ptr();
    let previous = stack.set_plane(3, PlaneBuffer::from(incoming))?;

    // The caller's allocation now backs the plane, the old one is handed back.
    assert_eq!(stack.plane(3)?.as_slice::<u32>().unwrap().as_ptr(), incoming_ptr);
    assert_eq!(previous.as_slice::<u32>().unwrap().as_ptr(), stored);
    assert_eq!(previous.into_vec::<u32>().unwrap().as_ptr(), stored);

    // Borrowing twice lends the same buffer.
    let first = stack.plane(3)? as *const PlaneBuffer;
    let second = stack.plane(3)? as *const PlaneBuffer;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn out_of_range_planes() -> Result<(), PlaneError> {
    init();

    let mut stack = PlaneAccess::new(numbered(&[4, 3, 5, 2])?);
    let err = stack.plane(10).unwrap_err();
    assert_eq!(
        err,
        PlaneError::Shape(ShapeError::PlaneOutOfRange {
            plane: 10,
            count: 10
        })
    );
    assert_eq!(err.kind(), ErrorKind::PlaneOutOfRange);

    let err = stack
        .set_plane(10, PlaneBuffer::from(vec![0u32; 12]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PlaneOutOfRange);

    Ok(())
}

#[test]
fn mismatched_buffers_are_rejected() -> Result<(), PlaneError> {
    init();

    let mut stack = PlaneAccess::new(numbered(&[4, 3, 5])?);

    let short = stack.set_plane(2, PlaneBuffer::from(vec![0u32; 11]));
    assert_eq!(
        short,
        Err(PlaneError::BufferShapeMismatch {
            expected_kind: SampleKind::U32,
            expected_len: 12,
            found_kind: SampleKind::U32,
            found_len: 11,
        })
    );

    let wrong_kind = stack.set_plane(2, PlaneBuffer::from(vec![0f32; 12]));
    assert_eq!(
        wrong_kind.map_err(|err| err.kind()),
        Err(ErrorKind::BufferShapeMismatch)
    );

    // The targeted plane is unchanged.
    assert_eq!(stack.plane(2)?.as_slice::<u32>(), Some(&[2u32; 12][..]));

    Ok(())
}

#[test]
fn unsupported_storage_never_yields_data() -> Result<(), PlaneError> {
    init();

    let shape = Shape::from_lengths(&[4, 3, 5])?;
    let mut stack = PlaneAccess::new(Chunked { shape });

    assert!(!stack.has_planar_storage());
    // Plane geometry does not depend on the storage.
    assert_eq!(stack.plane_count()?, 5);
    assert_eq!(stack.plane_width(), 4);
    assert_eq!(stack.plane_height(), 3);

    for plane in 0..7 {
        assert_eq!(stack.plane(plane), Err(PlaneError::UnsupportedStorage));
        assert_eq!(
            stack.set_plane(plane, PlaneBuffer::zeroed(SampleKind::F32, 12)),
            Err(PlaneError::UnsupportedStorage)
        );
    }

    Ok(())
}

#[test]
fn unsupported_operations() -> Result<(), PlaneError> {
    init();

    let mut stack = PlaneAccess::new(numbered(&[4, 3, 2])?);
    let stack: &mut dyn PlaneStack = &mut stack;

    assert_eq!(
        stack.plane_label(0),
        Err(PlaneError::NotImplemented(Operation::PlaneLabel))
    );
    assert_eq!(
        stack.set_plane_label(0, "DAPI"),
        Err(PlaneError::NotImplemented(Operation::SetPlaneLabel))
    );
    assert_eq!(
        stack.insert_plane(1, PlaneBuffer::from(vec![0u32; 12])),
        Err(PlaneError::NotImplemented(Operation::InsertPlane))
    );
    assert_eq!(
        stack.delete_plane(1).map_err(|err| err.kind()),
        Err(ErrorKind::NotImplemented)
    );

    // Nothing was inserted or deleted.
    assert_eq!(stack.plane_count()?, 2);

    Ok(())
}

#[test]
fn truncating_and_exact_counts() -> Result<(), PlaneError> {
    init();

    // One plane worth of samples plus 5 more.
    let padded = Padded {
        inner: numbered(&[4, 3, 2])?,
        extra_samples: 17,
    };

    let stack = PlaneAccess::new(padded);
    assert_eq!(stack.plane_count()?, 3);
    // The third plane is counted but has no position in the shape.
    assert_eq!(stack.plane(1)?.as_slice::<u32>(), Some(&[1u32; 12][..]));
    assert_eq!(
        stack.plane(2),
        Err(PlaneError::Shape(ShapeError::PlaneOutOfRange { plane: 2, count: 3 }))
    );
    assert_eq!(
        stack.raster_index(2).map_err(|err| err.kind()),
        Err(ErrorKind::PlaneOutOfRange)
    );

    let options = AccessOptions {
        plane_count: PlaneCountPolicy::Exact,
    };
    let stack = PlaneAccess::with_options(stack.into_inner(), options);
    assert_eq!(stack.options(), options);
    assert_eq!(
        stack.plane_count(),
        Err(PlaneError::Shape(ShapeError::InvalidShape(
            ShapeDefect::InexactSampleCount {
                total: 41,
                plane_len: 12
            }
        )))
    );
    assert_eq!(
        stack.plane(0).map_err(|err| err.kind()),
        Err(ErrorKind::InvalidShape)
    );

    Ok(())
}

#[test]
fn borrowed_arrays() -> Result<(), PlaneError> {
    init();

    let mut array = numbered(&[2, 2, 3])?;
    {
        let mut stack = PlaneAccess::new(&mut array);
        stack.set_plane(1, PlaneBuffer::from(vec![5u32; 4]))?;
    }
    assert_eq!(array.planes()[1], PlaneBuffer::from(vec![5u32; 4]));

    let boxed: Box<dyn SampledArray> = Box::new(array);
    let stack = PlaneAccess::new(boxed);
    assert!(stack.has_planar_storage());
    assert_eq!(stack.plane(1)?.as_slice::<u32>(), Some(&[5u32; 4][..]));

    Ok(())
}

#[test]
fn short_storage_is_reported() -> Result<(), PlaneError> {
    init();

    /// Storage that lost its last plane.
    struct Truncated(PlanarArray, Vec<PlaneBuffer>);

    impl SampledArray for Truncated {
        fn shape(&self) -> &Shape {
            self.0.shape()
        }

        fn sample_kind(&self) -> SampleKind {
            self.0.kind()
        }

        fn planar(&self) -> Option<&dyn PlanarStorage> {
            Some(&self.1)
        }

        fn planar_mut(&mut self) -> Option<&mut dyn PlanarStorage> {
            Some(&mut self.1)
        }
    }

    let array = numbered(&[2, 2, 3])?;
    let mut planes = array.planes().to_vec();
    planes.pop();

    let mut stack = PlaneAccess::new(Truncated(array, planes));
    assert_eq!(
        stack.plane(2),
        Err(PlaneError::MissingBuffer {
            raster: 2,
            slots: 2
        })
    );

    let err = stack
        .set_plane(2, PlaneBuffer::from(vec![0u32; 4]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CoordinateOutOfRange);

    Ok(())
}

#[test]
fn assembling_arrays() -> Result<(), PlaneError> {
    let shape = Shape::from_lengths(&[2, 2, 2])?;

    let too_few = PlanarArray::from_planes(
        shape.clone(),
        SampleKind::U8,
        vec![PlaneBuffer::zeroed(SampleKind::U8, 4)],
    );
    assert_eq!(
        too_few,
        Err(PlaneError::PlaneCountMismatch {
            expected: 2,
            found: 1
        })
    );
    assert_eq!(
        too_few.map_err(|err| err.kind()),
        Err(ErrorKind::InvalidShape)
    );

    let mixed = PlanarArray::from_planes(
        shape.clone(),
        SampleKind::U8,
        vec![
            PlaneBuffer::zeroed(SampleKind::U8, 4),
            PlaneBuffer::zeroed(SampleKind::I8, 4),
        ],
    );
    assert_eq!(
        mixed,
        Err(PlaneError::BufferShapeMismatch {
            expected_kind: SampleKind::U8,
            expected_len: 4,
            found_kind: SampleKind::I8,
            found_len: 4,
        })
    );

    let array = PlanarArray::new(shape, SampleKind::F64);
    assert_eq!(array.planes().len(), 2);
    assert_eq!(array.planes()[1], PlaneBuffer::zeroed(SampleKind::F64, 4));

    Ok(())
}

#[test]
fn error_messages() {
    let err = PlaneError::BufferShapeMismatch {
        expected_kind: SampleKind::U16,
        expected_len: 12,
        found_kind: SampleKind::U8,
        found_len: 11,
    };
    assert_eq!(
        err.to_string(),
        "plane buffer holds 11 samples of u8, expected 12 samples of u16"
    );

    let err = PlaneError::NotImplemented(Operation::InsertPlane);
    assert_eq!(err.to_string(), "inserting a plane is not implemented");

    let err = PlaneError::from(ShapeError::PlaneOutOfRange { plane: 3, count: 2 });
    assert_eq!(err.to_string(), "plane 3 is out of range for 2 planes");
}
