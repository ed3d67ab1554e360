use image_shape::{
    compose_raster_index, decompose_plane_number, extra_axis_lengths, plane_count,
    plane_positions, PlaneCountPolicy, Shape, ShapeDefect, ShapeError,
};

/// All extra axis lengths with up to `max_rank` axes of length `1..=max_len`.
fn all_lengths(max_rank: usize, max_len: usize) -> Vec<Vec<usize>> {
    let mut all = vec![vec![]];
    let mut frontier = vec![vec![]];

    for _ in 0..max_rank {
        frontier = frontier
            .iter()
            .flat_map(|prefix: &Vec<usize>| {
                (1..=max_len).map(move |len| {
                    let mut lengths = prefix.clone();
                    lengths.push(len);
                    lengths
                })
            })
            .collect();
        all.extend(frontier.iter().cloned());
    }

    all
}

fn product(lengths: &[usize]) -> usize {
    lengths.iter().product()
}

#[test]
fn decompose_then_compose_is_identity() {
    for lengths in all_lengths(3, 4) {
        for plane in 0..product(&lengths) {
            let coordinate = decompose_plane_number(&lengths, plane).expect("In range");
            let raster = compose_raster_index(&lengths, &coordinate).expect("Valid coordinate");
            assert_eq!(raster, plane, "for {:?}", lengths);
        }
    }
}

#[test]
fn compose_then_decompose_is_identity() {
    for lengths in all_lengths(3, 4) {
        // Enumerate the coordinates independently of the decomposition.
        let mut coordinates: Vec<Vec<usize>> = vec![vec![]];
        for &len in &lengths {
            coordinates = coordinates
                .into_iter()
                .flat_map(|prefix| {
                    (0..len).map(move |position| {
                        let mut coordinate = prefix.clone();
                        coordinate.push(position);
                        coordinate
                    })
                })
                .collect();
        }

        assert_eq!(coordinates.len(), product(&lengths));

        for coordinate in coordinates {
            let raster = compose_raster_index(&lengths, &coordinate).expect("Valid coordinate");
            let back = decompose_plane_number(&lengths, raster).expect("In range");
            assert_eq!(back.as_slice(), &coordinate[..], "for {:?}", lengths);
        }
    }
}

#[test]
fn first_extra_axis_is_fastest() {
    let lengths = [5, 2];
    let coordinate = decompose_plane_number(&lengths, 7).unwrap();
    assert_eq!(coordinate.as_slice(), &[2, 1]);

    let coordinate = decompose_plane_number(&lengths, 1).unwrap();
    assert_eq!(coordinate.as_slice(), &[1, 0]);

    let coordinate = decompose_plane_number(&lengths, 5).unwrap();
    assert_eq!(coordinate.as_slice(), &[0, 1]);
}

#[test]
fn out_of_range_planes() {
    for lengths in all_lengths(3, 3) {
        let count = product(&lengths);
        for plane in count..count + 3 {
            assert_eq!(
                decompose_plane_number(&lengths, plane),
                Err(ShapeError::PlaneOutOfRange { plane, count }),
            );
        }
    }
}

#[test]
fn out_of_range_coordinates() {
    let lengths = [5, 2];
    assert_eq!(
        compose_raster_index(&lengths, &[0, 2]),
        Err(ShapeError::CoordinateOutOfRange {
            axis: 1,
            position: 2,
            length: 2
        }),
    );
    assert_eq!(
        compose_raster_index(&lengths, &[1]),
        Err(ShapeError::CoordinateRank {
            expected: 2,
            found: 1
        }),
    );
    assert_eq!(
        compose_raster_index(&lengths, &[1, 1, 0]),
        Err(ShapeError::CoordinateRank {
            expected: 2,
            found: 3
        }),
    );
}

#[test]
fn flat_shape_has_one_plane() {
    assert_eq!(extra_axis_lengths(&[4, 3]), Ok(&[][..]));
    assert_eq!(decompose_plane_number(&[], 0).map(|c| c.len()), Ok(0));
    assert_eq!(
        decompose_plane_number(&[], 1),
        Err(ShapeError::PlaneOutOfRange { plane: 1, count: 1 })
    );
    assert_eq!(plane_positions(&[]).map(|it| it.len()), Ok(1));
}

#[test]
fn plane_counts() {
    assert_eq!(plane_count(&[4, 3], 12), Ok(1));
    assert_eq!(plane_count(&[4, 3, 5], 60), Ok(5));
    // The floor formula does not look at the extra axes.
    assert_eq!(plane_count(&[4, 3, 5], 180), Ok(15));
    assert_eq!(plane_count(&[4, 3, 5], 0), Ok(0));
    assert_eq!(plane_count(&[4, 3, 5], 11), Ok(0));

    assert_eq!(
        plane_count(&[4], 12),
        Err(ShapeError::InvalidShape(ShapeDefect::TooFewAxes { rank: 1 }))
    );
    assert_eq!(
        plane_count(&[0, 3], 12),
        Err(ShapeError::InvalidShape(ShapeDefect::EmptyAxis { axis: 0 }))
    );
    assert_eq!(
        image_shape::plane_count_with(&[4, 3], 25, PlaneCountPolicy::Exact),
        Err(ShapeError::InvalidShape(ShapeDefect::InexactSampleCount {
            total: 25,
            plane_len: 12
        }))
    );
    assert_eq!(
        image_shape::plane_count_with(&[4, 3], 25, PlaneCountPolicy::Truncate),
        Ok(2)
    );
}

#[test]
fn positions_match_decomposition() {
    for lengths in all_lengths(3, 4) {
        let positions = plane_positions(&lengths).expect("Small lengths");
        assert_eq!(positions.len(), product(&lengths));

        for (plane, coordinate) in positions.enumerate() {
            let expected = decompose_plane_number(&lengths, plane).expect("In range");
            assert_eq!(coordinate, expected, "plane {} of {:?}", plane, lengths);
        }
    }
}

#[test]
fn shape_conversions() -> Result<(), ShapeError> {
    let shape = Shape::from_lengths(&[16, 8, 3, 4, 2])?;
    assert_eq!(shape.rank(), 5);
    assert_eq!(shape.width(), 16);
    assert_eq!(shape.height(), 8);
    assert_eq!(shape.extra_lengths(), &[3, 4, 2]);
    assert_eq!(shape.plane_len(), 128);
    assert_eq!(shape.plane_count(), 24);
    assert_eq!(shape.sample_count(), 128 * 24);

    for (plane, coordinate) in shape.positions().enumerate() {
        assert_eq!(shape.coordinate_of(plane)?, coordinate);
        assert_eq!(shape.plane_of(&coordinate)?, plane);
    }

    assert_eq!(
        shape.coordinate_of(24),
        Err(ShapeError::PlaneOutOfRange {
            plane: 24,
            count: 24
        })
    );

    Ok(())
}

#[test]
fn errors_display() {
    let err = ShapeError::PlaneOutOfRange {
        plane: 10,
        count: 10,
    };
    assert_eq!(err.to_string(), "plane 10 is out of range for 10 planes");

    let err = ShapeError::InvalidShape(ShapeDefect::TooFewAxes { rank: 1 });
    assert_eq!(
        err.to_string(),
        "invalid shape: 1 axes given, a plane needs at least 2"
    );
}
