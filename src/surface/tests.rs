use approx::assert_relative_eq;
use nalgebra::Vector2;

use crate::{
    curve::{regular_parameters, CurveWeights},
    error::InvalidCurveError,
    knot::KnotVector,
    misc::transpose_control_points,
};

use super::{
    point_on_surface_weights, tangent_u_on_surface_weights, tangent_v_on_surface_weights,
    SurfaceWeights,
};

/// 5 rows of 4 columns, each handle is its own (row, column)
fn grid() -> Vec<Vec<(usize, usize)>> {
    (0..5)
        .map(|row| (0..4).map(|column| (row, column)).collect())
        .collect()
}

/// Handles positioned at x = column, y = row
fn planar_grid() -> Vec<Vec<Vector2<f64>>> {
    (0..5)
        .map(|row| {
            (0..4)
                .map(|column| Vector2::new(column as f64, row as f64))
                .collect()
        })
        .collect()
}

#[test]
fn point_weights_sum_to_one() {
    let grid = grid();
    for u in regular_parameters::<f64>(7) {
        for v in regular_parameters::<f64>(7) {
            let weights = point_on_surface_weights(&grid, u, v, 3, 2, None, None).unwrap();
            assert_eq!(weights.len(), 4 * 3);
            assert_relative_eq!(weights.total_weight(), 1., epsilon = 1e-9);
        }
    }
}

#[test]
fn tangent_weights_sum_to_zero() {
    let grid = grid();
    for u in regular_parameters::<f64>(7) {
        for v in regular_parameters::<f64>(7) {
            let weights = tangent_u_on_surface_weights(&grid, u, v, 3, 2, None, None).unwrap();
            assert_eq!(weights.len(), 4 * 3);
            assert_relative_eq!(weights.total_weight(), 0., epsilon = 1e-9);

            let weights = tangent_v_on_surface_weights(&grid, u, v, 3, 2, None, None).unwrap();
            assert_eq!(weights.len(), 4 * 3);
            assert_relative_eq!(weights.total_weight(), 0., epsilon = 1e-9);
        }
    }
}

#[test]
fn point_weights_are_tensor_product() {
    let grid = grid();
    let (u, v) = (0.3, 0.7);
    let weights = point_on_surface_weights(&grid, u, v, 3, 2, None, None).unwrap();

    let along = CurveWeights::<f64>::try_new(4, 3, None)
        .unwrap()
        .point_weights(u)
        .unwrap();
    let across = CurveWeights::<f64>::try_new(5, 2, None)
        .unwrap()
        .point_weights(v)
        .unwrap();

    weights.iter().for_each(|((row, column), w)| {
        assert_relative_eq!(
            *w,
            along.weight_of(column) * across.weight_of(row),
            epsilon = 1e-12
        );
    });

    // grouped by row
    let rows = weights.handles().map(|(row, _)| *row).collect::<Vec<_>>();
    assert_eq!(rows[..4], [rows[0]; 4]);
}

#[test]
fn corners_interpolate() {
    let grid = grid();
    let corners = [
        ((0., 0.), (0, 0)),
        ((1., 0.), (0, 3)),
        ((0., 1.), (4, 0)),
        ((1., 1.), (4, 3)),
    ];
    for ((u, v), corner) in corners {
        let weights = point_on_surface_weights(&grid, u, v, 3, 2, None, None).unwrap();
        assert_relative_eq!(weights.weight_of(&corner), 1., epsilon = 1e-9);
    }
}

#[test]
fn tangent_directions() {
    let grid = planar_grid();
    let (u, v) = (0.4, 0.55);

    // derivative across the rows
    let tangent_u = tangent_u_on_surface_weights(&grid, u, v, 3, 3, None, None)
        .unwrap()
        .weighted_sum::<Vector2<f64>>();
    assert_relative_eq!(tangent_u.x, 0., epsilon = 1e-9);
    assert!(tangent_u.y > 0.);

    // derivative along the rows
    let tangent_v = tangent_v_on_surface_weights(&grid, u, v, 3, 3, None, None)
        .unwrap()
        .weighted_sum::<Vector2<f64>>();
    assert_relative_eq!(tangent_v.y, 0., epsilon = 1e-9);
    assert!(tangent_v.x > 0.);
}

#[test]
fn tangent_v_is_transposed_tangent_u() {
    let grid = grid();
    let transposed = transpose_control_points(&grid).unwrap();
    let u_knots = KnotVector::new(vec![0., 0., 0., 0., 1., 1., 1., 1.]);
    for (u, v) in [(0.1, 0.9), (0.5, 0.5), (0.75, 0.2)] {
        let tangent_v =
            tangent_v_on_surface_weights(&grid, u, v, 3, 2, Some(&u_knots), None).unwrap();
        let reference =
            tangent_u_on_surface_weights(&transposed, v, u, 2, 3, None, Some(&u_knots)).unwrap();
        assert_eq!(tangent_v, reference);
    }
}

#[test]
fn ragged_grid() {
    let mut grid = grid();
    grid[2].pop();
    let err = point_on_surface_weights(&grid, 0.5, 0.5, 3, 2, None, None).unwrap_err();
    assert_eq!(
        err,
        InvalidCurveError::NonRectangularGrid {
            row: 2,
            expected: 4,
            actual: 3,
        }
    );
    assert!(tangent_u_on_surface_weights(&grid, 0.5, 0.5, 3, 2, None, None).is_err());
    assert_eq!(
        tangent_v_on_surface_weights(&grid, 0.5, 0.5, 3, 2, None, None),
        Err(InvalidCurveError::NonRectangularGrid {
            row: 2,
            expected: 4,
            actual: 3,
        })
    );

    // a longer row after the first
    let mut grid = self::grid();
    grid[3].push((3, 4));
    assert!(matches!(
        tangent_v_on_surface_weights(&grid, 0.5, 0.5, 3, 2, None, None),
        Err(InvalidCurveError::NonRectangularGrid { row: 3, .. })
    ));
}

#[test]
fn tangent_v_matches_index_evaluator() {
    let grid = grid();
    let surface = SurfaceWeights::<f64>::try_from_grid(&grid, 3, 2, None, None).unwrap();
    for (u, v) in [(0.2, 0.6), (0.9, 0.1)] {
        let by_handle = tangent_v_on_surface_weights(&grid, u, v, 3, 2, None, None).unwrap();
        let by_index = surface.tangent_v_weights(u, v).unwrap();
        assert_eq!(by_handle, by_index);
    }
}

#[test]
fn curve_errors_propagate() {
    let grid = grid();

    // 4 columns cannot carry degree 4 along u
    assert_eq!(
        point_on_surface_weights(&grid, 0.5, 0.5, 4, 2, None, None),
        Err(InvalidCurveError::TooFewControlPoints {
            degree: 4,
            required: 5,
            actual: 4,
        })
    );

    let v_knots = KnotVector::new(vec![0., 0., 0., 1., 1., 1.]);
    assert!(matches!(
        point_on_surface_weights(&grid, 0.5, 0.5, 3, 2, None, Some(&v_knots)),
        Err(InvalidCurveError::KnotCountMismatch { expected: 8, .. })
    ));

    let linear = SurfaceWeights::<f64>::try_new(5, 4, 3, 1, None, None).unwrap();
    assert!(linear.point_weights(0.5, 0.5).is_ok());
    assert!(linear.tangent_v_weights(0.5, 0.5).is_ok());
    assert_eq!(
        linear.tangent_u_weights(0.5, 0.5),
        Err(InvalidCurveError::DegreeTooLow {
            degree: 1,
            minimum: 2,
        })
    );

    let empty: Vec<Vec<(usize, usize)>> = vec![];
    assert!(point_on_surface_weights(&empty, 0.5, 0.5, 3, 2, None, None).is_err());
}

#[test]
fn grid_dimensions() {
    let surface = SurfaceWeights::<f64>::try_from_grid(&grid(), 3, 2, None, None).unwrap();
    assert_eq!(surface.rows(), 5);
    assert_eq!(surface.columns(), 4);
    assert_eq!(surface.u().degree(), 3);
    assert_eq!(surface.v().degree(), 2);
    assert_eq!(
        surface,
        SurfaceWeights::new(
            CurveWeights::try_new(4, 3, None).unwrap(),
            CurveWeights::try_new(5, 2, None).unwrap()
        )
    );
}
