use itertools::iproduct;

use crate::{
    curve::CurveWeights,
    error::InvalidCurveError,
    knot::KnotVector,
    misc::{check_rectangular, transpose_control_points, FloatingPoint},
    weight::WeightMapping,
};

/// Control point weights of a tensor-product B-spline surface
///
/// The control grid is a list of rows. `u` runs along each row (over the columns) and
/// `v` runs across the rows. Mappings are keyed by `(row, column)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceWeights<T> {
    /// evaluator along a row, one control point per column
    u: CurveWeights<T>,
    /// evaluator across the rows, one control point per row
    v: CurveWeights<T>,
}

impl<T: FloatingPoint> SurfaceWeights<T> {
    pub fn new(u: CurveWeights<T>, v: CurveWeights<T>) -> Self {
        Self { u, v }
    }

    /// Create a surface weight evaluator for a `rows` x `columns` control grid
    /// # Failures
    /// - same as [`CurveWeights::try_new`] for either axis, `u` is checked first
    pub fn try_new(
        rows: usize,
        columns: usize,
        u_degree: usize,
        v_degree: usize,
        u_knots: Option<KnotVector<T>>,
        v_knots: Option<KnotVector<T>>,
    ) -> Result<Self, InvalidCurveError> {
        let u = CurveWeights::try_new(columns, u_degree, u_knots)?;
        let v = CurveWeights::try_new(rows, v_degree, v_knots)?;
        Ok(Self { u, v })
    }

    /// Create a surface weight evaluator sized after a control grid
    /// # Failures
    /// - if the rows of the grid differ in length
    /// - same as [`SurfaceWeights::try_new`]
    pub fn try_from_grid<H>(
        grid: &[Vec<H>],
        u_degree: usize,
        v_degree: usize,
        u_knots: Option<&KnotVector<T>>,
        v_knots: Option<&KnotVector<T>>,
    ) -> Result<Self, InvalidCurveError> {
        check_rectangular(grid)?;
        Self::try_new(
            grid.len(),
            grid.first().map_or(0, Vec::len),
            u_degree,
            v_degree,
            u_knots.cloned(),
            v_knots.cloned(),
        )
    }

    pub fn rows(&self) -> usize {
        self.v.control_point_count()
    }

    pub fn columns(&self) -> usize {
        self.u.control_point_count()
    }

    pub fn u(&self) -> &CurveWeights<T> {
        &self.u
    }

    pub fn v(&self) -> &CurveWeights<T> {
        &self.v
    }

    /// Weights of the control points defining the point at `(u, v)`
    pub fn point_weights(
        &self,
        u: T,
        v: T,
    ) -> Result<WeightMapping<(usize, usize), T>, InvalidCurveError> {
        let along = self.u.point_weights(u)?;
        let across = self.v.point_weights(v)?;
        Ok(tensor_product(&across, &along))
    }

    /// Tangent weights composed from point weights along `u` and tangent weights across the rows
    ///
    /// **The derivative is taken along `v`** (across the rows), not along `u` as the name
    /// reads. Use [`SurfaceWeights::tangent_v_weights`] for the derivative along `u`.
    /// # Failures
    /// - if the `v` degree is lower than 2
    pub fn tangent_u_weights(
        &self,
        u: T,
        v: T,
    ) -> Result<WeightMapping<(usize, usize), T>, InvalidCurveError> {
        let along = self.u.point_weights(u)?;
        let across = self.v.tangent_weights(v)?;
        Ok(tensor_product(&across, &along))
    }

    /// [`SurfaceWeights::tangent_u_weights`] over the transposed grid
    ///
    /// Transposing the grid swaps the roles of the two axes, so the composition is
    /// point weights across the rows times tangent weights along them, keyed back to `(row, column)`.
    /// **The derivative is taken along `u`** (along the rows). Entries are ordered column by column.
    /// # Failures
    /// - if the `u` degree is lower than 2
    pub fn tangent_v_weights(
        &self,
        u: T,
        v: T,
    ) -> Result<WeightMapping<(usize, usize), T>, InvalidCurveError> {
        let along = self.v.point_weights(v)?;
        let across = self.u.tangent_weights(u)?;
        Ok(tensor_product(&across, &along).map_handles(|(column, row)| (row, column)))
    }
}

/// Weights of every `(outer, inner)` pair, outer entries first
fn tensor_product<T: FloatingPoint>(
    across: &WeightMapping<usize, T>,
    along: &WeightMapping<usize, T>,
) -> WeightMapping<(usize, usize), T> {
    iproduct!(across.iter(), along.iter())
        .map(|(&(outer, outer_weight), &(inner, inner_weight))| {
            ((outer, inner), inner_weight * outer_weight)
        })
        .collect()
}

/// Map grid control points to their weights for the point at `(u, v)` on a surface
///
/// `grid` is a list of rows of equal length, `u` runs along the rows and `v` across them.
/// Entries are grouped by row, `(u_degree + 1) * (v_degree + 1)` in total.
///
/// # Example
/// ```
/// use spline_weights::prelude::*;
///
/// let grid: Vec<Vec<(usize, usize)>> = (0..4)
///     .map(|row| (0..4).map(|column| (row, column)).collect())
///     .collect();
/// let weights = point_on_surface_weights(&grid, 1_f64, 0_f64, 3, 3, None, None).unwrap();
/// assert!((weights.weight_of(&(0, 3)) - 1.).abs() < 1e-9);
/// ```
pub fn point_on_surface_weights<H: Clone, T: FloatingPoint>(
    grid: &[Vec<H>],
    u: T,
    v: T,
    u_degree: usize,
    v_degree: usize,
    u_knots: Option<&KnotVector<T>>,
    v_knots: Option<&KnotVector<T>>,
) -> Result<WeightMapping<H, T>, InvalidCurveError> {
    let surface = SurfaceWeights::try_from_grid(grid, u_degree, v_degree, u_knots, v_knots)?;
    Ok(surface
        .point_weights(u, v)?
        .map_handles(|(row, column)| grid[row][column].clone()))
}

/// Map grid control points to their surface tangent weights, see [`SurfaceWeights::tangent_u_weights`]
///
/// **The derivative is taken along `v`** (across the rows) despite the name.
pub fn tangent_u_on_surface_weights<H: Clone, T: FloatingPoint>(
    grid: &[Vec<H>],
    u: T,
    v: T,
    u_degree: usize,
    v_degree: usize,
    u_knots: Option<&KnotVector<T>>,
    v_knots: Option<&KnotVector<T>>,
) -> Result<WeightMapping<H, T>, InvalidCurveError> {
    let surface = SurfaceWeights::try_from_grid(grid, u_degree, v_degree, u_knots, v_knots)?;
    Ok(surface
        .tangent_u_weights(u, v)?
        .map_handles(|(row, column)| grid[row][column].clone()))
}

/// Map grid control points to their surface tangent weights, see [`SurfaceWeights::tangent_v_weights`]
///
/// **The derivative is taken along `u`** (along the rows) despite the name.
/// Evaluated as [`tangent_u_on_surface_weights`] over the transposed grid with
/// the parameters, degrees and knot vectors of the two axes swapped.
pub fn tangent_v_on_surface_weights<H: Clone, T: FloatingPoint>(
    grid: &[Vec<H>],
    u: T,
    v: T,
    u_degree: usize,
    v_degree: usize,
    u_knots: Option<&KnotVector<T>>,
    v_knots: Option<&KnotVector<T>>,
) -> Result<WeightMapping<H, T>, InvalidCurveError> {
    let transposed = transpose_control_points(grid)?;
    tangent_u_on_surface_weights(&transposed, v, u, v_degree, u_degree, v_knots, u_knots)
}
