use crate::error::InvalidCurveError;

/// Transpose a rectangular grid of control points, rows become columns
/// # Failures
/// - if the rows of the grid differ in length
/// # Example
/// ```
/// use spline_weights::prelude::transpose_control_points;
/// let grid = vec![vec![1, 2, 3], vec![4, 5, 6]];
/// assert_eq!(
///     transpose_control_points(&grid).unwrap(),
///     vec![vec![1, 4], vec![2, 5], vec![3, 6]]
/// );
/// assert!(transpose_control_points(&[vec![1], vec![1, 2]]).is_err());
/// ```
pub fn transpose_control_points<H: Clone>(
    grid: &[Vec<H>],
) -> Result<Vec<Vec<H>>, InvalidCurveError> {
    check_rectangular(grid)?;
    let mut transposed = vec![vec![]; grid.first().map_or(0, Vec::len)];
    grid.iter().for_each(|row| {
        row.iter().enumerate().for_each(|(j, p)| {
            transposed[j].push(p.clone());
        })
    });
    Ok(transposed)
}

/// Check every row of the grid has as many control points as the first
pub(crate) fn check_rectangular<H>(grid: &[Vec<H>]) -> Result<(), InvalidCurveError> {
    let expected = grid.first().map_or(0, Vec::len);
    match grid
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != expected)
    {
        Some((row, cells)) => Err(InvalidCurveError::NonRectangularGrid {
            row,
            expected,
            actual: cells.len(),
        }),
        None => Ok(()),
    }
}
