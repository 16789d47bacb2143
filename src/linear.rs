use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::{CurveError, Result};
use crate::points::ControlPoints;

/// Largest accepted 1-norm condition estimate of the equilibrated triangular factor.
pub const MAX_CONDITION: f64 = 1e10;

/// Largest accepted miss at a control point of an interpolating fit, relative to `max(1, max|y|)`.
pub const INTERPOLATION_TOLERANCE: f64 = 1e-6;

/// Solves `matrix * x = rhs` by LU decomposition with partial pivoting.
///
/// A pivot below `dim * eps * max|pivot|` or a non-finite solution is reported as
/// [CurveError::SingularSystem] instead of returning garbage coefficients.
pub fn solve(matrix: DMatrix<f64>, rhs: &DVector<f64>) -> Result<DVector<f64>> {
    let size = matrix.nrows();
    debug!("solving {size}x{size} linear system");

    let lu = matrix.lu();

    let pivots = lu.u().diagonal().map(f64::abs);
    let largest_pivot = pivots.max();
    let tolerance = size as f64 * f64::EPSILON * largest_pivot;
    if size > 0 && (largest_pivot == 0.0 || pivots.iter().any(|p| *p <= tolerance)) {
        debug!("rejecting system: smallest pivot {} below tolerance {}", pivots.min(), tolerance);
        return Err(CurveError::SingularSystem { size });
    }

    let solution = match lu.solve(rhs) {
        Some(solution) => solution,
        None => return Err(CurveError::SingularSystem { size }),
    };

    if solution.iter().any(|value| !value.is_finite()) {
        return Err(CurveError::SingularSystem { size });
    }
    Ok(solution)
}

/// Minimizes `‖design * x - rhs‖` by QR decomposition of the column-equilibrated design matrix.
///
/// The normal equations are never formed, so the conditioning of the problem is not squared.
/// Rank deficiency and condition estimates above [MAX_CONDITION] are reported as
/// [CurveError::SingularSystem].
pub fn solve_least_squares(mut design: DMatrix<f64>, rhs: &DVector<f64>) -> Result<DVector<f64>> {
    let (rows, size) = design.shape();
    debug!("solving {rows}x{size} least squares system");
    if size == 0 || rows < size {
        return Err(CurveError::SingularSystem { size });
    }

    let mut column_norms = Vec::with_capacity(size);
    for mut column in design.column_iter_mut() {
        let norm = column.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(CurveError::SingularSystem { size });
        }
        column.unscale_mut(norm);
        column_norms.push(norm);
    }

    let qr = design.qr();
    let r = qr.r();

    let diagonal = r.diagonal().map(f64::abs);
    let largest = diagonal.max();
    let tolerance = size as f64 * f64::EPSILON * largest;
    if largest == 0.0 || diagonal.iter().any(|d| *d <= tolerance) {
        debug!("rejecting system: smallest diagonal of R {} below tolerance {}", diagonal.min(), tolerance);
        return Err(CurveError::SingularSystem { size });
    }

    let r_inverse = match r.clone().try_inverse() {
        Some(inverse) => inverse,
        None => return Err(CurveError::SingularSystem { size }),
    };
    let condition = norm_1(&r) * norm_1(&r_inverse);
    if !condition.is_finite() || condition > MAX_CONDITION {
        debug!("rejecting system: condition estimate {condition:e}");
        return Err(CurveError::SingularSystem { size });
    }

    let qt_rhs = qr.q().transpose() * rhs;
    let scaled = match r.solve_upper_triangular(&qt_rhs) {
        Some(scaled) => scaled,
        None => return Err(CurveError::SingularSystem { size }),
    };

    let solution = DVector::from_iterator(
        size,
        scaled.iter().zip(column_norms.iter()).map(|(value, norm)| value / norm),
    );
    if solution.iter().any(|value| !value.is_finite()) {
        return Err(CurveError::SingularSystem { size });
    }
    Ok(solution)
}

fn norm_1(matrix: &DMatrix<f64>) -> f64 {
    matrix
        .column_iter()
        .map(|column| column.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Row `i` holds the powers `x_i^0 .. x_i^degree`.
pub(crate) fn vandermonde(xs: &[f64], degree: usize) -> DMatrix<f64> {
    let mut matrix = DMatrix::<f64>::zeros(xs.len(), degree + 1);
    for (i, x) in xs.iter().enumerate() {
        let mut x_pow = 1.0;
        for k in 0..=degree {
            matrix[(i, k)] = x_pow;
            x_pow *= x;
        }
    }
    matrix
}

/// Control point abscissae mapped onto `[-1, 1]` by [ControlPoints::domain].
pub(crate) fn normalized_abscissae(points: &ControlPoints) -> Vec<f64> {
    let (shift, scale) = points.domain();
    points.xs().map(|x| (x - shift) / scale).collect()
}

pub(crate) fn ordinates(points: &ControlPoints) -> DVector<f64> {
    DVector::from_iterator(points.len(), points.iter().map(|p| p.y))
}

/// Least-squares form `[X; √λ I] β ≈ [y; 0]` of the ridge normal equations `(XᵀX + λI) β = Xᵀy`,
/// with `X` built from the raw abscissae.
pub(crate) fn ridge_system(points: &ControlPoints, degree: usize, lambda: f64) -> (DMatrix<f64>, DVector<f64>) {
    let n = points.len();
    let xs: Vec<f64> = points.xs().collect();
    let design = vandermonde(&xs, degree);

    let mut matrix = DMatrix::<f64>::zeros(n + degree + 1, degree + 1);
    matrix.rows_mut(0, n).copy_from(&design);
    let root = lambda.sqrt();
    for k in 0..=degree {
        matrix[(n + k, k)] = root;
    }

    let mut rhs = DVector::<f64>::zeros(n + degree + 1);
    rhs.rows_mut(0, n).copy_from(&ordinates(points));
    (matrix, rhs)
}

/// Checks that `function` passes through every control point.
pub(crate) fn check_interpolation(
    points: &ControlPoints,
    size: usize,
    function: impl Fn(f64) -> f64,
) -> Result<()> {
    let magnitude = points.iter().map(|p| p.y.abs()).fold(1.0, f64::max);
    let tolerance = INTERPOLATION_TOLERANCE * magnitude;

    for p in points {
        let miss = (function(p.x) - p.y).abs();
        if !(miss <= tolerance) {
            debug!("rejecting solution: misses ({}, {}) by {miss:e}", p.x, p.y);
            return Err(CurveError::SingularSystem { size });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::Point2;

    use super::*;

    #[test]
    fn solve_three_by_three() {
        let eps = 1e-9;
        let matrix = DMatrix::from_row_slice(3, 3, &[
            2.0, 1.0, -1.0,
            -3.0, -1.0, 2.0,
            -2.0, 1.0, 2.0,
        ]);
        let rhs = DVector::from_vec(vec![8.0, -11.0, -3.0]);

        let solution = solve(matrix, &rhs).unwrap();

        assert_approx_eq!(solution[0], 2.0, eps);
        assert_approx_eq!(solution[1], 3.0, eps);
        assert_approx_eq!(solution[2], -1.0, eps);
    }

    #[test]
    fn solve_needs_pivoting() {
        let eps = 1e-9;
        let matrix = DMatrix::from_row_slice(2, 2, &[
            0.0, 1.0,
            1.0, 0.0,
        ]);
        let rhs = DVector::from_vec(vec![4.0, 5.0]);

        let solution = solve(matrix, &rhs).unwrap();

        assert_approx_eq!(solution[0], 5.0, eps);
        assert_approx_eq!(solution[1], 4.0, eps);
    }

    #[test]
    fn singular_system() {
        let matrix = DMatrix::from_row_slice(2, 2, &[
            1.0, 2.0,
            2.0, 4.0,
        ]);
        let rhs = DVector::from_vec(vec![1.0, 2.0]);

        assert_eq!(Err(CurveError::SingularSystem { size: 2 }), solve(matrix, &rhs));
    }

    #[test]
    fn zero_matrix_is_singular() {
        let matrix = DMatrix::<f64>::zeros(3, 3);
        let rhs = DVector::from_vec(vec![1.0, 2.0, 3.0]);

        assert_eq!(Err(CurveError::SingularSystem { size: 3 }), solve(matrix, &rhs));
    }

    #[test]
    fn least_squares_line() {
        let eps = 1e-9;
        // y = 0.9 + 0.9x is the best line through (0,1), (1,2), (2,2), (3,4)
        let design = DMatrix::from_row_slice(4, 2, &[
            1.0, 0.0,
            1.0, 1.0,
            1.0, 2.0,
            1.0, 3.0,
        ]);
        let rhs = DVector::from_vec(vec![1.0, 2.0, 2.0, 4.0]);

        let solution = solve_least_squares(design, &rhs).unwrap();

        assert_approx_eq!(solution[0], 0.9, eps);
        assert_approx_eq!(solution[1], 0.9, eps);
    }

    #[test]
    fn least_squares_badly_scaled_columns() {
        let eps = 1e-9;
        let design = DMatrix::from_row_slice(3, 2, &[
            1.0, 1e9,
            1.0, 2e9,
            1.0, 4e9,
        ]);
        // exact solution (1, 2e-9)
        let rhs = DVector::from_vec(vec![3.0, 5.0, 9.0]);

        let solution = solve_least_squares(design, &rhs).unwrap();

        assert_approx_eq!(solution[0], 1.0, eps);
        assert_approx_eq!(solution[1] * 1e9, 2.0, eps);
    }

    #[test]
    fn least_squares_rank_deficient() {
        let design = DMatrix::from_row_slice(3, 2, &[
            1.0, 2.0,
            2.0, 4.0,
            3.0, 6.0,
        ]);
        let rhs = DVector::from_vec(vec![1.0, 2.0, 3.0]);

        assert_eq!(Err(CurveError::SingularSystem { size: 2 }), solve_least_squares(design, &rhs));
    }

    #[test]
    fn least_squares_ill_conditioned() {
        let design = DMatrix::from_row_slice(3, 2, &[
            1.0, 1.0,
            1.0, 1.0 + 1e-12,
            1.0, 1.0 - 1e-12,
        ]);
        let rhs = DVector::from_vec(vec![1.0, 2.0, 3.0]);

        assert_eq!(Err(CurveError::SingularSystem { size: 2 }), solve_least_squares(design, &rhs));
    }

    #[test]
    fn least_squares_underdetermined() {
        let design = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let rhs = DVector::from_vec(vec![1.0]);

        assert_eq!(Err(CurveError::SingularSystem { size: 2 }), solve_least_squares(design, &rhs));
    }

    #[test]
    fn vandermonde_rows() {
        let matrix = vandermonde(&[-1.0, 2.0], 2);

        assert_eq!(matrix, DMatrix::from_row_slice(2, 3, &[
            1.0, -1.0, 1.0,
            1.0, 2.0, 4.0,
        ]));
    }

    #[test]
    fn normalized_abscissae_span_unit_interval() {
        let points = ControlPoints::new(vec![
            Point2::new(100.0, 0.0),
            Point2::new(450.0, 0.0),
            Point2::new(1500.0, 0.0),
        ])
        .unwrap();

        assert_eq!(vec![-1.0, -0.5, 1.0], normalized_abscissae(&points));
    }

    #[test]
    fn ridge_rows_below_design() {
        let points = ControlPoints::new(vec![
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(2.0, 3.0),
        ])
        .unwrap();

        let (matrix, rhs) = ridge_system(&points, 1, 4.0);

        assert_eq!(matrix, DMatrix::from_row_slice(5, 2, &[
            1.0, 0.0,
            1.0, 1.0,
            1.0, 2.0,
            2.0, 0.0,
            0.0, 2.0,
        ]));
        assert_eq!(rhs, DVector::from_vec(vec![1.0, 2.0, 3.0, 0.0, 0.0]));
    }

    #[test]
    fn interpolation_check() {
        let points = ControlPoints::new(vec![
            Point2::new(0.0, 500.0),
            Point2::new(1.0, 300.0),
        ])
        .unwrap();

        assert!(check_interpolation(&points, 2, |x| 500.0 - 200.0 * x).is_ok());
        assert!(check_interpolation(&points, 2, |x| 500.0 - 200.0 * x + 1e-7).is_ok());
        assert_eq!(
            Err(CurveError::SingularSystem { size: 2 }),
            check_interpolation(&points, 2, |x| 500.0 - 199.0 * x)
        );
        assert!(check_interpolation(&points, 2, |_| f64::NAN).is_err());
    }
}
