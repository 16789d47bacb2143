use log::debug;

use crate::error::Result;
use crate::linear;
use crate::params::RidgeParams;
use crate::points::ControlPoints;
use crate::polynomial::Polynomial;

/// Least-squares polynomial of the given `degree` through `points`.
///
/// The abscissae are first mapped onto `[-1, 1]` (see [ControlPoints::domain]) and the
/// overdetermined Vandermonde system is solved by QR, which yields the same minimizer as the
/// normal equations `(XᵀX) β = Xᵀy` without squaring their condition number. The returned
/// [Polynomial] keeps that domain.
///
/// With `degree == points.len() - 1` the fit interpolates every point.
/// # Example
/// ```
/// use curve_fit::{fit_polynomial, ControlPoints};
/// use nalgebra::Point2;
///
/// let points = ControlPoints::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(2.0, 0.0),
/// ]).unwrap();
/// let polynomial = fit_polynomial(&points, 2).unwrap();
///
/// assert!((polynomial.evaluate(1.0) - 1.0).abs() < 1e-9);
/// ```
/// # Errors
/// [CurveError::InsufficientPoints](crate::CurveError::InsufficientPoints) when `degree >= points.len()`,
/// [CurveError::SingularSystem](crate::CurveError::SingularSystem) when the system is numerically
/// singular or an interpolating fit misses a control point.
pub fn fit_polynomial(points: &ControlPoints, degree: usize) -> Result<Polynomial> {
    points.check_degree(degree)?;
    debug!("least squares fit: {} points, degree {degree}", points.len());

    let (shift, scale) = points.domain();
    let design = linear::vandermonde(&linear::normalized_abscissae(points), degree);
    let coefficients = linear::solve_least_squares(design, &linear::ordinates(points))?;
    let polynomial = Polynomial::with_domain(coefficients.iter().copied().collect(), shift, scale);

    if degree == points.max_degree() {
        linear::check_interpolation(points, degree + 1, |x| polynomial.evaluate(x))?;
    }
    Ok(polynomial)
}

/// Polynomial fit with Tikhonov regularization, solving `(XᵀX + λI) β = Xᵀy` for the coefficients
/// `β` of `Σ β_k x^k`.
///
/// The penalty acts on the raw monomial coefficients. The system is solved in its least-squares
/// form `[X; √λ I] β ≈ [y; 0]`. `lambda == 0` is exactly [fit_polynomial], larger values shrink `β`.
/// # Example
/// ```
/// use curve_fit::{fit_ridge_polynomial, ControlPoints, RidgeParams};
/// use nalgebra::Point2;
///
/// let points = ControlPoints::new(vec![
///     Point2::new(-1.0, 3.0),
///     Point2::new(0.5, 5.0),
///     Point2::new(2.0, 10.0),
/// ]).unwrap();
///
/// // a constant fit shrinks the mean: Σy / (n + λ)
/// let polynomial = fit_ridge_polynomial(&points, &RidgeParams::new(0, 3.0)).unwrap();
/// assert!((polynomial.evaluate(0.0) - 3.0).abs() < 1e-9);
/// ```
/// # Errors
/// - [CurveError::InvalidParameter](crate::CurveError::InvalidParameter) when `lambda` is negative or not finite,
/// - [CurveError::InsufficientPoints](crate::CurveError::InsufficientPoints) when `degree >= points.len()`,
/// - [CurveError::SingularSystem](crate::CurveError::SingularSystem) when the system is numerically singular.
pub fn fit_ridge_polynomial(points: &ControlPoints, params: &RidgeParams) -> Result<Polynomial> {
    params.validate()?;
    if params.lambda() == 0.0 {
        return fit_polynomial(points, params.degree());
    }

    let degree = params.degree();
    points.check_degree(degree)?;
    debug!("ridge fit: {} points, degree {degree}, lambda {}", points.len(), params.lambda());

    let (matrix, rhs) = linear::ridge_system(points, degree, params.lambda());
    let beta = linear::solve_least_squares(matrix, &rhs)?;
    Ok(Polynomial::new(beta.iter().copied().collect()))
}
