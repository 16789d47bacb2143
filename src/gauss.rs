use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::Result;
use crate::linear;
use crate::params::GaussParams;
use crate::points::ControlPoints;
use crate::polynomial::Polynomial;

/// Gaussian radial basis interpolant with a polynomial trend:
///
/// `f(x) = Σ c_i exp(-(x - x_i)² / σ²) + Σ d_k x^k`
///
/// The weights are found from the square system of `n + m + 1` equations made of the `n`
/// interpolation conditions and the `m + 1` side conditions `Σ c_i x_i^k = 0`. The trend is
/// expressed over the control points' normalized domain, which spans the same polynomials and
/// the same side conditions while keeping the system well scaled on wide x ranges.
#[derive(Debug, Clone)]
pub struct GaussianInterpolant {
    centers: Vec<f64>,
    weights: Vec<f64>,
    trend: Polynomial,
    sigma2: f64,
}

impl GaussianInterpolant {
    /// # Errors
    /// - [CurveError::InvalidParameter](crate::CurveError::InvalidParameter) for a non-positive `sigma2`,
    /// - [CurveError::InsufficientPoints](crate::CurveError::InsufficientPoints) when the trend degree is not below the number of points,
    /// - [CurveError::SingularSystem](crate::CurveError::SingularSystem) when the weights cannot be solved for
    ///   or the solved interpolant misses a control point.
    ///
    /// # Example
    /// ```
    /// use curve_fit::{ControlPoints, GaussParams, GaussianInterpolant};
    /// use nalgebra::Point2;
    ///
    /// let points = ControlPoints::new(vec![
    ///     Point2::new(0.0, 1.0),
    ///     Point2::new(1.0, 3.0),
    ///     Point2::new(2.0, 2.0),
    /// ]).unwrap();
    /// let gauss = GaussianInterpolant::new(&points, &GaussParams::new(1.0, 0)).unwrap();
    ///
    /// assert!((gauss.evaluate(1.0) - 3.0).abs() < 1e-9);
    /// ```
    pub fn new(points: &ControlPoints, params: &GaussParams) -> Result<Self> {
        params.validate()?;
        points.check_degree(params.degree())?;

        let (matrix, rhs) = Self::system(points, params);
        let solution = linear::solve(matrix, &rhs)?;

        let n = points.len();
        let (shift, scale) = points.domain();
        let weights = solution.rows(0, n).iter().copied().collect();
        let trend = Polynomial::with_domain(
            solution.rows(n, params.degree() + 1).iter().copied().collect(),
            shift,
            scale,
        );

        let interpolant = GaussianInterpolant {
            centers: points.xs().collect(),
            weights,
            trend,
            sigma2: params.sigma2(),
        };
        linear::check_interpolation(points, n + params.degree() + 1, |x| interpolant.evaluate(x))?;
        Ok(interpolant)
    }

    fn system(points: &ControlPoints, params: &GaussParams) -> (DMatrix<f64>, DVector<f64>) {
        let n = points.len();
        let trend_size = params.degree() + 1;
        let size = n + trend_size;
        debug!("gauss interpolation: {n} centers, trend degree {}, system size {size}", params.degree());

        let mut matrix = DMatrix::<f64>::zeros(size, size);
        let mut rhs = DVector::<f64>::zeros(size);
        let trend_block = linear::vandermonde(&linear::normalized_abscissae(points), params.degree());

        for (i, pi) in points.iter().enumerate() {
            for (j, pj) in points.iter().enumerate() {
                matrix[(i, j)] = gaussian(pi.x - pj.x, params.sigma2());
            }
            for k in 0..trend_size {
                matrix[(i, n + k)] = trend_block[(i, k)];
                matrix[(n + k, i)] = trend_block[(i, k)];
            }
            rhs[i] = pi.y;
        }
        (matrix, rhs)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let radial: f64 = self
            .centers
            .iter()
            .zip(self.weights.iter())
            .map(|(center, weight)| weight * gaussian(x - center, self.sigma2))
            .sum();
        radial + self.trend.evaluate(x)
    }

    /// Radial weights `c_i`, one per control point.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Polynomial trend, over the normalized domain of the control points.
    pub fn trend(&self) -> &Polynomial {
        &self.trend
    }
}

fn gaussian(distance: f64, sigma2: f64) -> f64 {
    (-distance * distance / sigma2).exp()
}
