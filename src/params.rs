use crate::error::{CurveError, Result};

/// Smallest variance accepted by [GaussParams::clamped].
pub const MIN_SIGMA2: f64 = 1.0;

/// Clamps a polynomial degree into `[0, max(0, n - 1)]` for `n` control points.
pub fn clamp_degree(degree: usize, number_of_points: usize) -> usize {
    degree.min(number_of_points.saturating_sub(1))
}

/// Parameters of the Gaussian interpolation: variance `sigma2` of the basis and degree of the polynomial trend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussParams {
    sigma2: f64,
    degree: usize,
}

impl Default for GaussParams {
    fn default() -> Self {
        Self { sigma2: 10000.0, degree: 0 }
    }
}

impl GaussParams {
    pub fn new(sigma2: f64, degree: usize) -> Self {
        Self { sigma2, degree }
    }

    pub fn with_sigma2(mut self, sigma2: f64) -> Self {
        self.sigma2 = sigma2;
        self
    }

    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sigma2.is_finite() || self.sigma2 <= 0.0 {
            return Err(CurveError::InvalidParameter {
                name: "sigma2",
                value: self.sigma2,
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }

    /// Degree clamped to what `number_of_points` supports and variance floored at [MIN_SIGMA2].
    pub fn clamped(&self, number_of_points: usize) -> Self {
        let sigma2 = if self.sigma2.is_nan() { MIN_SIGMA2 } else { self.sigma2.max(MIN_SIGMA2) };
        Self {
            sigma2,
            degree: clamp_degree(self.degree, number_of_points),
        }
    }
}

/// Parameters of the ridge regularized least-squares fit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RidgeParams {
    degree: usize,
    lambda: f64,
}

impl Default for RidgeParams {
    fn default() -> Self {
        Self { degree: 0, lambda: 10.0 }
    }
}

impl RidgeParams {
    pub fn new(degree: usize, lambda: f64) -> Self {
        Self { degree, lambda }
    }

    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn validate(&self) -> Result<()> {
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(CurveError::InvalidParameter {
                name: "lambda",
                value: self.lambda,
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    pub fn clamped(&self, number_of_points: usize) -> Self {
        let lambda = if self.lambda.is_nan() { 0.0 } else { self.lambda.max(0.0) };
        Self {
            degree: clamp_degree(self.degree, number_of_points),
            lambda,
        }
    }
}
