use crate::error::{CurveError, Result};

/// Largest number of abscissae a [Sampling] may produce.
pub const MAX_SAMPLES: usize = 1 << 20;

/// Output domain `[left, right]` and resolution `step` used to turn a fitted function into a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sampling {
    left: f64,
    right: f64,
    step: f64,
}

impl Default for Sampling {
    fn default() -> Self {
        Sampling { left: 20.0, right: 1580.0, step: 20.0 }
    }
}

impl Sampling {
    /// # Errors
    /// [CurveError::InvalidSampling] when a bound is not finite, `left > right`, `step` is not positive
    /// or the domain would need more than [MAX_SAMPLES] abscissae.
    /// ```
    /// use curve_fit::Sampling;
    ///
    /// assert!(Sampling::new(0.0, 10.0, 0.5).is_ok());
    /// assert!(Sampling::new(10.0, 0.0, 0.5).is_err());
    /// assert!(Sampling::new(0.0, 10.0, 0.0).is_err());
    /// ```
    pub fn new(left: f64, right: f64, step: f64) -> Result<Self> {
        let sampling = Sampling { left, right, step };
        sampling.validate()?;
        Ok(sampling)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.left.is_finite() || !self.right.is_finite() {
            return Err(CurveError::InvalidSampling(format!(
                "bounds [{}, {}] are not finite",
                self.left, self.right
            )));
        }
        if self.left > self.right {
            return Err(CurveError::InvalidSampling(format!(
                "left bound {} is greater than right bound {}",
                self.left, self.right
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(CurveError::InvalidSampling(format!("step {} is not positive", self.step)));
        }
        let span = (self.right - self.left) / self.step;
        // one slot is kept for the closing sample
        if !span.is_finite() || span >= (MAX_SAMPLES - 1) as f64 {
            return Err(CurveError::InvalidSampling(format!(
                "[{}, {}] with step {} needs more than {MAX_SAMPLES} samples",
                self.left, self.right, self.step
            )));
        }
        Ok(())
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of abscissae produced by [Sampling::abscissae].
    pub fn len(&self) -> usize {
        let regular = self.regular_count();
        if self.needs_closing_sample(regular) {
            regular + 1
        } else {
            regular
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sample positions `left, left + step, ...` ending exactly at `right`.
    ///
    /// A step wider than the domain still yields `[left, right]`, and `left == right` yields one sample.
    pub fn abscissae(&self) -> impl Iterator<Item = f64> + '_ {
        let regular = self.regular_count();
        let closing = self.needs_closing_sample(regular).then_some(self.right);

        (0..regular)
            .map(move |k| self.left + self.step * k as f64)
            .chain(closing)
    }

    fn regular_count(&self) -> usize {
        let span = (self.right - self.left) / self.step;
        if span.is_finite() && span > 0.0 {
            span.min((MAX_SAMPLES - 2) as f64) as usize + 1
        } else {
            1
        }
    }

    fn needs_closing_sample(&self, regular: usize) -> bool {
        let last = self.left + self.step * (regular - 1) as f64;
        self.right - last > self.step * 1e-9
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn regular_grid() {
        let eps = 1e-12;
        let sampling = Sampling::new(0.0, 2.0, 0.5).unwrap();
        let xs: Vec<f64> = sampling.abscissae().collect();

        assert_eq!(5, xs.len());
        assert_eq!(sampling.len(), xs.len());
        for (i, x) in xs.iter().enumerate() {
            assert_approx_eq!(*x, 0.5 * i as f64, eps);
        }
    }

    #[test]
    fn closes_with_right_bound() {
        let sampling = Sampling::new(0.0, 1.0, 0.3).unwrap();
        let xs: Vec<f64> = sampling.abscissae().collect();

        assert_eq!(5, xs.len());
        assert_eq!(sampling.len(), xs.len());
        assert_eq!(1.0, *xs.last().unwrap());
    }

    #[test]
    fn step_wider_than_domain() {
        let sampling = Sampling::new(3.0, 4.0, 10.0).unwrap();
        let xs: Vec<f64> = sampling.abscissae().collect();

        assert_eq!(vec![3.0, 4.0], xs);
    }

    #[test]
    fn single_point_domain() {
        let sampling = Sampling::new(2.0, 2.0, 1.0).unwrap();
        let xs: Vec<f64> = sampling.abscissae().collect();

        assert_eq!(vec![2.0], xs);
        assert_eq!(1, sampling.len());
    }

    #[test]
    fn invalid_sampling() {
        assert!(Sampling::new(f64::NAN, 1.0, 0.1).is_err());
        assert!(Sampling::new(0.0, f64::INFINITY, 0.1).is_err());
        assert!(Sampling::new(1.0, 0.0, 0.1).is_err());
        assert!(Sampling::new(0.0, 1.0, -0.1).is_err());
        assert!(Sampling::new(0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn too_many_samples() {
        assert!(matches!(
            Sampling::new(-1e308, 1e308, 1.0),
            Err(CurveError::InvalidSampling(_))
        ));
        assert!(matches!(
            Sampling::new(0.0, 1e6, 1e-12),
            Err(CurveError::InvalidSampling(_))
        ));
        assert!(Sampling::new(0.0, (MAX_SAMPLES - 1) as f64, 1.0).is_err());

        let widest = Sampling::new(0.0, (MAX_SAMPLES - 2) as f64, 1.0).unwrap();
        assert_eq!(MAX_SAMPLES - 1, widest.len());

        let closing = Sampling::new(0.0, (MAX_SAMPLES - 2) as f64 + 0.5, 1.0).unwrap();
        assert_eq!(MAX_SAMPLES, closing.len());
    }

    #[test]
    fn default_matches_canvas() {
        let sampling = Sampling::default();

        assert!(sampling.validate().is_ok());
        assert_eq!(79, sampling.len());
    }
}
