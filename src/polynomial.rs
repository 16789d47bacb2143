/// Polynomial `Σ a_k t^k` in the normalized variable `t = (x - shift) / scale`.
///
/// Fits store their coefficients over `t` so that high degrees stay well conditioned on wide
/// x ranges. [Polynomial::new] uses the identity domain, `t = x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
    shift: f64,
    scale: f64,
}

impl Polynomial {

    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients, shift: 0.0, scale: 1.0 }
    }

    pub fn with_domain(coefficients: Vec<f64>, shift: f64, scale: f64) -> Self {
        Polynomial { coefficients, shift, scale }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let t = (x - self.shift) / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |result, c| result * t + c)
    }

    /// Coefficients over the normalized variable, see [Polynomial::shift] and [Polynomial::scale].
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Coefficients `β_k` of `Σ β_k x^k`.
    ///
    /// Expanding a high degree polynomial over a wide domain loses precision, prefer
    /// [Polynomial::evaluate] for sampling.
    pub fn monomial_coefficients(&self) -> Vec<f64> {
        if self.shift == 0.0 && self.scale == 1.0 {
            return self.coefficients.clone();
        }

        // Horner over polynomials: result = result * (x - shift) / scale + a_k
        let mut result: Vec<f64> = Vec::with_capacity(self.coefficients.len());
        for a in self.coefficients.iter().rev() {
            let mut next = vec![0.0; result.len() + 1];
            for (j, c) in result.iter().enumerate() {
                next[j + 1] += c / self.scale;
                next[j] -= c * self.shift / self.scale;
            }
            next[0] += a;
            result = next;
        }
        result
    }

    /// Degree of the coefficient vector, trailing zeros included. An empty polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Euclidean norm of the monomial coefficients `β`.
    pub fn norm(&self) -> f64 {
        self.monomial_coefficients().iter().map(|c| c * c).sum::<f64>().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use super::*;

    #[test]
    fn evaluate() {

        let eps = 1e-6;
        let coefficients = vec![1.0, 2.5, -0.25];
        let polynomial = Polynomial::new(coefficients);

        assert_approx_eq!(polynomial.evaluate(2.1), 5.1475, eps);
        assert_approx_eq!(polynomial.evaluate(-3.14), -9.3149, eps);
        assert_approx_eq!(polynomial.evaluate(0.0), 1.0, eps);
    }

    #[test]
    fn empty_polynomial_is_zero() {
        let polynomial = Polynomial::new(Vec::new());

        assert_eq!(polynomial.evaluate(3.0), 0.0);
        assert_eq!(polynomial.degree(), 0);
        assert_eq!(polynomial.norm(), 0.0);
    }

    #[test]
    fn degree_and_norm() {
        let eps = 1e-12;
        let polynomial = Polynomial::new(vec![3.0, 0.0, 4.0]);

        assert_eq!(polynomial.degree(), 2);
        assert_approx_eq!(polynomial.norm(), 5.0, eps);
    }

    #[test]
    fn evaluate_on_shifted_domain() {
        let eps = 1e-12;
        // t = (x - 3) / 2, p(t) = 1 + t + t^2
        let polynomial = Polynomial::with_domain(vec![1.0, 1.0, 1.0], 3.0, 2.0);

        assert_approx_eq!(polynomial.evaluate(3.0), 1.0, eps);
        assert_approx_eq!(polynomial.evaluate(5.0), 3.0, eps);
        assert_approx_eq!(polynomial.evaluate(1.0), 1.0, eps);
    }

    #[test]
    fn monomial_expansion() {
        let eps = 1e-12;
        // 1 + (x-3)/2 + (x-3)^2/4 = 1.75 - x + x^2/4
        let polynomial = Polynomial::with_domain(vec![1.0, 1.0, 1.0], 3.0, 2.0);

        let beta = polynomial.monomial_coefficients();

        assert_eq!(3, beta.len());
        assert_approx_eq!(beta[0], 1.75, eps);
        assert_approx_eq!(beta[1], -1.0, eps);
        assert_approx_eq!(beta[2], 0.25, eps);

        let monomial = Polynomial::new(beta);
        for x in [-2.0, 0.0, 1.5, 7.0] {
            assert_approx_eq!(monomial.evaluate(x), polynomial.evaluate(x), eps);
        }
    }
}
