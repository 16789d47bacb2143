//! Interpolation and least-squares approximation of 2D control points.
//!
//! Four methods turn a set of control points into a densely sampled polyline:
//! - [interpolate_polygon] - piecewise-linear interpolation,
//! - [interpolate_gauss] - Gaussian radial basis interpolation with a polynomial trend,
//! - [approximate_polygon] - least-squares polynomial fit,
//! - [approximate_normalized] - ridge regularized least-squares polynomial fit.
//!
//! Ill-posed inputs are reported through [CurveError] instead of producing garbage coordinates.
//! [Sketch] keeps the last good curve of every method for interactive editors.
//!
//! # Example
//! ```
//! use curve_fit::{approximate_polygon, ControlPoints, Sampling};
//! use assert_approx_eq::assert_approx_eq;
//! use nalgebra::Point2;
//!
//! let points = ControlPoints::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(2.0, 0.0),
//! ]).unwrap();
//! let sampling = Sampling::new(0.0, 2.0, 0.5).unwrap();
//!
//! let curve = approximate_polygon(&points, 2, &sampling).unwrap();
//!
//! assert_eq!(5, curve.len());
//! assert_approx_eq!(0.75, curve[1].y, 1e-9);
//! assert_approx_eq!(1.0, curve[2].y, 1e-9);
//! ```

mod curve;
mod error;
mod fit;
mod gauss;
mod linear;
mod params;
mod points;
mod polygon;
mod polynomial;
mod sampling;
mod sketch;

pub use curve::{approximate_normalized, approximate_polygon, interpolate_gauss, interpolate_polygon};
pub use error::{CurveError, Result};
pub use fit::{fit_polynomial, fit_ridge_polynomial};
pub use gauss::GaussianInterpolant;
pub use linear::{solve, solve_least_squares, MAX_CONDITION};
pub use params::{clamp_degree, GaussParams, RidgeParams, MIN_SIGMA2};
pub use points::ControlPoints;
pub use polygon::PolygonInterpolant;
pub use polynomial::Polynomial;
pub use sampling::{Sampling, MAX_SAMPLES};
pub use sketch::{Method, Sketch, DEFAULT_PICK_RADIUS};
