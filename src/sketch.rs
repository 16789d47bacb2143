use log::{debug, warn};
use nalgebra::Point2;

use crate::curve::{approximate_normalized, approximate_polygon, interpolate_gauss, interpolate_polygon};
use crate::error::{CurveError, Result};
use crate::params::{clamp_degree, GaussParams, RidgeParams};
use crate::points::ControlPoints;
use crate::sampling::Sampling;

/// Radius within which [Sketch::remove_nearest] picks a control point.
pub const DEFAULT_PICK_RADIUS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    PolygonInterpolation,
    GaussInterpolation,
    PolynomialApproximation,
    RidgeApproximation,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::PolygonInterpolation,
        Method::GaussInterpolation,
        Method::PolynomialApproximation,
        Method::RidgeApproximation,
    ];

    fn index(self) -> usize {
        match self {
            Method::PolygonInterpolation => 0,
            Method::GaussInterpolation => 1,
            Method::PolynomialApproximation => 2,
            Method::RidgeApproximation => 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct CachedCurve {
    points: Vec<Point2<f64>>,
    dirty: bool,
}

/// Editable set of control points together with the last curve computed by every [Method].
///
/// Mutations only mark the affected curves as stale, [Sketch::refresh] recomputes them.
/// A failing method keeps its previous curve.
/// # Example
/// ```
/// use curve_fit::{Method, Sketch};
/// use nalgebra::Point2;
///
/// let mut sketch = Sketch::default();
/// sketch.add_point(Point2::new(100.0, 200.0)).unwrap();
/// sketch.add_point(Point2::new(300.0, 250.0)).unwrap();
/// sketch.set_polynomial_degree(5);
///
/// assert!(sketch.refresh().is_empty());
/// assert!(!sketch.curve(Method::PolynomialApproximation).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Sketch {
    points: ControlPoints,
    sampling: Sampling,
    gauss: GaussParams,
    polynomial_degree: usize,
    ridge: RidgeParams,
    curves: [CachedCurve; 4],
}

impl Default for Sketch {
    fn default() -> Self {
        Sketch::new(Sampling::default())
    }
}

impl Sketch {
    pub fn new(sampling: Sampling) -> Self {
        Sketch {
            points: ControlPoints::empty(),
            sampling,
            gauss: GaussParams::default(),
            polynomial_degree: 0,
            ridge: RidgeParams::default(),
            curves: Default::default(),
        }
    }

    pub fn points(&self) -> &ControlPoints {
        &self.points
    }

    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }

    pub fn gauss_params(&self) -> &GaussParams {
        &self.gauss
    }

    pub fn polynomial_degree(&self) -> usize {
        self.polynomial_degree
    }

    pub fn ridge_params(&self) -> &RidgeParams {
        &self.ridge
    }

    pub fn add_point(&mut self, point: Point2<f64>) -> Result<()> {
        self.points.insert(point)?;
        self.invalidate_all();
        Ok(())
    }

    /// Removes the control point nearest to `position` within `max_distance`.
    pub fn remove_nearest(&mut self, position: Point2<f64>, max_distance: f64) -> Option<Point2<f64>> {
        let removed = self.points.remove_nearest(position, max_distance)?;
        self.invalidate_all();
        Some(removed)
    }

    pub fn set_sampling(&mut self, sampling: Sampling) {
        if sampling != self.sampling {
            self.sampling = sampling;
            self.invalidate_all();
        }
    }

    pub fn set_gauss_params(&mut self, params: GaussParams) {
        if params != self.gauss {
            self.gauss = params;
            self.invalidate(Method::GaussInterpolation);
        }
    }

    pub fn set_polynomial_degree(&mut self, degree: usize) {
        if degree != self.polynomial_degree {
            self.polynomial_degree = degree;
            self.invalidate(Method::PolynomialApproximation);
        }
    }

    pub fn set_ridge_params(&mut self, params: RidgeParams) {
        if params != self.ridge {
            self.ridge = params;
            self.invalidate(Method::RidgeApproximation);
        }
    }

    pub fn is_stale(&self, method: Method) -> bool {
        self.curves[method.index()].dirty
    }

    /// Last successfully computed curve of `method`.
    pub fn curve(&self, method: Method) -> &[Point2<f64>] {
        &self.curves[method.index()].points
    }

    /// Recomputes every stale curve and returns the methods that failed.
    pub fn refresh(&mut self) -> Vec<(Method, CurveError)> {
        let mut failures = Vec::new();

        for method in Method::ALL {
            if !self.is_stale(method) {
                continue;
            }
            match self.compute(method) {
                Ok(points) => {
                    debug!("{method:?}: {} curve points", points.len());
                    self.curves[method.index()].points = points;
                }
                Err(error) => {
                    warn!("{method:?} failed, keeping previous curve: {error}");
                    failures.push((method, error));
                }
            }
            self.curves[method.index()].dirty = false;
        }
        failures
    }

    fn compute(&self, method: Method) -> Result<Vec<Point2<f64>>> {
        let n = self.points.len();
        match method {
            Method::PolygonInterpolation => interpolate_polygon(&self.points, &self.sampling),
            Method::GaussInterpolation => {
                interpolate_gauss(&self.points, &self.gauss.clamped(n), &self.sampling)
            }
            Method::PolynomialApproximation => {
                approximate_polygon(&self.points, clamp_degree(self.polynomial_degree, n), &self.sampling)
            }
            Method::RidgeApproximation => {
                approximate_normalized(&self.points, &self.ridge.clamped(n), &self.sampling)
            }
        }
    }

    fn invalidate(&mut self, method: Method) {
        self.curves[method.index()].dirty = true;
    }

    fn invalidate_all(&mut self) {
        for curve in self.curves.iter_mut() {
            curve.dirty = true;
        }
    }
}
