use log::trace;
use nalgebra::Point2;

use crate::error::Result;
use crate::fit::{fit_polynomial, fit_ridge_polynomial};
use crate::gauss::GaussianInterpolant;
use crate::params::{GaussParams, RidgeParams};
use crate::points::ControlPoints;
use crate::polygon::PolygonInterpolant;
use crate::sampling::Sampling;

/// Piecewise-linear polyline through `points`, restricted to the part of the sampling domain covered
/// by the control points.
///
/// Every control point inside the domain is a vertex of the result, the regular sample positions
/// fill the gaps between them.
/// # Example
/// ```
/// use curve_fit::{interpolate_polygon, ControlPoints, Sampling};
/// use nalgebra::Point2;
///
/// let points = ControlPoints::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 2.0),
///     Point2::new(1.5, 2.5),
/// ]).unwrap();
/// let curve = interpolate_polygon(&points, &Sampling::new(0.0, 2.0, 1.0).unwrap()).unwrap();
///
/// // the sample at x = 2 lies past the last control point
/// assert_eq!(curve, vec![Point2::new(0.0, 0.0), Point2::new(1.0, 2.0), Point2::new(1.5, 2.5)]);
/// ```
pub fn interpolate_polygon(points: &ControlPoints, sampling: &Sampling) -> Result<Vec<Point2<f64>>> {
    sampling.validate()?;
    if let Some(trivial) = trivial_curve(points) {
        return Ok(trivial);
    }

    let Some((first, last)) = points.x_range() else {
        return Ok(Vec::new());
    };
    let left = sampling.left().max(first);
    let right = sampling.right().min(last);
    if left > right {
        return Ok(Vec::new());
    }

    let mut xs: Vec<f64> = sampling
        .abscissae()
        .filter(|x| (left..=right).contains(x))
        .chain(points.xs().filter(|x| (left..=right).contains(x)))
        .collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();

    let ys = PolygonInterpolant::new(points).batch_evaluate(&xs);
    trace!("polygon interpolation: {} vertices", xs.len());
    Ok(zip_points(&xs, ys))
}

/// Samples the Gaussian basis interpolant described by [GaussianInterpolant] over `sampling`.
pub fn interpolate_gauss(
    points: &ControlPoints,
    params: &GaussParams,
    sampling: &Sampling,
) -> Result<Vec<Point2<f64>>> {
    sampling.validate()?;
    params.validate()?;
    if let Some(trivial) = trivial_curve(points) {
        return Ok(trivial);
    }

    let gauss = GaussianInterpolant::new(points, params)?;
    Ok(sample(sampling, |x| gauss.evaluate(x)))
}

/// Samples the least-squares polynomial of `degree` over `sampling`.
pub fn approximate_polygon(
    points: &ControlPoints,
    degree: usize,
    sampling: &Sampling,
) -> Result<Vec<Point2<f64>>> {
    sampling.validate()?;
    if let Some(trivial) = trivial_curve(points) {
        return Ok(trivial);
    }

    let polynomial = fit_polynomial(points, degree)?;
    Ok(sample(sampling, |x| polynomial.evaluate(x)))
}

/// Samples the ridge regularized least-squares polynomial over `sampling`.
pub fn approximate_normalized(
    points: &ControlPoints,
    params: &RidgeParams,
    sampling: &Sampling,
) -> Result<Vec<Point2<f64>>> {
    sampling.validate()?;
    params.validate()?;
    if let Some(trivial) = trivial_curve(points) {
        return Ok(trivial);
    }

    let polynomial = fit_ridge_polynomial(points, params)?;
    Ok(sample(sampling, |x| polynomial.evaluate(x)))
}

/// Nothing can be fitted through fewer than two points: the result is the input itself.
fn trivial_curve(points: &ControlPoints) -> Option<Vec<Point2<f64>>> {
    if points.len() < 2 {
        Some(points.as_slice().to_vec())
    } else {
        None
    }
}

fn sample(sampling: &Sampling, function: impl Fn(f64) -> f64) -> Vec<Point2<f64>> {
    let mut curve = Vec::with_capacity(sampling.len());
    curve.extend(sampling.abscissae().map(|x| Point2::new(x, function(x))));
    trace!("sampled {} points on [{}, {}]", curve.len(), sampling.left(), sampling.right());
    curve
}

fn zip_points(xs: &[f64], ys: Vec<f64>) -> Vec<Point2<f64>> {
    xs.iter().zip(ys).map(|(x, y)| Point2::new(*x, y)).collect()
}
