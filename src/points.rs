use nalgebra::Point2;

use crate::error::{CurveError, Result};

/// Minimal distance between neighbouring x coordinates.
const MIN_SPACING: f64 = 1e-16;

/// Control points of a curve, kept sorted ascending by `x` with pairwise distinct `x` coordinates.
///
/// Every constructor and mutator keeps this invariant, so fitting functions never see
/// an unsorted or degenerate set.
/// # Example
/// ```
/// use curve_fit::ControlPoints;
/// use nalgebra::Point2;
///
/// let points = ControlPoints::new(vec![
///     Point2::new(2.0, 0.0),
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 1.0),
/// ]).unwrap();
///
/// assert_eq!(points.as_slice()[0], Point2::new(0.0, 0.0));
/// assert_eq!(points.max_degree(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPoints {
    points: Vec<Point2<f64>>,
}

impl ControlPoints {
    /// Sorts `points` by `x` and validates them.
    /// # Errors
    /// [CurveError::NonFinitePoint] for NaN or infinite coordinates and
    /// [CurveError::DuplicateAbscissa] when two points share the same `x`.
    /// ```
    /// use curve_fit::ControlPoints;
    /// use nalgebra::Point2;
    ///
    /// let points = ControlPoints::new(vec![Point2::new(1.0, 0.0), Point2::new(1.0, 2.0)]);
    /// assert!(points.is_err());
    /// ```
    pub fn new(mut points: Vec<Point2<f64>>) -> Result<Self> {
        if let Some(p) = points.iter().find(|p| !is_finite(p)) {
            return Err(CurveError::NonFinitePoint { x: p.x, y: p.y });
        }

        points.sort_by(|a, b| a.x.total_cmp(&b.x));

        if let Some(w) = points.windows(2).find(|w| w[1].x - w[0].x < MIN_SPACING) {
            return Err(CurveError::DuplicateAbscissa(w[1].x));
        }

        Ok(ControlPoints { points })
    }

    pub fn empty() -> Self {
        ControlPoints { points: Vec::new() }
    }

    /// Inserts `point` at its sorted position.
    pub fn insert(&mut self, point: Point2<f64>) -> Result<()> {
        if !is_finite(&point) {
            return Err(CurveError::NonFinitePoint { x: point.x, y: point.y });
        }

        let index = self.points.partition_point(|p| p.x < point.x);
        let collides = |i: usize| {
            self.points
                .get(i)
                .is_some_and(|p| (p.x - point.x).abs() < MIN_SPACING)
        };
        if collides(index) || (index > 0 && collides(index - 1)) {
            return Err(CurveError::DuplicateAbscissa(point.x));
        }

        self.points.insert(index, point);
        Ok(())
    }

    /// Removes the point closest to `position` when it lies within `max_distance`.
    pub fn remove_nearest(&mut self, position: Point2<f64>, max_distance: f64) -> Option<Point2<f64>> {
        let (index, distance_squared) = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, nalgebra::distance_squared(p, &position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        if distance_squared <= max_distance * max_distance {
            Some(self.points.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2<f64>> {
        self.points.iter()
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.x)
    }

    /// Smallest and largest `x`, `None` for an empty set.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.x, last.x)),
            _ => None,
        }
    }

    /// `(shift, scale)` mapping the x range onto `[-1, 1]`, the identity for fewer than two points.
    pub fn domain(&self) -> (f64, f64) {
        match self.x_range() {
            Some((first, last)) if last > first => ((first + last) / 2.0, (last - first) / 2.0),
            _ => (0.0, 1.0),
        }
    }

    /// Highest polynomial degree the set supports, `max(0, n - 1)`.
    pub fn max_degree(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Checks that a polynomial part of the given `degree` is determined by these points.
    pub(crate) fn check_degree(&self, degree: usize) -> Result<()> {
        if degree >= self.points.len() {
            return Err(CurveError::InsufficientPoints {
                degree,
                required: degree + 1,
                available: self.points.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ControlPoints {
    type Item = &'a Point2<f64>;
    type IntoIter = std::slice::Iter<'a, Point2<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn is_finite(point: &Point2<f64>) -> bool {
    point.x.is_finite() && point.y.is_finite()
}
