use nalgebra::Point2;

use crate::points::ControlPoints;

/// Piecewise-linear interpolant through a set of control points.
///
/// Outside of the control points' x range the interpolant is clamped to the first or last `y`.
pub struct PolygonInterpolant<'a> {
    points: &'a [Point2<f64>],
}

impl<'a> PolygonInterpolant<'a> {
    pub fn new(points: &'a ControlPoints) -> Self {
        PolygonInterpolant { points: points.as_slice() }
    }

    /// `None` when there are no control points.
    pub fn evaluate(&self, x: f64) -> Option<f64> {
        let (first, last) = (self.points.first()?, self.points.last()?);
        if x <= first.x {
            return Some(first.y);
        }
        if x >= last.x {
            return Some(last.y);
        }
        let index = self.find_interval_index_bisect(x);
        Some(self.evaluate_in_interval(index, x))
    }

    /// Evaluates ascending `xs`, walking intervals forward instead of bisecting each time.
    pub fn batch_evaluate(&self, xs: &[f64]) -> Vec<f64> {
        let mut results = Vec::with_capacity(xs.len());
        if self.points.len() < 2 {
            results.extend(xs.iter().filter_map(|x| self.evaluate(*x)));
            return results;
        }

        let mut index = 0;
        for x in xs {
            if *x <= self.points[0].x || *x >= self.points[self.points.len() - 1].x {
                results.extend(self.evaluate(*x));
                continue;
            }
            index = self.find_interval_index_with_hint(index, *x);
            results.push(self.evaluate_in_interval(index, *x));
        }
        results
    }

    fn evaluate_in_interval(&self, index: usize, x: f64) -> f64 {
        let p0 = self.points[index];
        let p1 = self.points[index + 1];
        let t = (x - p0.x) / (p1.x - p0.x);
        p0.y + t * (p1.y - p0.y)
    }

    fn find_interval_index_bisect(&self, x: f64) -> usize {
        let mut min = 0;
        let mut max = self.points.len() - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x < self.points[mid].x {
                max = mid;
            } else {
                min = mid;
            }
        }
        min
    }

    fn find_interval_index_with_hint(&self, index_hint: usize, x: f64) -> usize {
        if self.is_in_interval_range(index_hint, x) {
            return index_hint;
        }
        if index_hint + 2 < self.points.len() && self.is_in_interval_range(index_hint + 1, x) {
            return index_hint + 1;
        }
        self.find_interval_index_bisect(x)
    }

    fn is_in_interval_range(&self, interval_index: usize, x: f64) -> bool {
        self.points[interval_index].x <= x && x <= self.points[interval_index + 1].x
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn three_points() -> ControlPoints {
        ControlPoints::new(vec![
            Point2::new(0.0, 4.0),
            Point2::new(1.0, 2.0),
            Point2::new(2.0, 6.0),
        ])
        .unwrap()
    }

    #[test]
    fn evaluate_between_points() {
        let eps = 1e-12;
        let points = three_points();
        let polygon = PolygonInterpolant::new(&points);

        assert_approx_eq!(polygon.evaluate(0.0).unwrap(), 4.0, eps);
        assert_approx_eq!(polygon.evaluate(0.25).unwrap(), 3.5, eps);
        assert_approx_eq!(polygon.evaluate(0.5).unwrap(), 3.0, eps);
        assert_approx_eq!(polygon.evaluate(1.0).unwrap(), 2.0, eps);
        assert_approx_eq!(polygon.evaluate(1.5).unwrap(), 4.0, eps);
        assert_approx_eq!(polygon.evaluate(1.75).unwrap(), 5.0, eps);
        assert_approx_eq!(polygon.evaluate(2.0).unwrap(), 6.0, eps);
    }

    #[test]
    fn evaluate_clamps_outside_range() {
        let points = three_points();
        let polygon = PolygonInterpolant::new(&points);

        assert_eq!(Some(4.0), polygon.evaluate(-3.0));
        assert_eq!(Some(6.0), polygon.evaluate(10.0));
    }

    #[test]
    fn evaluate_degenerate_sets() {
        let empty = ControlPoints::empty();
        assert_eq!(None, PolygonInterpolant::new(&empty).evaluate(1.0));
        assert!(PolygonInterpolant::new(&empty).batch_evaluate(&[1.0, 2.0]).is_empty());

        let single = ControlPoints::new(vec![Point2::new(1.0, 7.0)]).unwrap();
        assert_eq!(Some(7.0), PolygonInterpolant::new(&single).evaluate(-5.0));
        assert_eq!(vec![7.0, 7.0], PolygonInterpolant::new(&single).batch_evaluate(&[0.0, 3.0]));
    }

    #[test]
    fn batch_matches_single_evaluation() {
        let eps = 1e-12;
        let points = ControlPoints::new(vec![
            Point2::new(0.0, 1.0),
            Point2::new(0.3, -1.0),
            Point2::new(1.1, 0.0),
            Point2::new(1.2, 3.0),
            Point2::new(4.0, 1.0),
        ])
        .unwrap();
        let polygon = PolygonInterpolant::new(&points);

        let xs: Vec<f64> = (0..=50).map(|i| -0.5 + 0.1 * i as f64).collect();
        let batch = polygon.batch_evaluate(&xs);

        assert_eq!(xs.len(), batch.len());
        for (x, y) in xs.iter().zip(batch.iter()) {
            assert_approx_eq!(polygon.evaluate(*x).unwrap(), *y, eps);
        }
    }
}
