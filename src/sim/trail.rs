use std::collections::VecDeque;

use nalgebra::{Point3, Vector3};

/// Position history behind an orbiting body, capped by cumulative arc length
/// rather than by point count. The cap is chosen to approximate one orbit's
/// worth of history.
///
/// A running total of the inter-point distances is kept up to date on push
/// and pop, so capping costs O(1) amortized per tick instead of a
/// from-scratch O(n) sum.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vector3<f64>>,
    max_length: f64,
    arc_length: f64,
}

impl Trail {
    /// `max_length` is the arc-length cap in meters. Panics unless it is
    /// positive and finite; a trail that can hold no history is a
    /// configuration error.
    pub fn new(max_length: f64) -> Self {
        assert!(
            max_length > 0.0 && max_length.is_finite(),
            "trail cap must be positive, got {}",
            max_length
        );

        Trail {
            points: VecDeque::new(),
            max_length,
            arc_length: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length of the polyline through the retained points.
    pub fn arc_length(&self) -> f64 {
        self.arc_length
    }

    pub fn max_length(&self) -> f64 {
        self.max_length
    }

    /// Appends a sampled position to the newest end.
    pub fn add_point(&mut self, point: Vector3<f64>) {
        if let Some(last) = self.points.back() {
            self.arc_length += (point - last).norm();
        }
        self.points.push_back(point);
    }

    /// Drops points from the oldest end, one at a time, until the arc length
    /// fits the cap or a single point remains. The newest end is never
    /// touched, so the most recent sample always survives.
    pub fn cap(&mut self) {
        while self.points.len() > 1 && self.arc_length > self.max_length {
            let removed = self.points.pop_front().unwrap();
            let next_oldest = self.points.front().unwrap();
            self.arc_length -= (next_oldest - removed).norm();
        }
        if self.points.len() <= 1 {
            self.arc_length = 0.0;
        }
    }

    /// Scaled positions plus a fade ramp for the renderer: opacity rises
    /// linearly with index, from the oldest point up to exactly 1.0 at the
    /// newest. A lone point is fully opaque. Recomputed in full on each
    /// call; the arc-length cap keeps the point count small.
    pub fn renderable(&self, scale: f64) -> (Vec<Point3<f32>>, Vec<f32>) {
        let n = self.points.len();
        let mut positions = Vec::with_capacity(n);
        let mut opacities = Vec::with_capacity(n);

        for (i, point) in self.points.iter().enumerate() {
            let scaled: Point3<f32> = nalgebra::convert(Point3::from(point * scale));
            positions.push(scaled);
            let opacity = if n > 1 {
                i as f32 / (n - 1) as f32
            } else {
                1.0
            };
            opacities.push(opacity);
        }

        (positions, opacities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // Points spaced `spacing` apart along the x-axis, oldest at the origin.
    fn collinear_trail(spacing: f64, count: usize, cap: f64) -> Trail {
        let mut trail = Trail::new(cap);
        for i in 0..count {
            trail.add_point(Vector3::x() * (i as f64 * spacing));
        }
        trail
    }

    #[test]
    fn cap_trims_oldest_until_within_length() {
        // Six points, unit spacing: arc length 5.0 against a cap of 2.5.
        let mut trail = collinear_trail(1.0, 6, 2.5);
        trail.cap();

        assert_eq!(trail.len(), 3);
        assert_abs_diff_eq!(trail.arc_length(), 2.0);

        // The survivors are the newest three, in oldest-first order.
        let (points, _) = trail.renderable(1.0);
        assert_relative_eq!(points[0], Point3::new(3.0f32, 0.0, 0.0));
        assert_relative_eq!(points[1], Point3::new(4.0f32, 0.0, 0.0));
        assert_relative_eq!(points[2], Point3::new(5.0f32, 0.0, 0.0));
    }

    #[test]
    fn cap_is_a_no_op_when_under_length() {
        let mut trail = collinear_trail(1.0, 4, 10.0);
        trail.cap();
        assert_eq!(trail.len(), 4);
        assert_abs_diff_eq!(trail.arc_length(), 3.0);
    }

    #[test]
    fn cap_smaller_than_newest_edge_keeps_only_the_newest_point() {
        let mut trail = collinear_trail(10.0, 4, 5.0);
        trail.cap();

        assert_eq!(trail.len(), 1);
        let (points, opacities) = trail.renderable(1.0);
        assert_relative_eq!(points[0], Point3::new(30.0f32, 0.0, 0.0));
        assert_eq!(opacities, vec![1.0]);
    }

    #[test]
    fn opacities_fade_from_oldest_to_newest() {
        let trail = collinear_trail(1.0, 5, 100.0);
        let (_, opacities) = trail.renderable(1.0);

        assert_eq!(opacities.len(), 5);
        assert_abs_diff_eq!(opacities[0], 0.0);
        assert_abs_diff_eq!(opacities[4], 1.0);
        for pair in opacities.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn a_lone_point_is_fully_opaque() {
        let mut trail = Trail::new(1.0);
        trail.add_point(Vector3::new(1.0, 2.0, 3.0));
        let (_, opacities) = trail.renderable(1.0);
        assert_eq!(opacities, vec![1.0]);
    }

    #[test]
    fn render_positions_are_scaled_to_display_units() {
        let mut trail = Trail::new(1e9);
        trail.add_point(Vector3::new(2.0e6, -4.0e6, 0.0));
        let (points, _) = trail.renderable(1.0e-6);
        assert_relative_eq!(points[0], Point3::new(2.0f32, -4.0, 0.0));
    }

    #[test]
    fn running_total_matches_a_recomputed_arc_length() {
        // A curling walk that trips the cap repeatedly.
        let mut trail = Trail::new(8.0);
        for i in 0..200 {
            let t = i as f64 * 0.3;
            trail.add_point(Vector3::new(t.sin() * 3.0, t.cos() * 3.0, t * 0.05));
            trail.cap();
            assert!(trail.arc_length() <= trail.max_length() || trail.len() == 1);
        }

        let (points, _) = trail.renderable(1.0);
        let recomputed: f32 = points.windows(2).map(|pair| (pair[1] - pair[0]).norm()).sum();
        assert_relative_eq!(recomputed, trail.arc_length() as f32, max_relative = 1e-4);
    }

    #[test]
    #[should_panic(expected = "trail cap must be positive")]
    fn a_zero_cap_is_rejected() {
        Trail::new(0.0);
    }
}
