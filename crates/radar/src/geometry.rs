use glam::{DAffine2, DVec2};

pub const LEVEL_COUNT: usize = 5;
pub const DIVIDE_COUNT: usize = 6;
pub const RADIUS_FACTOR: f64 = 0.9;
pub const ANGLE_STEP_DEGREES: f64 = 360.0 / DIVIDE_COUNT as f64;

/// Center and usable radius derived from the host's size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub center: DVec2,
    pub radius: f64,
}

impl Layout {
    /// Room for one line of text is reserved on each side before the radius is taken.
    /// The halving truncates like integer pixel math, and a size too small for the
    /// text margin collapses to a zero radius.
    pub fn from_size(width: i32, height: i32, text_size: i32) -> Self {
        let usable = width
            .min(height)
            .saturating_sub(text_size.saturating_mul(2))
            / 2;

        Self {
            center: DVec2::new(f64::from(width) / 2.0, f64::from(height) / 2.0),
            radius: (f64::from(usable) * RADIUS_FACTOR).max(0.0),
        }
    }

    /// Point at `distance` from the center, `degrees` clockwise from straight up.
    pub fn axis_point(&self, distance: f64, degrees: f64) -> DVec2 {
        let theta = degrees.to_radians();
        self.center + DVec2::new(distance * theta.sin(), -distance * theta.cos())
    }
}

/// One concentric copy of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLevel(usize);

impl GridLevel {
    pub fn all() -> impl Iterator<Item = Self> {
        (0..LEVEL_COUNT).map(Self)
    }

    /// Factor the frame is scaled by once this level has been drawn. Applied
    /// cumulatively this leaves level `i` at `(5-i)/5` of the radius. The last
    /// factor is zero and only affects what is drawn after the grid.
    pub fn scale_factor(&self) -> f64 {
        1.0 - 1.0 / (LEVEL_COUNT - self.0) as f64
    }
}

/// The diagonal and side of the topmost vertex. The rest of the ring is the same
/// pair drawn under a frame rotated by [`ANGLE_STEP_DEGREES`] each time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexSegment {
    pub center: DVec2,
    pub vertex: DVec2,
    pub next_vertex: DVec2,
}

impl HexSegment {
    pub fn compute(layout: &Layout) -> Self {
        let a = ANGLE_STEP_DEGREES;
        let b = (a / 2.0).to_radians();
        let c = ((180.0 - a) / 2.0).to_radians();
        let side = layout.radius * b.sin().abs() * 2.0;

        let vertex = DVec2::new(layout.center.x, layout.center.y - layout.radius);
        let next_vertex = vertex + DVec2::new(side * c.sin().abs(), side * c.cos().abs());

        Self {
            center: layout.center,
            vertex,
            next_vertex,
        }
    }

    pub fn diagonal(&self) -> [DVec2; 2] {
        [self.center, self.vertex]
    }

    pub fn side(&self) -> [DVec2; 2] {
        [self.vertex, self.next_vertex]
    }

    pub fn side_length(&self) -> f64 {
        self.vertex.distance(self.next_vertex)
    }
}

pub fn scale_about(factor: f64, pivot: DVec2) -> DAffine2 {
    DAffine2::from_translation(pivot)
        * DAffine2::from_scale(DVec2::splat(factor))
        * DAffine2::from_translation(-pivot)
}

/// Clockwise on a y-down surface for positive `degrees`.
pub fn rotation_about(degrees: f64, pivot: DVec2) -> DAffine2 {
    DAffine2::from_translation(pivot)
        * DAffine2::from_angle(degrees.to_radians())
        * DAffine2::from_translation(-pivot)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn test_layout_from_size() {
        let layout = Layout::from_size(300, 300, 20);
        assert_close(layout.radius, 117.0);
        assert_eq!(layout.center, DVec2::new(150.0, 150.0));
    }

    #[test]
    fn test_layout_uses_shorter_side_and_truncates() {
        let layout = Layout::from_size(401, 301, 20);
        // (301 - 40) / 2 truncates to 130
        assert_close(layout.radius, 117.0);
        assert_eq!(layout.center, DVec2::new(200.5, 150.5));
    }

    #[test]
    fn test_layout_radius_never_negative() {
        for (w, h, text) in [(0, 0, 14), (10, 10, 20), (-5, 100, 0), (40, 40, 20)] {
            let layout = Layout::from_size(w, h, text);
            assert!(layout.radius >= 0.0, "{w}x{h} text {text}");
        }
        assert_eq!(Layout::from_size(10, 10, 20).radius, 0.0);
    }

    #[test]
    fn test_layout_radius_non_negative_for_sizes_above_margin() {
        for text in [0, 7, 14, 20] {
            for w in (2 * text..2 * text + 50).step_by(7) {
                for h in (2 * text..2 * text + 50).step_by(11) {
                    let layout = Layout::from_size(w, h, text);
                    assert!(layout.radius >= 0.0);
                    assert_close(layout.center.x, f64::from(w) / 2.0);
                    assert_close(layout.center.y, f64::from(h) / 2.0);
                }
            }
        }
    }

    #[test]
    fn test_level_scale_factors() {
        let factors: Vec<f64> = GridLevel::all().map(|l| l.scale_factor()).collect();
        let expected = [0.8, 0.75, 2.0 / 3.0, 0.5, 0.0];
        assert_eq!(factors.len(), expected.len());
        for (f, e) in factors.iter().zip(expected) {
            assert_close(*f, e);
        }
    }

    #[test]
    fn test_cumulative_factors_space_rings_evenly() {
        let mut fraction = 1.0;
        for (i, level) in GridLevel::all().enumerate() {
            assert_close(fraction, (LEVEL_COUNT - i) as f64 / LEVEL_COUNT as f64);
            fraction *= level.scale_factor();
        }
        assert_eq!(fraction, 0.0);
    }

    #[test]
    fn test_hex_side_equals_radius() {
        for radius in [1.0, 57.5, 117.0, 1000.0] {
            let layout = Layout {
                center: DVec2::new(10.0, 20.0),
                radius,
            };
            let seg = HexSegment::compute(&layout);
            assert_close(seg.center.distance(seg.vertex), radius);
            assert!((seg.side_length() - radius).abs() < radius * 1e-12);
        }
    }

    #[test]
    fn test_side_reaches_next_vertex() {
        let layout = Layout::from_size(300, 300, 20);
        let seg = HexSegment::compute(&layout);
        let rotated = rotation_about(ANGLE_STEP_DEGREES, layout.center).transform_point2(seg.vertex);
        assert!(rotated.distance(seg.next_vertex) < 1e-9);
        assert!(layout.axis_point(layout.radius, 60.0).distance(seg.next_vertex) < 1e-9);
    }

    #[test]
    fn test_scale_about_keeps_pivot_fixed() {
        let pivot = DVec2::new(150.0, 150.0);
        let m = scale_about(0.5, pivot);
        assert_eq!(m.transform_point2(pivot), pivot);
        assert_eq!(m.transform_point2(DVec2::new(150.0, 50.0)), DVec2::new(150.0, 100.0));
        assert_eq!(scale_about(0.0, pivot).transform_point2(DVec2::ZERO), pivot);
    }

    #[test]
    fn test_rotation_is_clockwise_on_screen() {
        let pivot = DVec2::new(0.0, 0.0);
        let up = DVec2::new(0.0, -1.0);
        let right = rotation_about(90.0, pivot).transform_point2(up);
        assert!(right.distance(DVec2::new(1.0, 0.0)) < EPS);
    }
}
