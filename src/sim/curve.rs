//! Closed Catmull-Rom curves
//!
//! A curve with N control points is a loop of N cubic segments. Segment `i`
//! runs from `P[i]` to `P[i+1]` and borrows `P[i-1]` and `P[i+2]` for its
//! tangents, with all indices taken modulo N. The curve parameter runs over
//! `[0, N)` and repeats with period N.

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::config::CurveConfig;
use crate::error::SceneError;

/// Minimum number of control points for one Catmull-Rom segment
pub const MIN_CONTROL_POINTS: usize = 4;

/// Periodic wrap of `value` into `[min, max)`
#[inline]
pub fn cyclic_clamp(value: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    let wrapped = (value - min).rem_euclid(span);
    // rem_euclid may round up to exactly `span` for tiny negative inputs
    if wrapped >= span { min } else { wrapped + min }
}

/// Position on a single Catmull-Rom segment at local parameter `u` in [0, 1]
#[inline]
pub fn evaluate_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, u: f32) -> Vec3 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * (p0 * (-u3 + 2.0 * u2 - u)
        + p1 * (3.0 * u3 - 5.0 * u2 + 2.0)
        + p2 * (-3.0 * u3 + 4.0 * u2 + u)
        + p3 * (u3 - u2))
}

/// First derivative of a Catmull-Rom segment with respect to `u`.
///
/// The basis weights sum to zero, so the points are taken relative to `p1`:
/// coincident control points give an exactly zero derivative.
#[inline]
pub fn evaluate_segment_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, u: f32) -> Vec3 {
    let u2 = u * u;
    0.5 * ((p0 - p1) * (-3.0 * u2 + 4.0 * u - 1.0)
        + (p2 - p1) * (-9.0 * u2 + 8.0 * u + 1.0)
        + (p3 - p1) * (3.0 * u2 - 2.0 * u))
}

/// A named closed path through at least four control points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveConfig")]
pub struct Curve {
    name: String,
    points: Vec<Vec3>,
}

impl Curve {
    pub fn new(name: impl Into<String>, points: Vec<Vec3>) -> Result<Self, SceneError> {
        let name = name.into();
        if points.len() < MIN_CONTROL_POINTS {
            return Err(SceneError::CurveTooShort {
                name,
                len: points.len(),
            });
        }
        Ok(Self { name, points })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of control points, which is also the parameter period
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Parameter period of the loop
    pub fn period(&self) -> f32 {
        self.points.len() as f32
    }

    /// Split a curve parameter into the segment's four control points and
    /// the local parameter within that segment.
    fn segment(&self, t: f32) -> ([Vec3; 4], f32) {
        let n = self.points.len();
        let t = if t.is_finite() { t } else { 0.0 };
        let x = cyclic_clamp(t, 0.0, self.period());
        let i = (x.floor() as usize).min(n - 1);
        let u = x - i as f32;

        let p = |offset: usize| self.points[(i + offset) % n];
        ([p(n - 1), p(0), p(1), p(2)], u)
    }

    /// Position on the loop at parameter `t` (any finite value)
    pub fn position(&self, t: f32) -> Vec3 {
        let ([p0, p1, p2, p3], u) = self.segment(t);
        evaluate_segment(p0, p1, p2, p3, u)
    }

    /// First derivative at parameter `t`, not normalized
    pub fn tangent(&self, t: f32) -> Vec3 {
        let ([p0, p1, p2, p3], u) = self.segment(t);
        evaluate_segment_derivative(p0, p1, p2, p3, u)
    }
}

impl TryFrom<CurveConfig> for Curve {
    type Error = SceneError;

    fn try_from(config: CurveConfig) -> Result<Self, Self::Error> {
        Curve::new(config.name, config.points)
    }
}

/// Object transform placing the origin at `position`, with local -Z along
/// `front` and local +Y as close to `up` as possible.
pub fn align_object(position: Vec3, front: Vec3, up: Vec3) -> Mat4 {
    let z = (-front).try_normalize().unwrap_or(Vec3::Z);
    let x = up.cross(z).try_normalize().unwrap_or(Vec3::X);
    let y = z.cross(x);

    Mat4::from_cols(
        x.extend(0.0),
        y.extend(0.0),
        z.extend(0.0),
        Vec4::new(position.x, position.y, position.z, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line() -> Curve {
        Curve::new(
            "line",
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(3.0, 0.0, 0.0),
            ],
        )
        .unwrap()
    }

    fn square() -> Curve {
        Curve::new(
            "square",
            vec![
                Vec3::new(1.0, 0.0, 0.5),
                Vec3::new(0.0, 1.0, 0.2),
                Vec3::new(-1.0, 0.0, 0.5),
                Vec3::new(0.0, -1.0, 0.2),
                Vec3::new(0.5, -0.5, 0.3),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_fewer_than_four_points() {
        let err = Curve::new("tiny", vec![Vec3::ZERO; 3]).unwrap_err();
        assert!(matches!(err, SceneError::CurveTooShort { len: 3, .. }));
    }

    #[test]
    fn test_deserialize_checks_point_count() {
        let err = serde_json::from_str::<Curve>(r#"{"name":"x","points":[]}"#).unwrap_err();
        assert!(err.to_string().contains("at least 4"));

        let json = serde_json::to_string(&line()).unwrap();
        assert_eq!(serde_json::from_str::<Curve>(&json).unwrap(), line());
    }

    #[test]
    fn test_coincident_points_have_zero_tangent() {
        let curve = Curve::new("still", vec![Vec3::new(12.0, -2.2, 2.0); 5]).unwrap();
        for &t in &[0.0, 0.37, 1.5, 2.9, 4.61] {
            assert_eq!(curve.tangent(t), Vec3::ZERO, "t = {t}");
        }
    }

    #[test]
    fn test_passes_through_control_points() {
        let curve = line();
        assert_eq!(curve.position(1.0), Vec3::new(1.0, 0.0, 0.0));
        for (i, p) in square().points().iter().enumerate() {
            assert!(square().position(i as f32).abs_diff_eq(*p, 1e-6));
        }
    }

    #[test]
    fn test_half_parameter_closed_form() {
        // At u = 0.5 the weights are (-1/16, 9/16, 9/16, -1/16) on P0..P3
        let curve = line();
        let expected = Vec3::new(-0.0625 * 0.0 + 0.5625 * 1.0 + 0.5625 * 2.0 - 0.0625 * 3.0, 0.0, 0.0);
        assert!(curve.position(1.5).abs_diff_eq(expected, 1e-6));
        assert!((curve.position(1.5).x - 1.5).abs() < 1e-6);

        // Segment 0 borrows P3 as its predecessor, pulling the midpoint forward
        let wrapped = -0.0625 * 3.0 + 0.5625 * 0.0 + 0.5625 * 1.0 - 0.0625 * 2.0;
        assert!((curve.position(0.5).x - wrapped).abs() < 1e-6);
    }

    #[test]
    fn test_negative_parameter_wraps() {
        let curve = square();
        assert!(curve.position(-0.25).abs_diff_eq(curve.position(4.75), 1e-5));
        assert!(curve.position(-5.0).abs_diff_eq(curve.position(0.0), 1e-5));
    }

    #[test]
    fn test_tiny_negative_parameter_stays_in_range() {
        let curve = square();
        let p = curve.position(-1e-9);
        assert!(p.is_finite());
        assert!(p.abs_diff_eq(curve.points()[0], 1e-4));
    }

    #[test]
    fn test_non_finite_parameter_evaluates_at_start() {
        let curve = square();
        assert_eq!(curve.position(f32::NAN), curve.position(0.0));
        assert_eq!(curve.tangent(f32::INFINITY), curve.tangent(0.0));
    }

    #[test]
    fn test_tangent_matches_finite_difference() {
        let curve = square();
        let h = 1e-3;
        for &t in &[0.3, 1.7, 2.5, 4.2] {
            let numeric = (curve.position(t + h) - curve.position(t - h)) / (2.0 * h);
            assert!(curve.tangent(t).abs_diff_eq(numeric, 1e-2), "t = {t}");
        }
    }

    #[test]
    fn test_tangent_at_control_point_is_central_difference() {
        // Catmull-Rom tangent at P[i] is (P[i+1] - P[i-1]) / 2
        let curve = square();
        let pts = curve.points();
        let expected = (pts[2] - pts[0]) * 0.5;
        assert!(curve.tangent(1.0).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_cyclic_clamp() {
        assert_eq!(cyclic_clamp(5.5, 0.0, 4.0), 1.5);
        assert_eq!(cyclic_clamp(-1.0, 0.0, 4.0), 3.0);
        assert_eq!(cyclic_clamp(370.0, 0.0, 360.0), 10.0);
        assert!(cyclic_clamp(-1e-9, 0.0, 4.0) < 4.0);
    }

    #[test]
    fn test_align_object_maps_front_to_negative_z() {
        let m = align_object(Vec3::new(1.0, 2.0, 3.0), Vec3::X, Vec3::Z);
        let forward = m.transform_vector3(Vec3::NEG_Z);
        assert!(forward.abs_diff_eq(Vec3::X, 1e-6));
        assert!(m.transform_point3(Vec3::ZERO).abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
        let up = m.transform_vector3(Vec3::Y);
        assert!(up.abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn test_align_object_degenerate_inputs() {
        let m = align_object(Vec3::ZERO, Vec3::ZERO, Vec3::Z);
        assert!(m.is_finite());
        // front parallel to up: x axis falls back to +X
        let m = align_object(Vec3::ZERO, Vec3::Z, Vec3::Z);
        assert!(m.transform_vector3(Vec3::X).abs_diff_eq(Vec3::X, 1e-6));
    }

    proptest! {
        #[test]
        fn prop_periodic(t in -200.0f32..200.0) {
            let curve = square();
            let a = curve.position(t);
            let b = curve.position(t + curve.period());
            prop_assert!(a.abs_diff_eq(b, 1e-3), "{a} vs {b}");
        }

        #[test]
        fn prop_continuous_at_segment_boundaries(k in -20i32..20) {
            let curve = square();
            let eps = 1e-4;
            let before = curve.position(k as f32 - eps);
            let after = curve.position(k as f32 + eps);
            prop_assert!(before.abs_diff_eq(after, 1e-3));
            let d_before = curve.tangent(k as f32 - eps);
            let d_after = curve.tangent(k as f32 + eps);
            prop_assert!(d_before.abs_diff_eq(d_after, 1e-2));
        }
    }
}
