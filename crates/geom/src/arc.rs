//! Cubic bézier approximation of circular and elliptic arcs.
//!
//! A circular arc of sweep `θ` starting at angle `a` on the unit circle is approximated
//! by the cubic curve
//!
//! ```text
//! from  = (cos a, sin a)
//! ctrl1 = from + k * (-sin a, cos a)
//! ctrl2 = to   - k * (-sin b, cos b)
//! to    = (cos b, sin b)            with b = a + θ
//! ```
//!
//! The control points sit on the tangents at the endpoints, and `k` is chosen so that the
//! curve passes exactly through the midpoint of the true arc. Elliptic arcs are obtained
//! by scaling the unit circle curve.

use crate::scalar::{Float, Scalar};
use crate::{point, CubicBezierSegment, Point};

/// The control point scale of a quarter circle: `4/3 * (√2 - 1)`.
pub const QUARTER_ARC_CONTROL_SCALE: f64 = 0.5522847498307933;

/// Computes the control point scale `k` for an arc of `sweep` radians.
///
/// Evaluated as `4/3 * sin(θ/2) / (1 + cos(θ/2))`. The equivalent
/// `4/3 * (1 - cos(θ/2)) / sin(θ/2)` loses all precision to cancellation and divides by
/// a vanishing sine for small sweeps, this form does not.
///
/// The sign of the result follows the sign of `sweep`. Meant for sweeps of at most a
/// quarter turn in magnitude, beyond which the approximation error grows quickly.
#[inline]
pub fn arc_control_scale<S: Scalar>(sweep: S) -> S {
    let half = sweep * S::HALF;
    S::FOUR / S::THREE * Float::sin(half) / (S::ONE + Float::cos(half))
}

/// The cubic bézier approximation of the unit circle arc starting at `start_angle` and
/// spanning `sweep` radians, using the control point scale `k`.
///
/// `k` is normally `arc_control_scale(sweep)`; it is a parameter so that callers which
/// emit many arcs of the same sweep compute it once.
pub fn unit_arc_to_cubic<S: Scalar>(start_angle: S, sweep: S, k: S) -> CubicBezierSegment<S> {
    let end_angle = start_angle + sweep;
    let (sin_a, cos_a) = (Float::sin(start_angle), Float::cos(start_angle));
    let (sin_b, cos_b) = (Float::sin(end_angle), Float::cos(end_angle));

    CubicBezierSegment {
        from: point(cos_a, sin_a),
        ctrl1: point(cos_a - k * sin_a, sin_a + k * cos_a),
        ctrl2: point(cos_b + k * sin_b, sin_b - k * cos_b),
        to: point(cos_b, sin_b),
    }
}

/// Maps a point of the unit circle onto the ellipse of the given center and radii.
#[inline]
pub fn unit_to_ellipse<S: Scalar>(p: Point<S>, center: Point<S>, rx: S, ry: S) -> Point<S> {
    point(center.x + p.x * rx, center.y + p.y * ry)
}

#[cfg(test)]
use core::f64::consts::{FRAC_PI_2, PI};

#[test]
fn quarter_arc_scale() {
    let k = arc_control_scale(FRAC_PI_2);
    assert!((k - QUARTER_ARC_CONTROL_SCALE).abs() < 1e-15);
    assert!((k - 4.0 / 3.0 * (2.0f64.sqrt() - 1.0)).abs() < 1e-15);
    assert!((arc_control_scale(-FRAC_PI_2) + QUARTER_ARC_CONTROL_SCALE).abs() < 1e-15);
}

#[test]
fn zero_sweep_has_zero_scale() {
    assert_eq!(arc_control_scale(0.0f64), 0.0);
    assert_eq!(arc_control_scale(0.0f32), 0.0);
}

#[test]
fn small_sweeps_keep_precision() {
    // For small sweeps k is asymptotically sweep / 3.
    for &sweep in &[1e-3f64, 1e-6, 1e-9, 1e-12, 1e-15] {
        let k = arc_control_scale(sweep);
        let expected = sweep / 3.0;
        assert!(((k - expected) / expected).abs() < 1e-6, "{} {}", sweep, k);

        let k = arc_control_scale(-sweep);
        assert!(((k + expected) / expected).abs() < 1e-6);
    }

    let k = arc_control_scale(1e-6f32);
    assert!(((k - 1e-6 / 3.0) / (1e-6 / 3.0)).abs() < 1e-4);
}

#[test]
fn arc_midpoint_is_exact() {
    let mut sweep = -FRAC_PI_2;
    while sweep <= FRAC_PI_2 {
        let start = 0.3;
        let k = arc_control_scale(sweep);
        let curve = unit_arc_to_cubic(start, sweep, k);

        let mid = curve.sample(0.5);
        let expected = point(f64::cos(start + sweep * 0.5), f64::sin(start + sweep * 0.5));
        assert!((mid - expected).length() < 1e-12, "sweep {}", sweep);

        // The endpoints are on the circle.
        assert!((curve.from.to_vector().length() - 1.0).abs() < 1e-12);
        assert!((curve.to.to_vector().length() - 1.0).abs() < 1e-12);

        sweep += 0.05;
    }
}

#[test]
fn arc_tangents_are_preserved() {
    let start = 1.0;
    let sweep = 1.2;
    let curve = unit_arc_to_cubic(start, sweep, arc_control_scale(sweep));

    // The derivative at the endpoints is perpendicular to the radius.
    assert!(curve.derivative(0.0).dot(curve.from.to_vector()).abs() < 1e-12);
    assert!(curve.derivative(1.0).dot(curve.to.to_vector()).abs() < 1e-12);
    // And points in the direction of the sweep.
    assert!(curve.from.to_vector().cross(curve.derivative(0.0)) > 0.0);
}

#[test]
fn quarter_arc_radial_error() {
    let curve = unit_arc_to_cubic(0.0, FRAC_PI_2, QUARTER_ARC_CONTROL_SCALE);
    for i in 0..=1000 {
        let r = curve.sample(i as f64 / 1000.0).to_vector().length();
        assert!((r - 1.0).abs() < 3e-4);
    }
}

#[test]
fn ellipse_mapping() {
    let curve = unit_arc_to_cubic(PI, FRAC_PI_2, QUARTER_ARC_CONTROL_SCALE);
    let center = point(10.0, 20.0);
    let from = unit_to_ellipse(curve.from, center, 4.0, 2.0);
    let to = unit_to_ellipse(curve.to, center, 4.0, 2.0);
    assert!((from - point(6.0, 20.0)).length() < 1e-12);
    assert!((to - point(10.0, 18.0)).length() < 1e-12);
}
