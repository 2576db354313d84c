use crate::scalar::Scalar;
use crate::{point, CubicBezierSegment, LineSegment, Point, Vector};

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    /// Number of scalars used by [`read_from`](Self::read_from) and
    /// [`write_to`](Self::write_to).
    pub const NUM_SCALARS: usize = 6;

    /// Reads the curve from packed `[from.x, from.y, ctrl.x, ctrl.y, to.x, to.y]`
    /// coordinates at the beginning of `coords`.
    #[inline]
    pub fn read_from(coords: &[S]) -> Self {
        QuadraticBezierSegment {
            from: point(coords[0], coords[1]),
            ctrl: point(coords[2], coords[3]),
            to: point(coords[4], coords[5]),
        }
    }

    /// Writes the curve as packed coordinates at the beginning of `coords`.
    #[inline]
    pub fn write_to(&self, coords: &mut [S]) {
        coords[0] = self.from.x;
        coords[1] = self.from.y;
        coords[2] = self.ctrl.x;
        coords[3] = self.ctrl.y;
        coords[4] = self.to.x;
        coords[5] = self.to.y;
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * S::TWO * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let (c0, c1, c2) = (S::TWO * t - S::TWO, -S::FOUR * t + S::TWO, S::TWO * t);
        self.from.to_vector() * c0 + self.ctrl.to_vector() * c1 + self.to.to_vector() * c2
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (QuadraticBezierSegment<S>, QuadraticBezierSegment<S>) {
        let split_point = self.sample(t);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: self.from.lerp(self.ctrl, t),
                to: split_point,
            },
            QuadraticBezierSegment {
                from: split_point,
                ctrl: self.ctrl.lerp(self.to, t),
                to: self.to,
            },
        )
    }

    /// Split this curve in its middle.
    ///
    /// Uses midpoint averages only, so both halves share the exact same split point.
    pub fn split_in_half(&self) -> (QuadraticBezierSegment<S>, QuadraticBezierSegment<S>) {
        let ctrl1 = self.from.lerp(self.ctrl, S::HALF);
        let ctrl2 = self.ctrl.lerp(self.to, S::HALF);
        let mid = ctrl1.lerp(ctrl2, S::HALF);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: ctrl1,
                to: mid,
            },
            QuadraticBezierSegment {
                from: mid,
                ctrl: ctrl2,
                to: self.to,
            },
        )
    }

    /// Elevate this curve to a third order bézier.
    pub fn to_cubic(&self) -> CubicBezierSegment<S> {
        CubicBezierSegment {
            from: self.from,
            ctrl1: (self.from + self.ctrl.to_vector() * S::TWO) / S::THREE,
            ctrl2: (self.to + self.ctrl.to_vector() * S::TWO) / S::THREE,
            to: self.to,
        }
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Squared distance between the control point and the baseline segment.
    ///
    /// The curve never strays further from its baseline than this.
    #[inline]
    pub fn flatness_squared(&self) -> S {
        self.baseline().square_distance_to_point(self.ctrl)
    }

    /// Distance between the control point and the baseline segment.
    #[inline]
    pub fn flatness(&self) -> S {
        self.flatness_squared().sqrt()
    }
}

#[test]
fn split_in_half_matches_split() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(4.0, 8.0),
        to: point(10.0, 2.0),
    };

    let (a, b) = curve.split_in_half();
    let (c, d) = curve.split(0.5);

    assert_eq!(a.from, curve.from);
    assert_eq!(b.to, curve.to);
    assert_eq!(a.to, b.from);
    assert!((a.to - c.to).length() < 1e-12);
    assert!((a.ctrl - c.ctrl).length() < 1e-12);
    assert!((b.ctrl - d.ctrl).length() < 1e-12);

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((a.sample(t) - curve.sample(t * 0.5)).length() < 1e-12);
        assert!((b.sample(t) - curve.sample(0.5 + t * 0.5)).length() < 1e-12);
    }
}

#[test]
fn flatness_of_quadratic() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(5.0, 4.0),
        to: point(10.0, 0.0),
    };
    assert_eq!(curve.flatness_squared(), 16.0);
    assert_eq!(curve.flatness(), 4.0);

    // The curve itself stays within the flatness of its baseline.
    for i in 0..=100 {
        let p = curve.sample(i as f64 / 100.0);
        assert!(curve.baseline().distance_to_point(p) <= curve.flatness());
    }

    let (a, _) = curve.split_in_half();
    assert!(a.flatness_squared() < curve.flatness_squared());
}

#[test]
fn packed_coordinates() {
    let coords = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let curve = QuadraticBezierSegment::read_from(&coords);
    assert_eq!(curve.ctrl, point(3.0, 4.0));

    let mut out = [0.0f32; 8];
    curve.write_to(&mut out[2..]);
    assert_eq!(out, [0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn quadratic_to_cubic() {
    let quad = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(3.0, 6.0),
        to: point(6.0, 0.0),
    };
    let cubic = quad.to_cubic();
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((quad.sample(t) - cubic.sample(t)).length() < 1e-12);
    }
    assert!((quad.derivative(0.0) - cubic.derivative(0.0)).length() < 1e-12);
}
