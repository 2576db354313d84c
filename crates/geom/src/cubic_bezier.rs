use crate::scalar::Scalar;
use crate::{point, LineSegment, Point, Vector};

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    /// Number of scalars used by [`read_from`](Self::read_from) and
    /// [`write_to`](Self::write_to).
    pub const NUM_SCALARS: usize = 8;

    /// Reads the curve from packed
    /// `[from.x, from.y, ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y]` coordinates
    /// at the beginning of `coords`.
    #[inline]
    pub fn read_from(coords: &[S]) -> Self {
        CubicBezierSegment {
            from: point(coords[0], coords[1]),
            ctrl1: point(coords[2], coords[3]),
            ctrl2: point(coords[4], coords[5]),
            to: point(coords[6], coords[7]),
        }
    }

    /// Writes the curve as packed coordinates at the beginning of `coords`.
    #[inline]
    pub fn write_to(&self, coords: &mut [S]) {
        coords[0] = self.from.x;
        coords[1] = self.from.y;
        coords[2] = self.ctrl1.x;
        coords[3] = self.ctrl1.y;
        coords[4] = self.ctrl2.x;
        coords[5] = self.ctrl2.y;
        coords[6] = self.to.x;
        coords[7] = self.to.y;
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        let t2 = t * t;
        let one_t2 = one_t * one_t;

        (self.ctrl1 - self.from) * S::THREE * one_t2
            + (self.ctrl2 - self.ctrl1) * S::TWO * S::THREE * one_t * t
            + (self.to - self.ctrl2) * S::THREE * t2
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (CubicBezierSegment<S>, CubicBezierSegment<S>) {
        let ctrl1a = self.from + (self.ctrl1 - self.from) * t;
        let ctrl2a = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl1aa = ctrl1a + (ctrl2a - ctrl1a) * t;
        let ctrl3a = self.ctrl2 + (self.to - self.ctrl2) * t;
        let ctrl2aa = ctrl2a + (ctrl3a - ctrl2a) * t;
        let ctrl1aaa = ctrl1aa + (ctrl2aa - ctrl1aa) * t;

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// Split this curve in its middle.
    ///
    /// Uses midpoint averages only, so both halves share the exact same split point.
    pub fn split_in_half(&self) -> (CubicBezierSegment<S>, CubicBezierSegment<S>) {
        let ctrl1a = self.from.lerp(self.ctrl1, S::HALF);
        let mid = self.ctrl1.lerp(self.ctrl2, S::HALF);
        let ctrl3a = self.ctrl2.lerp(self.to, S::HALF);
        let ctrl1aa = ctrl1a.lerp(mid, S::HALF);
        let ctrl2aa = mid.lerp(ctrl3a, S::HALF);
        let split_point = ctrl1aa.lerp(ctrl2aa, S::HALF);

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: split_point,
            },
            CubicBezierSegment {
                from: split_point,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Largest squared distance between a control point and the baseline segment.
    ///
    /// The curve never strays further from its baseline than this.
    #[inline]
    pub fn flatness_squared(&self) -> S {
        let baseline = self.baseline();
        S::max(
            baseline.square_distance_to_point(self.ctrl1),
            baseline.square_distance_to_point(self.ctrl2),
        )
    }

    /// Largest distance between a control point and the baseline segment.
    #[inline]
    pub fn flatness(&self) -> S {
        self.flatness_squared().sqrt()
    }
}

#[test]
fn split_in_half_matches_split() {
    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(1.0, 5.0),
        ctrl2: point(9.0, -3.0),
        to: point(10.0, 2.0),
    };

    let (a, b) = curve.split_in_half();
    let (c, d) = curve.split(0.5);

    assert_eq!(a.to, b.from);
    for (x, y) in [(a, c), (b, d)] {
        assert!((x.from - y.from).length() < 1e-12);
        assert!((x.ctrl1 - y.ctrl1).length() < 1e-12);
        assert!((x.ctrl2 - y.ctrl2).length() < 1e-12);
        assert!((x.to - y.to).length() < 1e-12);
    }

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((a.sample(t) - curve.sample(t * 0.5)).length() < 1e-12);
        assert!((b.sample(t) - curve.sample(0.5 + t * 0.5)).length() < 1e-12);
    }
}

#[test]
fn flatness_of_cubic() {
    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(2.0, 3.0),
        ctrl2: point(8.0, -6.0),
        to: point(10.0, 0.0),
    };
    assert_eq!(curve.flatness_squared(), 36.0);

    for i in 0..=100 {
        let p = curve.sample(i as f64 / 100.0);
        assert!(curve.baseline().distance_to_point(p) <= curve.flatness());
    }

    // Subdividing converges towards the baseline.
    let (mut a, _) = curve.split_in_half();
    let mut previous = curve.flatness_squared();
    for _ in 0..5 {
        assert!(a.flatness_squared() < previous);
        previous = a.flatness_squared();
        a = a.split_in_half().0;
    }
}

#[test]
fn flat_cubic_has_zero_flatness() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(1.0, 1.0),
        ctrl2: point(2.0, 2.0),
        to: point(3.0, 3.0),
    };
    assert!(curve.flatness_squared() < 1e-10);
}

#[test]
fn packed_coordinates() {
    let curve = CubicBezierSegment {
        from: point(1.0f64, 2.0),
        ctrl1: point(3.0, 4.0),
        ctrl2: point(5.0, 6.0),
        to: point(7.0, 8.0),
    };
    let mut coords = [0.0; 10];
    curve.write_to(&mut coords[1..]);
    assert_eq!(coords, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 0.0]);
    assert_eq!(CubicBezierSegment::read_from(&coords[1..]), curve);
}
