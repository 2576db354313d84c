use crate::scalar::Scalar;
use crate::Point;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn length(&self) -> S {
        (self.to - self.from).length()
    }

    #[inline]
    pub fn square_length(&self) -> S {
        (self.to - self.from).square_length()
    }

    /// Computes the distance between this segment and a point.
    #[inline]
    pub fn distance_to_point(&self, p: Point<S>) -> S {
        self.square_distance_to_point(p).sqrt()
    }

    /// Computes the squared distance between this segment and a point.
    ///
    /// Points that project outside of the segment are measured against the
    /// closest endpoint. A degenerate segment measures the distance to its
    /// single point.
    #[inline]
    pub fn square_distance_to_point(&self, p: Point<S>) -> S {
        let v = self.to - self.from;
        let d = p - self.from;

        let along_start = d.dot(v);
        if along_start <= S::ZERO {
            return d.square_length();
        }

        let rev = v - d;
        let along_end = rev.dot(v);
        if along_end <= S::ZERO {
            return rev.square_length();
        }

        // Squared length of the vector to the end minus its squared projection
        // on the segment. Clamped because rounding can push it below zero.
        let projected = along_end * along_end / v.square_length();
        S::max(rev.square_length() - projected, S::ZERO)
    }

    /// Computes the closest point on this segment to `p`.
    #[inline]
    pub fn closest_point(&self, p: Point<S>) -> Point<S> {
        let v1 = self.to - self.from;
        let v2 = p - self.from;
        let len = v1.dot(v1);
        if len == S::ZERO {
            return self.from;
        }
        let t = S::min(S::max(v2.dot(v1) / len, S::ZERO), S::ONE);

        self.from + v1 * t
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn distance_to_point() {
    let segment = LineSegment {
        from: point(0.0f64, 0.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(segment.square_distance_to_point(point(5.0, 3.0)), 9.0);
    assert_eq!(segment.square_distance_to_point(point(5.0, -2.0)), 4.0);
    // Beyond the endpoints the distance is measured to the endpoint.
    assert_eq!(segment.square_distance_to_point(point(-3.0, 4.0)), 25.0);
    assert_eq!(segment.square_distance_to_point(point(13.0, 4.0)), 25.0);
    assert_eq!(segment.distance_to_point(point(13.0, 4.0)), 5.0);
}

#[test]
fn distance_to_degenerate_segment() {
    let segment = LineSegment {
        from: point(1.0f64, 1.0),
        to: point(1.0, 1.0),
    };

    assert_eq!(segment.square_distance_to_point(point(4.0, 5.0)), 25.0);
    assert_eq!(segment.closest_point(point(4.0, 5.0)), point(1.0, 1.0));
}

#[test]
fn closest_point() {
    let segment = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(0.0, 10.0),
    };

    assert_eq!(segment.closest_point(point(3.0, 4.0)), point(0.0, 4.0));
    assert_eq!(segment.closest_point(point(3.0, 14.0)), point(0.0, 10.0));
    assert_eq!(segment.sample(0.5), point(0.0, 5.0));
    assert_eq!(segment.length(), 10.0);
}
