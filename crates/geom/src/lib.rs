#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [outline](https://docs.rs/outline/).
//!
//! # Overview.
//!
//! This crate implements the maths needed to describe and flatten shape outlines:
//!
//! - line segments and their distance to a point,
//! - quadratic and cubic bézier curves, their de Casteljau subdivision and a cheap
//!   analytic flatness metric,
//! - the cubic bézier approximation of circular and elliptic arcs.
//!
//! # Flatness
//!
//! A bézier curve is contained in the convex hull of its control points, so the largest
//! distance between a control point and the segment joining the endpoints bounds the
//! distance between the curve and that segment. This is the metric used to decide whether
//! a curve can be replaced by a single line. It is computed analytically, without
//! sampling the curve.

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod arc;
pub mod cubic_bezier;
mod line;
pub mod quadratic_bezier;

#[doc(inline)]
pub use crate::arc::{arc_control_scale, QUARTER_ARC_CONTROL_SCALE};
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use euclid::Trig;
    pub(crate) use num_traits::{Float, FloatConst, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    /// The floating point types the geometry is generic over.
    pub trait Scalar:
        Float
        + NumCast
        + FloatConst
        + Sized
        + Display
        + Debug
        + Trig
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const THREE: Self;
        const FOUR: Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Alias for `euclid::default::Box2D`
pub use euclid::default::Box2D;

/// Alias for `euclid::default::Transform2D`
pub type Transform<S> = euclid::default::Transform2D<S>;

/// Alias for `euclid::default::Rotation2D`
pub type Rotation<S> = euclid::default::Rotation2D<S>;

/// Alias for `euclid::default::Translation2D`
pub type Translation<S> = euclid::Translation2D<S, euclid::UnknownUnit, euclid::UnknownUnit>;

/// Alias for `euclid::default::Scale`
pub use euclid::default::Scale;

/// An angle in radians.
pub use euclid::Angle;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

pub mod traits {
    use crate::{Point, Rotation, Scalar, Scale, Transform, Translation, Vector};

    /// A coordinate transform.
    ///
    /// Shape outlines apply it to one batch of points per segment through
    /// [`transform_points`](Transformation::transform_points).
    pub trait Transformation<S: Copy> {
        fn transform_point(&self, p: Point<S>) -> Point<S>;
        fn transform_vector(&self, v: Vector<S>) -> Vector<S>;

        /// Transforms a batch of points in place.
        fn transform_points(&self, points: &mut [Point<S>]) {
            for p in points {
                *p = self.transform_point(*p);
            }
        }
    }

    impl<S: Scalar> Transformation<S> for Transform<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            self.transform_vector(v)
        }
    }

    impl<S: Scalar> Transformation<S> for Rotation<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            self.transform_vector(v)
        }
    }

    impl<S: Scalar> Transformation<S> for Translation<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            v
        }

        fn transform_points(&self, points: &mut [Point<S>]) {
            for p in points {
                *p += self.to_vector();
            }
        }
    }

    impl<S: Scalar> Transformation<S> for Scale<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            (*self).transform_point(p)
        }

        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            (*self).transform_vector(v)
        }
    }

    // Automatically implement Transformation for all &Transformation.
    impl<'l, S: Scalar, T: Transformation<S>> Transformation<S> for &'l T {
        #[inline]
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            (*self).transform_point(p)
        }

        #[inline]
        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            (*self).transform_vector(v)
        }

        #[inline]
        fn transform_points(&self, points: &mut [Point<S>]) {
            (*self).transform_points(points)
        }
    }
}

#[test]
fn transform_points_in_place() {
    use crate::traits::Transformation;

    let mut points = [point(0.0, 0.0), point(1.0, 2.0), point(-3.0, 4.0)];
    let translation = Translation::new(10.0, -1.0);
    translation.transform_points(&mut points);
    assert_eq!(points, [point(10.0, -1.0), point(11.0, 1.0), point(7.0, 3.0)]);

    let mut points = [point(1.0f64, 2.0), point(3.0, 4.0)];
    let scale = Transform::scale(2.0, 3.0);
    (&scale).transform_points(&mut points[..1]);
    assert_eq!(points, [point(2.0, 6.0), point(3.0, 4.0)]);
}

#[test]
fn default_batch_transform() {
    use crate::traits::Transformation;

    // Rotation relies on the provided batch method.
    fn transform_all<S: Scalar, T: Transformation<S>>(transform: &T, points: &mut [Point<S>]) {
        transform.transform_points(points);
    }

    let rotation = Rotation::radians(core::f64::consts::FRAC_PI_2);
    let mut points = [point(1.0, 0.0), point(0.0, 2.0)];
    transform_all(&rotation, &mut points);
    assert!((points[0] - point(0.0, 1.0)).length() < 1e-12);
    assert!((points[1] - point(-2.0, 0.0)).length() < 1e-12);

    let rotation = Rotation::radians(core::f32::consts::PI);
    let mut points = [point(1.0f32, 1.0)];
    transform_all(&&rotation, &mut points);
    assert!((points[0] - point(-1.0, -1.0)).length() < 1e-6);
}
