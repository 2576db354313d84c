#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Shape outlines as sequences of drawing commands, and their flattening.
//!
//! Every shape in the [shapes](shapes/index.html) module can describe its outline as a
//! [`SegmentSource`]: a lazy, pull-based sequence of move-to, line-to, quadratic,
//! cubic and close segments. Curved outlines (ellipses, arcs, rounded corners) are
//! described with cubic bézier curves.
//!
//! Any segment source can be wrapped in a [`Flattened`] source which approximates each
//! curve with line segments within a tolerance threshold.
//!
//! This crate is reexported in [outline](https://docs.rs/outline/).
//!
//! # Examples
//!
//! ```
//! use outline_path::math::{point, Transform};
//! use outline_path::shapes::{Ellipse, Rectangle, Shape};
//! use outline_path::{Segment, SegmentSource};
//!
//! // The exact outline of a rectangle.
//! let rect = Rectangle::new(0.0, 0.0, 10.0, 5.0);
//! let segments: Vec<Segment> = rect.path_segments(None).segments().collect();
//! assert_eq!(segments[0], Segment::MoveTo(point(0.0, 0.0)));
//! assert_eq!(segments.len(), 5);
//!
//! // A scaled circle, approximated with line segments that stay within 0.01
//! // of the curve.
//! let circle = Ellipse::new(-1.0, -1.0, 2.0, 2.0);
//! let transform = Transform::scale(10.0, 10.0);
//! let flattened = circle.flattened(Some(&transform), 0.01).unwrap();
//! for segment in flattened.segments() {
//!     match segment {
//!         Segment::MoveTo(at) => println!("move to {:?}", at),
//!         Segment::LineTo(to) => println!("line to {:?}", to),
//!         Segment::Close => println!("close"),
//!         _ => unreachable!(),
//!     }
//! }
//! ```

pub use outline_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
pub mod flatten;
pub mod iterator;
mod segment;
pub mod shapes;

#[doc(inline)]
pub use crate::error::PathError;
#[doc(inline)]
pub use crate::flatten::{FlattenOptions, Flattened};
#[doc(inline)]
pub use crate::iterator::{SegmentSource, Segments};
#[doc(inline)]
pub use crate::segment::{Segment, SegmentKind};

pub mod traits {
    //! `outline_path` traits reexported here for convenience.

    pub use crate::geom::traits::Transformation;
    pub use crate::iterator::SegmentSource;
    pub use crate::shapes::Shape;
}

pub mod math {
    //! f64 version of the outline_geom types used everywhere.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f64>```.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for ```euclid::default::Vector2D<f64>```.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for ```euclid::default::Size2D<f64>```.
    pub type Size = euclid::default::Size2D<f64>;

    /// Alias for ```euclid::default::Box2D<f64>```
    pub type Box2D = euclid::default::Box2D<f64>;

    /// Alias for ```euclid::default::Transform2D<f64>```
    pub type Transform = euclid::default::Transform2D<f64>;

    /// Alias for ```euclid::default::Rotation2D<f64>```
    pub type Rotation = euclid::default::Rotation2D<f64>;

    /// Alias for ```euclid::default::Translation2D<f64>```
    pub type Translation = euclid::Translation2D<f64, euclid::UnknownUnit, euclid::UnknownUnit>;

    /// Alias for ```euclid::default::Scale<f64>```
    pub type Scale = euclid::default::Scale<f64>;

    /// An angle in radians (f64).
    pub type Angle = euclid::Angle<f64>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Size::new(x, y)`.
    #[inline]
    pub fn size(w: f64, h: f64) -> Size {
        Size::new(w, h)
    }
}

/// The winding rule defines how to determine what is inside and what is outside of
/// the shape.
///
/// See the SVG specification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum WindingRule {
    EvenOdd,
    NonZero,
}

impl WindingRule {
    #[inline]
    pub fn is_in(&self, winding_number: i16) -> bool {
        match *self {
            WindingRule::EvenOdd => winding_number % 2 != 0,
            WindingRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i16) -> bool {
        !self.is_in(winding_number)
    }
}

#[test]
fn winding_rules() {
    assert!(WindingRule::EvenOdd.is_in(1));
    assert!(WindingRule::EvenOdd.is_out(2));
    assert!(WindingRule::EvenOdd.is_in(-3));
    assert!(WindingRule::NonZero.is_in(2));
    assert!(WindingRule::NonZero.is_in(-1));
    assert!(WindingRule::NonZero.is_out(0));
}
