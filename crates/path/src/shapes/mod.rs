//! Simple shapes that can describe their outline as a segment source.
//!
//! Each shape is a small `Copy` value. Its producer captures the shape's parameters
//! and the optional transform by value, so modifying the shape afterwards does not
//! affect producers created earlier.
//!
//! Curved outlines are described exactly with cubic bézier curves (and straight lines
//! for the flat parts). Use [`Shape::flattened`] to get a polygonal approximation.
//!
//! Shapes with a negative width or height describe an empty outline.

mod arc;
mod ellipse;
mod line;
mod rect;

pub use self::arc::{Arc, ArcClosure, ArcSegments};
pub use self::ellipse::{Ellipse, EllipseSegments};
pub use self::line::{CubicCurve, CurveSegments, Line, QuadraticCurve};
pub use self::rect::{RectSegments, Rectangle, RoundedRectSegments, RoundedRectangle};

use crate::math::Transform;
use crate::{Flattened, PathError, Segment, SegmentKind, SegmentSource};

/// A shape which outline can be described as a sequence of segments.
pub trait Shape {
    type Segments: SegmentSource;

    /// Returns a producer for the outline of the shape, with each emitted point
    /// transformed by `transform` if provided.
    fn path_segments(&self, transform: Option<&Transform>) -> Self::Segments;

    /// Returns the outline of the shape approximated with line segments that stay
    /// within `flatness` of the exact outline.
    fn flattened(
        &self,
        transform: Option<&Transform>,
        flatness: f64,
    ) -> Result<Flattened<Self::Segments>, PathError> {
        self.path_segments(transform).flattened(flatness)
    }
}

fn write_segment(
    segment: Option<Segment>,
    transform: Option<&Transform>,
    coords: &mut [f64; 6],
) -> Result<SegmentKind, PathError> {
    match segment {
        Some(segment) => Ok(segment.emit(transform, coords)),
        None => Err(PathError::SequenceExhausted),
    }
}

#[cfg(test)]
fn collect<S: Shape>(shape: &S, transform: Option<&Transform>) -> std::vec::Vec<Segment> {
    shape.path_segments(transform).segments().collect()
}

#[cfg(test)]
fn assert_approx_eq(a: Segment, b: Segment) {
    assert_eq!(a.kind(), b.kind(), "{:?} != {:?}", a, b);
    for (pa, pb) in a.points().iter().zip(b.points().iter()) {
        assert!((*pa - *pb).length() < 1e-9, "{:?} != {:?}", a, b);
    }
}

#[test]
fn producers_are_send() {
    fn assert_send<T: Send>() {}

    assert_send::<CurveSegments>();
    assert_send::<RectSegments>();
    assert_send::<RoundedRectSegments>();
    assert_send::<EllipseSegments>();
    assert_send::<ArcSegments>();
    assert_send::<Flattened<ArcSegments>>();
}

#[test]
fn generic_shapes() {
    use crate::math::point;

    fn count<S: Shape>(shape: S) -> usize {
        shape.path_segments(None).segments().count()
    }

    assert_eq!(count(Line::new(point(0.0, 0.0), point(1.0, 0.0))), 2);
    assert_eq!(count(Rectangle::new(0.0, 0.0, 1.0, 1.0)), 5);
    assert_eq!(count(RoundedRectangle::new(0.0, 0.0, 1.0, 1.0, 0.2, 0.2)), 10);
    assert_eq!(count(Ellipse::new(0.0, 0.0, 1.0, 1.0)), 6);
    assert_eq!(
        count(Arc::new(0.0, 0.0, 1.0, 1.0, 0.0, 180.0, ArcClosure::Pie)),
        5
    );
}
