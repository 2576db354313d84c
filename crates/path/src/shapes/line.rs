use super::{write_segment, Shape};
use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use crate::math::{Point, Transform};
use crate::{PathError, Segment, SegmentKind, SegmentSource, WindingRule};

/// A straight line between two points.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

impl Line {
    #[inline]
    pub fn new(from: Point, to: Point) -> Self {
        Line { from, to }
    }

    #[inline]
    pub fn to_segment(&self) -> LineSegment<f64> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }
}

impl Shape for Line {
    type Segments = CurveSegments;

    fn path_segments(&self, transform: Option<&Transform>) -> CurveSegments {
        CurveSegments::new(self.from, Segment::LineTo(self.to), transform)
    }
}

/// A quadratic bézier curve.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticCurve {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadraticCurve {
    #[inline]
    pub fn new(from: Point, ctrl: Point, to: Point) -> Self {
        QuadraticCurve { from, ctrl, to }
    }

    #[inline]
    pub fn to_segment(&self) -> QuadraticBezierSegment<f64> {
        QuadraticBezierSegment {
            from: self.from,
            ctrl: self.ctrl,
            to: self.to,
        }
    }
}

impl Shape for QuadraticCurve {
    type Segments = CurveSegments;

    fn path_segments(&self, transform: Option<&Transform>) -> CurveSegments {
        CurveSegments::new(self.from, Segment::QuadTo(self.ctrl, self.to), transform)
    }
}

/// A cubic bézier curve.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicCurve {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicCurve {
    #[inline]
    pub fn new(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        CubicCurve {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    #[inline]
    pub fn to_segment(&self) -> CubicBezierSegment<f64> {
        CubicBezierSegment {
            from: self.from,
            ctrl1: self.ctrl1,
            ctrl2: self.ctrl2,
            to: self.to,
        }
    }
}

impl Shape for CubicCurve {
    type Segments = CurveSegments;

    fn path_segments(&self, transform: Option<&Transform>) -> CurveSegments {
        CurveSegments::new(
            self.from,
            Segment::CubicTo(self.ctrl1, self.ctrl2, self.to),
            transform,
        )
    }
}

/// The outline of a line or of a single curve: a move-to followed by one segment.
///
/// The outline is open, there is no close segment.
#[derive(Clone, Debug)]
pub struct CurveSegments {
    from: Point,
    segment: Segment,
    index: usize,
    transform: Option<Transform>,
}

impl CurveSegments {
    fn new(from: Point, segment: Segment, transform: Option<&Transform>) -> Self {
        CurveSegments {
            from,
            segment,
            index: 0,
            transform: transform.copied(),
        }
    }

    fn segment(&self) -> Option<Segment> {
        match self.index {
            0 => Some(Segment::MoveTo(self.from)),
            1 => Some(self.segment),
            _ => None,
        }
    }
}

impl SegmentSource for CurveSegments {
    fn winding_rule(&self) -> WindingRule {
        WindingRule::NonZero
    }

    fn is_done(&self) -> bool {
        self.index > 1
    }

    fn advance(&mut self) {
        if !self.is_done() {
            self.index += 1;
        }
    }

    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError> {
        write_segment(self.segment(), self.transform.as_ref(), coords)
    }
}

#[cfg(test)]
use super::collect;
#[cfg(test)]
use crate::math::point;

#[test]
fn line_outline() {
    let line = Line::new(point(1.0, 2.0), point(3.0, 4.0));
    assert_eq!(
        collect(&line, None),
        vec![
            Segment::MoveTo(point(1.0, 2.0)),
            Segment::LineTo(point(3.0, 4.0)),
        ]
    );
    assert!((line.to_segment().length() - 8.0f64.sqrt()).abs() < 1e-12);
}

#[test]
fn curve_outlines() {
    let quad = QuadraticCurve::new(point(0.0, 0.0), point(1.0, 2.0), point(2.0, 0.0));
    assert_eq!(
        collect(&quad, None),
        vec![
            Segment::MoveTo(point(0.0, 0.0)),
            Segment::QuadTo(point(1.0, 2.0), point(2.0, 0.0)),
        ]
    );

    let transform = Transform::scale(2.0, 3.0);
    let cubic = CubicCurve::new(
        point(0.0, 0.0),
        point(1.0, 1.0),
        point(2.0, 1.0),
        point(3.0, 0.0),
    );
    assert_eq!(
        collect(&cubic, Some(&transform)),
        vec![
            Segment::MoveTo(point(0.0, 0.0)),
            Segment::CubicTo(point(2.0, 3.0), point(4.0, 3.0), point(6.0, 0.0)),
        ]
    );
}

#[test]
fn curve_producer_protocol() {
    let quad = QuadraticCurve::new(point(0.0, 0.0), point(1.0, 2.0), point(2.0, 0.0));
    let mut source = quad.path_segments(None);
    let mut coords = [0.0; 6];

    assert_eq!(source.winding_rule(), WindingRule::NonZero);
    assert_eq!(source.current_segment(&mut coords), Ok(SegmentKind::MoveTo));
    // Reading twice does not advance.
    assert_eq!(source.current_segment(&mut coords), Ok(SegmentKind::MoveTo));
    source.advance();
    assert_eq!(source.current_segment(&mut coords), Ok(SegmentKind::QuadTo));
    assert_eq!(&coords[..4], &[1.0, 2.0, 2.0, 0.0]);
    source.advance();
    assert!(source.is_done());
    assert_eq!(
        source.current_segment(&mut coords),
        Err(PathError::SequenceExhausted)
    );
}
