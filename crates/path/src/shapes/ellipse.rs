use super::{write_segment, Shape};
use crate::geom::QUARTER_ARC_CONTROL_SCALE;
use crate::math::{point, Box2D, Point, Transform};
use crate::{PathError, Segment, SegmentKind, SegmentSource, WindingRule};

/// An axis-aligned ellipse given by its bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Ellipse {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Ellipse {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Ellipse {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the circle of the given center and radius.
    #[inline]
    pub fn circle(center: Point, radius: f64) -> Self {
        Ellipse::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        )
    }

    #[inline]
    pub fn from_box(b: &Box2D) -> Self {
        Ellipse::new(b.min.x, b.min.y, b.width(), b.height())
    }

    #[inline]
    pub fn center(&self) -> Point {
        point(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

impl Shape for Ellipse {
    type Segments = EllipseSegments;

    fn path_segments(&self, transform: Option<&Transform>) -> EllipseSegments {
        EllipseSegments::new(self, transform)
    }
}

const PCV: f64 = 0.5 + QUARTER_ARC_CONTROL_SCALE * 0.5;
const NCV: f64 = 0.5 - QUARTER_ARC_CONTROL_SCALE * 0.5;

// Points of the four quarter curves in the unit box, [ctrl1, ctrl2, to] as x, y pairs.
// The outline starts at the right-middle point and goes through the bottom first.
const ELLIPSE_CURVES: [[f64; 6]; 4] = [
    [1.0, PCV, PCV, 1.0, 0.5, 1.0],
    [NCV, 1.0, 0.0, PCV, 0.0, 0.5],
    [0.0, NCV, NCV, 0.0, 0.5, 0.0],
    [PCV, 0.0, 1.0, NCV, 1.0, 0.5],
];

/// The outline of an [`Ellipse`]: a move-to, four cubic bézier curves and a close
/// segment.
#[derive(Clone, Debug)]
pub struct EllipseSegments {
    ellipse: Ellipse,
    index: usize,
    transform: Option<Transform>,
}

impl EllipseSegments {
    const NUM_SEGMENTS: usize = 6;

    fn new(ellipse: &Ellipse, transform: Option<&Transform>) -> Self {
        let mut index = 0;
        if ellipse.width < 0.0 || ellipse.height < 0.0 {
            log::trace!("empty outline for ellipse {:?}", ellipse);
            index = Self::NUM_SEGMENTS;
        }

        EllipseSegments {
            ellipse: *ellipse,
            index,
            transform: transform.copied(),
        }
    }

    fn unit_point(&self, x: f64, y: f64) -> Point {
        let e = &self.ellipse;
        point(e.x + x * e.width, e.y + y * e.height)
    }

    fn segment(&self) -> Option<Segment> {
        Some(match self.index {
            0 => {
                let start = &ELLIPSE_CURVES[3];
                Segment::MoveTo(self.unit_point(start[4], start[5]))
            }
            1..=4 => {
                let c = &ELLIPSE_CURVES[self.index - 1];
                Segment::CubicTo(
                    self.unit_point(c[0], c[1]),
                    self.unit_point(c[2], c[3]),
                    self.unit_point(c[4], c[5]),
                )
            }
            5 => Segment::Close,
            _ => return None,
        })
    }
}

impl SegmentSource for EllipseSegments {
    fn winding_rule(&self) -> WindingRule {
        WindingRule::NonZero
    }

    fn is_done(&self) -> bool {
        self.index >= Self::NUM_SEGMENTS
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
use crate::geom::CubicBezierSegment;

#[test]
fn ellipse_outline() {
    let ellipse = Ellipse::new(0.0, 0.0, 4.0, 2.0);
    let segments = collect(&ellipse, None);

    assert_eq!(segments.len(), 6);
    assert_eq!(segments[0], Segment::MoveTo(point(4.0, 1.0)));
    assert_eq!(segments[1].to(), Some(point(2.0, 2.0)));
    assert_eq!(segments[2].to(), Some(point(0.0, 1.0)));
    assert_eq!(segments[3].to(), Some(point(2.0, 0.0)));
    assert_eq!(segments[4].to(), Some(point(4.0, 1.0)));
    assert_eq!(segments[5], Segment::Close);
    for segment in &segments[1..5] {
        assert_eq!(segment.kind(), SegmentKind::CubicTo);
    }

    assert!(collect(&Ellipse::new(0.0, 0.0, -4.0, 2.0), None).is_empty());
    assert!(collect(&Ellipse::new(0.0, 0.0, 4.0, -2.0), None).is_empty());
}

#[test]
fn unit_circle_precision() {
    let circle = Ellipse::new(0.0, 0.0, 1.0, 1.0);
    let center = circle.center();
    let mut source = circle.path_segments(None);

    let mut from = source.current().unwrap().to().unwrap();
    source.advance();
    while let Ok(Segment::CubicTo(ctrl1, ctrl2, to)) = source.current() {
        let curve = CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        };
        for i in 0..=200 {
            let p = curve.sample(i as f64 / 200.0);
            assert!(((p - center).length() - 0.5).abs() < 0.0003);
        }
        from = to;
        source.advance();
    }

    assert_eq!(source.current(), Ok(Segment::Close));
}

#[test]
fn flattened_circle() {
    let circle = Ellipse::circle(point(0.0, 0.0), 1.0);
    let transform = Transform::scale(10.0, 10.0);
    let flattened: std::vec::Vec<Segment> = circle
        .flattened(Some(&transform), 0.01)
        .unwrap()
        .segments()
        .collect();

    assert_eq!(flattened.first(), Some(&Segment::MoveTo(point(10.0, 0.0))));
    assert_eq!(flattened.last(), Some(&Segment::Close));
    for segment in &flattened[1..flattened.len() - 1] {
        match *segment {
            Segment::LineTo(p) => assert!((p.to_vector().length() - 10.0).abs() < 0.01),
            other => panic!("unexpected segment {:?}", other),
        }
    }
}

#[test]
fn single_precision_ellipse() {
    let ellipse = Ellipse::new(0.1, 0.2, 3.3, 1.7);
    let mut source = ellipse.path_segments(None);
    let mut coords64 = [0.0; 6];
    let mut coords32 = [0.0f32; 6];

    while !source.is_done() {
        let kind = source.current_segment(&mut coords64).unwrap();
        assert_eq!(source.current_segment_f32(&mut coords32), Ok(kind));
        for i in 0..kind.num_coords() {
            assert_eq!(coords32[i], coords64[i] as f32);
        }
        source.advance();
    }
}
