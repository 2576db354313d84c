use super::{write_segment, Shape};
use crate::geom::QUARTER_ARC_CONTROL_SCALE;
use crate::math::{point, Box2D, Point, Transform};
use crate::{PathError, Segment, SegmentKind, SegmentSource, WindingRule};

/// An axis-aligned rectangle given by its top-left corner and its size.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn from_box(b: &Box2D) -> Self {
        Rectangle::new(b.min.x, b.min.y, b.width(), b.height())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width >= 0.0 && self.height >= 0.0)
    }
}

impl Shape for Rectangle {
    type Segments = RectSegments;

    fn path_segments(&self, transform: Option<&Transform>) -> RectSegments {
        RectSegments::new(self, transform)
    }
}

/// The outline of a [`Rectangle`].
///
/// Starts at the top-left corner and goes through the corners in order of
/// increasing x then increasing y, followed by a close segment.
///
/// The outline has five segments: there is no line-to back to the top-left corner,
/// the left edge is only implied by the close segment.
#[derive(Clone, Debug)]
pub struct RectSegments {
    rect: Rectangle,
    index: usize,
    transform: Option<Transform>,
}

impl RectSegments {
    const NUM_SEGMENTS: usize = 5;

    fn new(rect: &Rectangle, transform: Option<&Transform>) -> Self {
        let mut index = 0;
        if rect.is_empty() {
            log::trace!("empty outline for rectangle {:?}", rect);
            index = Self::NUM_SEGMENTS;
        }

        RectSegments {
            rect: *rect,
            index,
            transform: transform.copied(),
        }
    }

    fn segment(&self) -> Option<Segment> {
        let r = &self.rect;
        Some(match self.index {
            0 => Segment::MoveTo(point(r.x, r.y)),
            1 => Segment::LineTo(point(r.x + r.width, r.y)),
            2 => Segment::LineTo(point(r.x + r.width, r.y + r.height)),
            3 => Segment::LineTo(point(r.x, r.y + r.height)),
            4 => Segment::Close,
            _ => return None,
        })
    }
}

impl SegmentSource for RectSegments {
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

/// A rectangle with elliptical corners.
///
/// `arc_width` and `arc_height` are the width and height of the ellipse the corners
/// are cut from, that is, twice the corner radii.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RoundedRectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub arc_width: f64,
    pub arc_height: f64,
}

impl RoundedRectangle {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64, arc_width: f64, arc_height: f64) -> Self {
        RoundedRectangle {
            x,
            y,
            width,
            height,
            arc_width,
            arc_height,
        }
    }
}

impl Shape for RoundedRectangle {
    type Segments = RoundedRectSegments;

    fn path_segments(&self, transform: Option<&Transform>) -> RoundedRectSegments {
        RoundedRectSegments::new(self, transform)
    }
}

// Distance from the tangent points to the control points of the corner curves,
// relative to the corner ellipse size.
const ACV: f64 = (1.0 - QUARTER_ARC_CONTROL_SCALE) / 2.0;

// Each point is (x + a * width + b * arc_width, y + c * height + d * arc_height),
// with [a, b, c, d] taken from this table. The outline goes down the left edge first.
const ROUNDED_RECT_POINTS: [[[f64; 4]; 3]; 9] = [
    [[0.0, 0.0, 0.0, 0.5], [0.0; 4], [0.0; 4]],
    [[0.0, 0.0, 1.0, -0.5], [0.0; 4], [0.0; 4]],
    [
        [0.0, 0.0, 1.0, -ACV],
        [0.0, ACV, 1.0, 0.0],
        [0.0, 0.5, 1.0, 0.0],
    ],
    [[1.0, -0.5, 1.0, 0.0], [0.0; 4], [0.0; 4]],
    [
        [1.0, -ACV, 1.0, 0.0],
        [1.0, 0.0, 1.0, -ACV],
        [1.0, 0.0, 1.0, -0.5],
    ],
    [[1.0, 0.0, 0.0, 0.5], [0.0; 4], [0.0; 4]],
    [
        [1.0, 0.0, 0.0, ACV],
        [1.0, -ACV, 0.0, 0.0],
        [1.0, -0.5, 0.0, 0.0],
    ],
    [[0.0, 0.5, 0.0, 0.0], [0.0; 4], [0.0; 4]],
    [
        [0.0, ACV, 0.0, 0.0],
        [0.0, 0.0, 0.0, ACV],
        [0.0, 0.0, 0.0, 0.5],
    ],
];

const ROUNDED_RECT_KINDS: [SegmentKind; 10] = [
    SegmentKind::MoveTo,
    SegmentKind::LineTo,
    SegmentKind::CubicTo,
    SegmentKind::LineTo,
    SegmentKind::CubicTo,
    SegmentKind::LineTo,
    SegmentKind::CubicTo,
    SegmentKind::LineTo,
    SegmentKind::CubicTo,
    SegmentKind::Close,
];

/// The outline of a [`RoundedRectangle`]: a move-to, the four edges alternating with
/// one cubic bézier curve per corner, and a close segment.
#[derive(Clone, Debug)]
pub struct RoundedRectSegments {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    arc_width: f64,
    arc_height: f64,
    index: usize,
    transform: Option<Transform>,
}

impl RoundedRectSegments {
    fn new(rect: &RoundedRectangle, transform: Option<&Transform>) -> Self {
        // Corners can't be larger than the rectangle.
        let arc_width = rect.width.min(rect.arc_width.abs());
        let arc_height = rect.height.min(rect.arc_height.abs());

        let mut index = 0;
        if arc_width < 0.0 || arc_height < 0.0 {
            log::trace!("empty outline for rounded rectangle {:?}", rect);
            index = ROUNDED_RECT_KINDS.len();
        }

        RoundedRectSegments {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            arc_width,
            arc_height,
            index,
            transform: transform.copied(),
        }
    }

    fn table_point(&self, v: &[f64; 4]) -> Point {
        point(
            self.x + v[0] * self.width + v[1] * self.arc_width,
            self.y + v[2] * self.height + v[3] * self.arc_height,
        )
    }

    fn segment(&self) -> Option<Segment> {
        let kind = *ROUNDED_RECT_KINDS.get(self.index)?;
        if kind == SegmentKind::Close {
            return Some(Segment::Close);
        }

        let row = &ROUNDED_RECT_POINTS[self.index];
        let points = [
            self.table_point(&row[0]),
            self.table_point(&row[1]),
            self.table_point(&row[2]),
        ];

        Some(Segment::from_points(kind, &points))
    }
}

impl SegmentSource for RoundedRectSegments {
    fn winding_rule(&self) -> WindingRule {
        WindingRule::NonZero
    }

    fn is_done(&self) -> bool {
        self.index >= ROUNDED_RECT_KINDS.len()
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
use super::{assert_approx_eq, collect};

#[test]
fn rectangle_outline() {
    let rect = Rectangle::new(0.0, 0.0, 10.0, 5.0);
    assert_eq!(
        collect(&rect, None),
        vec![
            Segment::MoveTo(point(0.0, 0.0)),
            Segment::LineTo(point(10.0, 0.0)),
            Segment::LineTo(point(10.0, 5.0)),
            Segment::LineTo(point(0.0, 5.0)),
            Segment::Close,
        ]
    );

    let from_box = Rectangle::from_box(&Box2D::new(point(0.0, 0.0), point(10.0, 5.0)));
    assert_eq!(from_box, rect);
}

#[test]
fn left_edge_comes_from_close() {
    let rect = Rectangle::new(2.0, 3.0, 4.0, 5.0);
    let segments = collect(&rect, None);
    assert_eq!(segments.len(), 5);
    assert_eq!(segments[3], Segment::LineTo(point(2.0, 8.0)));
    assert_eq!(segments[4], Segment::Close);
    assert!(!segments.contains(&Segment::LineTo(point(2.0, 3.0))));

    // Flattening resolves the close to the starting corner.
    let mut flattened = rect.flattened(None, 0.1).unwrap();
    for _ in 0..4 {
        flattened.advance();
    }
    assert_eq!(flattened.current(), Ok(Segment::Close));
    flattened.advance();
    assert!(flattened.is_done());
}

#[test]
fn empty_rectangles() {
    assert!(collect(&Rectangle::new(0.0, 0.0, -1.0, 5.0), None).is_empty());
    assert!(collect(&Rectangle::new(0.0, 0.0, 1.0, -5.0), None).is_empty());
    assert!(Rectangle::new(0.0, 0.0, -1.0, 5.0).is_empty());

    let mut source = Rectangle::new(0.0, 0.0, -1.0, 5.0).path_segments(None);
    let mut coords = [0.0; 6];
    assert!(source.is_done());
    assert_eq!(
        source.current_segment(&mut coords),
        Err(PathError::SequenceExhausted)
    );
    source.advance();
    assert!(source.is_done());

    // A zero-sized rectangle still has an outline.
    assert_eq!(collect(&Rectangle::new(1.0, 1.0, 0.0, 0.0), None).len(), 5);
    assert!(!Rectangle::new(1.0, 1.0, 0.0, 0.0).is_empty());
}

#[test]
fn transformed_rectangle() {
    let rect = Rectangle::new(1.0, 2.0, 3.0, 4.0);
    let transform = Transform::translation(-1.0, 10.0);
    assert_eq!(
        collect(&rect, Some(&transform)),
        vec![
            Segment::MoveTo(point(0.0, 12.0)),
            Segment::LineTo(point(3.0, 12.0)),
            Segment::LineTo(point(3.0, 16.0)),
            Segment::LineTo(point(0.0, 16.0)),
            Segment::Close,
        ]
    );
}

#[test]
fn producers_capture_the_shape() {
    let mut rect = Rectangle::new(0.0, 0.0, 10.0, 5.0);
    let transform = Transform::scale(2.0, 2.0);
    let mut source = rect.path_segments(Some(&transform));

    rect.width = -1.0;

    source.advance();
    assert_eq!(source.current(), Ok(Segment::LineTo(point(20.0, 0.0))));
    assert!(collect(&rect, None).is_empty());
}

#[test]
fn rounded_rectangle_outline() {
    let rect = RoundedRectangle::new(0.0, 0.0, 10.0, 6.0, 4.0, 2.0);
    let segments = collect(&rect, None);
    let acv = (1.0 - QUARTER_ARC_CONTROL_SCALE) / 2.0;

    assert_eq!(segments.len(), 10);
    assert_approx_eq(segments[0], Segment::MoveTo(point(0.0, 1.0)));
    assert_approx_eq(segments[1], Segment::LineTo(point(0.0, 5.0)));
    assert_approx_eq(
        segments[2],
        Segment::CubicTo(point(0.0, 6.0 - 2.0 * acv), point(4.0 * acv, 6.0), point(2.0, 6.0)),
    );
    assert_approx_eq(segments[3], Segment::LineTo(point(8.0, 6.0)));
    assert_approx_eq(
        segments[4],
        Segment::CubicTo(
            point(10.0 - 4.0 * acv, 6.0),
            point(10.0, 6.0 - 2.0 * acv),
            point(10.0, 5.0),
        ),
    );
    assert_approx_eq(segments[5], Segment::LineTo(point(10.0, 1.0)));
    assert_approx_eq(
        segments[6],
        Segment::CubicTo(point(10.0, 2.0 * acv), point(10.0 - 4.0 * acv, 0.0), point(8.0, 0.0)),
    );
    assert_approx_eq(segments[7], Segment::LineTo(point(2.0, 0.0)));
    assert_approx_eq(
        segments[8],
        Segment::CubicTo(point(4.0 * acv, 0.0), point(0.0, 2.0 * acv), point(0.0, 1.0)),
    );
    assert_eq!(segments[9], Segment::Close);
}

#[test]
fn rounded_rectangle_corner_sizes() {
    // Corners are clamped to the rectangle and the sign of the arc size is ignored.
    let rect = RoundedRectangle::new(0.0, 0.0, 4.0, 4.0, 10.0, -10.0);
    let segments = collect(&rect, None);
    assert_eq!(segments.len(), 10);
    assert_approx_eq(segments[0], Segment::MoveTo(point(0.0, 2.0)));
    assert_approx_eq(segments[1], Segment::LineTo(point(0.0, 2.0)));
    assert_approx_eq(segments[3], Segment::LineTo(point(2.0, 4.0)));

    // Without arcs the corners collapse to points.
    let rect = RoundedRectangle::new(1.0, 1.0, 4.0, 2.0, 0.0, 0.0);
    let segments = collect(&rect, None);
    assert_approx_eq(
        segments[2],
        Segment::CubicTo(point(1.0, 3.0), point(1.0, 3.0), point(1.0, 3.0)),
    );
    let flattened: std::vec::Vec<Segment> =
        rect.flattened(None, 0.01).unwrap().segments().collect();
    for segment in &flattened {
        if let Some(p) = segment.to() {
            let on_x_edge = p.x == 1.0 || p.x == 5.0;
            let on_y_edge = p.y == 1.0 || p.y == 3.0;
            assert!(on_x_edge || on_y_edge, "{:?}", p);
        }
    }

    assert!(collect(&RoundedRectangle::new(0.0, 0.0, -4.0, 4.0, 1.0, 1.0), None).is_empty());
}

#[test]
fn rounded_rectangle_corners_are_elliptical() {
    let rect = RoundedRectangle::new(0.0, 0.0, 20.0, 20.0, 8.0, 8.0);
    let mut source = rect.path_segments(None);
    source.advance();
    let from = source.current().unwrap().to().unwrap();
    source.advance();
    let corner = match source.current().unwrap() {
        Segment::CubicTo(ctrl1, ctrl2, to) => crate::geom::CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        },
        other => panic!("unexpected segment {:?}", other),
    };

    // Bottom-left corner, cut from a circle of radius 4 centered at (4, 16).
    let center = point(4.0, 16.0);
    for i in 0..=100 {
        let p = corner.sample(i as f64 / 100.0);
        assert!(((p - center).length() - 4.0).abs() < 4.0 * 3e-4);
    }
}
