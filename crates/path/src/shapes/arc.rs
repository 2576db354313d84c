use super::{write_segment, Shape};
use crate::geom::arc::{arc_control_scale, unit_arc_to_cubic, unit_to_ellipse};
use crate::geom::QUARTER_ARC_CONTROL_SCALE;
use crate::math::{point, Point, Transform};
use crate::{PathError, Segment, SegmentKind, SegmentSource, WindingRule};

use std::f64::consts::FRAC_PI_2;

/// How the outline of an [`Arc`] is closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ArcClosure {
    /// The outline is the arc alone, without a close segment.
    Open,
    /// The end of the arc is joined to its start by a straight line.
    Chord,
    /// The end of the arc is joined to the center of the ellipse, which is joined to
    /// the start of the arc.
    Pie,
}

impl ArcClosure {
    fn num_line_segments(self) -> i32 {
        match self {
            ArcClosure::Open => 0,
            ArcClosure::Chord => 1,
            ArcClosure::Pie => 2,
        }
    }
}

/// A portion of the outline of an axis-aligned ellipse.
///
/// The ellipse is given by its bounding box. Angles are in degrees, measured from the
/// positive x axis, positive angles going counter-clockwise on a screen with the y
/// axis pointing down. An extent of 360 degrees or more describes the full ellipse.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub start: f64,
    pub extent: f64,
    pub closure: ArcClosure,
}

impl Arc {
    #[inline]
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        start: f64,
        extent: f64,
        closure: ArcClosure,
    ) -> Self {
        Arc {
            x,
            y,
            width,
            height,
            start,
            extent,
            closure,
        }
    }

    /// The center of the ellipse.
    #[inline]
    pub fn center(&self) -> Point {
        point(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// The point at which the arc starts.
    pub fn start_point(&self) -> Point {
        self.point_at(self.start)
    }

    /// The point at which the arc ends.
    pub fn end_point(&self) -> Point {
        self.point_at(self.start + self.extent)
    }

    fn point_at(&self, angle: f64) -> Point {
        let (sin, cos) = (-angle.to_radians()).sin_cos();
        point(
            self.x + (cos * 0.5 + 0.5) * self.width,
            self.y + (sin * 0.5 + 0.5) * self.height,
        )
    }
}

impl Shape for Arc {
    type Segments = ArcSegments;

    fn path_segments(&self, transform: Option<&Transform>) -> ArcSegments {
        ArcSegments::new(self, transform)
    }
}

/// The outline of an [`Arc`].
///
/// A move-to at the start of the arc, one cubic bézier curve per started quarter of
/// ellipse (four for a full ellipse), then the closure segments.
#[derive(Clone, Debug)]
pub struct ArcSegments {
    center: Point,
    half_width: f64,
    half_height: f64,
    start_angle: f64,
    increment: f64,
    cv: f64,
    arc_segments: i32,
    line_segments: i32,
    index: i32,
    transform: Option<Transform>,
}

impl ArcSegments {
    fn new(arc: &Arc, transform: Option<&Transform>) -> Self {
        let half_width = arc.width * 0.5;
        let half_height = arc.height * 0.5;

        // Angles are negated so that positive angles go counter-clockwise with y down.
        let start_angle = -arc.start.to_radians();
        let extent = -arc.extent;

        let (mut arc_segments, increment, cv) = if extent >= 360.0 || extent <= -360.0 {
            let sign = if extent < 0.0 { -1.0 } else { 1.0 };
            (4, FRAC_PI_2 * sign, QUARTER_ARC_CONTROL_SCALE * sign)
        } else {
            let n = (extent.abs() / 90.0).ceil() as i32;
            if n > 0 {
                let increment = (extent / n as f64).to_radians();
                (n, increment, arc_control_scale(increment))
            } else {
                (0, 0.0, 0.0)
            }
        };
        if cv == 0.0 {
            arc_segments = 0;
        }

        let mut line_segments = arc.closure.num_line_segments();
        if half_width < 0.0 || half_height < 0.0 {
            log::trace!("empty outline for arc {:?}", arc);
            arc_segments = -1;
            line_segments = -1;
        }

        ArcSegments {
            center: arc.center(),
            half_width,
            half_height,
            start_angle,
            increment,
            cv,
            arc_segments,
            line_segments,
            index: 0,
            transform: transform.copied(),
        }
    }

    fn ellipse_point(&self, p: Point) -> Point {
        unit_to_ellipse(p, self.center, self.half_width, self.half_height)
    }

    fn segment(&self) -> Option<Segment> {
        if self.is_done() {
            return None;
        }

        if self.index == 0 {
            let (sin, cos) = self.start_angle.sin_cos();
            return Some(Segment::MoveTo(self.ellipse_point(point(cos, sin))));
        }

        if self.index > self.arc_segments {
            if self.index == self.arc_segments + self.line_segments {
                return Some(Segment::Close);
            }
            return Some(Segment::LineTo(self.center));
        }

        let angle = self.start_angle + self.increment * (self.index - 1) as f64;
        let curve = unit_arc_to_cubic(angle, self.increment, self.cv);

        Some(Segment::CubicTo(
            self.ellipse_point(curve.ctrl1),
            self.ellipse_point(curve.ctrl2),
            self.ellipse_point(curve.to),
        ))
    }
}

impl SegmentSource for ArcSegments {
    fn winding_rule(&self) -> WindingRule {
        WindingRule::NonZero
    }

    fn is_done(&self) -> bool {
        self.index > self.arc_segments + self.line_segments
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

#[cfg(test)]
fn kinds(arc: &Arc) -> std::vec::Vec<SegmentKind> {
    collect(arc, None).iter().map(Segment::kind).collect()
}

#[test]
fn arc_segment_counts() {
    use SegmentKind::*;

    let arc = |extent, closure| Arc::new(0.0, 0.0, 10.0, 10.0, 0.0, extent, closure);

    assert_eq!(kinds(&arc(90.0, ArcClosure::Open)), vec![MoveTo, CubicTo]);
    assert_eq!(
        kinds(&arc(91.0, ArcClosure::Open)),
        vec![MoveTo, CubicTo, CubicTo]
    );
    assert_eq!(
        kinds(&arc(-180.0, ArcClosure::Chord)),
        vec![MoveTo, CubicTo, CubicTo, Close]
    );
    assert_eq!(
        kinds(&arc(360.0, ArcClosure::Open)),
        vec![MoveTo, CubicTo, CubicTo, CubicTo, CubicTo]
    );
    assert_eq!(
        kinds(&arc(1000.0, ArcClosure::Pie)),
        vec![MoveTo, CubicTo, CubicTo, CubicTo, CubicTo, LineTo, Close]
    );
    assert_eq!(kinds(&arc(45.0, ArcClosure::Pie)), vec![MoveTo, CubicTo, LineTo, Close]);
}

#[test]
fn empty_arcs() {
    use SegmentKind::*;

    assert_eq!(
        kinds(&Arc::new(0.0, 0.0, 10.0, 10.0, 30.0, 0.0, ArcClosure::Chord)),
        vec![MoveTo, Close]
    );
    assert_eq!(
        kinds(&Arc::new(0.0, 0.0, 10.0, 10.0, 30.0, 0.0, ArcClosure::Pie)),
        vec![MoveTo, LineTo, Close]
    );
    assert_eq!(
        kinds(&Arc::new(0.0, 0.0, 10.0, 10.0, 30.0, 0.0, ArcClosure::Open)),
        vec![MoveTo]
    );
    assert!(kinds(&Arc::new(0.0, 0.0, -10.0, 10.0, 0.0, 90.0, ArcClosure::Pie)).is_empty());
    assert!(kinds(&Arc::new(0.0, 0.0, 10.0, -10.0, 0.0, 90.0, ArcClosure::Open)).is_empty());
}

#[test]
fn quarter_arc() {
    let k = QUARTER_ARC_CONTROL_SCALE;
    let arc = Arc::new(0.0, 0.0, 2.0, 2.0, 0.0, 90.0, ArcClosure::Open);
    let segments = collect(&arc, None);

    // Counter-clockwise with y down goes up from the right-middle point.
    assert_approx_eq(segments[0], Segment::MoveTo(point(2.0, 1.0)));
    assert_approx_eq(
        segments[1],
        Segment::CubicTo(point(2.0, 1.0 - k), point(1.0 + k, 0.0), point(1.0, 0.0)),
    );

    assert!((arc.start_point() - point(2.0, 1.0)).length() < 1e-12);
    assert!((arc.end_point() - point(1.0, 0.0)).length() < 1e-12);
    assert_eq!(arc.center(), point(1.0, 1.0));
}

#[test]
fn arc_endpoints_match_accessors() {
    for &(start, extent) in &[(0.0, 30.0), (45.0, -200.0), (-10.0, 300.0), (170.0, 91.0)] {
        let arc = Arc::new(-3.0, 5.0, 8.0, 2.0, start, extent, ArcClosure::Chord);
        let segments = collect(&arc, None);
        let n = segments.len();

        assert!((segments[0].to().unwrap() - arc.start_point()).length() < 1e-9);
        assert!((segments[n - 2].to().unwrap() - arc.end_point()).length() < 1e-9);
        assert_eq!(segments[n - 1], Segment::Close);

        // Every curve stays on the ellipse.
        let mut from = segments[0].to().unwrap();
        for segment in &segments[1..n - 1] {
            if let Segment::CubicTo(ctrl1, ctrl2, to) = *segment {
                let curve = crate::geom::CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                };
                for i in 0..=50 {
                    let p = curve.sample(i as f64 / 50.0) - arc.center();
                    let r = (p.x / 4.0).powi(2) + (p.y / 1.0).powi(2);
                    assert!((r.sqrt() - 1.0).abs() < 3e-4);
                }
                from = to;
            }
        }
    }
}

#[test]
fn transformed_pie() {
    let arc = Arc::new(0.0, 0.0, 2.0, 2.0, 0.0, 180.0, ArcClosure::Pie);
    let transform = Transform::translation(10.0, 0.0);
    let segments = collect(&arc, Some(&transform));

    assert_approx_eq(segments[0], Segment::MoveTo(point(12.0, 1.0)));
    assert_eq!(segments[2].kind(), SegmentKind::CubicTo);
    assert!((segments[2].to().unwrap() - point(10.0, 1.0)).length() < 1e-9);
    assert_eq!(segments[3], Segment::LineTo(point(11.0, 1.0)));
    assert_eq!(segments[4], Segment::Close);
}
