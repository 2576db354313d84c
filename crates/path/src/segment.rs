use crate::geom::arrayvec::ArrayVec;
use crate::geom::traits::Transformation;
use crate::math::{point, Point};

/// The type of a path segment.
///
/// Move-to and line-to segments carry one point, quadratic curves two, cubic curves
/// three and close segments none.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SegmentKind {
    MoveTo,
    LineTo,
    QuadTo,
    CubicTo,
    Close,
}

impl SegmentKind {
    /// Number of points carried by a segment of this kind.
    #[inline]
    pub fn num_points(self) -> usize {
        match self {
            SegmentKind::MoveTo | SegmentKind::LineTo => 1,
            SegmentKind::QuadTo => 2,
            SegmentKind::CubicTo => 3,
            SegmentKind::Close => 0,
        }
    }

    /// Number of scalars written in a coordinate buffer for this kind.
    #[inline]
    pub fn num_coords(self) -> usize {
        self.num_points() * 2
    }

    #[inline]
    pub fn is_curve(self) -> bool {
        match self {
            SegmentKind::QuadTo | SegmentKind::CubicTo => true,
            _ => false,
        }
    }
}

/// A path segment with its points.
///
/// The start of a segment is implicit: it is the end of the previous one, or the
/// last move-to position after a close.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::MoveTo(..) => SegmentKind::MoveTo,
            Segment::LineTo(..) => SegmentKind::LineTo,
            Segment::QuadTo(..) => SegmentKind::QuadTo,
            Segment::CubicTo(..) => SegmentKind::CubicTo,
            Segment::Close => SegmentKind::Close,
        }
    }

    /// The points of the segment, control points first.
    pub fn points(&self) -> ArrayVec<Point, 3> {
        let mut points = ArrayVec::new();
        match *self {
            Segment::MoveTo(p) | Segment::LineTo(p) => points.push(p),
            Segment::QuadTo(ctrl, to) => {
                points.push(ctrl);
                points.push(to);
            }
            Segment::CubicTo(ctrl1, ctrl2, to) => {
                points.push(ctrl1);
                points.push(ctrl2);
                points.push(to);
            }
            Segment::Close => {}
        }
        points
    }

    /// The point this segment ends at, if it carries one.
    pub fn to(&self) -> Option<Point> {
        self.points().last().cloned()
    }

    /// Builds a segment of the given kind from its points.
    ///
    /// Panics if `points` holds fewer points than the kind needs.
    pub fn from_points(kind: SegmentKind, points: &[Point]) -> Self {
        match kind {
            SegmentKind::MoveTo => Segment::MoveTo(points[0]),
            SegmentKind::LineTo => Segment::LineTo(points[0]),
            SegmentKind::QuadTo => Segment::QuadTo(points[0], points[1]),
            SegmentKind::CubicTo => Segment::CubicTo(points[0], points[1], points[2]),
            SegmentKind::Close => Segment::Close,
        }
    }

    /// Reads a segment of the given kind from packed coordinates.
    pub fn from_coords(kind: SegmentKind, coords: &[f64; 6]) -> Self {
        let points = [
            point(coords[0], coords[1]),
            point(coords[2], coords[3]),
            point(coords[4], coords[5]),
        ];
        Segment::from_points(kind, &points)
    }

    /// Writes the points as packed coordinates and returns the kind.
    ///
    /// Slots past the segment's points are left untouched.
    pub fn write_coords(&self, coords: &mut [f64; 6]) -> SegmentKind {
        for (i, p) in self.points().iter().enumerate() {
            coords[i * 2] = p.x;
            coords[i * 2 + 1] = p.y;
        }
        self.kind()
    }

    /// Applies the transform to all the points of the segment in a single batch.
    pub fn transformed<T: Transformation<f64>>(&self, transform: &T) -> Self {
        let mut points = self.points();
        transform.transform_points(&mut points);
        Segment::from_points(self.kind(), &points)
    }

    /// Writes the segment, transformed if a transform is provided.
    pub(crate) fn emit<T: Transformation<f64>>(
        self,
        transform: Option<&T>,
        coords: &mut [f64; 6],
    ) -> SegmentKind {
        match transform {
            Some(transform) => self.transformed(transform).write_coords(coords),
            None => self.write_coords(coords),
        }
    }
}

#[cfg(test)]
use crate::math::Transform;

#[test]
fn segment_kinds() {
    assert_eq!(SegmentKind::MoveTo.num_coords(), 2);
    assert_eq!(SegmentKind::LineTo.num_coords(), 2);
    assert_eq!(SegmentKind::QuadTo.num_coords(), 4);
    assert_eq!(SegmentKind::CubicTo.num_coords(), 6);
    assert_eq!(SegmentKind::Close.num_coords(), 0);
    assert!(SegmentKind::QuadTo.is_curve());
    assert!(!SegmentKind::Close.is_curve());
}

#[test]
fn coords_round_trip() {
    let segment = Segment::CubicTo(point(1.0, 2.0), point(3.0, 4.0), point(5.0, 6.0));
    let mut coords = [0.0; 6];
    assert_eq!(segment.write_coords(&mut coords), SegmentKind::CubicTo);
    assert_eq!(coords, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(Segment::from_coords(SegmentKind::CubicTo, &coords), segment);
    assert_eq!(segment.to(), Some(point(5.0, 6.0)));

    // Close writes nothing.
    let mut coords = [9.0; 6];
    assert_eq!(Segment::Close.write_coords(&mut coords), SegmentKind::Close);
    assert_eq!(coords, [9.0; 6]);
    assert_eq!(Segment::Close.to(), None);
}

#[test]
fn transformed_segment() {
    let transform = Transform::translation(1.0, -1.0);
    let segment = Segment::QuadTo(point(0.0, 0.0), point(2.0, 2.0));
    assert_eq!(
        segment.transformed(&transform),
        Segment::QuadTo(point(1.0, -1.0), point(3.0, 1.0))
    );

    let mut coords = [0.0; 6];
    let kind = Segment::LineTo(point(4.0, 4.0)).emit(Some(&transform), &mut coords);
    assert_eq!(kind, SegmentKind::LineTo);
    assert_eq!(&coords[..2], &[5.0, 3.0]);

    let kind = Segment::LineTo(point(4.0, 4.0)).emit::<Transform>(None, &mut coords);
    assert_eq!(kind, SegmentKind::LineTo);
    assert_eq!(&coords[..2], &[4.0, 4.0]);
}
