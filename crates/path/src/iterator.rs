//! The segment source protocol.
//!
//! A [`SegmentSource`] is a cursor over the segments of an outline. The consumer drives
//! it explicitly: read the current segment, then [`advance`](SegmentSource::advance),
//! until [`is_done`](SegmentSource::is_done) returns true.
//!
//! ```
//! use outline_path::shapes::{Line, Shape};
//! use outline_path::math::point;
//! use outline_path::{SegmentKind, SegmentSource};
//!
//! let line = Line::new(point(0.0, 0.0), point(3.0, 4.0));
//! let mut source = line.path_segments(None);
//! let mut coords = [0.0; 6];
//! while !source.is_done() {
//!     match source.current_segment(&mut coords).unwrap() {
//!         SegmentKind::MoveTo => println!("move to {} {}", coords[0], coords[1]),
//!         SegmentKind::LineTo => println!("line to {} {}", coords[0], coords[1]),
//!         _ => unreachable!(),
//!     }
//!     source.advance();
//! }
//! ```
//!
//! Sources can also be consumed as a regular `Iterator` through
//! [`segments`](SegmentSource::segments), and approximated with line segments through
//! [`flattened`](SegmentSource::flattened).

use crate::flatten::{FlattenOptions, Flattened};
use crate::{PathError, Segment, SegmentKind, WindingRule};

/// A lazy, pull-based sequence of path segments.
pub trait SegmentSource {
    /// The winding rule of the outline.
    fn winding_rule(&self) -> WindingRule;

    /// Returns true once all segments have been read.
    fn is_done(&self) -> bool;

    /// Moves to the next segment.
    ///
    /// Advancing a source that is done has no effect.
    fn advance(&mut self);

    /// Writes the points of the current segment into `coords` and returns its kind.
    ///
    /// Writes 2, 2, 4, 6 and 0 scalars for move-to, line-to, quadratic, cubic and
    /// close segments respectively. Fails with [`PathError::SequenceExhausted`] once
    /// the source is done.
    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError>;

    /// Same as [`current_segment`](Self::current_segment) with single precision
    /// coordinates.
    fn current_segment_f32(&self, coords: &mut [f32; 6]) -> Result<SegmentKind, PathError> {
        let mut tmp = [0.0; 6];
        let kind = self.current_segment(&mut tmp)?;
        for (dst, src) in coords.iter_mut().zip(&tmp).take(kind.num_coords()) {
            *dst = *src as f32;
        }

        Ok(kind)
    }

    /// Returns the current segment.
    fn current(&self) -> Result<Segment, PathError> {
        let mut coords = [0.0; 6];
        let kind = self.current_segment(&mut coords)?;

        Ok(Segment::from_coords(kind, &coords))
    }

    /// Returns an iterator over the remaining segments.
    fn segments(self) -> Segments<Self>
    where
        Self: Sized,
    {
        Segments { source: self }
    }

    /// Returns a source that approximates curves with line segments, within
    /// `flatness` of the curve and with the default subdivision limit.
    fn flattened(self, flatness: f64) -> Result<Flattened<Self>, PathError>
    where
        Self: Sized,
    {
        Flattened::new(self, flatness, FlattenOptions::DEFAULT_MAX_DEPTH)
    }

    /// Returns a source that approximates curves with line segments.
    fn flattened_with(self, options: &FlattenOptions) -> Result<Flattened<Self>, PathError>
    where
        Self: Sized,
    {
        Flattened::with_options(self, options)
    }
}

impl<'l, T: SegmentSource + ?Sized> SegmentSource for &'l mut T {
    fn winding_rule(&self) -> WindingRule {
        (**self).winding_rule()
    }

    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    fn advance(&mut self) {
        (**self).advance()
    }

    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError> {
        (**self).current_segment(coords)
    }
}

impl<T: SegmentSource + ?Sized> SegmentSource for Box<T> {
    fn winding_rule(&self) -> WindingRule {
        (**self).winding_rule()
    }

    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    fn advance(&mut self) {
        (**self).advance()
    }

    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError> {
        (**self).current_segment(coords)
    }
}

/// An `Iterator` over the remaining segments of a source.
///
/// Created with [`SegmentSource::segments`].
pub struct Segments<S> {
    source: S,
}

impl<S: SegmentSource> Segments<S> {
    /// The winding rule of the underlying source.
    pub fn winding_rule(&self) -> WindingRule {
        self.source.winding_rule()
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: SegmentSource> Iterator for Segments<S> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let segment = self.source.current().ok()?;
        self.source.advance();

        Some(segment)
    }
}

#[cfg(test)]
use crate::math::point;

/// A source over a fixed list of segments, for tests.
#[cfg(test)]
pub(crate) struct SliceSource<'l> {
    pub segments: &'l [Segment],
    pub index: usize,
    pub winding_rule: WindingRule,
}

#[cfg(test)]
impl<'l> SliceSource<'l> {
    pub fn new(segments: &'l [Segment]) -> Self {
        SliceSource {
            segments,
            index: 0,
            winding_rule: WindingRule::NonZero,
        }
    }
}

#[cfg(test)]
impl<'l> SegmentSource for SliceSource<'l> {
    fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    fn is_done(&self) -> bool {
        self.index >= self.segments.len()
    }

    fn advance(&mut self) {
        if !self.is_done() {
            self.index += 1;
        }
    }

    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError> {
        self.segments
            .get(self.index)
            .map(|segment| segment.write_coords(coords))
            .ok_or(PathError::SequenceExhausted)
    }
}

#[test]
fn iterate_slice_source() {
    let segments = [
        Segment::MoveTo(point(0.0, 0.0)),
        Segment::QuadTo(point(1.0, 1.0), point(2.0, 0.0)),
        Segment::Close,
    ];

    let collected: std::vec::Vec<Segment> = SliceSource::new(&segments).segments().collect();
    assert_eq!(&collected[..], &segments[..]);
}

#[test]
fn read_past_the_end() {
    let segments = [Segment::MoveTo(point(1.0, 2.0))];
    let mut source = SliceSource::new(&segments);
    let mut coords = [0.0; 6];

    assert_eq!(source.current_segment(&mut coords), Ok(SegmentKind::MoveTo));
    source.advance();
    assert!(source.is_done());
    assert_eq!(
        source.current_segment(&mut coords),
        Err(PathError::SequenceExhausted)
    );
    assert_eq!(source.current(), Err(PathError::SequenceExhausted));
    let mut coords32 = [0.0f32; 6];
    assert_eq!(
        source.current_segment_f32(&mut coords32),
        Err(PathError::SequenceExhausted)
    );
}

#[test]
fn single_precision_coords() {
    let segments = [Segment::CubicTo(
        point(0.1, 0.2),
        point(1.0 / 3.0, 2.0 / 3.0),
        point(1e10, -1e-10),
    )];
    let source = SliceSource::new(&segments);

    let mut coords64 = [0.0; 6];
    let mut coords32 = [0.0f32; 6];
    assert_eq!(source.current_segment(&mut coords64), Ok(SegmentKind::CubicTo));
    assert_eq!(
        source.current_segment_f32(&mut coords32),
        Ok(SegmentKind::CubicTo)
    );
    for i in 0..6 {
        assert_eq!(coords32[i], coords64[i] as f32);
    }
}

#[test]
fn dynamic_sources() {
    let segments = [Segment::MoveTo(point(0.0, 0.0)), Segment::Close];
    let mut boxed: Box<dyn SegmentSource + '_> = Box::new(SliceSource::new(&segments));
    assert_eq!(boxed.winding_rule(), WindingRule::NonZero);
    assert_eq!(boxed.current(), Ok(Segment::MoveTo(point(0.0, 0.0))));

    {
        let by_ref = &mut boxed;
        by_ref.advance();
        assert_eq!(by_ref.current(), Ok(Segment::Close));
    }

    boxed.advance();
    assert!(boxed.is_done());
    // Advancing past the end is harmless.
    boxed.advance();
    assert!(boxed.is_done());
}
