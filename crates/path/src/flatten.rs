//! Approximation of curved outlines with line segments.
//!
//! [`Flattened`] wraps any [`SegmentSource`] and replaces each quadratic and cubic
//! curve with a polyline, subdividing each curve only as much as needed for the curve
//! to stay within the flatness tolerance of the polyline.
//!
//! # Algorithm
//!
//! A curve is flat enough when the distance between each of its control points and the
//! segment joining its endpoints is below the tolerance. Since the curve is contained in
//! the convex hull of its control points, the curve is then within the tolerance of that
//! segment. Curves that are not flat enough are split in half (de Casteljau at t = 0.5)
//! and each half is tested again, depth first, up to a maximum subdivision depth.
//!
//! The subdivision does not recurse. Pending halves are stored back to back in a hold
//! buffer, growing from the end of the buffer towards its beginning: splitting the
//! leftmost pending curve writes its first half in front of it and its second half in
//! place, the two halves sharing their middle point. A small stack records the
//! subdivision depth of each pending half. The memory used is proportional to the
//! subdivision limit rather than to the number of generated segments.

use crate::geom::{CubicBezierSegment, QuadraticBezierSegment};
use crate::math::{point, Point};
use crate::{PathError, SegmentKind, SegmentSource, WindingRule};

// Room for one cubic curve plus the point preceding it, and for one level of
// subdivision of a quadratic curve.
const INITIAL_HOLD_SIZE: usize = 14;
// Multiple of the quadratic (4) and cubic (6) subdivision increments.
const GROW_SIZE: usize = 24;

/// Parameters for the flattening of a segment source.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FlattenOptions {
    /// Maximum allowed distance between a curve and its approximation.
    ///
    /// Must be positive or zero. With a tolerance of zero every curve is subdivided
    /// up to `max_depth`.
    ///
    /// Default value: `FlattenOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f64,

    /// Maximum number of times a curve is split in half.
    ///
    /// Each curve is approximated with at most `2^max_depth` line segments. When the
    /// limit is reached the approximation may be coarser than the tolerance.
    ///
    /// Default value: `FlattenOptions::DEFAULT_MAX_DEPTH`.
    pub max_depth: i32,
}

impl FlattenOptions {
    /// Default flattening tolerance.
    pub const DEFAULT_TOLERANCE: f64 = 0.1;
    /// Default subdivision limit, at most 1024 segments per curve.
    pub const DEFAULT_MAX_DEPTH: i32 = 10;

    pub const DEFAULT: Self = FlattenOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
        max_depth: Self::DEFAULT_MAX_DEPTH,
    };

    #[inline]
    pub fn tolerance(tolerance: f64) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Checks that the options can be used for flattening.
    pub fn validate(&self) -> Result<(), PathError> {
        if self.tolerance.is_nan() {
            return Err(PathError::FlatnessIsNaN);
        }
        if self.tolerance < 0.0 {
            return Err(PathError::NegativeFlatness(self.tolerance));
        }
        if self.max_depth < 0 {
            return Err(PathError::NegativeLimit(self.max_depth));
        }

        Ok(())
    }
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A segment source that approximates the curves of another source with line
/// segments.
///
/// Yields only move-to, line-to and close segments. Move-to, line-to and close
/// segments of the source are passed through unchanged.
///
/// See the [module documentation](index.html) for the algorithm.
pub struct Flattened<S> {
    source: S,
    square_flatness: f64,
    limit: i32,

    // Pending curve coordinates, in the window `hold[hold_index..hold_end + 2]`.
    hold: Vec<f64>,
    hold_kind: SegmentKind,
    hold_index: usize,
    hold_end: usize,

    // Subdivision depth of each pending curve in the window, the last entry being
    // the leftmost curve.
    levels: Vec<i32>,
    level_index: usize,

    current: Point,
    subpath_start: Point,
    done: bool,
}

impl<S: SegmentSource> Flattened<S> {
    /// Creates a flattening source with the given tolerance and subdivision limit.
    ///
    /// Fails if `flatness` is negative or NaN, or if `limit` is negative.
    pub fn new(source: S, flatness: f64, limit: i32) -> Result<Self, PathError> {
        let options = FlattenOptions::tolerance(flatness).with_max_depth(limit);
        Self::with_options(source, &options)
    }

    pub fn with_options(source: S, options: &FlattenOptions) -> Result<Self, PathError> {
        options.validate()?;

        log::debug!(
            "flattening with tolerance {} and subdivision limit {}",
            options.tolerance,
            options.max_depth
        );

        let mut flattened = Flattened {
            source,
            square_flatness: options.tolerance * options.tolerance,
            limit: options.max_depth,
            hold: vec![0.0; INITIAL_HOLD_SIZE],
            hold_kind: SegmentKind::MoveTo,
            hold_index: 0,
            hold_end: 0,
            levels: vec![0],
            level_index: 0,
            current: point(0.0, 0.0),
            subpath_start: point(0.0, 0.0),
            done: false,
        };
        flattened.fetch(false);

        Ok(flattened)
    }

    /// The flattening tolerance.
    pub fn flatness(&self) -> f64 {
        self.square_flatness.sqrt()
    }

    /// The maximum subdivision depth.
    pub fn limit(&self) -> i32 {
        self.limit
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    // Makes sure there are at least `want` free slots in front of the window.
    fn ensure_hold_capacity(&mut self, want: usize) {
        if self.hold_index >= want {
            return;
        }

        let old_len = self.hold.len();
        self.hold.resize(old_len + GROW_SIZE, 0.0);
        self.hold
            .copy_within(self.hold_index..old_len, self.hold_index + GROW_SIZE);
        self.hold_index += GROW_SIZE;
        self.hold_end += GROW_SIZE;

        log::trace!("flattening hold buffer grown to {} slots", self.hold.len());
    }

    fn push_level(&mut self, level: i32) {
        self.levels[self.level_index] = level;
        self.level_index += 1;
        if self.level_index == self.levels.len() {
            self.levels.push(level);
        } else {
            self.levels[self.level_index] = level;
        }
    }

    // Moves to the next output segment. When the pending curve data is used up, pulls
    // the next segment from the source, advancing it first if `advance_source` is set.
    fn fetch(&mut self, advance_source: bool) {
        if self.hold_index >= self.hold_end {
            if advance_source {
                self.source.advance();
            }
            if self.source.is_done() {
                self.done = true;
                return;
            }

            let mut coords = [0.0; 6];
            self.hold_kind = match self.source.current_segment(&mut coords) {
                Ok(kind) => kind,
                Err(error) => {
                    log::warn!("segment source failed while not done: {}", error);
                    self.done = true;
                    return;
                }
            };
            self.level_index = 0;
            self.levels[0] = 0;

            match self.hold_kind {
                SegmentKind::MoveTo | SegmentKind::LineTo | SegmentKind::Close => {
                    self.hold[..2].copy_from_slice(&coords[..2]);
                }
                SegmentKind::QuadTo => self.seed(&coords[..4]),
                SegmentKind::CubicTo => self.seed(&coords[..6]),
            }
        }

        match self.hold_kind {
            SegmentKind::MoveTo | SegmentKind::LineTo => {
                self.current = point(self.hold[0], self.hold[1]);
                if self.hold_kind == SegmentKind::MoveTo {
                    self.subpath_start = self.current;
                }
                self.hold_index = 0;
                self.hold_end = 0;
            }
            SegmentKind::Close => {
                self.current = self.subpath_start;
                self.hold_index = 0;
                self.hold_end = 0;
            }
            SegmentKind::QuadTo => self.subdivide_quadratic(),
            SegmentKind::CubicTo => self.subdivide_cubic(),
        }
    }

    // Places the current point followed by the curve's points at the end of the hold
    // buffer.
    fn seed(&mut self, coords: &[f64]) {
        let len = self.hold.len();
        self.hold_index = len - coords.len() - 2;
        self.hold_end = len - 2;

        let start = self.hold_index;
        self.hold[start] = self.current.x;
        self.hold[start + 1] = self.current.y;
        self.hold[start + 2..].copy_from_slice(coords);

        self.current = point(self.hold[len - 2], self.hold[len - 1]);
    }

    fn subdivide_quadratic(&mut self) {
        // Two points are added in front of the window per split.
        const STEP: usize = QuadraticBezierSegment::<f64>::NUM_SCALARS - 2;

        let mut level = self.levels[self.level_index];
        while level < self.limit {
            let curve = QuadraticBezierSegment::read_from(&self.hold[self.hold_index..]);
            if curve.flatness_squared() < self.square_flatness {
                break;
            }

            self.ensure_hold_capacity(STEP);
            let (first, second) = curve.split_in_half();
            let i = self.hold_index;
            first.write_to(&mut self.hold[i - STEP..]);
            second.write_to(&mut self.hold[i..]);
            self.hold_index -= STEP;

            level += 1;
            self.push_level(level);
        }

        self.finish_curve(STEP);
    }

    fn subdivide_cubic(&mut self) {
        const STEP: usize = CubicBezierSegment::<f64>::NUM_SCALARS - 2;

        let mut level = self.levels[self.level_index];
        while level < self.limit {
            let curve = CubicBezierSegment::read_from(&self.hold[self.hold_index..]);
            if curve.flatness_squared() < self.square_flatness {
                break;
            }

            self.ensure_hold_capacity(STEP);
            let (first, second) = curve.split_in_half();
            let i = self.hold_index;
            first.write_to(&mut self.hold[i - STEP..]);
            second.write_to(&mut self.hold[i..]);
            self.hold_index -= STEP;

            level += 1;
            self.push_level(level);
        }

        self.finish_curve(STEP);
    }

    // The leftmost pending curve is flat enough: move the window to its end point,
    // which is the next emitted line-to, and pop its level.
    fn finish_curve(&mut self, step: usize) {
        self.hold_index += step;
        if self.level_index > 0 {
            self.level_index -= 1;
        } else {
            debug_assert!(self.hold_index >= self.hold_end);
        }
    }
}

impl<S: SegmentSource> SegmentSource for Flattened<S> {
    fn winding_rule(&self) -> WindingRule {
        self.source.winding_rule()
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn advance(&mut self) {
        if !self.done {
            self.fetch(true);
        }
    }

    fn current_segment(&self, coords: &mut [f64; 6]) -> Result<SegmentKind, PathError> {
        if self.done {
            return Err(PathError::SequenceExhausted);
        }

        let kind = match self.hold_kind {
            SegmentKind::Close => return Ok(SegmentKind::Close),
            SegmentKind::MoveTo => SegmentKind::MoveTo,
            _ => SegmentKind::LineTo,
        };
        coords[0] = self.hold[self.hold_index];
        coords[1] = self.hold[self.hold_index + 1];

        Ok(kind)
    }
}

#[cfg(test)]
use crate::geom::LineSegment;
#[cfg(test)]
use crate::iterator::SliceSource;
#[cfg(test)]
use crate::shapes::{Arc, ArcClosure, CubicCurve, QuadraticCurve, Rectangle, Shape};
#[cfg(test)]
use crate::Segment;

// Flattens a source holding a single curve and returns the polyline, starting point
// included.
#[cfg(test)]
fn polyline<S: SegmentSource>(source: Flattened<S>) -> Vec<Point> {
    source
        .segments()
        .map(|segment| match segment {
            Segment::MoveTo(p) | Segment::LineTo(p) => p,
            other => panic!("unexpected segment {:?}", other),
        })
        .collect()
}

#[cfg(test)]
fn distance_to_polyline(p: Point, polyline: &[Point]) -> f64 {
    polyline
        .windows(2)
        .map(|w| LineSegment { from: w[0], to: w[1] }.distance_to_point(p))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
fn test_cubic() -> CubicCurve {
    CubicCurve::new(
        point(0.0, 0.0),
        point(20.0, 80.0),
        point(90.0, -40.0),
        point(100.0, 30.0),
    )
}

#[test]
fn negative_flatness_is_an_error() {
    let source = test_cubic().path_segments(None);
    assert_eq!(
        Flattened::new(source, -1.0, 10).err(),
        Some(PathError::NegativeFlatness(-1.0))
    );
    let source = test_cubic().path_segments(None);
    assert_eq!(
        Flattened::new(source, f64::NAN, 10).err(),
        Some(PathError::FlatnessIsNaN)
    );
    let source = test_cubic().path_segments(None);
    assert_eq!(
        Flattened::new(source, 0.1, -1).err(),
        Some(PathError::NegativeLimit(-1))
    );
    assert_eq!(
        FlattenOptions::tolerance(-0.5).validate(),
        Err(PathError::NegativeFlatness(-0.5))
    );
    assert!(FlattenOptions::default().validate().is_ok());
    assert!(FlattenOptions::tolerance(0.0).with_max_depth(0).validate().is_ok());
}

#[test]
fn accessors() {
    let flattened = test_cubic().path_segments(None).flattened(0.25).unwrap();
    assert_eq!(flattened.flatness(), 0.25);
    assert_eq!(flattened.limit(), FlattenOptions::DEFAULT_MAX_DEPTH);

    let options = FlattenOptions::tolerance(0.5).with_max_depth(3);
    let flattened = test_cubic().path_segments(None).flattened_with(&options).unwrap();
    assert_eq!(flattened.flatness(), 0.5);
    assert_eq!(flattened.limit(), 3);
}

#[test]
fn cubic_within_tolerance() {
    let curve = test_cubic();
    let segment = curve.to_segment();

    for &tolerance in &[1.0, 0.1, 0.01, 0.001] {
        let points = polyline(curve.path_segments(None).flattened(tolerance).unwrap());
        assert!(points.len() > 2);
        assert_eq!(points[0], segment.from);
        assert_eq!(*points.last().unwrap(), segment.to);

        for i in 0..=2000 {
            let p = segment.sample(i as f64 / 2000.0);
            let d = distance_to_polyline(p, &points);
            assert!(d <= tolerance + 1e-9, "tolerance {}: {}", tolerance, d);
        }
    }
}

#[test]
fn quadratic_within_tolerance() {
    let curve = QuadraticCurve::new(point(0.0, 0.0), point(50.0, 200.0), point(100.0, -10.0));
    let segment = curve.to_segment();

    for &tolerance in &[2.0, 0.5, 0.05] {
        let points = polyline(curve.path_segments(None).flattened(tolerance).unwrap());
        assert_eq!(points[0], segment.from);
        assert_eq!(*points.last().unwrap(), segment.to);

        for i in 0..=2000 {
            let p = segment.sample(i as f64 / 2000.0);
            assert!(distance_to_polyline(p, &points) <= tolerance + 1e-9);
        }
    }
}

#[test]
fn vertices_are_on_the_curve() {
    // With a limit of 10, vertices are at parameters multiple of 1/1024.
    let curve = test_cubic();
    let segment = curve.to_segment();
    let points = polyline(curve.path_segments(None).flattened(0.05).unwrap());

    for p in &points {
        let closest = (0..=1024)
            .map(|i| (segment.sample(i as f64 / 1024.0) - *p).length())
            .fold(f64::INFINITY, f64::min);
        assert!(closest < 1e-9);
    }
}

#[test]
fn zero_tolerance_reaches_the_limit() {
    for limit in 0..8 {
        let source = test_cubic().path_segments(None);
        let points = polyline(Flattened::new(source, 0.0, limit).unwrap());
        assert_eq!(points.len() - 1, 1 << limit);

        let quad = QuadraticCurve::new(point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0));
        let points = polyline(Flattened::new(quad.path_segments(None), 0.0, limit).unwrap());
        assert_eq!(points.len() - 1, 1 << limit);
    }
}

#[test]
fn symmetric_cubic_gives_powers_of_two() {
    let cubic = CubicCurve::new(
        point(0.0, 0.0),
        point(0.0, 100.0),
        point(100.0, 100.0),
        point(100.0, 0.0),
    );

    for &tolerance in &[5.0, 1.0, 0.3, 0.01] {
        for limit in 0..12 {
            let n = polyline(Flattened::new(cubic.path_segments(None), tolerance, limit).unwrap())
                .len()
                - 1;
            assert!(n.is_power_of_two(), "tolerance {} limit {}: {}", tolerance, limit, n);
            assert!(n <= 1 << limit);
        }
    }
}

#[test]
fn segment_count_is_bounded_by_the_limit() {
    for limit in 0..6 {
        let n = polyline(Flattened::new(test_cubic().path_segments(None), 1e-6, limit).unwrap())
            .len()
            - 1;
        assert!(n <= 1 << limit);
    }
}

#[test]
fn deep_subdivision_grows_the_hold_buffer() {
    let curve = test_cubic();
    let segment = curve.to_segment();
    let flattened = Flattened::new(curve.path_segments(None), 0.0, 16).unwrap();
    let points = polyline(flattened);

    assert_eq!(points.len() - 1, 1 << 16);
    assert_eq!(*points.last().unwrap(), segment.to);
    for (i, p) in points.iter().enumerate().step_by(997) {
        let expected = segment.sample(i as f64 / 65536.0);
        assert!((*p - expected).length() < 1e-9);
    }
}

#[test]
fn flat_sources_are_unchanged() {
    let segments = [
        Segment::MoveTo(point(0.0, 0.0)),
        Segment::LineTo(point(10.0, 0.0)),
        Segment::LineTo(point(10.0, 10.0)),
        Segment::Close,
        Segment::MoveTo(point(20.0, 20.0)),
        Segment::LineTo(point(30.0, 25.0)),
    ];

    let flattened: Vec<Segment> = SliceSource::new(&segments)
        .flattened(0.1)
        .unwrap()
        .segments()
        .collect();
    assert_eq!(&flattened[..], &segments[..]);

    let rect = Rectangle::new(1.0, 2.0, 3.0, 4.0);
    let exact: Vec<Segment> = rect.path_segments(None).segments().collect();
    let flattened: Vec<Segment> = rect.flattened(None, 0.0).unwrap().segments().collect();
    assert_eq!(exact, flattened);
}

#[test]
fn winding_rule_is_forwarded() {
    let segments = [Segment::MoveTo(point(0.0, 0.0))];
    let mut source = SliceSource::new(&segments);
    source.winding_rule = WindingRule::EvenOdd;
    let flattened = source.flattened(0.1).unwrap();
    assert_eq!(flattened.winding_rule(), WindingRule::EvenOdd);

    let flattened = test_cubic().flattened(None, 0.1).unwrap();
    assert_eq!(flattened.winding_rule(), WindingRule::NonZero);
}

#[test]
fn curves_start_at_the_current_point() {
    // The implicit start of a curve is the end of the previous segment, or the
    // subpath start after a close.
    let segments = [
        Segment::MoveTo(point(0.0, 0.0)),
        Segment::LineTo(point(10.0, 0.0)),
        Segment::Close,
        Segment::QuadTo(point(5.0, 5.0), point(10.0, 0.0)),
    ];

    let flattened: Vec<Segment> = SliceSource::new(&segments)
        .flattened_with(&FlattenOptions::tolerance(0.0).with_max_depth(1))
        .unwrap()
        .segments()
        .collect();

    assert_eq!(
        flattened,
        vec![
            Segment::MoveTo(point(0.0, 0.0)),
            Segment::LineTo(point(10.0, 0.0)),
            Segment::Close,
            Segment::LineTo(point(5.0, 2.5)),
            Segment::LineTo(point(10.0, 0.0)),
        ]
    );
}

#[test]
fn exhausted_flattening() {
    let mut flattened = test_cubic().flattened(None, 10.0).unwrap();
    while !flattened.is_done() {
        flattened.advance();
    }
    let mut coords = [0.0; 6];
    assert_eq!(
        flattened.current_segment(&mut coords),
        Err(PathError::SequenceExhausted)
    );
    flattened.advance();
    assert!(flattened.is_done());

    let empty = Rectangle::new(0.0, 0.0, -1.0, 1.0).flattened(None, 0.1).unwrap();
    assert!(empty.is_done());
}

#[test]
fn pie_arc_round_trip() {
    let arc = Arc::new(-50.0, -20.0, 100.0, 40.0, 30.0, 360.0, ArcClosure::Pie);
    let center = arc.center();
    let start = arc.start_point();

    let segments: Vec<Segment> = arc.flattened(None, 1e-4).unwrap().segments().collect();
    assert_eq!(segments.last(), Some(&Segment::Close));

    let points: Vec<Point> = segments.iter().filter_map(|s| s.to()).collect();
    let n = points.len();
    assert!(n > 100);
    assert!((points[0] - start).length() < 1e-9);
    // The arc comes back to its start, then the pie goes to the center before closing.
    assert!((points[n - 2] - start).length() < 1e-9);
    assert!((points[n - 1] - center).length() < 1e-9);

    // Area weighted centroid of the closed polygon.
    let mut area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        area += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    area *= 0.5;
    cx /= 6.0 * area;
    cy /= 6.0 * area;

    assert!((area.abs() - std::f64::consts::PI * 50.0 * 20.0).abs() < 2.0);
    assert!((cx - center.x).abs() < 1e-6, "{}", cx);
    assert!((cy - center.y).abs() < 1e-6, "{}", cy);
}
