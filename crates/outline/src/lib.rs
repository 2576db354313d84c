#![deny(bare_trait_objects)]

//! Shape outlines as sequences of drawing commands, and their approximation with line
//! segments.
//!
//! # Crates
//!
//! This meta-crate (`outline`) reexports the following sub-crates for convenience:
//!
//! * **outline_path** - Shapes, the segment source protocol and adaptive flattening.
//! * **outline_geom** - Bézier curve maths and the arc approximation constants.
//!
//! Each `outline_<name>` crate is reexported as a `<name>` module in `outline`.
//!
//! # Feature flags
//!
//! serialization using serde can be enabled with the `serialization` feature flag
//! (disabled by default).
//!
//! # What is the flatness?
//!
//! Consumers that only understand straight lines need curves to be approximated with
//! polylines. The flatness (or tolerance) is the maximum distance allowed between a
//! curve and its approximation. Smaller values produce more line segments.
//!
//! # Examples
//!
//! ```
//! use outline::math::{point, Transform};
//! use outline::path::shapes::{Arc, ArcClosure, RoundedRectangle, Shape};
//! use outline::path::{FlattenOptions, Segment, SegmentSource};
//!
//! // A quarter of a pie, rotated by 45 degrees.
//! let pie = Arc::new(0.0, 0.0, 100.0, 100.0, 0.0, 90.0, ArcClosure::Pie);
//! let transform = Transform::rotation(outline::math::Angle::degrees(45.0));
//!
//! let mut num_points = 0;
//! for segment in pie.flattened(Some(&transform), 0.1).unwrap().segments() {
//!     if let Segment::MoveTo(_) | Segment::LineTo(_) = segment {
//!         num_points += 1;
//!     }
//! }
//! assert!(num_points > 3);
//!
//! // Custom flattening options on any segment source.
//! let rect = RoundedRectangle::new(0.0, 0.0, 200.0, 100.0, 20.0, 20.0);
//! let options = FlattenOptions::tolerance(0.05).with_max_depth(6);
//! let flattened = rect.path_segments(None).flattened_with(&options).unwrap();
//! assert!(flattened.segments().all(|s| !s.kind().is_curve()));
//! ```

pub extern crate outline_path;

pub use outline_path as path;
pub use path::geom;

pub use path::math;
