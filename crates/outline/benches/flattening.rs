extern crate outline;
#[macro_use]
extern crate criterion;

use criterion::Criterion;
use outline::math::{point, Angle, Transform};
use outline::path::shapes::{Arc, ArcClosure, CubicCurve, Ellipse, RoundedRectangle, Shape};
use outline::path::{FlattenOptions, SegmentSource};

const N: usize = 100;

fn drain<S: SegmentSource>(mut source: S) -> usize {
    let mut coords = [0.0; 6];
    let mut count = 0;
    while !source.is_done() {
        if source.current_segment(&mut coords).is_ok() {
            count += 1;
        }
        source.advance();
    }

    count
}

fn flatten_ellipses(bench: &mut Criterion) {
    let transform = Transform::rotation(Angle::degrees(30.0));
    for &tolerance in &[0.01, 0.1, 1.0] {
        let name = format!("flatten ellipses (tolerance {})", tolerance);
        bench.bench_function(&name, |b| {
            b.iter(|| {
                let mut sum = 0;
                for i in 0..N {
                    let r = 10.0 + i as f64;
                    let ellipse = Ellipse::new(-r, -r * 0.5, r * 2.0, r);
                    sum += drain(ellipse.flattened(Some(&transform), tolerance).unwrap());
                }
                criterion::black_box(sum)
            })
        });
    }
}

fn flatten_arcs(bench: &mut Criterion) {
    bench.bench_function("flatten pie arcs", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in 0..N {
                let extent = 10.0 + i as f64 * 3.5;
                let arc = Arc::new(0.0, 0.0, 200.0, 120.0, 15.0, extent, ArcClosure::Pie);
                sum += drain(arc.flattened(None, 0.05).unwrap());
            }
            criterion::black_box(sum)
        })
    });
}

fn flatten_rounded_rectangles(bench: &mut Criterion) {
    bench.bench_function("flatten rounded rectangles", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in 0..N {
                let s = 20.0 + i as f64;
                let rect = RoundedRectangle::new(0.0, 0.0, s * 2.0, s, s * 0.5, s * 0.25);
                sum += drain(rect.flattened(None, 0.1).unwrap());
            }
            criterion::black_box(sum)
        })
    });
}

fn flatten_deep_cubic(bench: &mut Criterion) {
    let curve = CubicCurve::new(
        point(0.0, 0.0),
        point(500.0, 1000.0),
        point(-500.0, 1000.0),
        point(0.0, 0.0),
    );
    let options = FlattenOptions::tolerance(0.0).with_max_depth(14);
    bench.bench_function("flatten cubic at depth 14", |b| {
        b.iter(|| {
            let flattened = curve.path_segments(None).flattened_with(&options).unwrap();
            criterion::black_box(drain(flattened))
        })
    });
}

fn exact_outlines(bench: &mut Criterion) {
    bench.bench_function("exact ellipse outlines", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in 0..N {
                let ellipse = Ellipse::new(0.0, 0.0, i as f64, 10.0);
                sum += drain(ellipse.path_segments(None));
            }
            criterion::black_box(sum)
        })
    });
}

criterion_group!(
    flattening,
    flatten_ellipses,
    flatten_arcs,
    flatten_rounded_rectangles,
    flatten_deep_cubic,
    exact_outlines
);
criterion_main!(flattening);
