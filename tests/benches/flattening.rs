extern crate kurve;
extern crate kurve_tests;
#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use kurve::geom::{ConicSegment, CubicBezierSegment};
use kurve::path::Curve;
use kurve_tests::*;

fn bench_cubic(curves: &[CubicBezierSegment<f32>], tolerance: f32) {
    for curve in curves {
        curve.decompose(tolerance, &mut |seg, _| {
            std::hint::black_box(seg);
            true
        });
    }
}

fn bench_conic(curves: &[ConicSegment<f32>], tolerance: f32) {
    for curve in curves {
        curve.decompose(tolerance, &mut |seg, _| {
            std::hint::black_box(seg);
            true
        });
    }
}

fn bench_curve(curves: &[Curve], tolerance: f32) {
    for curve in curves {
        curve.decompose(tolerance, &mut |seg, _| {
            std::hint::black_box(seg);
            true
        });
    }
}

fn cubic_flatten(c: &mut Criterion) {
    let curves = generate_cubic_curves();
    let mut g = c.benchmark_group("cubic");
    for tol in &TOLERANCES {
        g.bench_with_input(BenchmarkId::new("recursive", tol), tol, |b, tol| { b.iter(|| bench_cubic(&curves, *tol)) });
    }
}

fn conic_flatten(c: &mut Criterion) {
    let curves = generate_conic_curves();
    let mut g = c.benchmark_group("conic");
    for tol in &TOLERANCES {
        g.bench_with_input(BenchmarkId::new("recursive", tol), tol, |b, tol| { b.iter(|| bench_conic(&curves, *tol)) });
    }
}

fn curve_flatten(c: &mut Criterion) {
    let curves = generate_curves();
    let mut g = c.benchmark_group("curve");
    for tol in &TOLERANCES {
        g.bench_with_input(BenchmarkId::new("decompose", tol), tol, |b, tol| { b.iter(|| bench_curve(&curves, *tol)) });
    }
}

fn curve_eval(c: &mut Criterion) {
    let curves = generate_curves();
    c.bench_function("curve eval", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for curve in &curves {
                for i in 0..16 {
                    let (p, t) = curve.eval(i as f32 / 15.0);
                    sum += p.x + t.y;
                }
            }
            std::hint::black_box(sum);
        })
    });
}

fn curve_split(c: &mut Criterion) {
    let curves = generate_curves();
    c.bench_function("curve split range", |b| {
        b.iter(|| {
            for curve in &curves {
                std::hint::black_box(curve.split_range(0.2..0.7));
            }
        })
    });
}

criterion_group!(flatten, cubic_flatten, conic_flatten, curve_flatten);
criterion_group!(curves, curve_eval, curve_split);

criterion_main!(flatten, curves);
