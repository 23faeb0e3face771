//! Curve sets shared by the benchmarks and the integration tests.

use kurve::geom::{ConicSegment, CubicBezierSegment};
use kurve::math::{point, Point};
use kurve::path::{Curve, PathOp};

use std::f32::consts::PI;

pub static TOLERANCES: [f32; 6] = [0.01, 0.05, 0.1, 0.25, 0.5, 1.0];

/// A small xorshift generator, so that the curve sets are the same on every run.
struct Rng(u32);

impl Rng {
    fn next(&mut self) -> f32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        (self.0 % 10_000) as f32 / 10_000.0
    }

    fn point(&mut self, scale: f32) -> Point {
        point(self.next() * scale, self.next() * scale)
    }
}

pub fn generate_cubic_curves() -> Vec<CubicBezierSegment<f32>> {
    let mut rng = Rng(0x2545_f491);
    (0..500)
        .map(|_| CubicBezierSegment {
            from: rng.point(1000.0),
            ctrl1: rng.point(1000.0),
            ctrl2: rng.point(1000.0),
            to: rng.point(1000.0),
        })
        .collect()
}

pub fn generate_conic_curves() -> Vec<ConicSegment<f32>> {
    let mut rng = Rng(0x9e37_79b9);
    (0..500)
        .map(|_| ConicSegment {
            from: rng.point(1000.0),
            ctrl: rng.point(1000.0),
            weight: 0.05 + rng.next() * 4.0,
            to: rng.point(1000.0),
        })
        .collect()
}

/// A circle of the given radius made of four conic quarters.
pub fn circle_ops(center: Point, radius: f32) -> Vec<PathOp> {
    let w = std::f32::consts::FRAC_1_SQRT_2;
    let at = |angle: f32| center + kurve::math::vector(angle.cos(), angle.sin()) * radius;
    let corner = |angle: f32| center + kurve::math::vector(angle.cos(), angle.sin()) * radius * 2.0f32.sqrt();

    (0..4)
        .map(|i| {
            let a0 = i as f32 * PI * 0.5;
            let a1 = (i + 1) as f32 * PI * 0.5;
            PathOp::conic(at(a0), corner(a0 + PI * 0.25), w, at(a1))
        })
        .collect()
}

/// A mix of all curve kinds.
pub fn generate_curves() -> Vec<Curve> {
    let mut curves: Vec<Curve> = Vec::new();
    curves.extend(generate_cubic_curves().into_iter().map(Curve::cubic));
    curves.extend(generate_conic_curves().into_iter().map(Curve::conic));
    curves.extend(circle_ops(point(500.0, 500.0), 300.0).iter().map(Curve::from_op));

    curves
}

#[test]
fn circle_is_closed() {
    let ops = circle_ops(point(10.0, 20.0), 5.0);
    assert_eq!(ops.len(), 4);
    for pair in ops.windows(2) {
        assert_eq!(pair[0].to(), pair[1].from());
    }

    let first = ops[0].from();
    let last = ops[3].to();
    assert!((first - last).length() < 1e-4);
}

#[test]
fn circle_length() {
    let length: f32 = circle_ops(point(0.0, 0.0), 100.0)
        .iter()
        .map(|op| Curve::from_op(op).approximate_length(0.01))
        .sum();

    assert!((length - 200.0 * PI).abs() < 1.0, "{}", length);
}

#[test]
fn flattened_curves_stay_within_tolerance() {
    // The chord of every emitted segment is checked against the curve in its
    // middle, which is where a flat enough piece deviates the most.
    for curve in generate_curves().iter().step_by(20) {
        for &tolerance in &[0.5, 1.0] {
            curve.decompose(tolerance, &mut |line, t| {
                let range = t.end - t.start;
                if range > 1.0 / 1024.0 {
                    let mid = curve.point((t.start + t.end) * 0.5);
                    let chord_mid = line.sample(0.5);
                    assert!(
                        (mid - chord_mid).length() < tolerance * 3.0,
                        "{:?} {:?} {:?}",
                        curve,
                        t,
                        mid
                    );
                }
                true
            });
        }
    }
}
