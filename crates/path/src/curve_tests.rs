use crate::geom::LineSegment;
use crate::math::{point, vector, Point};
use crate::{Curve, FlattenOptions, PathOp, Verb};

use std::ops::Range;

fn sample_ops() -> Vec<PathOp> {
    vec![
        PathOp::line(point(0.0, 0.0), point(100.0, 50.0)),
        PathOp::close(point(100.0, 50.0), point(0.0, 0.0)),
        PathOp::cubic(
            point(0.0, 0.0),
            point(10.0, 100.0),
            point(90.0, -50.0),
            point(100.0, 20.0),
        ),
        PathOp::conic(
            point(100.0, 0.0),
            point(100.0, 100.0),
            std::f32::consts::FRAC_1_SQRT_2,
            point(0.0, 100.0),
        ),
        PathOp::conic(
            point(-20.0, 5.0),
            point(40.0, 300.0),
            4.0,
            point(120.0, 10.0),
        ),
    ]
}

fn assert_approx_eq(a: Point, b: Point, epsilon: f32) {
    if (a.x - b.x).abs() > epsilon || (a.y - b.y).abs() > epsilon {
        panic!("{:?} != {:?}", a, b);
    }
}

fn flattened(curve: &Curve, tolerance: f32) -> Vec<(LineSegment<f32>, Range<f32>)> {
    let mut segments = Vec::new();
    assert!(curve.decompose(tolerance, &mut |line, t| {
        segments.push((*line, t));
        true
    }));

    segments
}

#[test]
fn eval_end_points() {
    for op in &sample_ops() {
        let curve = Curve::from_op(op);
        assert_eq!(curve.point(0.0), op.from());
        assert_approx_eq(curve.point(1.0), op.to(), 1e-3);

        let (p, t) = curve.eval(0.5);
        assert_eq!(p, curve.point(0.5));
        assert_eq!(t, curve.tangent(0.5));
        assert!((t.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn line_eval() {
    let curve = Curve::from_op(&PathOp::line(point(0.0, 0.0), point(30.0, 40.0)));

    assert_eq!(curve.eval(0.5), (point(15.0, 20.0), vector(0.6, 0.8)));

    let empty = Curve::from_op(&PathOp::line(point(7.0, 7.0), point(7.0, 7.0)));
    assert_eq!(empty.tangent(0.5), vector(0.0, 0.0));
}

#[test]
fn split_is_continuous() {
    for op in &sample_ops() {
        let curve = Curve::from_op(op);
        for &t in &[0.0, 0.1, 0.5, 0.77, 1.0] {
            let (a, b) = curve.split(t);
            assert_eq!(a.from(), curve.from());
            assert_eq!(a.to(), b.from());
            assert_eq!(b.to(), curve.to());
            assert_approx_eq(a.to(), curve.point(t), 1e-3);
            assert_eq!(a.verb(), b.verb());

            assert_eq!(curve.before_split(t), a);
            assert_eq!(curve.after_split(t), b);
        }
    }
}

#[test]
fn split_close_produces_lines() {
    let close = Curve::from_op(&PathOp::close(point(10.0, 0.0), point(0.0, 0.0)));
    assert_eq!(close.verb(), Verb::Close);

    let (a, b) = close.split(0.5);
    assert_eq!(a.verb(), Verb::Line);
    assert_eq!(b.verb(), Verb::Line);
    assert_eq!(a.to(), point(5.0, 0.0));
    assert_eq!(close.split_range(0.2..0.4).verb(), Verb::Line);

    assert_eq!(close.flip().verb(), Verb::Close);
}

#[test]
fn split_range_end_points() {
    for op in &sample_ops() {
        let curve = Curve::from_op(op);
        let trimmed = curve.split_range(0.25..0.6);
        assert_ne!(trimmed.verb(), Verb::Close);
        assert_approx_eq(trimmed.from(), curve.point(0.25), 1e-3);
        assert_approx_eq(trimmed.to(), curve.point(0.6), 1e-3);

        // Normalizing the weights of a trimmed conic changes its parameterization.
        if op.verb() != Verb::Conic {
            assert_approx_eq(trimmed.point(0.5), curve.point(0.425), 1e-2);
        }
    }
}

#[test]
fn decompose_is_contiguous() {
    for op in &sample_ops() {
        let curve = Curve::from_op(op);
        for &tolerance in &[0.01, 0.1, 0.5, 5.0] {
            let segments = flattened(&curve, tolerance);

            assert!(!segments.is_empty());
            assert!(segments.len() <= 1024);
            assert_eq!(segments[0].0.from, curve.from());
            assert_eq!(segments[0].1.start, 0.0);

            let last = &segments[segments.len() - 1];
            assert_eq!(last.0.to, curve.to());
            assert_eq!(last.1.end, 1.0);

            for pair in segments.windows(2) {
                assert_eq!(pair[0].0.to, pair[1].0.from);
                assert_eq!(pair[0].1.end, pair[1].1.start);
                assert!(pair[0].1.start < pair[0].1.end);
            }
        }
    }
}

#[test]
fn decompose_line() {
    let ops = [
        PathOp::line(point(0.0, 0.0), point(1000.0, -3000.0)),
        PathOp::close(point(5.0, 5.0), point(5.0, 5.0)),
    ];

    for op in &ops {
        let curve = Curve::from_op(op);
        for &tolerance in &[0.0, 0.5, 100.0] {
            let segments = flattened(&curve, tolerance);
            assert_eq!(
                segments,
                [(
                    LineSegment {
                        from: op.from(),
                        to: op.to()
                    },
                    0.0..1.0
                )]
            );
        }
    }
}

#[test]
fn decompose_stops_early() {
    for op in &sample_ops() {
        let curve = Curve::from_op(op);

        let mut count = 0;
        let completed = curve.decompose(0.01, &mut |_, _| {
            count += 1;
            false
        });

        assert!(!completed);
        assert_eq!(count, 1);
    }
}

#[test]
fn decompose_degenerate_curves() {
    let p = point(12.0, -3.0);
    let ops = [
        PathOp::cubic(p, p, p, p),
        PathOp::conic(p, p, 1.0, p),
        PathOp::conic(p, p, 1e-20, p),
        PathOp::conic(p, point(1e6, 1e6), 1e6, p),
        PathOp::cubic(point(0.0, 0.0), point(100.0, 100.0), point(0.0, 100.0), point(100.0, 0.0)),
    ];

    for op in &ops {
        let curve = Curve::from_op(op);
        for &tolerance in &[0.0, 0.5] {
            let segments = flattened(&curve, tolerance);
            assert!(!segments.is_empty());
            assert!(segments.len() <= 1024);
            assert_eq!(segments[segments.len() - 1].1.end, 1.0);
        }
    }
}

#[test]
fn for_each_flattened_uses_the_tolerance() {
    let curve = Curve::from_op(&sample_ops()[3]);

    let mut coarse = 0;
    curve.for_each_flattened(&FlattenOptions::default(), &mut |_, _| {
        coarse += 1;
        true
    });

    let mut fine = 0;
    curve.for_each_flattened(&FlattenOptions::tolerance(0.01), &mut |_, _| {
        fine += 1;
        true
    });

    assert_eq!(coarse, flattened(&curve, FlattenOptions::DEFAULT_TOLERANCE).len());
    assert!(fine > coarse);
}

#[test]
fn quarter_circle_length() {
    let curve = Curve::from_op(&sample_ops()[3]);

    let length = curve.approximate_length(0.01);
    let expected = 50.0 * std::f32::consts::PI;
    assert!((length - expected).abs() < 0.5, "{}", length);

    let line = Curve::from_op(&PathOp::line(point(0.0, 0.0), point(3.0, 4.0)));
    assert_eq!(line.approximate_length(0.5), 5.0);
}

#[test]
fn op_round_trip() {
    let conic_with_payload = PathOp::new(
        Verb::Conic,
        &[
            point(1.0, 2.0),
            point(3.0, 4.0),
            point(0.75, 12.5),
            point(5.0, 6.0),
        ],
    );

    let mut ops = sample_ops();
    ops.push(conic_with_payload);

    for op in &ops {
        let curve = Curve::from_op(op);
        let encoded = curve.to_op();

        assert_eq!(encoded.verb(), op.verb());
        assert_eq!(encoded.points().len(), op.points().len());
        for (a, b) in encoded.points().iter().zip(op.points()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }

        assert_eq!(Curve::from_op(&encoded), curve);
        let converted: Curve = op.into();
        assert_eq!(converted, curve);
        let converted: PathOp = (&curve).into();
        assert_eq!(converted, encoded);
    }
}

#[test]
fn split_curves_round_trip() {
    for op in &sample_ops() {
        let (a, b) = Curve::from_op(op).split(0.3);
        assert_eq!(Curve::from_op(&a.to_op()), a);
        assert_eq!(Curve::from_op(&b.to_op()), b);
    }
}

#[test]
#[should_panic]
fn move_is_not_a_curve() {
    Curve::from_op(&PathOp::move_to(point(1.0, 2.0)));
}

#[test]
fn segment_trait() {
    use crate::traits::Segment;

    fn length<S: Segment<Scalar = f32>>(s: &S) -> f32 {
        s.approximate_length(0.1)
    }

    let curve = Curve::from_op(&sample_ops()[2]);
    assert_eq!(length(&curve), curve.approximate_length(0.1));
    assert_eq!(Segment::sample(&curve, 0.3), curve.point(0.3));
    assert_eq!(Segment::flip(&curve).to(), curve.from());
}

// Splitting a conic in three pieces, trimming the middle one, must preserve
// the total length.
#[test]
fn conic_split_lengths_add_up() {
    let op = PathOp::new(
        Verb::Conic,
        &[
            point(-1856.131591796875, 46.217609405517578125),
            point(-1555.9866943359375, 966.0810546875),
            point(98.94945526123046875, 0.0),
            point(-1471.33154296875, 526.701171875),
        ],
    );
    let start = 0.02222645096480846405029296875;
    let end = 0.982032716274261474609375;
    let tolerance = 0.5;

    let curve = Curve::from_op(&op);
    let before = curve.split(start).0;
    let middle = curve.split_range(start..end);
    let after = curve.split(end).1;

    let length = curve.approximate_length(tolerance);
    let pieces = before.approximate_length(tolerance)
        + middle.approximate_length(tolerance)
        + after.approximate_length(tolerance);

    assert!(
        (length - pieces).abs() < 1.0 / 32.0,
        "{} != {}",
        length,
        pieces
    );
}
