//! Conics, also known as rational quadratic bézier curves.
//!
//! A conic is a quadratic bézier curve where the control point has a weight:
//!
//! ```text
//!        (1 - t)² * from + 2 * w * t * (1 - t) * ctrl + t² * to
//! P(t) = ------------------------------------------------------
//!               (1 - t)² + 2 * w * t * (1 - t) + t²
//! ```
//!
//! A weight of `1` gives an ordinary quadratic bézier curve (a parabola), weights
//! between `0` and `1` give elliptic arcs and weights above `1` give hyperbolic arcs.
//! In particular a quarter of a circle is exactly represented by a conic with a
//! weight of `√2 / 2`.
//!
//! Weights are expected to be finite and strictly positive. This is not checked.
//!
//! # Splitting
//!
//! Conics are split by lifting their control points into homogeneous coordinates
//! `(x * w, y * w, w)`, where the curve is an ordinary quadratic bézier curve,
//! subdividing there, projecting back and normalizing the weights so that the
//! end points have a weight of `1`.
//!
//! The normalization changes how the parameter of the sub-curves maps to the
//! parameter of the original curve, so splitting twice does not compose like
//! trimming: `c.after_split(t0).before_split((t1 - t0) / (1 - t0))` does generally
//! not end at `c.sample(t1)`. Use [`ConicSegment::split_range`] to extract the
//! part of the curve between two parameters.

use crate::flatten::{flatten_recursive, Subdivide};
use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::utils::{normalized_or_zero, split_homogeneous};
use crate::{point, HomogeneousPoint, LineSegment, Point, Vector};

use core::ops::Range;

/// A rational quadratic bézier segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ConicSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub weight: S,
    pub to: Point<S>,
}

/// A conic expressed as the ratio of two quadratic polynomials.
///
/// ```text
/// P(t) = (n0 * t² + n1 * t + n2) / (d0 * t² + d1 * t + d2)
/// ```
///
/// The denominator is the same for both axes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ConicCoefficients<S> {
    pub numerator: [Vector<S>; 3],
    pub denominator: [S; 3],
}

impl<S: Scalar> ConicCoefficients<S> {
    /// Evaluates the numerator and the denominator at t, as a homogeneous point.
    #[inline]
    pub fn homogeneous_sample(&self, t: S) -> HomogeneousPoint<S> {
        let n = &self.numerator;
        let d = &self.denominator;

        HomogeneousPoint::new(
            (n[0].x * t + n[1].x) * t + n[2].x,
            (n[0].y * t + n[1].y) * t + n[2].y,
            (d[0] * t + d[1]) * t + d[2],
        )
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        project(self.homogeneous_sample(t))
    }
}

#[inline]
fn project<S: Scalar>(p: HomogeneousPoint<S>) -> Point<S> {
    point(p.x / p.z, p.y / p.z)
}

impl<S: Scalar> ConicSegment<S> {
    /// Computes the rational polynomial form of the curve.
    pub fn coefficients(&self) -> ConicCoefficients<S> {
        let w = self.weight;
        let p0 = self.from.to_vector();
        let pw = self.ctrl.to_vector() * w;
        let p3 = self.to.to_vector();
        let d1 = S::TWO * (w - S::ONE);

        ConicCoefficients {
            numerator: [p3 - pw * S::TWO + p0, (pw - p0) * S::TWO, p0],
            denominator: [-d1, d1, S::ONE],
        }
    }

    /// The control points of the curve in homogeneous coordinates.
    pub fn homogeneous_points(&self) -> [HomogeneousPoint<S>; 3] {
        let w = self.weight;
        [
            HomogeneousPoint::new(self.from.x, self.from.y, S::ONE),
            HomogeneousPoint::new(self.ctrl.x * w, self.ctrl.y * w, w),
            HomogeneousPoint::new(self.to.x, self.to.y, S::ONE),
        ]
    }

    /// Builds a conic from homogeneous control points, normalizing the weights of
    /// the end points to `1`.
    ///
    /// Weights `w0, w1, w2` and `c * w0, c * w1, c * w2` describe the same curve, and so
    /// do all weights with the same `w1² / (w0 * w2)` ratio, which gives the weight of
    /// the control point once both end points have a weight of `1`.
    pub fn from_homogeneous(points: &[HomogeneousPoint<S>; 3]) -> Self {
        ConicSegment {
            from: project(points[0]),
            ctrl: project(points[1]),
            weight: points[1].z / (points[0].z * points[2].z).sqrt(),
            to: project(points[2]),
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        self.coefficients().sample(t)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Sample the normalized direction of the curve at t (expecting t between 0 and 1).
    pub fn tangent(&self, t: S) -> Vector<S> {
        let w = self.weight;

        // The direction vanishes at an end point that coincides with the control point.
        // Use the baseline instead.
        if (t <= S::ZERO && self.from == self.ctrl) || (t >= S::ONE && self.ctrl == self.to) {
            return normalized_or_zero(self.to - self.from);
        }

        let d1 = self.ctrl - self.from;
        let d3 = self.to - self.from;
        let q0 = d3 * (w - S::ONE);
        let q1 = d3 - d1 * (S::TWO * w);
        let q2 = d1 * w;

        normalized_or_zero((q0 * t + q1) * t + q2)
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (ConicSegment<S>, ConicSegment<S>) {
        let (left, right) = split_homogeneous(&self.homogeneous_points(), t);

        (
            ConicSegment::from_homogeneous(&left),
            ConicSegment::from_homogeneous(&right),
        )
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: S) -> ConicSegment<S> {
        let (left, _) = split_homogeneous(&self.homogeneous_points(), t);

        ConicSegment::from_homogeneous(&left)
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: S) -> ConicSegment<S> {
        let (_, right) = split_homogeneous(&self.homogeneous_points(), t);

        ConicSegment::from_homogeneous(&right)
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// The sub-curve starts at `self.sample(t_range.start)` and ends at
    /// `self.sample(t_range.end)`.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        self.split_range_with(&self.coefficients(), t_range)
    }

    /// Same as `split_range` using precomputed coefficients.
    pub fn split_range_with(&self, coefficients: &ConicCoefficients<S>, t_range: Range<S>) -> Self {
        let (t0, t1) = (t_range.start, t_range.end);
        if t0 <= S::ZERO {
            return self.before_split(t1);
        }
        if t1 >= S::ONE {
            return self.after_split(t0);
        }

        // The homogeneous curve is a polynomial quadratic: its control point over the
        // sub-range follows from the values at both ends and in the middle.
        let start = coefficients.homogeneous_sample(t0);
        let mid = coefficients.homogeneous_sample((t0 + t1) * S::HALF);
        let end = coefficients.homogeneous_sample(t1);
        let ctrl = HomogeneousPoint::new(
            S::TWO * mid.x - (start.x + end.x) * S::HALF,
            S::TWO * mid.y - (start.y + end.y) * S::HALF,
            S::TWO * mid.z - (start.z + end.z) * S::HALF,
        );

        ConicSegment::from_homogeneous(&[start, ctrl, end])
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        ConicSegment {
            from: self.to,
            ctrl: self.ctrl,
            weight: self.weight,
            to: self.from,
        }
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Approximates the curve with a sequence of line segments.
    ///
    /// Unlike cubic bézier curves, conics are flattened by sampling points on the
    /// curve: a piece is flat when the point in the middle of its parameter range
    /// is within `tolerance` of the middle of its chord on both axes.
    ///
    /// See the [flatten](../flatten/index.html) module.
    pub fn decompose<F>(&self, tolerance: S, callback: &mut F) -> bool
    where
        F: ?Sized + FnMut(&LineSegment<S>, Range<S>) -> bool,
    {
        self.decompose_with(&self.coefficients(), tolerance, callback)
    }

    /// Same as `decompose` using precomputed coefficients.
    pub fn decompose_with<F>(
        &self,
        coefficients: &ConicCoefficients<S>,
        tolerance: S,
        callback: &mut F,
    ) -> bool
    where
        F: ?Sized + FnMut(&LineSegment<S>, Range<S>) -> bool,
    {
        let piece = ConicPiece {
            coefficients,
            from: self.from,
            mid: coefficients.sample(S::HALF),
            to: self.to,
        };

        flatten_recursive(&piece, S::ZERO..S::ONE, tolerance, callback)
    }
}

/// A sub-range of a conic being flattened, with its end points and the point in
/// the middle of its parameter range evaluated on the curve.
struct ConicPiece<'l, S> {
    coefficients: &'l ConicCoefficients<S>,
    from: Point<S>,
    mid: Point<S>,
    to: Point<S>,
}

impl<'l, S: Scalar> Subdivide<S> for ConicPiece<'l, S> {
    fn is_flat(&self, tolerance: S) -> bool {
        ((self.from.x + self.to.x) * S::HALF - self.mid.x).abs() <= tolerance
            && ((self.from.y + self.to.y) * S::HALF - self.mid.y).abs() <= tolerance
    }

    fn subdivide(&self, range: &Range<S>) -> (Self, Self) {
        let mid_t = (range.start + range.end) * S::HALF;

        (
            ConicPiece {
                coefficients: self.coefficients,
                from: self.from,
                mid: self.coefficients.sample((range.start + mid_t) * S::HALF),
                to: self.mid,
            },
            ConicPiece {
                coefficients: self.coefficients,
                from: self.mid,
                mid: self.coefficients.sample((mid_t + range.end) * S::HALF),
                to: self.to,
            },
        )
    }

    fn chord(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }
}

impl<S: Scalar> Segment for ConicSegment<S> {
    impl_segment!(S);
}

#[cfg(test)]
use std::vec::Vec;

#[cfg(test)]
const FRAC_1_SQRT_2: f64 = 0.707106781186547524400844362104849039_f64;

#[cfg(test)]
fn quarter_circle() -> ConicSegment<f64> {
    ConicSegment {
        from: point(100.0, 0.0),
        ctrl: point(100.0, 100.0),
        weight: FRAC_1_SQRT_2,
        to: point(0.0, 100.0),
    }
}

#[cfg(test)]
fn assert_on_circle(p: Point<f64>, radius: f64) {
    let d = p.to_vector().length();
    assert!((d - radius).abs() < 1e-9, "{:?} is at distance {} from the center", p, d);
}

#[cfg(test)]
fn assert_approx_eq(a: Point<f64>, b: Point<f64>, epsilon: f64) {
    if (a.x - b.x).abs() > epsilon || (a.y - b.y).abs() > epsilon {
        panic!("{:?} != {:?}", a, b);
    }
}

#[test]
fn unit_weight_is_a_quadratic_bezier() {
    let c = ConicSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(1.0, 2.0),
        weight: 1.0,
        to: point(2.0, 0.0),
    };

    let coefficients = c.coefficients();
    assert_eq!(coefficients.denominator[0], 0.0);
    assert_eq!(coefficients.denominator[1], 0.0);
    assert_eq!(coefficients.denominator[2], 1.0);

    assert_eq!(c.sample(0.0), c.from);
    assert_eq!(c.sample(0.5), point(1.0, 1.0));
    assert_eq!(c.sample(1.0), c.to);
}

#[test]
fn quarter_circle_sample() {
    let c = quarter_circle();

    assert_eq!(c.sample(0.0), c.from);
    assert_approx_eq(c.sample(1.0), c.to, 1e-9);
    for i in 0..=16 {
        assert_on_circle(c.sample(i as f64 / 16.0), 100.0);
    }

    let mid = c.sample(0.5);
    assert_approx_eq(mid, point(100.0 * FRAC_1_SQRT_2, 100.0 * FRAC_1_SQRT_2), 1e-9);
}

#[test]
fn quarter_circle_tangent() {
    let c = quarter_circle();

    assert!((c.tangent(0.0) - Vector::new(0.0, 1.0)).length() < 1e-9);
    assert!((c.tangent(1.0) - Vector::new(-1.0, 0.0)).length() < 1e-9);

    let t = c.tangent(0.5);
    assert!((t - Vector::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2)).length() < 1e-9);

    // The tangent of a circle is orthogonal to the radius.
    for i in 0..=16 {
        let t = i as f64 / 16.0;
        let dot = c.tangent(t).dot(c.sample(t).to_vector());
        assert!(dot.abs() < 1e-9);
    }
}

#[test]
fn degenerate_tangent() {
    let c = ConicSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(0.0, 0.0),
        weight: 2.0,
        to: point(3.0, 4.0),
    };

    assert_eq!(c.tangent(0.0), Vector::new(0.6, 0.8));

    let c = ConicSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(3.0, 4.0),
        weight: 0.5,
        to: point(3.0, 4.0),
    };

    assert_eq!(c.tangent(1.0), Vector::new(0.6, 0.8));
}

#[test]
fn split_quarter_circle() {
    let c = quarter_circle();
    let (a, b) = c.split(0.5);

    assert_eq!(a.from, c.from);
    assert_eq!(b.to, c.to);
    assert_eq!(a.to, b.from);
    assert_approx_eq(a.to, c.sample(0.5), 1e-9);

    // Each half is a 45 degrees arc.
    let cos_22_5 = 0.923879532511286756128183189396788933_f64;
    assert!((a.weight - cos_22_5).abs() < 1e-12);
    assert!((b.weight - cos_22_5).abs() < 1e-12);

    for i in 0..=8 {
        let t = i as f64 / 8.0;
        assert_on_circle(a.sample(t), 100.0);
        assert_on_circle(b.sample(t), 100.0);
    }

    assert_eq!(c.before_split(0.5), a);
    assert_eq!(c.after_split(0.5), b);
}

#[test]
fn split_matches_sample() {
    let c = ConicSegment {
        from: point(10.0f64, 20.0),
        ctrl: point(150.0, -40.0),
        weight: 3.5,
        to: point(200.0, 80.0),
    };

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        let (a, b) = c.split(t);
        assert_eq!(a.from, c.from);
        assert_eq!(b.to, c.to);
        assert_eq!(a.to, b.from);
        assert_approx_eq(a.to, c.sample(t), 1e-9);
    }
}

#[test]
fn split_range() {
    let c = quarter_circle();

    let s = c.split_range(0.25..0.75);
    assert_approx_eq(s.from, c.sample(0.25), 1e-9);
    assert_approx_eq(s.to, c.sample(0.75), 1e-9);
    for i in 0..=8 {
        assert_on_circle(s.sample(i as f64 / 8.0), 100.0);
    }

    assert_eq!(c.split_range(0.0..0.3), c.before_split(0.3));
    assert_eq!(c.split_range(0.3..1.0), c.after_split(0.3));
}

#[test]
fn consecutive_splits_are_not_a_trim() {
    let c = ConicSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(100.0, 100.0),
        weight: 5.0,
        to: point(200.0, 0.0),
    };

    let (t0, t1) = (0.2, 0.6);
    let twice = c.after_split(t0).before_split((t1 - t0) / (1.0 - t0));
    let trimmed = c.split_range(t0..t1);
    let expected = c.sample(t1);

    assert!((trimmed.to - expected).length() < 0.01);
    assert!((twice.to - expected).length() > 1.0);
}

#[test]
fn flip() {
    let c = quarter_circle();
    let f = c.flip();

    assert_eq!(f.from, c.to);
    assert_eq!(f.to, c.from);
    assert_eq!(f.weight, c.weight);
    assert_approx_eq(f.sample(0.25), c.sample(0.75), 1e-9);
}

#[test]
fn decompose_quarter_circle() {
    let c = quarter_circle();

    let mut segments: Vec<(LineSegment<f64>, Range<f64>)> = Vec::new();
    assert!(c.decompose(0.1, &mut |s, t| {
        segments.push((*s, t));
        true
    }));

    assert!(segments.len() > 4);
    assert_eq!(segments[0].0.from, c.from);
    assert_eq!(segments[0].1.start, 0.0);
    let last = segments.last().unwrap();
    assert_eq!(last.0.to, c.to);
    assert_eq!(last.1.end, 1.0);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].0.to, pair[1].0.from);
        assert_eq!(pair[0].1.end, pair[1].1.start);
    }
    for (segment, t) in &segments {
        assert_on_circle(segment.to, 100.0);
        assert_approx_eq(segment.from, c.sample(t.start), 1e-9);
    }

    let length = c.approximate_length(0.1);
    let quarter = core::f64::consts::PI * 50.0;
    assert!(length < quarter);
    assert!(quarter - length < 0.5);
}

#[test]
fn decompose_zero_length() {
    let c = ConicSegment {
        from: point(1.0f32, 1.0),
        ctrl: point(1.0, 1.0),
        weight: 0.5,
        to: point(1.0, 1.0),
    };

    let mut count = 0;
    assert!(c.decompose(0.0, &mut |_, _| {
        count += 1;
        true
    }));
    assert!(count >= 1 && count <= 1024);
}
