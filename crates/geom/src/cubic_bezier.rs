use crate::flatten::{flatten_recursive, Subdivide};
use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::utils::normalized_or_zero;
use crate::{LineSegment, Point, Vector};

use core::ops::Range;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

/// The monomial form of a cubic bézier curve.
///
/// ```P(t) = ((c0 * t + c1) * t + c2) * t + c3```
///
/// Evaluating the monomial form with Horner's scheme is cheaper than evaluating the
/// Bernstein form, so callers that sample the same curve many times should compute
/// the coefficients once with [`CubicBezierSegment::coefficients`] and keep them around.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicCoefficients<S> {
    pub c0: Vector<S>,
    pub c1: Vector<S>,
    pub c2: Vector<S>,
    pub c3: Point<S>,
}

impl<S: Scalar> CubicCoefficients<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        let c = self;
        Point::new(
            ((c.c0.x * t + c.c1.x) * t + c.c2.x) * t + c.c3.x,
            ((c.c0.y * t + c.c1.y) * t + c.c2.y) * t + c.c3.y,
        )
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    #[inline]
    pub fn derivative(&self, t: S) -> Vector<S> {
        let c = self;
        Vector::new(
            (S::THREE * c.c0.x * t + S::TWO * c.c1.x) * t + c.c2.x,
            (S::THREE * c.c0.y * t + S::TWO * c.c1.y) * t + c.c2.y,
        )
    }

    /// Sample the normalized direction of the curve at t (expecting t between 0 and 1).
    #[inline]
    pub fn tangent(&self, t: S) -> Vector<S> {
        normalized_or_zero(self.derivative(t))
    }
}

impl<S: Scalar> CubicBezierSegment<S> {
    /// Computes the monomial coefficients of the curve.
    pub fn coefficients(&self) -> CubicCoefficients<S> {
        let p0 = self.from.to_vector();
        let p1 = self.ctrl1.to_vector();
        let p2 = self.ctrl2.to_vector();
        let p3 = self.to.to_vector();

        CubicCoefficients {
            c0: p3 - p2 * S::THREE + p1 * S::THREE - p0,
            c1: p2 * S::THREE - p1 * S::SIX + p0 * S::THREE,
            c2: (p1 - p0) * S::THREE,
            c3: self.from,
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        self.coefficients().sample(t)
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        self.coefficients().derivative(t)
    }

    /// Sample the normalized direction of the curve at t (expecting t between 0 and 1).
    pub fn tangent(&self, t: S) -> Vector<S> {
        self.coefficients().tangent(t)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        let (t0, t1) = (t_range.start, t_range.end);
        let coefficients = self.coefficients();
        let from = coefficients.sample(t0);
        let to = coefficients.sample(t1);

        let dt = (t1 - t0) / S::THREE;
        let ctrl1 = from + coefficients.derivative(t0) * dt;
        let ctrl2 = to - coefficients.derivative(t1) * dt;

        CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (CubicBezierSegment<S>, CubicBezierSegment<S>) {
        let ab = self.from.lerp(self.ctrl1, t);
        let bc = self.ctrl1.lerp(self.ctrl2, t);
        let cd = self.ctrl2.lerp(self.to, t);
        let abbc = ab.lerp(bc, t);
        let bccd = bc.lerp(cd, t);
        let split_point = abbc.lerp(bccd, t);

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ab,
                ctrl2: abbc,
                to: split_point,
            },
            CubicBezierSegment {
                from: split_point,
                ctrl1: bccd,
                ctrl2: cd,
                to: self.to,
            },
        )
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: S) -> CubicBezierSegment<S> {
        let ab = self.from.lerp(self.ctrl1, t);
        let bc = self.ctrl1.lerp(self.ctrl2, t);
        let cd = self.ctrl2.lerp(self.to, t);
        let abbc = ab.lerp(bc, t);
        let bccd = bc.lerp(cd, t);

        CubicBezierSegment {
            from: self.from,
            ctrl1: ab,
            ctrl2: abbc,
            to: abbc.lerp(bccd, t),
        }
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: S) -> CubicBezierSegment<S> {
        let ab = self.from.lerp(self.ctrl1, t);
        let bc = self.ctrl1.lerp(self.ctrl2, t);
        let cd = self.ctrl2.lerp(self.to, t);
        let abbc = ab.lerp(bc, t);
        let bccd = bc.lerp(cd, t);

        CubicBezierSegment {
            from: abbc.lerp(bccd, t),
            ctrl1: bccd,
            ctrl2: cd,
            to: self.to,
        }
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// Returns true if the control points are too far from the baseline for the
    /// baseline to approximate the curve within `tolerance`.
    ///
    /// The control points are compared with the points at 1/3 and 2/3 of the
    /// baseline using the manhattan distance.
    pub fn is_too_curvy(&self, tolerance: S) -> bool {
        let one_third = S::ONE / S::THREE;
        let p = self.from.lerp(self.to, one_third);
        if (p.x - self.ctrl1.x).abs() + (p.y - self.ctrl1.y).abs() > tolerance {
            return true;
        }

        let p = self.from.lerp(self.to, S::TWO * one_third);
        (p.x - self.ctrl2.x).abs() + (p.y - self.ctrl2.y).abs() > tolerance
    }

    /// Approximates the curve with a sequence of line segments by recursively
    /// splitting it in half until each piece is flat enough.
    ///
    /// See the [flatten](../flatten/index.html) module.
    pub fn decompose<F>(&self, tolerance: S, callback: &mut F) -> bool
    where
        F: ?Sized + FnMut(&LineSegment<S>, Range<S>) -> bool,
    {
        flatten_recursive(self, S::ZERO..S::ONE, tolerance, callback)
    }
}

impl<S: Scalar> Subdivide<S> for CubicBezierSegment<S> {
    fn is_flat(&self, tolerance: S) -> bool {
        !self.is_too_curvy(tolerance)
    }

    fn subdivide(&self, _range: &Range<S>) -> (Self, Self) {
        self.split(S::HALF)
    }

    fn chord(&self) -> LineSegment<S> {
        self.baseline()
    }
}

impl<S: Scalar> Segment for CubicBezierSegment<S> {
    impl_segment!(S);
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use std::vec::Vec;

#[cfg(test)]
fn assert_approx_eq(a: Point<f32>, b: Point<f32>, epsilon: f32) {
    if (a.x - b.x).abs() > epsilon || (a.y - b.y).abs() > epsilon {
        panic!("{:?} != {:?}", a, b);
    }
}

#[test]
fn monomial_coefficients() {
    let c = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(1.0, 2.0),
        ctrl2: point(3.0, 2.0),
        to: point(4.0, 0.0),
    };

    let coefficients = c.coefficients();
    assert_eq!(coefficients.c0, Vector::new(-2.0, 0.0));
    assert_eq!(coefficients.c1, Vector::new(3.0, -6.0));
    assert_eq!(coefficients.c2, Vector::new(3.0, 6.0));
    assert_eq!(coefficients.c3, c.from);

    assert_eq!(c.sample(0.0), c.from);
    assert_eq!(c.sample(1.0), c.to);
    assert_eq!(c.sample(0.5), point(2.0, 1.5));
    assert_eq!(c.tangent(0.5), Vector::new(1.0, 0.0));
    assert!((c.tangent(0.0) - Vector::new(0.4472136, 0.8944272)).length() < 1e-6);
}

#[test]
fn split_matches_sample() {
    let c = CubicBezierSegment {
        from: point(10.0f32, 20.0),
        ctrl1: point(150.0, -40.0),
        ctrl2: point(-30.0, 120.0),
        to: point(200.0, 80.0),
    };

    for i in 0..=10 {
        let t = i as f32 / 10.0;
        let (a, b) = c.split(t);
        assert_eq!(a.from, c.from);
        assert_eq!(b.to, c.to);
        assert_eq!(a.to, b.from);
        assert_approx_eq(a.to, c.sample(t), 0.001);
        assert_eq!(c.before_split(t), a);
        assert_eq!(c.after_split(t), b);
    }
}

#[test]
fn split_range_matches_split() {
    let c = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(100.0, 0.0),
        ctrl2: point(100.0, 100.0),
        to: point(0.0, 100.0),
    };

    let range = c.split_range(0.25..0.75);
    let expected = c.after_split(0.25).before_split(2.0 / 3.0);

    assert_approx_eq(range.from, expected.from, 0.001);
    assert_approx_eq(range.ctrl1, expected.ctrl1, 0.001);
    assert_approx_eq(range.ctrl2, expected.ctrl2, 0.001);
    assert_approx_eq(range.to, expected.to, 0.001);
}

#[test]
fn too_curvy() {
    let flat = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(2.0, 0.0),
        to: point(3.0, 0.0),
    };
    assert!(!flat.is_too_curvy(1e-4));

    let bumpy = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(1.0, 0.3),
        ctrl2: point(2.0, 0.0),
        to: point(3.0, 0.0),
    };
    assert!(bumpy.is_too_curvy(0.25));
    assert!(!bumpy.is_too_curvy(0.35));
}

#[test]
fn decompose_contiguous() {
    let c = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(100.0, 0.0),
        ctrl2: point(100.0, 100.0),
        to: point(100.0, 200.0),
    };

    for tolerance in &[1.0, 0.5, 0.1, 0.01, 0.0] {
        let mut segments: Vec<(LineSegment<f32>, Range<f32>)> = Vec::new();
        let complete = c.decompose(*tolerance, &mut |s, t| {
            segments.push((*s, t));
            true
        });

        assert!(complete);
        assert!(segments.len() > 1);
        assert_eq!(segments[0].0.from, c.from);
        assert_eq!(segments[0].1.start, 0.0);
        let last = segments.last().unwrap();
        assert_eq!(last.0.to, c.to);
        assert_eq!(last.1.end, 1.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].0.to, pair[1].0.from);
            assert_eq!(pair[0].1.end, pair[1].1.start);
        }
        assert!(segments.len() <= 1024);
    }
}

#[test]
fn decompose_point() {
    let c = CubicBezierSegment {
        from: point(5.0f32, 5.0),
        ctrl1: point(5.0, 5.0),
        ctrl2: point(5.0, 5.0),
        to: point(5.0, 5.0),
    };

    let mut count = 0;
    assert!(c.decompose(0.1, &mut |s, t| {
        count += 1;
        assert_eq!(s.from, s.to);
        assert_eq!(t, 0.0..1.0);
        true
    }));
    assert_eq!(count, 1);
}

#[test]
fn decompose_early_exit() {
    let c = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(0.0, 100.0),
        ctrl2: point(100.0, 100.0),
        to: point(100.0, 0.0),
    };

    let mut count = 0;
    let complete = c.decompose(0.1, &mut |_, _| {
        count += 1;
        count < 2
    });

    assert!(!complete);
    assert_eq!(count, 2);
}

#[test]
fn approximate_length() {
    let c = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(10.0, 0.0),
        ctrl2: point(20.0, 0.0),
        to: point(30.0, 0.0),
    };

    assert_eq!(c.approximate_length(0.5), 30.0);
}
