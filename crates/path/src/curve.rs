//! A single type for the three kinds of path segments.
//!
//! [`Curve`] is built from a [`PathOp`] and dispatches every operation to the line,
//! cubic bézier or conic math of `kurve_geom`. Cubic and conic curves compute their
//! polynomial coefficients once when they are created, so that repeated evaluation
//! and flattening don't pay for it again.

use crate::geom::{
    ConicCoefficients, ConicSegment, CubicBezierSegment, CubicCoefficients, LineSegment,
    Segment,
};
use crate::math::{point, Point, Vector};
use crate::path_op::{PathOp, Verb};
use crate::FlattenOptions;

use std::ops::Range;

/// A straight segment, either a `Line` or the `Close` segment of a sub-path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineCurve {
    verb: Verb,
    segment: LineSegment<f32>,
}

impl LineCurve {
    #[inline]
    pub fn segment(&self) -> &LineSegment<f32> {
        &self.segment
    }

    /// Either `Verb::Line` or `Verb::Close`.
    #[inline]
    pub fn verb(&self) -> Verb {
        self.verb
    }
}

/// A cubic bézier segment along with its polynomial coefficients.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicCurve {
    segment: CubicBezierSegment<f32>,
    coefficients: CubicCoefficients<f32>,
}

impl CubicCurve {
    pub fn new(segment: CubicBezierSegment<f32>) -> Self {
        CubicCurve {
            segment,
            coefficients: segment.coefficients(),
        }
    }

    #[inline]
    pub fn segment(&self) -> &CubicBezierSegment<f32> {
        &self.segment
    }

    #[inline]
    pub fn coefficients(&self) -> &CubicCoefficients<f32> {
        &self.coefficients
    }
}

/// A conic segment along with its rational coefficients.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConicCurve {
    segment: ConicSegment<f32>,
    coefficients: ConicCoefficients<f32>,
    // The third point of the encoding, its x coordinate is the weight.
    weight_slot: Point,
}

impl ConicCurve {
    pub fn new(segment: ConicSegment<f32>) -> Self {
        ConicCurve::with_weight_slot(segment, point(segment.weight, 0.0))
    }

    fn with_weight_slot(segment: ConicSegment<f32>, weight_slot: Point) -> Self {
        ConicCurve {
            segment,
            coefficients: segment.coefficients(),
            weight_slot,
        }
    }

    #[inline]
    pub fn segment(&self) -> &ConicSegment<f32> {
        &self.segment
    }

    #[inline]
    pub fn coefficients(&self) -> &ConicCoefficients<f32> {
        &self.coefficients
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.segment.weight
    }
}

/// A path segment of any kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Curve {
    Line(LineCurve),
    Cubic(CubicCurve),
    Conic(ConicCurve),
}

impl Curve {
    /// Builds a curve from a path operation.
    ///
    /// # Panics
    ///
    /// Panics if the operation is a `Move`, which doesn't describe a segment.
    pub fn from_op(op: &PathOp) -> Self {
        let p = op.points();
        match op.verb() {
            Verb::Line | Verb::Close => Curve::Line(LineCurve {
                verb: op.verb(),
                segment: LineSegment {
                    from: p[0],
                    to: p[1],
                },
            }),
            Verb::Cubic => Curve::Cubic(CubicCurve::new(CubicBezierSegment {
                from: p[0],
                ctrl1: p[1],
                ctrl2: p[2],
                to: p[3],
            })),
            Verb::Conic => Curve::Conic(ConicCurve::with_weight_slot(
                ConicSegment {
                    from: p[0],
                    ctrl: p[1],
                    weight: p[2].x,
                    to: p[3],
                },
                p[2],
            )),
            Verb::Move => {
                panic!("Move operations don't describe a curve");
            }
        }
    }

    /// Encodes the curve back into a path operation.
    ///
    /// For a curve created with `from_op`, this returns an operation identical
    /// to the original one.
    pub fn to_op(&self) -> PathOp {
        match self {
            Curve::Line(c) => PathOp::new(c.verb, &[c.segment.from, c.segment.to]),
            Curve::Cubic(c) => {
                let s = &c.segment;
                PathOp::cubic(s.from, s.ctrl1, s.ctrl2, s.to)
            }
            Curve::Conic(c) => {
                let s = &c.segment;
                PathOp::new(Verb::Conic, &[s.from, s.ctrl, c.weight_slot, s.to])
            }
        }
    }

    #[inline]
    pub fn line(segment: LineSegment<f32>) -> Self {
        Curve::Line(LineCurve {
            verb: Verb::Line,
            segment,
        })
    }

    #[inline]
    pub fn cubic(segment: CubicBezierSegment<f32>) -> Self {
        Curve::Cubic(CubicCurve::new(segment))
    }

    #[inline]
    pub fn conic(segment: ConicSegment<f32>) -> Self {
        Curve::Conic(ConicCurve::new(segment))
    }

    /// The verb this curve is encoded with.
    pub fn verb(&self) -> Verb {
        match self {
            Curve::Line(c) => c.verb,
            Curve::Cubic(_) => Verb::Cubic,
            Curve::Conic(_) => Verb::Conic,
        }
    }

    /// Start of the curve.
    #[inline]
    pub fn from(&self) -> Point {
        match self {
            Curve::Line(c) => c.segment.from,
            Curve::Cubic(c) => c.segment.from,
            Curve::Conic(c) => c.segment.from,
        }
    }

    /// End of the curve.
    #[inline]
    pub fn to(&self) -> Point {
        match self {
            Curve::Line(c) => c.segment.to,
            Curve::Cubic(c) => c.segment.to,
            Curve::Conic(c) => c.segment.to,
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn point(&self, t: f32) -> Point {
        match self {
            Curve::Line(c) => c.segment.sample(t),
            Curve::Cubic(c) => c.coefficients.sample(t),
            Curve::Conic(c) => c.coefficients.sample(t),
        }
    }

    /// Sample the normalized direction of the curve at t.
    ///
    /// Returns a zero vector if the direction is undefined, for example on a
    /// zero-length line.
    pub fn tangent(&self, t: f32) -> Vector {
        match self {
            Curve::Line(c) => c.segment.tangent(t),
            Curve::Cubic(c) => c.coefficients.tangent(t),
            Curve::Conic(c) => c.segment.tangent(t),
        }
    }

    /// Sample both the position and the normalized direction of the curve at t.
    #[inline]
    pub fn eval(&self, t: f32) -> (Point, Vector) {
        (self.point(t), self.tangent(t))
    }

    /// Split this curve into two sub-curves.
    ///
    /// Splitting a `Close` segment produces two `Line` segments.
    pub fn split(&self, t: f32) -> (Curve, Curve) {
        match self {
            Curve::Line(c) => {
                let (a, b) = c.segment.split(t);
                (Curve::line(a), Curve::line(b))
            }
            Curve::Cubic(c) => {
                let (a, b) = c.segment.split(t);
                (Curve::cubic(a), Curve::cubic(b))
            }
            Curve::Conic(c) => {
                let (a, b) = c.segment.split(t);
                (Curve::conic(a), Curve::conic(b))
            }
        }
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: f32) -> Curve {
        match self {
            Curve::Line(c) => Curve::line(c.segment.before_split(t)),
            Curve::Cubic(c) => Curve::cubic(c.segment.before_split(t)),
            Curve::Conic(c) => Curve::conic(c.segment.before_split(t)),
        }
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: f32) -> Curve {
        match self {
            Curve::Line(c) => Curve::line(c.segment.after_split(t)),
            Curve::Cubic(c) => Curve::cubic(c.segment.after_split(t)),
            Curve::Conic(c) => Curve::conic(c.segment.after_split(t)),
        }
    }

    /// Return the curve inside a given range of t.
    ///
    /// For conics this is not the same as splitting twice, see
    /// [`ConicSegment`](../geom/conic/index.html).
    pub fn split_range(&self, t_range: Range<f32>) -> Curve {
        match self {
            Curve::Line(c) => Curve::line(c.segment.split_range(t_range)),
            Curve::Cubic(c) => Curve::cubic(c.segment.split_range(t_range)),
            Curve::Conic(c) => {
                Curve::conic(c.segment.split_range_with(&c.coefficients, t_range))
            }
        }
    }

    /// Swap the direction of the curve.
    pub fn flip(&self) -> Curve {
        match self {
            Curve::Line(c) => Curve::Line(LineCurve {
                verb: c.verb,
                segment: c.segment.flip(),
            }),
            Curve::Cubic(c) => Curve::cubic(c.segment.flip()),
            Curve::Conic(c) => {
                Curve::Conic(ConicCurve::with_weight_slot(c.segment.flip(), c.weight_slot))
            }
        }
    }

    /// Approximates the curve with a sequence of line segments.
    ///
    /// The callback receives the line segments in order along with the range of t
    /// they cover. Returning `false` from the callback stops the flattening, in
    /// which case this function returns `false` as well.
    ///
    /// Lines are emitted as a single segment regardless of the tolerance.
    pub fn decompose<F>(&self, tolerance: f32, callback: &mut F) -> bool
    where
        F: ?Sized + FnMut(&LineSegment<f32>, Range<f32>) -> bool,
    {
        match self {
            Curve::Line(c) => c.segment.decompose(tolerance, callback),
            Curve::Cubic(c) => c.segment.decompose(tolerance, callback),
            Curve::Conic(c) => c.segment.decompose_with(&c.coefficients, tolerance, callback),
        }
    }

    /// Same as `decompose` with the tolerance taken from the options.
    #[inline]
    pub fn for_each_flattened<F>(&self, options: &FlattenOptions, callback: &mut F) -> bool
    where
        F: ?Sized + FnMut(&LineSegment<f32>, Range<f32>) -> bool,
    {
        self.decompose(options.tolerance, callback)
    }

    /// Compute the length of the curve using a flattened approximation.
    pub fn approximate_length(&self, tolerance: f32) -> f32 {
        let mut length = 0.0;
        self.decompose(tolerance, &mut |line, _| {
            length += line.length();
            true
        });

        length
    }
}

impl Segment for Curve {
    type Scalar = f32;

    fn from(&self) -> Point {
        self.from()
    }
    fn to(&self) -> Point {
        self.to()
    }
    fn sample(&self, t: f32) -> Point {
        self.point(t)
    }
    fn tangent(&self, t: f32) -> Vector {
        self.tangent(t)
    }
    fn split(&self, t: f32) -> (Self, Self) {
        self.split(t)
    }
    fn before_split(&self, t: f32) -> Self {
        self.before_split(t)
    }
    fn after_split(&self, t: f32) -> Self {
        self.after_split(t)
    }
    fn split_range(&self, t_range: Range<f32>) -> Self {
        self.split_range(t_range)
    }
    fn flip(&self) -> Self {
        self.flip()
    }
    fn decompose(
        &self,
        tolerance: f32,
        callback: &mut dyn FnMut(&LineSegment<f32>, Range<f32>) -> bool,
    ) -> bool {
        self.decompose(tolerance, callback)
    }
    fn approximate_length(&self, tolerance: f32) -> f32 {
        self.approximate_length(tolerance)
    }
}

impl From<&PathOp> for Curve {
    fn from(op: &PathOp) -> Self {
        Curve::from_op(op)
    }
}

impl From<&Curve> for PathOp {
    fn from(curve: &Curve) -> Self {
        curve.to_op()
    }
}

impl From<LineSegment<f32>> for Curve {
    fn from(segment: LineSegment<f32>) -> Self {
        Curve::line(segment)
    }
}

impl From<CubicBezierSegment<f32>> for Curve {
    fn from(segment: CubicBezierSegment<f32>) -> Self {
        Curve::cubic(segment)
    }
}

impl From<ConicSegment<f32>> for Curve {
    fn from(segment: ConicSegment<f32>) -> Self {
        Curve::conic(segment)
    }
}
