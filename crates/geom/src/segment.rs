use crate::scalar::Scalar;
use crate::{LineSegment, Point, Vector};

use core::ops::Range;

/// Common APIs to segment types.
///
/// Implemented by the three curve kinds of this crate: [`LineSegment`],
/// [`CubicBezierSegment`](crate::CubicBezierSegment) and
/// [`ConicSegment`](crate::ConicSegment).
pub trait Segment: Copy + Sized {
    type Scalar: Scalar;

    /// Start of the curve.
    fn from(&self) -> Point<Self::Scalar>;

    /// End of the curve.
    fn to(&self) -> Point<Self::Scalar>;

    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: Self::Scalar) -> Point<Self::Scalar>;

    /// Sample the normalized direction of the curve at t (expecting t between 0 and 1).
    ///
    /// Returns a zero vector where the direction is undefined.
    fn tangent(&self, t: Self::Scalar) -> Vector<Self::Scalar>;

    /// Split this curve into two sub-curves.
    fn split(&self, t: Self::Scalar) -> (Self, Self);

    /// Return the curve before the split point.
    fn before_split(&self, t: Self::Scalar) -> Self;

    /// Return the curve after the split point.
    fn after_split(&self, t: Self::Scalar) -> Self;

    /// Return the curve inside a given range of t.
    fn split_range(&self, t_range: Range<Self::Scalar>) -> Self;

    /// Swap the direction of the segment.
    fn flip(&self) -> Self;

    /// Approximates the curve with a sequence of line segments.
    ///
    /// The callback receives each line segment along with the range of t it covers,
    /// in order. Returning `false` from the callback stops the flattening, in which
    /// case this function returns `false` as well.
    fn decompose(
        &self,
        tolerance: Self::Scalar,
        callback: &mut dyn FnMut(&LineSegment<Self::Scalar>, Range<Self::Scalar>) -> bool,
    ) -> bool;

    /// Compute the length of the segment using a flattened approximation.
    fn approximate_length(&self, tolerance: Self::Scalar) -> Self::Scalar {
        let mut length = Self::Scalar::ZERO;
        self.decompose(tolerance, &mut |line, _| {
            length += line.length();
            true
        });

        length
    }
}

macro_rules! impl_segment {
    ($S:ty) => {
        type Scalar = $S;
        fn from(&self) -> Point<$S> {
            self.from()
        }
        fn to(&self) -> Point<$S> {
            self.to()
        }
        fn sample(&self, t: $S) -> Point<$S> {
            self.sample(t)
        }
        fn tangent(&self, t: $S) -> Vector<$S> {
            self.tangent(t)
        }
        fn split(&self, t: $S) -> (Self, Self) {
            self.split(t)
        }
        fn before_split(&self, t: $S) -> Self {
            self.before_split(t)
        }
        fn after_split(&self, t: $S) -> Self {
            self.after_split(t)
        }
        fn split_range(&self, t_range: Range<$S>) -> Self {
            self.split_range(t_range)
        }
        fn flip(&self) -> Self {
            self.flip()
        }
        fn decompose(
            &self,
            tolerance: $S,
            callback: &mut dyn FnMut(&LineSegment<$S>, Range<$S>) -> bool,
        ) -> bool {
            self.decompose(tolerance, callback)
        }
    };
}
