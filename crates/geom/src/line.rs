use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::utils::normalized_or_zero;
use crate::{Point, Vector};

use core::ops::Range;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// The normalized direction of the segment, identical for all values of t.
    #[inline]
    pub fn tangent(&self, _t: S) -> Vector<S> {
        normalized_or_zero(self.to_vector())
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> S {
        self.to_vector().length()
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Return the sub-segment inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        LineSegment {
            from: self.from.lerp(self.to, t_range.start),
            to: self.from.lerp(self.to, t_range.end),
        }
    }

    /// Split this curve into two sub-segments.
    #[inline]
    pub fn split(&self, t: S) -> (Self, Self) {
        let split_point = self.sample(t);

        (
            LineSegment {
                from: self.from,
                to: split_point,
            },
            LineSegment {
                from: split_point,
                to: self.to,
            },
        )
    }

    /// Return the segment before the split point.
    #[inline]
    pub fn before_split(&self, t: S) -> Self {
        LineSegment {
            from: self.from,
            to: self.sample(t),
        }
    }

    /// Return the segment after the split point.
    #[inline]
    pub fn after_split(&self, t: S) -> Self {
        LineSegment {
            from: self.sample(t),
            to: self.to,
        }
    }

    /// A line is its own linear approximation: the callback is invoked exactly once
    /// with the whole segment, regardless of the tolerance.
    pub fn decompose<F>(&self, _tolerance: S, callback: &mut F) -> bool
    where
        F: ?Sized + FnMut(&LineSegment<S>, Range<S>) -> bool,
    {
        callback(self, S::ZERO..S::ONE)
    }
}

impl<S: Scalar> Segment for LineSegment<S> {
    impl_segment!(S);
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use std::vec::Vec;

#[test]
fn line_sample_and_tangent() {
    let l = LineSegment {
        from: point(1.0f32, 1.0),
        to: point(5.0, 4.0),
    };

    assert_eq!(l.sample(0.0), l.from);
    assert_eq!(l.sample(1.0), l.to);
    assert_eq!(l.sample(0.5), point(3.0, 2.5));
    assert_eq!(l.tangent(0.3), Vector::new(0.8, 0.6));
    assert_eq!(l.length(), 5.0);
}

#[test]
fn line_split() {
    let l = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(8.0, -4.0),
    };

    let (a, b) = l.split(0.25);
    assert_eq!(a.from, l.from);
    assert_eq!(a.to, point(2.0, -1.0));
    assert_eq!(b.from, a.to);
    assert_eq!(b.to, l.to);
    assert_eq!(l.before_split(0.25), a);
    assert_eq!(l.after_split(0.25), b);

    let r = l.split_range(0.25..0.75);
    assert_eq!(r.from, point(2.0, -1.0));
    assert_eq!(r.to, point(6.0, -3.0));
}

#[test]
fn line_decompose_is_a_single_segment() {
    let l = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(1000.0, 1000.0),
    };

    for tolerance in &[0.0, 0.001, 0.5, 100.0] {
        let mut segments = Vec::new();
        assert!(l.decompose(*tolerance, &mut |s, t| {
            segments.push((*s, t));
            true
        }));
        assert_eq!(segments, [(l, 0.0..1.0)]);
    }

    assert!(!l.decompose(0.5, &mut |_, _| false));
}

#[test]
fn degenerate_line_tangent() {
    let l = LineSegment {
        from: point(3.0f32, 3.0),
        to: point(3.0, 3.0),
    };

    assert_eq!(l.tangent(0.5), Vector::zero());
}
