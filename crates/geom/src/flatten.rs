//! The adaptive flattening protocol shared by the curved segment types.
//!
//! A curve is approximated by recursively halving its parameter range. Each piece
//! of the recursion knows how to test its own flatness and how to split itself in
//! two; the driver in this module takes care of the termination floor, of the
//! progress bookkeeping and of the early exit requested by the callback.
//!
//! Pieces are visited depth-first, left before right, so the emitted line segments
//! are contiguous and their parameter ranges increase monotonically, starting at
//! exactly `0` and ending at exactly `1`.

use crate::scalar::Scalar;
use crate::LineSegment;

use core::ops::Range;

/// Smallest parameter range that is subdivided further.
///
/// Pieces covering at most this much of the curve are emitted as-is, whether they
/// are flat or not. Starting from the unit interval this bounds the recursion to
/// ten levels.
pub const MIN_PROGRESS: f32 = 1.0 / 1024.0;

/// A piece of curve handled by the adaptive flattening driver.
pub trait Subdivide<S: Scalar>: Sized {
    /// Whether the chord of this piece is an acceptable approximation.
    fn is_flat(&self, tolerance: S) -> bool;

    /// Split the piece in its middle.
    ///
    /// `range` is the parameter range this piece covers on the original curve.
    fn subdivide(&self, range: &Range<S>) -> (Self, Self);

    /// The line segment that approximates this piece.
    fn chord(&self) -> LineSegment<S>;
}

/// Recursively flattens `piece`, which covers `range` on the original curve.
///
/// Returns `false` as soon as the callback does.
pub fn flatten_recursive<S, P, F>(piece: &P, range: Range<S>, tolerance: S, callback: &mut F) -> bool
where
    S: Scalar,
    P: Subdivide<S>,
    F: ?Sized + FnMut(&LineSegment<S>, Range<S>) -> bool,
{
    if !piece.is_flat(tolerance) {
        if range.end - range.start > S::value(MIN_PROGRESS) {
            let (left, right) = piece.subdivide(&range);
            let mid = (range.start + range.end) * S::HALF;

            return flatten_recursive(&left, range.start..mid, tolerance, callback)
                && flatten_recursive(&right, mid..range.end, tolerance, callback);
        }

        log::trace!(
            "flattening reached the progress floor at {:?}..{:?}",
            range.start,
            range.end
        );
    }

    callback(&piece.chord(), range)
}

#[cfg(test)]
use std::vec::Vec;

#[cfg(test)]
#[derive(Copy, Clone)]
struct Never(LineSegment<f32>);

#[cfg(test)]
impl Subdivide<f32> for Never {
    fn is_flat(&self, _: f32) -> bool {
        false
    }

    fn subdivide(&self, _: &Range<f32>) -> (Self, Self) {
        let (a, b) = self.0.split(0.5);
        (Never(a), Never(b))
    }

    fn chord(&self) -> LineSegment<f32> {
        self.0
    }
}

#[test]
fn progress_floor_bounds_the_recursion() {
    use crate::point;

    let piece = Never(LineSegment {
        from: point(0.0, 0.0),
        to: point(1024.0, 0.0),
    });

    let mut ranges = Vec::new();
    let complete = flatten_recursive(&piece, 0.0..1.0, 0.5, &mut |_, t| {
        ranges.push(t);
        true
    });

    assert!(complete);
    assert_eq!(ranges.len(), 1024);
    assert_eq!(ranges[0].start, 0.0);
    assert_eq!(ranges[1023].end, 1.0);
    for pair in ranges.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn callback_stops_the_recursion() {
    use crate::point;

    let piece = Never(LineSegment {
        from: point(0.0, 0.0),
        to: point(1.0, 1.0),
    });

    let mut count = 0;
    let complete = flatten_recursive(&piece, 0.0..1.0, 0.5, &mut |_, _| {
        count += 1;
        count < 3
    });

    assert!(!complete);
    assert_eq!(count, 3);
}
