use crate::scalar::Scalar;
use crate::{HomogeneousPoint, Vector};

/// Returns `v` scaled to unit length, or a zero vector if `v` has no length.
#[inline]
pub fn normalized_or_zero<S: Scalar>(v: Vector<S>) -> Vector<S> {
    let length = v.length();
    if length == S::ZERO {
        return Vector::zero();
    }

    v / length
}

/// Splits a polynomial bézier curve of any degree, given as `N` homogeneous
/// control points, at `t` using de Casteljau's algorithm.
///
/// Returns the control points of the sub-curves before and after `t`.
pub fn split_homogeneous<S: Scalar, const N: usize>(
    points: &[HomogeneousPoint<S>; N],
    t: S,
) -> ([HomogeneousPoint<S>; N], [HomogeneousPoint<S>; N]) {
    let mut left = *points;
    let mut right = *points;
    let mut work = *points;

    for level in 0..N {
        let n = N - level;
        left[level] = work[0];
        right[n - 1] = work[n - 1];
        for i in 0..(n - 1) {
            work[i] = work[i].lerp(work[i + 1], t);
        }
    }

    (left, right)
}

#[test]
fn normalize_zero_vector() {
    assert_eq!(normalized_or_zero(Vector::new(0.0f32, 0.0)), Vector::zero());
    assert_eq!(normalized_or_zero(Vector::new(0.0f32, -3.0)), Vector::new(0.0, -1.0));
}

#[test]
fn split_homogeneous_quadratic() {
    let points = [
        HomogeneousPoint::new(0.0f64, 0.0, 1.0),
        HomogeneousPoint::new(2.0, 4.0, 2.0),
        HomogeneousPoint::new(4.0, 0.0, 1.0),
    ];

    let (left, right) = split_homogeneous(&points, 0.5);

    assert_eq!(left[0], points[0]);
    assert_eq!(left[1], HomogeneousPoint::new(1.0, 2.0, 1.5));
    assert_eq!(left[2], HomogeneousPoint::new(2.0, 2.0, 1.5));
    assert_eq!(right[0], left[2]);
    assert_eq!(right[1], HomogeneousPoint::new(3.0, 2.0, 1.5));
    assert_eq!(right[2], points[2]);
}
