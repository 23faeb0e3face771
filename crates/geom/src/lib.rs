#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Simple 2D curve segments on top of euclid.
//!
//! This crate is reexported in [kurve](https://docs.rs/kurve/).
//!
//! # Overview.
//!
//! This crate implements the maths to work with a small, closed set of curve kinds:
//!
//! - line segments,
//! - cubic bézier curves,
//! - conics (rational quadratic bézier curves), which can exactly represent
//!   circular, elliptic and hyperbolic arcs.
//!
//! All of them can be sampled, split, trimmed and flattened.
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of line segments.
//!
//! All segment types share the same adaptive protocol (see the [flatten](flatten/index.html)
//! module): the curve is recursively halved until each piece is flat enough for the
//! requested tolerance, or until the parameter range of the piece becomes smaller than
//! [`MIN_PROGRESS`](flatten/constant.MIN_PROGRESS.html). The segments are emitted in order
//! through a callback along with the parameter range they cover, and the callback can
//! stop the process early by returning `false`.
//!
//! The tolerance threshold taken as input by the flattening algorithms bounds the
//! deviation between the curve and its linear approximation. The smaller the tolerance
//! is, the more precise the approximation and the more segments are generated.

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[macro_use]
mod segment;
pub mod conic;
pub mod cubic_bezier;
pub mod flatten;
mod line;
pub mod utils;

#[doc(inline)]
pub use crate::conic::{ConicCoefficients, ConicSegment};
#[doc(inline)]
pub use crate::cubic_bezier::{CubicBezierSegment, CubicCoefficients};
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::segment::Segment;

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use num_traits::{Float, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float + NumCast + Sized + Display + Debug + AddAssign + SubAssign + MulAssign + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const THREE: Self;
        const SIX: Self;

        fn value(v: f32) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const SIX: Self = 6.0;

        #[inline]
        fn value(v: f32) -> Self {
            v
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const SIX: Self = 6.0;

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Alias for `euclid::default::Point3D`, used for homogeneous coordinates.
pub use euclid::default::Point3D as HomogeneousPoint;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

pub mod traits {
    pub use crate::segment::Segment;
}
