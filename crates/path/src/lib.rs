#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! A uniform curve type over the segments of a path.
//!
//! Paths store their segments as compact [`PathOp`](path_op/struct.PathOp.html) values:
//! a [`Verb`](path_op/enum.Verb.html) tag and the control points of the segment. A
//! [`Curve`](curve/enum.Curve.html) is built from such an operation and exposes the
//! same set of operations whatever the kind of segment behind it: evaluation,
//! splitting, trimming and flattening.
//!
//! This crate is reexported in [kurve](https://docs.rs/kurve/).
//!
//! # Examples
//!
//! ```
//! # extern crate kurve_path;
//! # fn main() {
//! use kurve_path::{Curve, FlattenOptions, PathOp};
//! use kurve_path::math::point;
//!
//! // A quarter of a circle of radius 100.
//! let op = PathOp::conic(
//!     point(100.0, 0.0),
//!     point(100.0, 100.0),
//!     std::f32::consts::FRAC_1_SQRT_2,
//!     point(0.0, 100.0),
//! );
//!
//! let curve = Curve::from_op(&op);
//!
//! let (position, tangent) = curve.eval(0.5);
//! println!("{:?} {:?}", position, tangent);
//!
//! curve.for_each_flattened(&FlattenOptions::tolerance(0.1), &mut |line, t| {
//!     println!("{:?} covers {:?}", line, t);
//!     true
//! });
//! # }
//! ```

pub use kurve_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod curve;
pub mod path_op;

#[cfg(test)]
mod curve_tests;

#[doc(inline)]
pub use crate::curve::{ConicCurve, CubicCurve, Curve, LineCurve};
#[doc(inline)]
pub use crate::path_op::{PathOp, PathOpError, Verb};

pub mod traits {
    //! `kurve_path` traits reexported here for convenience.

    pub use crate::geom::Segment;
}

pub mod math {
    //! f32 version of the kurve_geom types used everywhere.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }
}

/// Parameters for the flattening of curves.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FlattenOptions {
    /// Maximum allowed distance to the curve when building an approximation.
    ///
    /// Default value: `FlattenOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,
}

impl FlattenOptions {
    /// Default flattening tolerance.
    pub const DEFAULT_TOLERANCE: f32 = 0.5;

    pub const DEFAULT: Self = FlattenOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
    };

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn flatten_options() {
    assert_eq!(FlattenOptions::default().tolerance, 0.5);
    assert_eq!(FlattenOptions::tolerance(0.1).tolerance, 0.1);
    assert_eq!(
        FlattenOptions::DEFAULT.with_tolerance(2.0),
        FlattenOptions::tolerance(2.0)
    );
}
