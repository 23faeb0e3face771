#![deny(bare_trait_objects)]

//! 2D curve segments and their flattening.
//!
//! # Crates
//!
//! This meta-crate (`kurve`) reexports the following sub-crates for convenience:
//!
//! * [![crate](https://img.shields.io/crates/v/kurve_path.svg)](https://crates.io/crates/kurve_path)
//!   [![doc](https://docs.rs/kurve_path/badge.svg)](https://docs.rs/kurve_path) -
//!   **kurve_path** - The path operation encoding and the [`Curve`](path/enum.Curve.html)
//!   type that dispatches to all segment kinds.
//! * [![crate](https://img.shields.io/crates/v/kurve_geom.svg)](https://crates.io/crates/kurve_geom)
//!   [![doc](https://docs.rs/kurve_geom/badge.svg)](https://docs.rs/kurve_geom) -
//!   **kurve_geom** - Line, cubic bézier and conic segment math, and the adaptive
//!   flattening they share.
//!
//! Each `kurve_<name>` crate is reexported as a `<name>` module in `kurve`. For example:
//!
//! ```ignore
//! extern crate kurve_path;
//! use kurve_path::Curve;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate kurve;
//! use kurve::path::Curve;
//! ```
//!
//! # Feature flags
//!
//! Serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ```
//! extern crate kurve;
//! use kurve::math::point;
//! use kurve::path::{Curve, PathOp};
//!
//! fn main() {
//!     let curve = Curve::from_op(&PathOp::cubic(
//!         point(0.0, 0.0),
//!         point(10.0, 100.0),
//!         point(90.0, 100.0),
//!         point(100.0, 0.0),
//!     ));
//!
//!     // Split the curve in two at its middle.
//!     let (first, second) = curve.split(0.5);
//!     assert_eq!(first.to(), second.from());
//!
//!     // Approximate it with line segments.
//!     let mut points = vec![curve.from()];
//!     curve.decompose(0.1, &mut |line, _| {
//!         points.push(line.to);
//!         true
//!     });
//!
//!     println!("{:?}", points);
//! }
//! ```

pub extern crate kurve_path;

pub use kurve_path as path;
pub use path::geom;
pub use path::math;
