//! The compact encoding of a path segment.
//!
//! A [`PathOp`] is a [`Verb`] along with the control points the verb expects:
//!
//! | Verb     | Points                              |
//! |----------|-------------------------------------|
//! | `Move`   | `[to]`                              |
//! | `Close`  | `[from, to]`                        |
//! | `Line`   | `[from, to]`                        |
//! | `Cubic`  | `[from, ctrl1, ctrl2, to]`          |
//! | `Conic`  | `[from, ctrl, (weight, _), to]`     |
//!
//! The weight of a conic is stored in the x coordinate of its third point. The y
//! coordinate of that point carries no meaning and is preserved as-is.

use crate::geom::arrayvec::ArrayVec;
use crate::math::{point, Point};

use std::convert::TryFrom;
use thiserror::Error;

/// The kind of a path operation.
///
/// The discriminants are stable and can be used to store verbs as bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Verb {
    Move = 0,
    Close = 1,
    Line = 2,
    Cubic = 3,
    Conic = 4,
}

impl Verb {
    /// Number of points stored along with this verb.
    #[inline]
    pub fn num_points(self) -> usize {
        match self {
            Verb::Move => 1,
            Verb::Close | Verb::Line => 2,
            Verb::Cubic | Verb::Conic => 4,
        }
    }

    /// Whether this verb describes a segment, as opposed to the start of a sub-path.
    #[inline]
    pub fn is_segment(self) -> bool {
        self != Verb::Move
    }
}

impl From<Verb> for u8 {
    fn from(verb: Verb) -> u8 {
        verb as u8
    }
}

impl TryFrom<u8> for Verb {
    type Error = PathOpError;

    fn try_from(value: u8) -> Result<Self, PathOpError> {
        Ok(match value {
            0 => Verb::Move,
            1 => Verb::Close,
            2 => Verb::Line,
            3 => Verb::Cubic,
            4 => Verb::Conic,
            _ => {
                return Err(PathOpError::UnknownVerb(value));
            }
        })
    }
}

/// An error that can happen when building a path operation from untrusted data.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum PathOpError {
    #[error("Unknown verb tag {0}.")]
    UnknownVerb(u8),
    #[error("{verb:?} expects {expected} points, got {got}.")]
    PointCount {
        verb: Verb,
        expected: usize,
        got: usize,
    },
    #[error("Invalid conic weight {0}, expected a finite number greater than zero.")]
    InvalidWeight(f32),
}

/// A path segment in its stored form.
///
/// Deserialized operations go through the same checks as `PathOp::try_new`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(Serialize, Deserialize),
    serde(try_from = "UncheckedPathOp")
)]
pub struct PathOp {
    verb: Verb,
    points: ArrayVec<Point, 4>,
}

/// The serialized layout of a `PathOp`, before validation.
#[cfg(feature = "serialization")]
#[derive(Deserialize)]
struct UncheckedPathOp {
    verb: Verb,
    points: ArrayVec<Point, 4>,
}

#[cfg(feature = "serialization")]
impl TryFrom<UncheckedPathOp> for PathOp {
    type Error = PathOpError;

    fn try_from(op: UncheckedPathOp) -> Result<Self, PathOpError> {
        PathOp::try_new(op.verb, &op.points)
    }
}

impl PathOp {
    /// Creates an operation from a verb and its points.
    ///
    /// # Panics
    ///
    /// Panics if the number of points doesn't match `verb.num_points()`.
    pub fn new(verb: Verb, points: &[Point]) -> Self {
        assert_eq!(
            points.len(),
            verb.num_points(),
            "{:?} expects {} points",
            verb,
            verb.num_points()
        );

        PathOp {
            verb,
            points: points.iter().cloned().collect(),
        }
    }

    /// Creates an operation from a verb and its points, checking that the point
    /// count matches the verb and that conic weights are finite and positive.
    pub fn try_new(verb: Verb, points: &[Point]) -> Result<Self, PathOpError> {
        if points.len() != verb.num_points() {
            log::debug!(
                "rejected {:?} operation with {} points",
                verb,
                points.len()
            );
            return Err(PathOpError::PointCount {
                verb,
                expected: verb.num_points(),
                got: points.len(),
            });
        }

        if verb == Verb::Conic {
            let weight = points[2].x;
            if !weight.is_finite() || weight <= 0.0 {
                log::debug!("rejected conic operation with weight {}", weight);
                return Err(PathOpError::InvalidWeight(weight));
            }
        }

        Ok(PathOp::new(verb, points))
    }

    /// Decodes a verb stored as a byte and checks its points with `try_new`.
    pub fn from_raw(verb: u8, points: &[Point]) -> Result<Self, PathOpError> {
        PathOp::try_new(Verb::try_from(verb)?, points)
    }

    #[inline]
    pub fn move_to(to: Point) -> Self {
        PathOp::new(Verb::Move, &[to])
    }

    #[inline]
    pub fn line(from: Point, to: Point) -> Self {
        PathOp::new(Verb::Line, &[from, to])
    }

    /// The segment that closes a sub-path, going from its last point back to its first.
    #[inline]
    pub fn close(from: Point, to: Point) -> Self {
        PathOp::new(Verb::Close, &[from, to])
    }

    #[inline]
    pub fn cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        PathOp::new(Verb::Cubic, &[from, ctrl1, ctrl2, to])
    }

    #[inline]
    pub fn conic(from: Point, ctrl: Point, weight: f32, to: Point) -> Self {
        PathOp::new(Verb::Conic, &[from, ctrl, point(weight, 0.0), to])
    }

    #[inline]
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The points stored with the verb, see the [module documentation](index.html).
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.points[0]
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// The weight of a conic operation.
    #[inline]
    pub fn weight(&self) -> Option<f32> {
        match self.verb {
            Verb::Conic => Some(self.points[2].x),
            _ => None,
        }
    }
}

#[test]
fn verb_tags() {
    for verb in &[Verb::Move, Verb::Close, Verb::Line, Verb::Cubic, Verb::Conic] {
        assert_eq!(Verb::try_from(u8::from(*verb)), Ok(*verb));
    }

    assert_eq!(u8::from(Verb::Conic), 4);
    assert_eq!(Verb::try_from(5), Err(PathOpError::UnknownVerb(5)));
    assert_eq!(Verb::try_from(255), Err(PathOpError::UnknownVerb(255)));
}

#[test]
fn op_constructors() {
    let a = point(1.0, 2.0);
    let b = point(3.0, 4.0);
    let c = point(5.0, 6.0);
    let d = point(7.0, 8.0);

    let line = PathOp::line(a, b);
    assert_eq!(line.verb(), Verb::Line);
    assert_eq!(line.points(), &[a, b]);
    assert_eq!(line.weight(), None);

    let close = PathOp::close(b, a);
    assert_eq!(close.verb(), Verb::Close);
    assert_eq!(close.from(), b);
    assert_eq!(close.to(), a);

    let cubic = PathOp::cubic(a, b, c, d);
    assert_eq!(cubic.points(), &[a, b, c, d]);
    assert_eq!(cubic.to(), d);

    let conic = PathOp::conic(a, b, 2.0, d);
    assert_eq!(conic.points(), &[a, b, point(2.0, 0.0), d]);
    assert_eq!(conic.weight(), Some(2.0));

    let move_to = PathOp::move_to(c);
    assert_eq!(move_to.from(), c);
    assert_eq!(move_to.to(), c);
    assert!(!move_to.verb().is_segment());
}

#[test]
fn checked_op() {
    let a = point(0.0, 0.0);
    let b = point(1.0, 1.0);

    assert_eq!(
        PathOp::try_new(Verb::Line, &[a, b]),
        Ok(PathOp::line(a, b))
    );
    assert_eq!(
        PathOp::try_new(Verb::Cubic, &[a, b]),
        Err(PathOpError::PointCount {
            verb: Verb::Cubic,
            expected: 4,
            got: 2
        })
    );
    assert_eq!(
        PathOp::try_new(Verb::Conic, &[a, b, point(0.0, 0.0), a]),
        Err(PathOpError::InvalidWeight(0.0))
    );
    assert_eq!(
        PathOp::try_new(Verb::Conic, &[a, b, point(-1.0, 0.0), a]),
        Err(PathOpError::InvalidWeight(-1.0))
    );
    assert!(PathOp::try_new(Verb::Conic, &[a, b, point(std::f32::INFINITY, 0.0), a]).is_err());
    assert!(PathOp::try_new(Verb::Conic, &[a, b, point(std::f32::NAN, 0.0), a]).is_err());
    assert!(PathOp::try_new(Verb::Conic, &[a, b, point(0.5, 12.0), a]).is_ok());

    assert_eq!(PathOp::from_raw(2, &[a, b]), Ok(PathOp::line(a, b)));
    assert_eq!(
        PathOp::from_raw(9, &[a, b]),
        Err(PathOpError::UnknownVerb(9))
    );
}

#[test]
#[should_panic]
fn point_count_mismatch() {
    PathOp::new(Verb::Line, &[point(0.0, 0.0)]);
}

#[test]
fn error_messages() {
    use std::string::ToString;

    assert_eq!(
        PathOpError::UnknownVerb(7).to_string(),
        "Unknown verb tag 7."
    );
    assert_eq!(
        PathOpError::PointCount {
            verb: Verb::Line,
            expected: 2,
            got: 3
        }
        .to_string(),
        "Line expects 2 points, got 3."
    );
}

#[cfg(feature = "serialization")]
#[test]
fn serialization() {
    let ops = [
        PathOp::move_to(point(-1.5, 2.25)),
        PathOp::close(point(3.0, 4.0), point(-1.5, 2.25)),
        PathOp::line(point(0.1, 0.2), point(1e7, -3e-5)),
        PathOp::cubic(
            point(0.0, 0.0),
            point(10.5, 100.0),
            point(90.0, -50.25),
            point(100.0, 20.0),
        ),
        PathOp::conic(point(1.0, 2.0), point(3.0, 4.0), 0.75, point(5.0, 6.0)),
        PathOp::new(
            Verb::Conic,
            &[
                point(1.0, 2.0),
                point(3.0, 4.0),
                point(2.5, 12.5),
                point(5.0, 6.0),
            ],
        ),
    ];

    for op in &ops {
        let json = serde_json::to_string(op).unwrap();
        let decoded: PathOp = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.verb(), op.verb());
        assert_eq!(decoded.points().len(), op.points().len());
        for (a, b) in decoded.points().iter().zip(op.points()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    let decoded: PathOp = serde_json::from_str(&serde_json::to_string(&ops[5]).unwrap()).unwrap();
    assert_eq!(decoded.points()[2], point(2.5, 12.5));
    assert_eq!(decoded.weight(), Some(2.5));
}

#[cfg(feature = "serialization")]
#[test]
fn deserialization_checks_the_op() {
    let malformed = [
        // Missing the end point.
        r#"{"verb":"Conic","points":[[0.0,0.0],[1.0,1.0],[2.0,0.0]]}"#,
        // Negative weight.
        r#"{"verb":"Conic","points":[[0.0,0.0],[1.0,1.0],[-3.0,0.0],[2.0,2.0]]}"#,
        // Zero weight.
        r#"{"verb":"Conic","points":[[0.0,0.0],[1.0,1.0],[0.0,0.0],[2.0,2.0]]}"#,
        r#"{"verb":"Line","points":[[0.0,0.0]]}"#,
        r#"{"verb":"Cubic","points":[[0.0,0.0],[1.0,1.0]]}"#,
        r#"{"verb":"Move","points":[]}"#,
        r#"{"verb":"Arc","points":[[0.0,0.0],[1.0,1.0]]}"#,
    ];

    for json in &malformed {
        assert!(serde_json::from_str::<PathOp>(json).is_err(), "{}", json);
    }

    let op: PathOp =
        serde_json::from_str(r#"{"verb":"Line","points":[[0.0,0.0],[1.0,1.0]]}"#).unwrap();
    assert_eq!(op, PathOp::line(point(0.0, 0.0), point(1.0, 1.0)));
}
