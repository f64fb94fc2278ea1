//! The two-curve outline of the jelly shape and its flat element encoding.
//!
//! A [`Path`] is two [`Curve`]s joined at the bulge tip.  Renderers draw it
//! as `MoveTo → CurveTo → CurveTo → Close`; the closing segment is the
//! straight "back" edge that runs along the container boundary.
//!
//! Host animation drivers that read the in-flight outline back from a
//! renderer get it as an element list rather than a [`Path`].
//! [`Path::from_elements`] is the helper such a driver calls from its
//! [`sample`](crate::traits::AnimationDriver::sample): it refuses anything
//! that is not exactly the expected shape, and the driver returns the
//! [`PathDecodeError`] so the control skips the frame.  The built-in
//! [`EasingDriver`](crate::driver::EasingDriver) interpolates typed paths
//! and never needs it.

use crate::bezier::Curve;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Outline of the jelly shape.
///
/// Invariant: `first.end == second.start`.  Paths are never mutated in place;
/// every drag sample and every transition produces a fresh value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub first: Curve,
    pub second: Curve,
}

/// One drawing instruction of a path outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathElement {
    MoveTo(Point),
    CurveTo {
        control1: Point,
        control2: Point,
        to: Point,
    },
    Close,
}

/// Why an element list could not be turned back into a [`Path`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathDecodeError {
    #[error("expected {expected} elements, got {got}")]
    Length { expected: usize, got: usize },
    #[error("element {index}: expected {expected}, got {got:?}")]
    UnexpectedElement {
        index: usize,
        expected: &'static str,
        got: PathElement,
    },
    #[error("element {index}: non-finite coordinate")]
    NonFinite { index: usize },
}

impl Path {
    pub const fn new(first: Curve, second: Curve) -> Self {
        Self { first, second }
    }

    /// The tip where the two curves meet.
    pub fn joint(&self) -> Point {
        self.first.end
    }

    /// Interpolate every control point towards `other`.
    pub fn lerp(&self, other: &Path, t: f64) -> Path {
        Path {
            first: self.first.lerp(&other.first, t),
            second: self.second.lerp(&other.second, t),
        }
    }

    /// Encode as `MoveTo, CurveTo, CurveTo, Close`.
    pub fn to_elements(&self) -> [PathElement; 4] {
        [
            PathElement::MoveTo(self.first.start),
            PathElement::CurveTo {
                control1: self.first.control1,
                control2: self.first.control2,
                to: self.first.end,
            },
            PathElement::CurveTo {
                control1: self.second.control1,
                control2: self.second.control2,
                to: self.second.end,
            },
            PathElement::Close,
        ]
    }

    /// Decode an element list produced by [`to_elements`](Path::to_elements)
    /// (or by a renderer that interpolated one).
    ///
    /// A trailing `Close` is optional; anything else out of place is an error.
    pub fn from_elements(elements: &[PathElement]) -> Result<Path, PathDecodeError> {
        let body = match elements {
            [body @ .., PathElement::Close] => body,
            _ => elements,
        };
        if body.len() != 3 {
            return Err(PathDecodeError::Length {
                expected: 3,
                got: body.len(),
            });
        }

        let start = match body[0] {
            PathElement::MoveTo(p) => p,
            other => {
                return Err(PathDecodeError::UnexpectedElement {
                    index: 0,
                    expected: "MoveTo",
                    got: other,
                })
            }
        };
        let (c1, c2, joint) = curve_to(body, 1)?;
        let (d1, d2, end) = curve_to(body, 2)?;

        let path = Path {
            first: Curve::new(start, joint, c1, c2),
            second: Curve::new(joint, end, d1, d2),
        };
        for (index, points) in [
            (0, &[start][..]),
            (1, &[c1, c2, joint][..]),
            (2, &[d1, d2, end][..]),
        ] {
            if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
                return Err(PathDecodeError::NonFinite { index });
            }
        }
        Ok(path)
    }
}

fn curve_to(body: &[PathElement], index: usize) -> Result<(Point, Point, Point), PathDecodeError> {
    match body[index] {
        PathElement::CurveTo {
            control1,
            control2,
            to,
        } => Ok((control1, control2, to)),
        other => Err(PathDecodeError::UnexpectedElement {
            index,
            expected: "CurveTo",
            got: other,
        }),
    }
}
