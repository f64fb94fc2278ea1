//! Cubic Bézier math: point evaluation on a [`Curve`] and CSS-like
//! cubic-bezier easing for scalar interpolation.
//!
//! Every other module calls into this one instead of re-deriving the
//! polynomial.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// A cubic Bézier segment described by its two endpoints and two control
/// points.
///
/// At rest all four points may coincide; that is still a valid curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub start: Point,
    pub end: Point,
    pub control1: Point,
    pub control2: Point,
}

impl Curve {
    pub const fn new(start: Point, end: Point, control1: Point, control2: Point) -> Self {
        Self {
            start,
            end,
            control1,
            control2,
        }
    }

    /// Shorthand for [`evaluate`]`(t, self)`.
    pub fn point_at(&self, t: f64) -> Point {
        evaluate(t, self)
    }

    /// Interpolate every point of the curve towards `other`.
    pub fn lerp(&self, other: &Curve, t: f64) -> Curve {
        Curve {
            start: self.start.lerp(other.start, t),
            end: self.end.lerp(other.end, t),
            control1: self.control1.lerp(other.control1, t),
            control2: self.control2.lerp(other.control2, t),
        }
    }
}

/// Evaluate `curve` at parameter `t`.
///
/// Per axis: `B(t) = (1−t)³·p0 + 3(1−t)²t·p1 + 3(1−t)t²·p2 + t³·p3`.
/// `t` is not clamped; values outside `[0, 1]` extrapolate along the
/// polynomial.  `t = 0` yields `start` and `t = 1` yields `end` exactly.
pub fn evaluate(t: f64, curve: &Curve) -> Point {
    Point {
        x: cubic(t, curve.start.x, curve.control1.x, curve.control2.x, curve.end.x),
        y: cubic(t, curve.start.y, curve.control1.y, curve.control2.y, curve.end.y),
    }
}

#[inline]
fn cubic(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

//  Easing

/// A CSS `cubic-bezier(x1, y1, x2, y2)` timing curve.
///
/// Endpoints are fixed at `(0, 0)` and `(1, 1)`.  `x1` and `x2` must lie in
/// `[0, 1]` for the curve to be a function of time; `y1` / `y2` may leave
/// that range to produce overshoot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicEasing {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicEasing {
    /// CSS `ease`.
    pub const EASE: Self = Self::new(0.25, 0.10, 0.25, 1.00);

    /// Ease-out with overshoot past the target before coming back, used
    /// where a spring would be under-damped.
    pub const OVERSHOOT: Self = Self::new(0.34, 1.56, 0.64, 1.00);

    /// Monotone ease-out, used where a spring would be critically damped.
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased progress for normalized time `u` (clamped to `[0, 1]`).
    pub fn ease(&self, u: f64) -> f64 {
        bezier_scalar(0.0, 1.0, u, self.x1, self.y1, self.x2, self.y2)
    }
}

/// Interpolate between two scalars using a CSS-like cubic-bezier easing.
///
/// Control points are (0,0), (x1,y1), (x2,y2), (1,1).
/// `u` is normalized time in [0,1].
pub fn bezier_scalar(a: f64, b: f64, u: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    // Polynomial coefficients for x(t) and y(t) with the endpoints pinned:
    // B(t) = ((a*t + b)*t + c)*t
    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let u = u.clamp(0.0, 1.0);
    let t = solve_t_for_x(u, ax, bx, cx);
    let eased = sample_curve(ay, by, cy, t);

    a + (b - a) * eased
}

#[inline]
fn sample_curve(a: f64, b: f64, c: f64, t: f64) -> f64 {
    ((a * t + b) * t + c) * t
}

/// Solve `x(t) = u` for `t` in `[0, 1]`.
fn solve_t_for_x(u: f64, ax: f64, bx: f64, cx: f64) -> f64 {
    // Newton-Raphson from u as the initial guess.
    let mut t = u;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - u;
        if x.abs() < 1e-9 {
            return t;
        }
        let dx = (3.0 * ax * t + 2.0 * bx) * t + cx;
        if dx.abs() < 1e-9 {
            break;
        }
        t -= x / dx;
        if !(0.0..=1.0).contains(&t) {
            break;
        }
    }

    // Bisection fallback.
    let mut lo = 0.0;
    let mut hi = 1.0;
    t = u;
    for _ in 0..48 {
        let x = sample_curve(ax, bx, cx, t);
        if (x - u).abs() < 1e-10 {
            return t;
        }
        if x < u {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    t
}
