//! Which container edge the control hangs from, and the axis mapping that
//! lets one algorithm serve all four edges.
//!
//! Geometry is computed in *edge space*: a `lateral` coordinate running
//! along the anchored edge and a `stretch` coordinate running perpendicular
//! to it.  [`EdgeSide::descriptor`] says how edge space maps onto the
//! container's `x`/`y` axes and which way is "inward".
//!
//! | Edge     | stretch axis | lateral axis | anchor (stretch) | sign |
//! |----------|--------------|--------------|------------------|------|
//! | `Left`   | x            | y            | `0`              | `+1` |
//! | `Right`  | x            | y            | `width`          | `-1` |
//! | `Top`    | y            | x            | `0`              | `+1` |
//! | `Bottom` | y            | x            | `height`         | `-1` |

use crate::geometry::{Point, Size};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The container edge the control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// A container axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn of(self, p: Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    pub fn extent(self, size: Size) -> f64 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }
}

/// Axis mapping and sign convention for one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDescriptor {
    /// Axis perpendicular to the edge; the shape bulges along it.
    pub stretch_axis: Axis,
    /// Axis parallel to the edge.
    pub lateral_axis: Axis,
    /// `+1` when pulling inward increases the stretch coordinate (Left/Top),
    /// `-1` when it decreases it (Right/Bottom).
    pub sign: f64,
}

impl EdgeDescriptor {
    /// Stretch coordinate of the edge itself.
    pub fn anchor(&self, size: Size) -> f64 {
        if self.sign > 0.0 {
            0.0
        } else {
            self.stretch_axis.extent(size)
        }
    }

    pub fn stretch_extent(&self, size: Size) -> f64 {
        self.stretch_axis.extent(size)
    }

    pub fn lateral_extent(&self, size: Size) -> f64 {
        self.lateral_axis.extent(size)
    }

    /// Build a container point from edge-space coordinates.
    pub fn point(&self, lateral: f64, stretch: f64) -> Point {
        match self.stretch_axis {
            Axis::X => Point::new(stretch, lateral),
            Axis::Y => Point::new(lateral, stretch),
        }
    }

    pub fn lateral(&self, p: Point) -> f64 {
        self.lateral_axis.of(p)
    }

    pub fn stretch(&self, p: Point) -> f64 {
        self.stretch_axis.of(p)
    }
}

impl EdgeSide {
    pub const ALL: [EdgeSide; 4] = [EdgeSide::Left, EdgeSide::Right, EdgeSide::Top, EdgeSide::Bottom];

    pub fn descriptor(self) -> EdgeDescriptor {
        match self {
            EdgeSide::Left => EdgeDescriptor {
                stretch_axis: Axis::X,
                lateral_axis: Axis::Y,
                sign: 1.0,
            },
            EdgeSide::Right => EdgeDescriptor {
                stretch_axis: Axis::X,
                lateral_axis: Axis::Y,
                sign: -1.0,
            },
            EdgeSide::Top => EdgeDescriptor {
                stretch_axis: Axis::Y,
                lateral_axis: Axis::X,
                sign: 1.0,
            },
            EdgeSide::Bottom => EdgeDescriptor {
                stretch_axis: Axis::Y,
                lateral_axis: Axis::X,
                sign: -1.0,
            },
        }
    }
}

impl fmt::Display for EdgeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeSide::Left => write!(f, "left"),
            EdgeSide::Right => write!(f, "right"),
            EdgeSide::Top => write!(f, "top"),
            EdgeSide::Bottom => write!(f, "bottom"),
        }
    }
}

/// Parse an edge name (case-insensitive; surrounding whitespace ignored).
fn parse_edge(s: &str) -> Option<EdgeSide> {
    match s.trim().to_lowercase().as_str() {
        "left" => Some(EdgeSide::Left),
        "right" => Some(EdgeSide::Right),
        "top" => Some(EdgeSide::Top),
        "bottom" => Some(EdgeSide::Bottom),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for EdgeSide {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_edge(&s).ok_or_else(|| DeError::custom(format!("invalid edge: {:?}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_display() {
        assert_eq!(EdgeSide::Left.to_string(), "left");
        assert_eq!(EdgeSide::Right.to_string(), "right");
        assert_eq!(EdgeSide::Top.to_string(), "top");
        assert_eq!(EdgeSide::Bottom.to_string(), "bottom");
    }

    #[test]
    fn edge_deserialize_is_case_insensitive() {
        let e: EdgeSide = serde_json::from_str(r#""Left""#).unwrap();
        assert_eq!(e, EdgeSide::Left);
        let e: EdgeSide = serde_json::from_str(r#"" BOTTOM ""#).unwrap();
        assert_eq!(e, EdgeSide::Bottom);
        assert!(serde_json::from_str::<EdgeSide>(r#""diagonal""#).is_err());
    }

    #[test]
    fn anchors_sit_on_the_edge() {
        let size = Size::new(300.0, 600.0);
        assert_eq!(EdgeSide::Left.descriptor().anchor(size), 0.0);
        assert_eq!(EdgeSide::Right.descriptor().anchor(size), 300.0);
        assert_eq!(EdgeSide::Top.descriptor().anchor(size), 0.0);
        assert_eq!(EdgeSide::Bottom.descriptor().anchor(size), 600.0);
    }

    #[test]
    fn point_mapping_round_trips_through_axes() {
        for edge in EdgeSide::ALL {
            let d = edge.descriptor();
            let p = d.point(12.0, 34.0);
            assert_eq!(d.lateral(p), 12.0, "{edge}");
            assert_eq!(d.stretch(p), 34.0, "{edge}");
        }
    }

    #[test]
    fn extents_follow_axes() {
        let size = Size::new(300.0, 600.0);
        let left = EdgeSide::Left.descriptor();
        assert_eq!(left.stretch_extent(size), 300.0);
        assert_eq!(left.lateral_extent(size), 600.0);
        let top = EdgeSide::Top.descriptor();
        assert_eq!(top.stretch_extent(size), 600.0);
        assert_eq!(top.lateral_extent(size), 300.0);
    }

    #[test]
    fn opposite_edges_differ_only_in_sign() {
        let left = EdgeSide::Left.descriptor();
        let right = EdgeSide::Right.descriptor();
        assert_ne!(left, right);
        assert_eq!(EdgeDescriptor { sign: -1.0, ..left }, right);
        assert_eq!(EdgeSide::Top.descriptor(), EdgeDescriptor { sign: 1.0, ..EdgeSide::Bottom.descriptor() });
    }
}
