//! Builds the jelly outline for the resting, dragged and fired states.
//!
//! All three builders work in edge space (see [`crate::edge`]) and map the
//! result back to container coordinates, so a single implementation covers
//! every edge.  Points below are written `(lateral, stretch)`.
//!
//! ```text
//!  lateral
//!    │ -extra ─ first.start      (anchor)
//!    │              ╲ c1          (l·inner, anchor)
//!    │               ╲ c2         (l − outer, s)
//!    │                ● joint     (l, s)
//!    │               ╱ c1'        (l + outer, s)
//!    │              ╱ c2'         (l + (L − l)(1 − inner), anchor)
//!    │ L+extra ─ second.end      (anchor)
//!    └──────────────────────────▶ stretch
//! ```
//!
//! `extra` is a quarter of the edge length so the outline overshoots both
//! corners and no seam shows while the shape bulges.

use crate::bezier::Curve;
use crate::edge::{EdgeDescriptor, EdgeSide};
use crate::geometry::Size;
use crate::gesture::DragSample;
use crate::path::Path;

/// Divider applied to the edge length to get the corner overshoot.
pub const EXTRA_SPACE_DIVIDER: f64 = 4.0;

/// How far the fired shape balloons, in multiples of the stretch extent.
pub const FIRED_STRETCH_FACTOR: f64 = 2.0;

/// Geometry inputs shared by every builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathInput {
    pub edge: EdgeSide,
    pub container: Size,
    pub inner_point_ratio: f64,
    pub outer_point_ratio: f64,
}

impl PathInput {
    pub fn new(edge: EdgeSide, container: Size, inner_point_ratio: f64, outer_point_ratio: f64) -> Self {
        Self {
            edge,
            container,
            inner_point_ratio,
            outer_point_ratio,
        }
    }

    fn extra_space(&self, d: &EdgeDescriptor) -> f64 {
        d.lateral_extent(self.container) / EXTRA_SPACE_DIVIDER
    }
}

/// The outline with no drag applied: flat along the edge, joint at the
/// midpoint of the edge.
pub fn build_resting_path(input: &PathInput) -> Path {
    let d = input.edge.descriptor();
    let center = d.lateral_extent(input.container) / 2.0;
    bulge(input, &d, center, 0.0)
}

/// The outline while the user drags: the joint sits on the touch point.
///
/// A zero `stretch_distance` gives a flat outline whose joint is at the
/// touch's lateral position.
pub fn build_dragged_path(input: &PathInput, drag: &DragSample) -> Path {
    let d = input.edge.descriptor();
    bulge(input, &d, drag.lateral_position, drag.stretch_distance)
}

/// The outline after a successful pull: the joint is pushed
/// [`FIRED_STRETCH_FACTOR`] times the stretch extent past the edge, well
/// beyond the opposite side of the container.
pub fn build_fired_path(input: &PathInput) -> Path {
    let d = input.edge.descriptor();
    let lateral = d.lateral_extent(input.container);
    let stretch = d.stretch_extent(input.container);
    let anchor = d.anchor(input.container);
    let extra = input.extra_space(&d);
    let center = lateral / 2.0;

    let far = anchor + d.sign * stretch * FIRED_STRETCH_FACTOR;
    let mid = anchor + d.sign * stretch * FIRED_STRETCH_FACTOR / 2.0;

    let joint = d.point(center, far);
    let first = Curve::new(
        d.point(-extra, anchor),
        joint,
        d.point(-extra, mid),
        d.point(center / 2.0, far),
    );
    let second = Curve::new(
        joint,
        d.point(lateral + extra, anchor),
        d.point(center + extra, far),
        d.point(lateral + extra, mid),
    );
    Path::new(first, second)
}

/// Shared shape for the resting and dragged states.
fn bulge(input: &PathInput, d: &EdgeDescriptor, touch: f64, stretch_distance: f64) -> Path {
    let lateral = d.lateral_extent(input.container);
    let anchor = d.anchor(input.container);
    let extra = input.extra_space(d);
    let outer_delta = input.outer_point_ratio * lateral;
    let inner = input.inner_point_ratio;
    let tip = anchor + stretch_distance;

    let joint = d.point(touch, tip);
    let first = Curve::new(
        d.point(-extra, anchor),
        joint,
        d.point(touch * inner, anchor),
        d.point(touch - outer_delta, tip),
    );
    let second = Curve::new(
        joint,
        d.point(lateral + extra, anchor),
        d.point(touch + outer_delta, tip),
        d.point(touch + (lateral - touch) * (1.0 - inner), anchor),
    );
    Path::new(first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn input(edge: EdgeSide) -> PathInput {
        PathInput::new(edge, Size::new(300.0, 600.0), 0.4, 0.25)
    }

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn left_dragged_path_matches_touch() {
        let drag = DragSample::new(300.0, 50.0);
        let path = build_dragged_path(&input(EdgeSide::Left), &drag);
        assert_eq!(path.first.end, Point::new(50.0, 300.0));
        assert_eq!(path.first.start, Point::new(0.0, -150.0));
        assert_eq!(path.first.control1, Point::new(0.0, 120.0));
        assert_eq!(path.first.control2, Point::new(50.0, 150.0));
        assert_eq!(path.second.control1, Point::new(50.0, 450.0));
        assert_eq!(path.second.control2, Point::new(0.0, 480.0));
        assert_eq!(path.second.end, Point::new(0.0, 750.0));
    }

    #[test]
    fn right_dragged_path_measures_from_far_edge() {
        let drag = DragSample::new(300.0, -50.0);
        let path = build_dragged_path(&input(EdgeSide::Right), &drag);
        assert_eq!(path.joint(), Point::new(250.0, 300.0));
        assert_eq!(path.first.start, Point::new(300.0, -150.0));
        assert_eq!(path.second.end, Point::new(300.0, 750.0));
    }

    #[test]
    fn top_and_bottom_use_width_as_edge_length() {
        let drag = DragSample::new(100.0, 40.0);
        let top = build_dragged_path(&input(EdgeSide::Top), &drag);
        assert_eq!(top.joint(), Point::new(100.0, 40.0));
        assert_eq!(top.first.start, Point::new(-75.0, 0.0));
        assert_eq!(top.second.end, Point::new(375.0, 0.0));
        assert_eq!(top.first.control2, Point::new(100.0 - 75.0, 40.0));

        let drag = DragSample::new(100.0, -40.0);
        let bottom = build_dragged_path(&input(EdgeSide::Bottom), &drag);
        assert_eq!(bottom.joint(), Point::new(100.0, 560.0));
        assert_eq!(bottom.first.start, Point::new(-75.0, 600.0));
        assert_eq!(bottom.second.control2, Point::new(100.0 + 200.0 * 0.6, 600.0));
    }

    #[test]
    fn resting_path_is_centered_for_every_edge() {
        let size = Size::new(300.0, 600.0);
        for edge in EdgeSide::ALL {
            let d = edge.descriptor();
            let path = build_resting_path(&input(edge));
            assert_eq!(d.lateral(path.joint()), d.lateral_extent(size) / 2.0, "{edge}");
            assert_eq!(d.stretch(path.joint()), d.anchor(size), "{edge}");
        }
    }

    #[test]
    fn resting_path_lies_flat_on_the_edge() {
        let size = Size::new(300.0, 600.0);
        for edge in EdgeSide::ALL {
            let d = edge.descriptor();
            let path = build_resting_path(&input(edge));
            for curve in [path.first, path.second] {
                for p in [curve.start, curve.control1, curve.control2, curve.end] {
                    assert_eq!(d.stretch(p), d.anchor(size), "{edge}");
                }
            }
        }
    }

    #[test]
    fn curves_always_share_the_joint() {
        let drags = [
            DragSample::new(0.0, 0.0),
            DragSample::new(123.0, 45.0),
            DragSample::new(-20.0, -300.0),
            DragSample::new(900.0, 1.5),
        ];
        for edge in EdgeSide::ALL {
            let inp = input(edge);
            for drag in &drags {
                let path = build_dragged_path(&inp, drag);
                assert_eq!(path.first.end, path.second.start);
            }
            let rest = build_resting_path(&inp);
            assert_eq!(rest.first.end, rest.second.start);
            let fired = build_fired_path(&inp);
            assert_eq!(fired.first.end, fired.second.start);
        }
    }

    #[test]
    fn zero_touch_is_symmetric_about_the_corner() {
        let path = build_dragged_path(&input(EdgeSide::Left), &DragSample::new(0.0, 0.0));
        assert_eq!(path.joint(), Point::new(0.0, 0.0));
        assert_eq!(path.first.control1, Point::new(0.0, 0.0));
        assert_close(path.first.control2, Point::new(0.0, -150.0));
        assert_close(path.second.control1, Point::new(0.0, 150.0));
    }

    #[test]
    fn fired_path_balloons_past_far_edge() {
        let left = build_fired_path(&input(EdgeSide::Left));
        assert_eq!(left.joint(), Point::new(600.0, 300.0));
        assert_eq!(left.first.control1, Point::new(300.0, -150.0));
        assert_eq!(left.first.control2, Point::new(600.0, 150.0));
        assert_eq!(left.second.control1, Point::new(600.0, 450.0));
        assert_eq!(left.second.control2, Point::new(300.0, 750.0));

        let right = build_fired_path(&input(EdgeSide::Right));
        assert_eq!(right.joint(), Point::new(-300.0, 300.0));
        assert_eq!(right.first.control1, Point::new(0.0, -150.0));

        let top = build_fired_path(&input(EdgeSide::Top));
        assert_eq!(top.joint(), Point::new(150.0, 1200.0));
        assert_eq!(top.first.control1, Point::new(-75.0, 600.0));
        assert_eq!(top.second.control1, Point::new(225.0, 1200.0));

        let bottom = build_fired_path(&input(EdgeSide::Bottom));
        assert_eq!(bottom.joint(), Point::new(150.0, -600.0));
        assert_eq!(bottom.second.control2, Point::new(375.0, 0.0));
    }

    #[test]
    fn zero_size_container_is_degenerate_but_finite() {
        let inp = PathInput::new(EdgeSide::Top, Size::new(0.0, 0.0), 0.4, 0.25);
        for path in [
            build_resting_path(&inp),
            build_fired_path(&inp),
            build_dragged_path(&inp, &DragSample::new(0.0, 0.0)),
        ] {
            for p in path.to_elements().iter().filter_map(|e| match e {
                crate::path::PathElement::MoveTo(p) => Some(*p),
                crate::path::PathElement::CurveTo { to, .. } => Some(*to),
                crate::path::PathElement::Close => None,
            }) {
                assert_eq!(p, Point::new(0.0, 0.0));
            }
        }
    }
}
