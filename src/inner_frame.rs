//! Layout of the floating content view that rides on the bulge.
//!
//! The view is placed between two samples of the outline: one at
//! `t = 0.7` on the first curve (past its midpoint) and one at `t = 0.3` on
//! the second (before its midpoint).  Together they bracket the widest
//! region of the bulge.

use crate::bezier::evaluate;
use crate::edge::EdgeSide;
use crate::geometry::{Rect, Size};
use crate::gesture::DragSample;
use crate::path::Path;

/// Parameter offset from the curve ends used to sample the anchor points.
pub const BEZIER_CURVE_DELTA: f64 = 0.3;

/// Extent of the content view along the stretch axis.
pub const INNER_VIEW_SIZE: f64 = 100.0;

/// Tilt at the lateral extremes of the edge, in degrees.
pub const MAX_DEGREES_TRANSFORM: f64 = 40.0;

/// Rectangle of the content view for `path`.
///
/// Along the lateral axis the rectangle spans the two anchor points.  Along
/// the stretch axis it is [`INNER_VIEW_SIZE`] deep and ends at the first
/// anchor; a positive `offset` shifts it inward, towards the container.
pub fn compute_frame(path: &Path, offset: f64, edge: EdgeSide) -> Rect {
    let d = edge.descriptor();
    let p1 = evaluate(1.0 - BEZIER_CURVE_DELTA, &path.first);
    let p2 = evaluate(BEZIER_CURVE_DELTA, &path.second);

    let lateral_origin = d.lateral(p1);
    let lateral_size = d.lateral(p2) - d.lateral(p1);
    let stretch_origin = if d.sign > 0.0 {
        d.stretch(p1) - INNER_VIEW_SIZE + offset
    } else {
        d.stretch(p1) - offset
    };

    let origin = d.point(lateral_origin, stretch_origin);
    let size = d.point(lateral_size, INNER_VIEW_SIZE);
    Rect {
        origin,
        size: Size::new(size.x, size.y),
    }
}

/// Tilt of the content view in radians for the given drag.
///
/// The lateral position is normalised so the center of the edge maps to `0`
/// and the two ends map to `-1` / `1`, then scaled by
/// [`MAX_DEGREES_TRANSFORM`].  Right and Bottom negate the result so the
/// view always leans into the pull.  An edge of zero length gives `0`.
pub fn compute_rotation(drag: &DragSample, edge: EdgeSide, container: Size) -> f64 {
    let d = edge.descriptor();
    let extent = d.lateral_extent(container);
    if extent == 0.0 {
        return 0.0;
    }
    let remaining = extent - drag.lateral_position;
    let result = 1.0 - remaining / (extent / 2.0);
    (d.sign * MAX_DEGREES_TRANSFORM * result).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_builder::{build_dragged_path, build_resting_path, PathInput};

    const SIZE: Size = Size::new(300.0, 600.0);

    fn input(edge: EdgeSide) -> PathInput {
        PathInput::new(edge, SIZE, 0.4, 0.25)
    }

    #[test]
    fn left_frame_has_fixed_stretch_extent() {
        let path = build_dragged_path(&input(EdgeSide::Left), &DragSample::new(300.0, 50.0));
        let frame = compute_frame(&path, 0.0, EdgeSide::Left);
        assert_eq!(frame.size.width, INNER_VIEW_SIZE);
        assert!(frame.size.height > 0.0);

        let p1 = evaluate(0.7, &path.first);
        let p2 = evaluate(0.3, &path.second);
        assert!((frame.origin.x - (p1.x - 100.0)).abs() < 1e-9);
        assert!((frame.origin.y - p1.y).abs() < 1e-9);
        assert!((frame.size.height - (p2.y - p1.y)).abs() < 1e-9);
    }

    #[test]
    fn frame_is_laterally_centered_on_symmetric_drag() {
        let path = build_dragged_path(&input(EdgeSide::Left), &DragSample::new(300.0, 80.0));
        let frame = compute_frame(&path, 0.0, EdgeSide::Left);
        assert!((frame.center().y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn offset_moves_frame_inward() {
        for edge in EdgeSide::ALL {
            let d = edge.descriptor();
            let path = build_dragged_path(&input(edge), &DragSample::new(100.0, d.sign * 60.0));
            let base = compute_frame(&path, 0.0, edge);
            let shifted = compute_frame(&path, 10.0, edge);
            let moved = d.stretch(shifted.origin) - d.stretch(base.origin);
            assert!((moved - d.sign * 10.0).abs() < 1e-9, "{edge}: moved {moved}");
        }
    }

    #[test]
    fn right_frame_starts_at_first_anchor() {
        let path = build_dragged_path(&input(EdgeSide::Right), &DragSample::new(300.0, -50.0));
        let frame = compute_frame(&path, 5.0, EdgeSide::Right);
        let p1 = evaluate(0.7, &path.first);
        assert!((frame.origin.x - (p1.x - 5.0)).abs() < 1e-9);
        assert_eq!(frame.size.width, INNER_VIEW_SIZE);
    }

    #[test]
    fn top_and_bottom_frames_are_wide_not_tall() {
        for edge in [EdgeSide::Top, EdgeSide::Bottom] {
            let frame = compute_frame(&build_resting_path(&input(edge)), 0.0, edge);
            assert_eq!(frame.size.height, INNER_VIEW_SIZE, "{edge}");
            assert!(frame.size.width > 0.0, "{edge}");
        }
    }

    #[test]
    fn rotation_is_zero_at_center() {
        for edge in EdgeSide::ALL {
            let center = edge.descriptor().lateral_extent(SIZE) / 2.0;
            let r = compute_rotation(&DragSample::new(center, 30.0), edge, SIZE);
            assert!(r.abs() < 1e-12, "{edge}: {r}");
        }
    }

    #[test]
    fn rotation_is_maximal_at_extremes() {
        for edge in EdgeSide::ALL {
            let d = edge.descriptor();
            let extent = d.lateral_extent(SIZE);
            let high = compute_rotation(&DragSample::new(extent, 0.0), edge, SIZE).to_degrees();
            let low = compute_rotation(&DragSample::new(0.0, 0.0), edge, SIZE).to_degrees();
            assert!((high - d.sign * 40.0).abs() < 1e-9, "{edge}: {high}");
            assert!((low + d.sign * 40.0).abs() < 1e-9, "{edge}: {low}");
        }
    }

    #[test]
    fn rotation_on_empty_edge_is_zero() {
        let r = compute_rotation(&DragSample::new(10.0, 10.0), EdgeSide::Left, Size::new(0.0, 0.0));
        assert_eq!(r, 0.0);
    }
}
