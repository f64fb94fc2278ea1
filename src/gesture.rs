//! Translates raw drag-gesture samples into edge-relative values.
//!
//! # From a pan gesture to a pull
//!
//! The host's gesture recogniser reports, for every sample:
//!
//! | Field         | Meaning                                          |
//! |---------------|--------------------------------------------------|
//! | `location`    | Absolute touch position inside the container     |
//! | `translation` | Finger travel since the gesture began            |
//! | `phase`       | `Began`, `Changed`, `Ended` or `Cancelled`       |
//!
//! [`GestureAdapter`] projects that onto the anchored edge:
//!
//! 1. The **lateral** position is taken from `location` as-is, so the bulge
//!    tracks the finger exactly along the edge.
//! 2. The **stretch** distance is the `translation` along the stretch axis
//!    multiplied by `flexibility`; a lower value makes the pull feel stiffer.
//! 3. **Progress** is the stretch distance with the edge's sign applied, so
//!    pulling inward is positive on every edge.
//!
//! On release, [`should_fire`] compares progress against
//! `total_progress_size × trigger_threshold`.

use crate::edge::EdgeSide;
use crate::geometry::{Point, Size};
use crate::inner_frame::compute_rotation;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a drag gesture sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GesturePhase {
    /// `Ended` and `Cancelled` both finish the gesture.
    pub fn is_release(self) -> bool {
        matches!(self, GesturePhase::Ended | GesturePhase::Cancelled)
    }
}

/// One raw sample from the host's drag recogniser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    /// Touch position in container coordinates.
    pub location: Point,
    /// Travel since the gesture began.
    pub translation: Point,
    pub phase: GesturePhase,
}

impl GestureSample {
    pub fn new(location: Point, translation: Point, phase: GesturePhase) -> Self {
        Self {
            location,
            translation,
            phase,
        }
    }
}

/// Edge-relative projection of a gesture sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragSample {
    /// Coordinate along the edge.
    pub lateral_position: f64,
    /// Signed translation along the stretch axis, already scaled by
    /// flexibility.  Negative values pull inward on Right/Bottom edges.
    pub stretch_distance: f64,
}

impl DragSample {
    pub const fn new(lateral_position: f64, stretch_distance: f64) -> Self {
        Self {
            lateral_position,
            stretch_distance,
        }
    }
}

/// Per-edge view of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureAdapter {
    edge: EdgeSide,
    container: Size,
}

impl GestureAdapter {
    pub fn new(edge: EdgeSide, container: Size) -> Self {
        Self { edge, container }
    }

    pub fn edge(&self) -> EdgeSide {
        self.edge
    }

    /// Edge-relative touch point.  `flexibility` damps the translation only.
    pub fn touch_point(&self, sample: &GestureSample, flexibility: f64) -> DragSample {
        let d = self.edge.descriptor();
        DragSample {
            lateral_position: d.lateral(sample.location),
            stretch_distance: d.stretch(sample.translation) * flexibility,
        }
    }

    /// Container extent along the stretch axis.
    pub fn total_progress_size(&self) -> f64 {
        self.edge.descriptor().stretch_extent(self.container)
    }

    /// Signed stretch distance; pulling inward is positive on every edge.
    pub fn current_progress(&self, sample: &GestureSample, flexibility: f64) -> f64 {
        progress_of(self.edge, &self.touch_point(sample, flexibility))
    }

    /// Tilt of the floating content view in radians.
    pub fn rotation_angle(&self, sample: &GestureSample, flexibility: f64) -> f64 {
        compute_rotation(&self.touch_point(sample, flexibility), self.edge, self.container)
    }
}

/// Inward progress of an already projected drag.
pub fn progress_of(edge: EdgeSide, drag: &DragSample) -> f64 {
    edge.descriptor().sign * drag.stretch_distance
}

/// Whether a release at `progress` fires the action.
///
/// Fires iff `progress >= total_size * trigger_threshold`; the boundary
/// itself fires.  No hysteresis: the decision is recomputed on every release.
pub fn should_fire(progress: f64, total_size: f64, trigger_threshold: f64) -> bool {
    progress >= total_size * trigger_threshold
}

/// Progress normalised to the stretch extent, `0.0` on an empty container.
pub fn normalised_progress(progress: f64, total_size: f64) -> f64 {
    if total_size == 0.0 {
        0.0
    } else {
        progress / total_size
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = Size::new(300.0, 600.0);

    fn sample(location: (f64, f64), translation: (f64, f64)) -> GestureSample {
        GestureSample::new(
            Point::new(location.0, location.1),
            Point::new(translation.0, translation.1),
            GesturePhase::Changed,
        )
    }

    #[test]
    fn left_touch_point_damps_translation_only() {
        let a = GestureAdapter::new(EdgeSide::Left, SIZE);
        let drag = a.touch_point(&sample((80.0, 300.0), (100.0, 20.0)), 0.5);
        assert_eq!(drag, DragSample::new(300.0, 50.0));
    }

    #[test]
    fn top_touch_point_swaps_axes() {
        let a = GestureAdapter::new(EdgeSide::Top, SIZE);
        let drag = a.touch_point(&sample((120.0, 90.0), (15.0, 100.0)), 0.7);
        assert_eq!(drag.lateral_position, 120.0);
        assert!((drag.stretch_distance - 70.0).abs() < 1e-9);
    }

    #[test]
    fn total_progress_size_is_stretch_extent() {
        assert_eq!(GestureAdapter::new(EdgeSide::Left, SIZE).total_progress_size(), 300.0);
        assert_eq!(GestureAdapter::new(EdgeSide::Right, SIZE).total_progress_size(), 300.0);
        assert_eq!(GestureAdapter::new(EdgeSide::Top, SIZE).total_progress_size(), 600.0);
        assert_eq!(GestureAdapter::new(EdgeSide::Bottom, SIZE).total_progress_size(), 600.0);
    }

    #[test]
    fn right_and_bottom_flip_progress_sign() {
        let right = GestureAdapter::new(EdgeSide::Right, SIZE);
        assert_eq!(right.current_progress(&sample((180.0, 10.0), (-120.0, 0.0)), 1.0), 120.0);

        let bottom = GestureAdapter::new(EdgeSide::Bottom, SIZE);
        assert_eq!(bottom.current_progress(&sample((10.0, 500.0), (0.0, -80.0)), 1.0), 80.0);

        let left = GestureAdapter::new(EdgeSide::Left, SIZE);
        assert_eq!(left.current_progress(&sample((120.0, 10.0), (120.0, 0.0)), 1.0), 120.0);
    }

    #[test]
    fn rotation_sign_depends_on_edge() {
        let s = sample((0.0, 600.0), (50.0, 0.0));
        let left = GestureAdapter::new(EdgeSide::Left, SIZE).rotation_angle(&s, 1.0);
        let right = GestureAdapter::new(EdgeSide::Right, SIZE).rotation_angle(&s, 1.0);
        assert!((left.to_degrees() - 40.0).abs() < 1e-9);
        assert!((right.to_degrees() + 40.0).abs() < 1e-9);
    }

    #[test]
    fn fire_threshold_boundary_fires() {
        assert!(should_fire(120.0, 300.0, 0.4));
        assert!(should_fire(121.0, 300.0, 0.4));
        assert!(!should_fire(119.9, 300.0, 0.4));
        assert!(!should_fire(-200.0, 300.0, 0.4));
    }

    #[test]
    fn zero_threshold_fires_on_any_inward_pull() {
        assert!(should_fire(0.0, 300.0, 0.0));
        assert!(!should_fire(-0.1, 300.0, 0.0));
    }

    #[test]
    fn normalised_progress_guards_empty_container() {
        assert_eq!(normalised_progress(150.0, 300.0), 0.5);
        assert_eq!(normalised_progress(150.0, 0.0), 0.0);
    }

    #[test]
    fn release_phases() {
        assert!(GesturePhase::Ended.is_release());
        assert!(GesturePhase::Cancelled.is_release());
        assert!(!GesturePhase::Began.is_release());
        assert!(!GesturePhase::Changed.is_release());
    }
}
