//! Seams between the control and its host.
//!
//! The [`JellyControl`](crate::control::JellyControl) only depends on these
//! abstractions:
//!
//! * [`AnimationDriver`]: interpolates the outline between two keyframes
//!   with spring timing and reports the in-flight path every frame.
//! * [`FrameTicker`]: the host's display-refresh callback source, which the
//!   control pauses whenever nothing is animating.
//! * [`JellyDelegate`]: receives the control's callbacks.
//!
//! Every callback runs synchronously on the thread that drives the control.

use crate::path::Path;
use serde::{Deserialize, Serialize};

/// Damping used for the fire transition; high enough that the shape never
/// oscillates on its way out.
pub const FIRE_DAMPING: f64 = 1000.0;

/// Which of the two animated transitions is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Cancelled pull returning to rest.
    Settle,
    /// Successful pull ballooning off the container.
    Fire,
}

/// Spring parameters for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub mass: f64,
    pub stiffness: f64,
    /// `None` leaves damping to the driver's default, which is expected to
    /// be under-damped so the shape wobbles as it settles.
    pub damping: Option<f64>,
}

/// A keyframe pair handed to the [`AnimationDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub from: Path,
    pub to: Path,
    pub spring: SpringParams,
}

/// Drives the outline from one keyframe to another.
///
/// The control calls [`start`](AnimationDriver::start) once per transition,
/// then [`sample`](AnimationDriver::sample) once per display tick until
/// [`is_finished`](AnimationDriver::is_finished) reports `true`.
///
/// # Contract
///
/// * `sample` returns the path as currently shown.  An `Err` means the
///   in-flight geometry could not be read this frame; the control skips the
///   frame and keeps going.
/// * Once finished, the shown path is `transition.to`.
/// * `stop` abandons the running transition; it must be safe to call when
///   nothing is running.
pub trait AnimationDriver {
    /// The error type produced when an in-flight sample is unreadable.
    type Error: std::error::Error + 'static;

    fn start(&mut self, transition: Transition);

    fn sample(&mut self) -> Result<Path, Self::Error>;

    fn is_finished(&self) -> bool;

    fn stop(&mut self);
}

/// The host's per-frame callback source.
///
/// The control calls [`set_paused`](FrameTicker::set_paused) only when the
/// desired state actually changes, so implementations do not need to guard
/// against redundant calls.
pub trait FrameTicker {
    fn set_paused(&mut self, paused: bool);

    fn is_paused(&self) -> bool;

    /// Permanently stop delivering ticks.  Called when the control is
    /// detached from its container.
    fn invalidate(&mut self);
}

/// Callbacks emitted by the control.  Every method has a no-op default.
pub trait JellyDelegate {
    /// Consulted for every gesture sample; returning `false` ignores it.
    fn should_start_dragging(&mut self) -> bool {
        true
    }

    fn on_drag_start(&mut self) {}

    /// `progress` is inward stretch divided by the stretch extent.
    fn on_drag_progress(&mut self, _progress: f64) {}

    fn on_drag_end(&mut self) {}

    /// The pull fired and the fire animation has completed.
    fn on_fired(&mut self) {}

    /// The pull was released below the trigger threshold.
    fn on_fire_cancelled(&mut self) {}
}
