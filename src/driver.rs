//! Built-in implementations of the animation seams for headless use.
//!
//! [`EasingDriver`] does not integrate a spring.  It steps a fixed number of
//! frames per transition and eases every control point from the start
//! keyframe to the end keyframe with a cubic-bezier timing curve: an
//! overshooting one when the spring would be under-damped (settle), a
//! monotone one when damping is pinned (fire).  That keeps the output
//! deterministic for tests and for the `jelly-trace` tool.

use crate::bezier::CubicEasing;
use crate::config::DriverConfig;
use crate::path::Path;
use crate::traits::{AnimationDriver, FrameTicker, Transition, TransitionKind};
use log::debug;

/// Error from [`EasingDriver::sample`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EasingDriverError {
    #[error("no transition is running")]
    NotRunning,
}

#[derive(Debug, Clone)]
struct Running {
    transition: Transition,
    easing: CubicEasing,
    frame: u32,
    total: u32,
}

/// Frame-counted keyframe interpolator.
#[derive(Debug, Clone, Default)]
pub struct EasingDriver {
    config: DriverConfig,
    running: Option<Running>,
}

impl EasingDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            running: None,
        }
    }

    /// The transition currently being played, if any.
    pub fn transition(&self) -> Option<&Transition> {
        self.running.as_ref().map(|r| &r.transition)
    }
}

impl AnimationDriver for EasingDriver {
    type Error = EasingDriverError;

    fn start(&mut self, transition: Transition) {
        let frames = match transition.kind {
            TransitionKind::Settle => self.config.settle_frames,
            TransitionKind::Fire => self.config.fire_frames,
        };
        let easing = match transition.spring.damping {
            Some(_) => CubicEasing::EASE_OUT,
            None => CubicEasing::OVERSHOOT,
        };
        debug!(
            "easing driver: {:?} over {} frames (mass {}, stiffness {}, damping {:?})",
            transition.kind,
            frames,
            transition.spring.mass,
            transition.spring.stiffness,
            transition.spring.damping
        );
        self.running = Some(Running {
            transition,
            easing,
            frame: 0,
            total: frames.max(1),
        });
    }

    fn sample(&mut self) -> Result<Path, EasingDriverError> {
        let running = self.running.as_mut().ok_or(EasingDriverError::NotRunning)?;
        running.frame = (running.frame + 1).min(running.total);
        if running.frame == running.total {
            return Ok(running.transition.to);
        }
        let u = running.frame as f64 / running.total as f64;
        let eased = running.easing.ease(u);
        Ok(running.transition.from.lerp(&running.transition.to, eased))
    }

    fn is_finished(&self) -> bool {
        self.running
            .as_ref()
            .map_or(true, |r| r.frame >= r.total)
    }

    fn stop(&mut self) {
        self.running = None;
    }
}

/// A [`FrameTicker`] that only records its state; the host calls
/// [`JellyControl::tick`](crate::control::JellyControl::tick) itself while
/// [`is_running`](ManualTicker::is_running) is true.
#[derive(Debug, Clone)]
pub struct ManualTicker {
    paused: bool,
    invalidated: bool,
}

impl Default for ManualTicker {
    fn default() -> Self {
        Self {
            paused: true,
            invalidated: false,
        }
    }
}

impl ManualTicker {
    pub fn is_running(&self) -> bool {
        !self.paused && !self.invalidated
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }
}

impl FrameTicker for ManualTicker {
    fn set_paused(&mut self, paused: bool) {
        if !self.invalidated {
            self.paused = paused;
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
        self.paused = true;
    }
}
