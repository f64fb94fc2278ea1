//! The state machine that ties gestures, path building and animation
//! together.
//!
//! [`JellyControl`] owns the current outline and reacts to gesture samples
//! and display ticks by rebuilding the path, handing keyframes to an
//! [`AnimationDriver`] and notifying a [`JellyDelegate`].
//!
//! # Phases
//!
//! | Phase          | Entered on                          | Left on                         |
//! |----------------|-------------------------------------|---------------------------------|
//! | `Idle`         | attach, settle done, cooldown done  | `Began`                         |
//! | `Dragging`     | `Began`                             | `Ended` / `Cancelled`           |
//! | `SettlingBack` | release below the threshold         | driver finished, or `Began`     |
//! | `Firing`       | release at or past the threshold    | driver finished                 |
//! | `Cooldown`     | fire transition finished            | next tick                       |
//!
//! Input is disabled from the start of `Firing` until the control is back in
//! `Idle`.  The frame ticker runs only during `SettlingBack`, `Firing` and
//! `Cooldown`.

use crate::config::{Color, Settings};
use crate::edge::EdgeSide;
use crate::geometry::{Rect, Size};
use crate::gesture::{
    normalised_progress, progress_of, should_fire, DragSample, GestureAdapter, GesturePhase,
    GestureSample,
};
use crate::inner_frame::{compute_frame, compute_rotation};
use crate::path::Path;
use crate::path_builder::{build_dragged_path, build_fired_path, build_resting_path, PathInput};
use crate::traits::{
    AnimationDriver, FrameTicker, JellyDelegate, SpringParams, Transition, TransitionKind,
    FIRE_DAMPING,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Possible errors from constructing a control.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    /// The fill colors are cycled on every fire; there must be at least one.
    #[error("palette must contain at least one color")]
    EmptyPalette,
}

/// Where the control is in its drag / animate / reset cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationPhase {
    Idle,
    Dragging,
    SettlingBack,
    Firing,
    Cooldown,
}

/// Host hook that adjusts [`Settings`] at the start of every gesture.
pub type Configurator = Box<dyn FnMut(&mut Settings)>;

/// An elastic edge-pull control.
///
/// The control is generic over the animation backend and the frame ticker,
/// making it independent of any particular UI toolkit.  It starts detached;
/// call [`attach`](JellyControl::attach) with the container size before
/// feeding it input.
///
/// # Typical usage
///
/// ```ignore
/// let mut control = JellyControl::new(EdgeSide::Left, palette, driver, ticker)?;
/// control.attach(Size::new(375.0, 667.0));
/// control.handle_gesture(sample);
/// control.tick();
/// ```
pub struct JellyControl<D: AnimationDriver, T: FrameTicker> {
    edge: EdgeSide,
    container: Size,
    settings: Settings,
    palette: Vec<Color>,
    color_index: usize,
    path: Path,
    phase: AnimationPhase,
    driver: D,
    ticker: T,
    input_enabled: bool,
    attached: bool,
    inner_frame: Rect,
    rotation: f64,
    delegate: Option<Box<dyn JellyDelegate>>,
    configurator: Option<Configurator>,
}

impl<D: AnimationDriver, T: FrameTicker> JellyControl<D, T> {
    /// Create a detached control anchored to `edge`.
    pub fn new(edge: EdgeSide, palette: Vec<Color>, driver: D, ticker: T) -> Result<Self, ControlError> {
        if palette.is_empty() {
            return Err(ControlError::EmptyPalette);
        }
        Ok(Self {
            edge,
            container: Size::default(),
            settings: Settings::default(),
            palette,
            color_index: 0,
            path: Path::default(),
            phase: AnimationPhase::Idle,
            driver,
            ticker,
            input_enabled: true,
            attached: false,
            inner_frame: Rect::default(),
            rotation: 0.0,
            delegate: None,
            configurator: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Box<dyn JellyDelegate>) {
        self.delegate = Some(delegate);
    }

    /// Install a hook that may rewrite the settings at the start of every
    /// gesture.
    pub fn set_configurator(&mut self, configurator: Configurator) {
        self.configurator = Some(configurator);
    }

    /// Replace the settings.  A resting outline is rebuilt immediately; an
    /// in-flight drag picks them up on its next sample.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if self.attached && self.phase == AnimationPhase::Idle {
            self.reset_to_rest();
        }
    }

    //  Lifecycle

    /// Attach to a container of `size` and show the resting outline.
    pub fn attach(&mut self, size: Size) {
        info!("attach to {}x{} container on {} edge", size.width, size.height, self.edge);
        self.container = size;
        self.attached = true;
        self.input_enabled = true;
        self.phase = AnimationPhase::Idle;
        self.reset_to_rest();
        self.set_ticking(false);
    }

    /// The container changed size.  Only a resting outline is rebuilt; a
    /// drag or animation in progress keeps its geometry until it completes.
    pub fn resize(&mut self, size: Size) {
        self.container = size;
        if !self.attached {
            return;
        }
        if self.phase == AnimationPhase::Idle {
            debug!("resize to {}x{}, rebuilding resting path", size.width, size.height);
            self.reset_to_rest();
        } else {
            debug!("resize to {}x{} during {:?}", size.width, size.height, self.phase);
        }
    }

    /// Detach from the container: abandon any animation and stop the ticker
    /// for good.  Input and ticks are ignored until the next
    /// [`attach`](JellyControl::attach).
    pub fn detach(&mut self) {
        info!("detach during {:?}", self.phase);
        self.driver.stop();
        self.ticker.invalidate();
        self.attached = false;
        self.phase = AnimationPhase::Idle;
    }

    //  Input

    /// Process one sample from the host's drag recogniser.
    pub fn handle_gesture(&mut self, sample: GestureSample) {
        if !self.attached {
            debug!("ignoring {:?} sample while detached", sample.phase);
            return;
        }
        if !self.input_enabled {
            debug!("ignoring {:?} sample while firing", sample.phase);
            return;
        }

        match sample.phase {
            GesturePhase::Began => {
                if !self.delegate_allows_drag() {
                    debug!("delegate declined drag");
                    return;
                }
                self.begin_drag(&sample);
            }
            GesturePhase::Changed => {
                if self.phase != AnimationPhase::Dragging {
                    debug!("ignoring Changed sample during {:?}", self.phase);
                    return;
                }
                if !self.delegate_allows_drag() {
                    debug!("delegate declined drag sample");
                    return;
                }
                self.update_drag(&sample);
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                if self.phase != AnimationPhase::Dragging {
                    debug!("ignoring {:?} sample during {:?}", sample.phase, self.phase);
                    return;
                }
                self.release(&sample);
            }
        }
    }

    /// Advance the running animation by one display frame.
    pub fn tick(&mut self) {
        if !self.attached {
            return;
        }
        match self.phase {
            AnimationPhase::Idle | AnimationPhase::Dragging => {}
            AnimationPhase::SettlingBack | AnimationPhase::Firing => {
                match self.driver.sample() {
                    Ok(path) => {
                        self.path = path;
                        self.refresh_inner_frame();
                    }
                    Err(e) => warn!("skipping frame, in-flight path unreadable: {}", e),
                }
                if self.driver.is_finished() {
                    self.finish_transition();
                }
            }
            AnimationPhase::Cooldown => self.complete_fire(),
        }
    }

    //  Accessors

    pub fn edge(&self) -> EdgeSide {
        self.edge
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Rectangle of the floating content view for the current outline.
    pub fn inner_frame(&self) -> Rect {
        self.inner_frame
    }

    /// Tilt of the floating content view in radians.
    pub fn inner_rotation(&self) -> f64 {
        self.rotation
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Color of the jelly shape.
    pub fn fill_color(&self) -> Color {
        self.palette[self.color_index]
    }

    /// Color behind the shape: the one that filled it before the last fire.
    pub fn backdrop_color(&self) -> Color {
        let k = self.palette.len();
        self.palette[(self.color_index + k - 1) % k]
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    //  Internals

    fn begin_drag(&mut self, sample: &GestureSample) {
        if self.phase == AnimationPhase::SettlingBack {
            info!("drag interrupts settle");
            self.driver.stop();
        }
        if let Some(configure) = self.configurator.as_mut() {
            configure(&mut self.settings);
        }
        self.phase = AnimationPhase::Dragging;
        self.set_ticking(false);
        if let Some(d) = self.delegate.as_mut() {
            d.on_drag_start();
        }
        self.update_drag(sample);
    }

    fn update_drag(&mut self, sample: &GestureSample) {
        let drag = self.apply_drag(sample);
        let adapter = self.adapter();
        let progress = normalised_progress(progress_of(self.edge, &drag), adapter.total_progress_size());
        debug!(
            "drag at {:.1} stretch {:.1} progress {:.3}",
            drag.lateral_position, drag.stretch_distance, progress
        );
        if let Some(d) = self.delegate.as_mut() {
            d.on_drag_progress(progress);
        }
    }

    /// Rebuild the outline and content view for `sample`.
    fn apply_drag(&mut self, sample: &GestureSample) -> DragSample {
        let drag = self.adapter().touch_point(sample, self.settings.flexibility);
        self.path = build_dragged_path(&self.path_input(), &drag);
        self.rotation = compute_rotation(&drag, self.edge, self.container);
        self.refresh_inner_frame();
        drag
    }

    fn release(&mut self, sample: &GestureSample) {
        let drag = self.apply_drag(sample);
        let progress = progress_of(self.edge, &drag);
        let total = self.adapter().total_progress_size();

        if let Some(d) = self.delegate.as_mut() {
            d.on_drag_end();
        }

        if should_fire(progress, total, self.settings.trigger_threshold) {
            info!("fire at progress {:.1} of {:.1}", progress, total);
            self.input_enabled = false;
            self.phase = AnimationPhase::Firing;
            let to = build_fired_path(&self.path_input());
            self.start_transition(TransitionKind::Fire, to, Some(FIRE_DAMPING));
        } else {
            info!("settle back at progress {:.1} of {:.1}", progress, total);
            if let Some(d) = self.delegate.as_mut() {
                d.on_fire_cancelled();
            }
            self.phase = AnimationPhase::SettlingBack;
            let to = build_resting_path(&self.path_input());
            self.start_transition(TransitionKind::Settle, to, None);
        }
    }

    fn start_transition(&mut self, kind: TransitionKind, to: Path, damping: Option<f64>) {
        self.driver.start(Transition {
            kind,
            from: self.path,
            to,
            spring: SpringParams {
                mass: self.settings.mass,
                stiffness: self.settings.stiffness,
                damping,
            },
        });
        self.set_ticking(true);
    }

    fn finish_transition(&mut self) {
        match self.phase {
            AnimationPhase::SettlingBack => {
                debug!("settle finished");
                self.phase = AnimationPhase::Idle;
                self.reset_to_rest();
                self.set_ticking(false);
            }
            AnimationPhase::Firing => {
                debug!("fire transition finished");
                self.path = build_fired_path(&self.path_input());
                self.refresh_inner_frame();
                self.phase = AnimationPhase::Cooldown;
            }
            _ => {}
        }
    }

    fn complete_fire(&mut self) {
        self.color_index = (self.color_index + 1) % self.palette.len();
        info!("fired, color index now {}", self.color_index);
        self.phase = AnimationPhase::Idle;
        self.input_enabled = true;
        self.reset_to_rest();
        self.set_ticking(false);
        if let Some(d) = self.delegate.as_mut() {
            d.on_fired();
        }
    }

    fn reset_to_rest(&mut self) {
        let input = self.path_input();
        self.path = build_resting_path(&input);
        let center = self.edge.descriptor().lateral_extent(self.container) / 2.0;
        self.rotation = compute_rotation(&DragSample::new(center, 0.0), self.edge, self.container);
        self.refresh_inner_frame();
    }

    fn refresh_inner_frame(&mut self) {
        self.inner_frame = compute_frame(&self.path, self.settings.inner_view_offset, self.edge);
    }

    /// Forward to the ticker only when the desired state differs.
    fn set_ticking(&mut self, running: bool) {
        let paused = !running;
        if self.ticker.is_paused() != paused {
            self.ticker.set_paused(paused);
        }
    }

    fn delegate_allows_drag(&mut self) -> bool {
        self.delegate
            .as_mut()
            .map_or(true, |d| d.should_start_dragging())
    }

    fn adapter(&self) -> GestureAdapter {
        GestureAdapter::new(self.edge, self.container)
    }

    fn path_input(&self) -> PathInput {
        PathInput::new(
            self.edge,
            self.container,
            self.settings.inner_point_ratio,
            self.settings.outer_point_ratio,
        )
    }
}
