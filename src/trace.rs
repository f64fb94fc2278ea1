//! Headless replay of a gesture script through a [`JellyControl`].
//!
//! Reads newline-delimited JSON inputs, feeds each one to a control driven
//! by the built-in [`EasingDriver`], and writes one JSON [`TraceSnapshot`]
//! per input line.
//!
//! # Wire format
//!
//! ```json
//! {"Gesture":{"location":{"x":0,"y":300},"translation":{"x":0,"y":0},"phase":"Began"}}
//! {"Gesture":{"location":{"x":140,"y":300},"translation":{"x":140,"y":0},"phase":"Changed"}}
//! "Tick"
//! {"Resize":{"width":320,"height":480}}
//! "Detach"
//! {"Attach":{"width":320,"height":480}}
//! ```
//!
//! Blank lines are skipped.  A line that does not parse is logged and
//! skipped; it produces no snapshot.

use crate::config::{Color, Config};
use crate::control::{AnimationPhase, ControlError, JellyControl};
use crate::driver::{EasingDriver, ManualTicker};
use crate::geometry::{Rect, Size};
use crate::gesture::GestureSample;
use crate::path::PathElement;
use crate::traits::JellyDelegate;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

/// One line of trace input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TraceInput {
    Gesture(GestureSample),
    Tick,
    Resize(Size),
    Attach(Size),
    Detach,
}

/// A delegate callback observed while processing one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraceEvent {
    DragStart,
    DragProgress(f64),
    DragEnd,
    Fired,
    FireCancelled,
}

/// Control state after one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSnapshot {
    pub phase: AnimationPhase,
    pub path: Vec<PathElement>,
    pub inner_frame: Rect,
    /// Radians.
    pub rotation: f64,
    pub color_index: usize,
    pub fill: Color,
    pub backdrop: Color,
    pub input_enabled: bool,
    pub events: Vec<TraceEvent>,
}

/// Errors produced by the trace runner.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("control error: {0}")]
    Control(#[from] ControlError),
}

/// Forwards every callback into a shared event list.
struct EventLog(Rc<RefCell<Vec<TraceEvent>>>);

impl JellyDelegate for EventLog {
    fn on_drag_start(&mut self) {
        self.0.borrow_mut().push(TraceEvent::DragStart);
    }

    fn on_drag_progress(&mut self, progress: f64) {
        self.0.borrow_mut().push(TraceEvent::DragProgress(progress));
    }

    fn on_drag_end(&mut self) {
        self.0.borrow_mut().push(TraceEvent::DragEnd);
    }

    fn on_fired(&mut self) {
        self.0.borrow_mut().push(TraceEvent::Fired);
    }

    fn on_fire_cancelled(&mut self) {
        self.0.borrow_mut().push(TraceEvent::FireCancelled);
    }
}

type TraceControl = JellyControl<EasingDriver, ManualTicker>;

/// Build a control from `config`, attached to the configured container.
pub fn build_control(config: &Config) -> Result<TraceControl, ControlError> {
    let mut control = JellyControl::new(
        config.edge,
        config.palette.clone(),
        EasingDriver::new(config.driver.clone()),
        ManualTicker::default(),
    )?;
    control.set_settings(config.settings.clone());
    control.attach(config.container);
    Ok(control)
}

/// Replay every line of `reader` and write snapshots to `writer`.
///
/// Returns the number of snapshots written.
pub fn run_trace<R: BufRead, W: Write>(config: &Config, reader: R, mut writer: W) -> Result<usize, TraceError> {
    let mut control = build_control(config)?;
    let events = Rc::new(RefCell::new(Vec::new()));
    control.set_delegate(Box::new(EventLog(Rc::clone(&events))));

    let mut written = 0;
    for (number, line) in reader.lines().enumerate() {
        let text = line?;
        if text.trim().is_empty() {
            continue;
        }
        let input = match serde_json::from_str::<TraceInput>(&text) {
            Ok(input) => input,
            Err(e) => {
                error!("line {}: bad input: {} ({})", number + 1, text, e);
                continue;
            }
        };
        debug!("line {}: {:?}", number + 1, input);
        apply(&mut control, input);

        let snapshot = snapshot(&control, events.borrow_mut().drain(..).collect());
        serde_json::to_writer(&mut writer, &snapshot)?;
        writer.write_all(b"\n")?;
        written += 1;
    }
    writer.flush()?;
    info!("wrote {} snapshots", written);
    Ok(written)
}

fn apply(control: &mut TraceControl, input: TraceInput) {
    match input {
        TraceInput::Gesture(sample) => control.handle_gesture(sample),
        TraceInput::Tick => control.tick(),
        TraceInput::Resize(size) => control.resize(size),
        TraceInput::Attach(size) => control.attach(size),
        TraceInput::Detach => control.detach(),
    }
}

fn snapshot(control: &TraceControl, events: Vec<TraceEvent>) -> TraceSnapshot {
    TraceSnapshot {
        phase: control.phase(),
        path: control.path().to_elements().to_vec(),
        inner_frame: control.inner_frame(),
        rotation: control.inner_rotation(),
        color_index: control.color_index(),
        fill: control.fill_color(),
        backdrop: control.backdrop_color(),
        input_enabled: control.is_input_enabled(),
        events,
    }
}

//  Tests
