//! **jelly-pull**: geometry and state machine for an elastic edge-pull
//! control.
//!
//! A jelly shape sits along one edge of a rectangular container.  Dragging
//! away from the edge stretches it into a bulge that follows the finger.
//! Releasing past a threshold "fires" the action: the shape balloons off
//! the container and a new fill color takes its place.  Releasing short of
//! the threshold lets it wobble back to rest.
//!
//! # Architecture
//!
//! Pure geometry lives in [`bezier`], [`path`], [`edge`], [`path_builder`]
//! and [`inner_frame`]; every edge is handled by one algorithm over an
//! [`edge::EdgeDescriptor`].  [`control::JellyControl`] is the state machine
//! and is generic over three seams from [`traits`]:
//!
//! * [`traits::AnimationDriver`]: interpolates the outline between
//!   keyframes with spring timing.
//! * [`traits::FrameTicker`]: the host's display-refresh callback.
//! * [`traits::JellyDelegate`]: receives drag and fire callbacks.
//!
//! [`driver`] has deterministic implementations of the first two, used by
//! the `jelly-trace` tool ([`trace`]) and in tests.

pub mod bezier;
pub mod config;
pub mod control;
pub mod driver;
pub mod edge;
pub mod geometry;
pub mod gesture;
pub mod inner_frame;
pub mod path;
pub mod path_builder;
pub mod trace;
pub mod traits;
