//! Pointer scrubbing
//!
//! Maps pointer input over the timeline track to playback-time requests:
//!
//! - `geometry`: track bounds and the pointer-to-fraction mapping
//! - `capture`: global listener registration scoped to a drag
//! - `controller`: the Idle/Dragging state machine

mod capture;
mod controller;
mod geometry;

pub use capture::{CaptureGuard, GlobalInput, InputRouter, ListenerId, ListenerKind};
pub use controller::{DragState, ScrubController, TimeRequest};
pub use geometry::{Point, TrackRect};
