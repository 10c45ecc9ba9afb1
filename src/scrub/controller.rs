//! Drag-to-seek controller.

use std::rc::Rc;

use tracing::debug;

use super::{CaptureGuard, GlobalInput, Point, TrackRect};

/// Drag life-cycle. Lives as long as the widget; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No capture, no global listeners
    #[default]
    Idle,
    /// Global move/up listeners attached
    Dragging,
}

/// A request for the host to move the playback position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRequest {
    /// Target position in seconds
    pub time: f64,
    /// Target as a fraction of duration
    pub fraction: f64,
}

/// Turns pointer input over the track into time-change requests.
///
/// Handlers return the request for the host to apply; the most recent
/// one wins, nothing is debounced.
pub struct ScrubController {
    input: Rc<dyn GlobalInput>,
    track: TrackRect,
    duration: f64,
    capture: Option<CaptureGuard>,
}

impl std::fmt::Debug for ScrubController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrubController")
            .field("track", &self.track)
            .field("duration", &self.duration)
            .field("state", &self.state())
            .finish()
    }
}

impl ScrubController {
    pub fn new(input: Rc<dyn GlobalInput>) -> Self {
        Self {
            input,
            track: TrackRect::default(),
            duration: 0.0,
            capture: None,
        }
    }

    /// Update the track bounds after layout.
    pub fn set_track(&mut self, track: TrackRect) {
        self.track = track;
    }

    pub fn track(&self) -> TrackRect {
        self.track
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    pub fn state(&self) -> DragState {
        if self.capture.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.capture.is_some()
    }

    /// Press on the track: start dragging and seek to the press position.
    ///
    /// Presses outside the track are ignored.
    pub fn pointer_down(&mut self, point: Point) -> Option<TimeRequest> {
        if !self.track.contains(point) {
            return None;
        }
        if self.capture.is_none() {
            self.capture = Some(CaptureGuard::acquire(Rc::clone(&self.input)));
            debug!(x = point.x, "drag started");
        }
        Some(self.request_at(point.x))
    }

    /// Pointer moved anywhere. Only produces a request while dragging.
    pub fn pointer_move(&mut self, point: Point) -> Option<TimeRequest> {
        self.is_dragging().then(|| self.request_at(point.x))
    }

    /// Pointer released anywhere: stop dragging.
    pub fn pointer_up(&mut self) {
        if self.capture.take().is_some() {
            debug!("drag ended");
        }
    }

    /// Abandon an active drag (focus loss, teardown). Same as a release.
    pub fn cancel(&mut self) {
        self.pointer_up();
    }

    /// The request for horizontal position `x`.
    pub fn request_at(&self, x: f64) -> TimeRequest {
        let fraction = self.track.fraction_at(x);
        TimeRequest {
            time: fraction * self.duration.max(0.0),
            fraction,
        }
    }

    /// Request `delta` seconds away from `current`, clamped to the asset.
    pub fn nudge(&self, current: f64, delta: f64) -> TimeRequest {
        let duration = self.duration.max(0.0);
        let time = (current + delta).clamp(0.0, duration);
        TimeRequest {
            time,
            fraction: if duration > 0.0 { time / duration } else { 0.0 },
        }
    }
}
