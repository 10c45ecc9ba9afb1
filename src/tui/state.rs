//! Viewer state
//!
//! Everything the timeline viewer needs between frames: the asset behind
//! its position lease, the thumbnail scheduler, the scrub controller and
//! the host's displayed time.

use std::rc::Rc;
use std::time::Instant;

use ratatui::layout::Rect;
use tracing::debug;

use crate::config::Config;
use crate::cursor::{PositionCursor, SeekOutcome};
use crate::media::MediaAsset;
use crate::sampler::{FrameSampler, ThumbnailScheduler, ThumbnailState};
use crate::scrub::{InputRouter, ScrubController, TimeRequest, TrackRect};
use crate::timeline::{format_timecode, Waveform};

/// Result of processing an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep running
    Continue,
    /// Leave the viewer
    Quit,
    /// Replace the asset's source
    Reload,
}

pub struct ViewState<A> {
    pub(super) cursor: PositionCursor<A>,
    pub(super) scheduler: ThumbnailScheduler,
    pub(super) controller: ScrubController,
    pub(super) router: Rc<InputRouter>,
    waveform: Waveform,
    /// Displayed time, follows scrubbing immediately
    pub current_time: f64,
    known_duration: f64,
    pub(super) nudge_secs: f64,
    pub show_help: bool,
    pub needs_render: bool,
}

impl<A: MediaAsset> ViewState<A> {
    /// State for `asset`. The waveform is generated once by the caller.
    pub fn new(asset: A, config: &Config, waveform: Waveform) -> Self {
        let router = Rc::new(InputRouter::new());
        let controller = ScrubController::new(router.clone());
        Self {
            cursor: PositionCursor::new(asset),
            scheduler: ThumbnailScheduler::new(FrameSampler::new(config.sampler.clone())),
            controller,
            router,
            waveform,
            current_time: 0.0,
            known_duration: 0.0,
            nudge_secs: config.timeline.nudge_secs,
            show_help: false,
            needs_render: true,
        }
    }

    pub fn duration(&self) -> f64 {
        self.known_duration
    }

    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    pub fn scheduler(&self) -> &ThumbnailScheduler {
        &self.scheduler
    }

    pub fn cursor(&self) -> &PositionCursor<A> {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut PositionCursor<A> {
        &mut self.cursor
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Pick up a new or changed duration from the asset.
    pub fn observe_duration(&mut self) {
        let duration = self.cursor.duration();
        if duration == self.known_duration {
            return;
        }
        debug!(from = self.known_duration, to = duration, "duration changed");
        self.known_duration = duration;
        self.controller.set_duration(duration);
        self.current_time = self.current_time.clamp(0.0, duration.max(0.0));
        self.scheduler
            .on_duration_changed(&mut self.cursor, duration, self.current_time);
        self.needs_render = true;
    }

    /// Advance sampling.
    pub fn tick(&mut self, now: Instant) {
        if self.scheduler.tick(&mut self.cursor, now) {
            self.needs_render = true;
        }
    }

    /// Screen cells the track occupies, after layout.
    pub fn set_track_area(&mut self, area: Rect) {
        self.controller.set_track(TrackRect::from_cells(area));
    }

    /// Move the displayed time and the asset.
    pub fn apply(&mut self, request: TimeRequest) {
        self.current_time = request.time;
        if self.cursor.seek(request.time) == SeekOutcome::Queued {
            debug!(time = request.time, "scrub deferred until sampling finishes");
        }
        self.needs_render = true;
    }

    /// Forget the current source before a reload.
    pub fn reset_position(&mut self) {
        self.controller.cancel();
        self.current_time = 0.0;
        self.needs_render = true;
    }

    /// Short status for the timeline header.
    pub fn header_status(&self) -> Option<(String, bool)> {
        if self.known_duration <= 0.0 {
            return Some(("loading".to_string(), false));
        }
        match self.scheduler.state() {
            ThumbnailState::Sampling { handled, total } => {
                Some((format!("thumbnails {}/{}", handled, total), false))
            }
            ThumbnailState::Unavailable { .. } => {
                Some(("thumbnails unavailable".to_string(), true))
            }
            ThumbnailState::Empty | ThumbnailState::Ready => None,
        }
    }

    /// Lines for the asset panel.
    pub fn summary_lines(&self) -> Vec<String> {
        let thumbs = match self.scheduler.state() {
            ThumbnailState::Empty => "none".to_string(),
            ThumbnailState::Sampling { handled, total } => {
                format!("sampling {}/{}", handled, total)
            }
            ThumbnailState::Ready => format!("{} ready", self.scheduler.thumbnails().len()),
            ThumbnailState::Unavailable { reason } => format!("unavailable ({})", reason),
        };
        vec![
            format!("Position:   {}", format_timecode(self.current_time)),
            format!("Duration:   {}", format_timecode(self.known_duration)),
            format!("Thumbnails: {}", thumbs),
            format!("Dragging:   {}", if self.is_dragging() { "yes" } else { "no" }),
        ]
    }

    /// Stop sampling and drop any drag capture.
    pub fn shutdown(&mut self) {
        self.controller.cancel();
        self.scheduler.cancel(&mut self.cursor);
    }
}
