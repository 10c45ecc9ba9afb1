//! Hand-driven asset for deterministic tests.
//!
//! Seeks stay pending until the test completes them, so every interleaving
//! of "request", "confirm" and "capture" can be scripted.

use super::{seek_pair, MediaAsset, MediaError, PendingSeek, RawFrame, SeekCompleter, SeekTicket};

pub(crate) struct ManualAsset {
    pub duration: f64,
    pub position: f64,
    /// Position of the frame currently on screen
    pub displayed: f64,
    /// Blue channel of captured frames, to tell asset loads apart
    pub source_tag: u8,
    pub requests: Vec<f64>,
    pending: Vec<SeekCompleter>,
    next_ticket: u64,
}

impl ManualAsset {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            position: 0.0,
            displayed: 0.0,
            source_tag: 0,
            requests: Vec::new(),
            pending: Vec::new(),
            next_ticket: 0,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Confirm the oldest outstanding relocation.
    pub fn complete_next(&mut self) -> Option<f64> {
        if self.pending.is_empty() {
            return None;
        }
        let completer = self.pending.remove(0);
        let target = completer.target();
        self.displayed = target;
        completer.complete();
        Some(target)
    }

    /// Confirm every outstanding relocation in order.
    pub fn complete_all(&mut self) {
        while self.complete_next().is_some() {}
    }

    /// Red channel encoding for a position.
    pub fn red_for(&self, secs: f64) -> u8 {
        if self.duration <= 0.0 {
            return 0;
        }
        ((secs / self.duration).clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl MediaAsset for ManualAsset {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn request_seek(&mut self, secs: f64) -> PendingSeek {
        self.next_ticket += 1;
        self.position = secs;
        self.requests.push(secs);
        let (pending, completer) = seek_pair(SeekTicket::new(self.next_ticket), secs);
        self.pending.push(completer);
        pending
    }

    fn capture_frame(&self) -> Result<RawFrame, MediaError> {
        RawFrame::solid(16, 9, [self.red_for(self.displayed), 0, self.source_tag])
    }
}
