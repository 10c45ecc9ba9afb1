//! Host-side owner of thumbnail sampling
//!
//! Starts a run whenever the asset's duration becomes known or changes,
//! cancels whatever run was in flight, and only ever publishes the strip
//! of the run that is current.

use std::time::Instant;

use tracing::{info, warn};

use super::{FrameSampler, RunPoll, SamplingRun, ThumbnailSample};
use crate::cursor::PositionCursor;
use crate::media::MediaAsset;

/// Publication state of the thumbnail strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailState {
    /// No duration known yet
    Empty,
    /// A run is in flight
    Sampling { handled: usize, total: usize },
    /// The strip is published
    Ready,
    /// The last run failed; the renderer falls back to a placeholder
    Unavailable { reason: String },
}

/// Keeps at most one sampling run alive per asset.
#[derive(Debug)]
pub struct ThumbnailScheduler {
    sampler: FrameSampler,
    duration: f64,
    generation: u64,
    run: Option<SamplingRun>,
    thumbnails: Vec<ThumbnailSample>,
    state: ThumbnailState,
}

impl ThumbnailScheduler {
    pub fn new(sampler: FrameSampler) -> Self {
        Self {
            sampler,
            duration: 0.0,
            generation: 0,
            run: None,
            thumbnails: Vec::new(),
            state: ThumbnailState::Empty,
        }
    }

    pub fn state(&self) -> &ThumbnailState {
        &self.state
    }

    /// Published strip, empty until a run completes.
    pub fn thumbnails(&self) -> &[ThumbnailSample] {
        &self.thumbnails
    }

    /// Number of runs started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_sampling(&self) -> bool {
        self.run.is_some()
    }

    /// React to the asset's duration. A changed duration abandons the
    /// in-flight run and starts over; an unchanged one is a no-op.
    pub fn on_duration_changed<A: MediaAsset>(
        &mut self,
        cursor: &mut PositionCursor<A>,
        duration: f64,
        current_time: f64,
    ) {
        if duration == self.duration {
            return;
        }
        self.cancel(cursor);
        self.duration = duration;
        self.thumbnails.clear();
        self.state = ThumbnailState::Empty;

        if duration > 0.0 {
            self.generation += 1;
            let run = self.sampler.start(duration, current_time);
            let (handled, total) = run.progress();
            info!(
                generation = self.generation,
                duration,
                total,
                "starting thumbnail sampling"
            );
            cursor.lease();
            self.state = ThumbnailState::Sampling { handled, total };
            self.run = Some(run);
        }
    }

    /// Advance the in-flight run. Returns true when visible state changed.
    pub fn tick<A: MediaAsset>(&mut self, cursor: &mut PositionCursor<A>, now: Instant) -> bool {
        let Some(run) = self.run.as_mut() else {
            return false;
        };

        match run.poll(cursor.asset_mut(), now) {
            Ok(RunPoll::Pending) => {
                let (handled, total) = run.progress();
                let next = ThumbnailState::Sampling { handled, total };
                let changed = next != self.state;
                self.state = next;
                changed
            }
            Ok(RunPoll::Complete(report)) => {
                self.run = None;
                cursor.release();
                self.thumbnails = report.samples;
                self.state = ThumbnailState::Ready;
                true
            }
            Err(err) => {
                self.run = None;
                cursor.release();
                warn!(generation = self.generation, error = %err, "thumbnails unavailable");
                self.thumbnails.clear();
                self.state = ThumbnailState::Unavailable {
                    reason: err.to_string(),
                };
                true
            }
        }
    }

    /// Abandon the in-flight run, if any, and hand the cursor back.
    pub fn cancel<A: MediaAsset>(&mut self, cursor: &mut PositionCursor<A>) {
        if let Some(mut run) = self.run.take() {
            run.cancel(cursor.asset_mut());
            cursor.release();
            self.state = ThumbnailState::Empty;
        }
    }
}
