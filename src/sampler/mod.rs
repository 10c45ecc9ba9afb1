//! Thumbnail sampling
//!
//! Produces the timeline's thumbnail strip by walking the asset's playback
//! cursor across fixed offsets:
//!
//! - `run`: the one-seek-at-a-time state machine and offset planning
//! - `scheduler`: host-side owner that restarts runs when duration changes
//! - `config`: interval, thumbnail size, and stall handling
//! - `cancel`: cancellation flag for blocking callers

mod cancel;
mod config;
mod error;
mod run;
mod scheduler;

use std::time::{Duration, Instant};

use crate::media::{EncodedImage, MediaAsset};

pub use cancel::CancelToken;
pub use config::{SamplerConfig, StallPolicy};
pub use error::SampleError;
pub use run::{sample_count, sample_offsets, RunPoll, SampleReport, SamplingRun, MAX_SAMPLES};
pub use scheduler::{ThumbnailScheduler, ThumbnailState};

/// How long a blocking sampler parks between cancellation checks.
const WAIT_SLICE: Duration = Duration::from_millis(25);

/// One captured still frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailSample {
    /// Position of the frame in seconds
    pub time_offset: f64,
    /// Scaled, encoded frame
    pub image: EncodedImage,
}

/// Extracts periodic still frames from an asset.
#[derive(Debug, Clone, Default)]
pub struct FrameSampler {
    config: SamplerConfig,
}

impl FrameSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Plan a non-blocking run for the caller to poll.
    pub fn start(&self, duration: f64, restore_to: f64) -> SamplingRun {
        SamplingRun::new(duration, restore_to, self.config.clone())
    }

    /// Sample the whole strip, blocking the calling thread.
    ///
    /// `restore_to` is the position to put back when done; it is taken
    /// from the caller rather than read from the asset because the
    /// position may already have moved by the time sampling starts.
    pub fn sample<A: MediaAsset + ?Sized>(
        &self,
        asset: &mut A,
        duration: f64,
        restore_to: f64,
        cancel: &CancelToken,
    ) -> Result<SampleReport, SampleError> {
        let mut run = self.start(duration, restore_to);
        loop {
            if cancel.is_cancelled() {
                run.cancel(asset);
                return Err(SampleError::Cancelled);
            }
            match run.poll(asset, Instant::now())? {
                RunPoll::Complete(report) => return Ok(report),
                RunPoll::Pending => run.wait(WAIT_SLICE),
            }
        }
    }
}
