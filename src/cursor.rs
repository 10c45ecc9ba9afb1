//! Shared playback cursor arbitration
//!
//! The asset's position is the one piece of mutable state that both the
//! thumbnail sampler and the user's scrubbing write to. While a sampling
//! run holds the lease, host seeks are queued (last request wins) and
//! applied when the lease is released, after the sampler has restored the
//! position it started from.

use tracing::debug;

use crate::media::MediaAsset;

/// What happened to a host seek request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOutcome {
    /// Sent to the asset immediately
    Applied,
    /// Deferred until the sampling lease is released
    Queued,
}

/// Owner of the host's asset handle and its position lease.
#[derive(Debug)]
pub struct PositionCursor<A> {
    asset: A,
    leased: bool,
    queued: Option<f64>,
}

impl<A: MediaAsset> PositionCursor<A> {
    pub fn new(asset: A) -> Self {
        Self {
            asset,
            leased: false,
            queued: None,
        }
    }

    pub fn asset(&self) -> &A {
        &self.asset
    }

    /// Direct access for the lease holder and for host operations that
    /// replace the source.
    pub fn asset_mut(&mut self) -> &mut A {
        &mut self.asset
    }

    pub fn into_inner(self) -> A {
        self.asset
    }

    pub fn duration(&self) -> f64 {
        self.asset.duration()
    }

    pub fn is_leased(&self) -> bool {
        self.leased
    }

    /// Seek waiting for the lease to be released.
    pub fn queued_seek(&self) -> Option<f64> {
        self.queued
    }

    /// Move the position on behalf of the host (scrubbing, keyboard).
    pub fn seek(&mut self, secs: f64) -> SeekOutcome {
        if self.leased {
            self.queued = Some(secs);
            debug!(secs, "seek queued behind sampling");
            SeekOutcome::Queued
        } else {
            let _ = self.asset.request_seek(secs);
            SeekOutcome::Applied
        }
    }

    /// Take exclusive use of the position for sampling.
    pub fn lease(&mut self) {
        self.leased = true;
    }

    /// End the lease and apply the most recent queued seek, if any.
    pub fn release(&mut self) -> Option<f64> {
        self.leased = false;
        let target = self.queued.take()?;
        let _ = self.asset.request_seek(target);
        debug!(secs = target, "applied queued seek");
        Some(target)
    }
}
