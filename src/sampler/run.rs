//! Sampling run state machine
//!
//! A run issues one relocation at a time and consumes exactly that
//! relocation's completion before capturing. It never blocks on its own:
//! the owner calls `poll` from its event loop (or `wait` to park on the
//! outstanding seek) and the run advances as far as the asset allows.

use std::mem;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::{SampleError, SamplerConfig, StallPolicy, ThumbnailSample};
use crate::media::{EncodedImage, MediaAsset, PendingSeek, SeekStatus};

/// Largest strip a run will sample. Longer plans fail with
/// `SampleError::TooManySamples` before the first seek.
pub const MAX_SAMPLES: usize = 10_000;

/// Number of offsets in a strip: one per interval boundary `<= duration`,
/// starting at 0. Saturates instead of overflowing.
///
/// Zero when `duration` or `interval` isn't positive.
pub fn sample_count(duration: f64, interval: f64) -> usize {
    if !(duration > 0.0) || !(interval > 0.0) || !duration.is_finite() {
        return 0;
    }
    ((duration / interval).floor() + 1.0) as usize
}

/// Offsets at which a strip samples: `0, interval, ..` up to and
/// including the last interval boundary `<= duration`. Computed lazily.
pub fn sample_offsets(duration: f64, interval: f64) -> impl Iterator<Item = f64> {
    (0..sample_count(duration, interval)).map(move |i| i as f64 * interval)
}

/// Everything a finished run produced.
#[derive(Debug, Default)]
pub struct SampleReport {
    /// Captures in time order
    pub samples: Vec<ThumbnailSample>,
    /// Offsets whose seek stalled past the deadline
    pub skipped: Vec<f64>,
}

/// Result of advancing a run.
#[derive(Debug)]
pub enum RunPoll {
    /// Waiting on the asset
    Pending,
    /// All offsets handled; position has been restored
    Complete(SampleReport),
}

#[derive(Debug)]
enum Step {
    /// About to issue the seek for `index`
    Ready { index: usize },
    /// Seek for `index` issued, completion outstanding
    Waiting {
        index: usize,
        pending: PendingSeek,
        deadline: Option<Instant>,
    },
    /// Completed, failed or cancelled
    Closed,
}

/// A single pass over one asset's offsets.
#[derive(Debug)]
pub struct SamplingRun {
    interval: f64,
    total: usize,
    restore_to: f64,
    config: SamplerConfig,
    step: Step,
    samples: Vec<ThumbnailSample>,
    skipped: Vec<f64>,
    seeks_issued: usize,
}

impl SamplingRun {
    /// Plan a run over `duration`, restoring the position to `restore_to`
    /// when it ends.
    pub fn new(duration: f64, restore_to: f64, config: SamplerConfig) -> Self {
        Self {
            interval: config.interval_secs,
            total: sample_count(duration, config.interval_secs),
            samples: Vec::new(),
            restore_to,
            config,
            step: Step::Ready { index: 0 },
            skipped: Vec::new(),
            seeks_issued: 0,
        }
    }

    fn offset_at(&self, index: usize) -> Option<f64> {
        (index < self.total).then(|| index as f64 * self.interval)
    }

    /// `(handled, total)` offsets, counting skipped ones as handled.
    pub fn progress(&self) -> (usize, usize) {
        let handled = match self.step {
            Step::Ready { index } | Step::Waiting { index, .. } => index,
            Step::Closed => self.total,
        };
        (handled, self.total)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.step, Step::Closed)
    }

    /// Advance as far as the asset allows without blocking.
    ///
    /// On error the run is closed and the position already restored.
    /// Polling a closed run returns an empty `Complete`.
    pub fn poll<A: MediaAsset + ?Sized>(
        &mut self,
        asset: &mut A,
        now: Instant,
    ) -> Result<RunPoll, SampleError> {
        loop {
            match mem::replace(&mut self.step, Step::Closed) {
                Step::Closed => return Ok(RunPoll::Complete(SampleReport::default())),

                Step::Ready { index } => {
                    if self.total > MAX_SAMPLES {
                        warn!(total = self.total, max = MAX_SAMPLES, "sampling plan too large");
                        return Err(SampleError::TooManySamples {
                            count: self.total,
                            max: MAX_SAMPLES,
                        });
                    }
                    let Some(offset) = self.offset_at(index) else {
                        return Ok(RunPoll::Complete(self.finish(asset)));
                    };
                    let pending = asset.request_seek(offset);
                    self.seeks_issued += 1;
                    debug!(index, offset, ticket = pending.ticket().id(), "sampling seek");
                    self.step = Step::Waiting {
                        index,
                        pending,
                        deadline: self.config.seek_timeout().map(|timeout| now + timeout),
                    };
                }

                Step::Waiting {
                    index,
                    mut pending,
                    deadline,
                } => {
                    let offset = index as f64 * self.interval;
                    match pending.poll() {
                        SeekStatus::Completed => {
                            let sample = match self.capture(&*asset, offset) {
                                Ok(sample) => sample,
                                Err(err) => {
                                    self.restore(asset);
                                    return Err(err);
                                }
                            };
                            debug!(offset, "captured thumbnail");
                            self.samples.push(sample);
                            self.step = Step::Ready { index: index + 1 };
                        }
                        SeekStatus::Pending => {
                            if !deadline.is_some_and(|deadline| now >= deadline) {
                                self.step = Step::Waiting {
                                    index,
                                    pending,
                                    deadline,
                                };
                                return Ok(RunPoll::Pending);
                            }
                            let timeout = self.config.seek_timeout().unwrap_or_default();
                            match self.config.stall_policy {
                                StallPolicy::Skip => {
                                    warn!(offset, ?timeout, "seek stalled, skipping thumbnail");
                                    self.skipped.push(offset);
                                    self.step = Step::Ready { index: index + 1 };
                                }
                                StallPolicy::Abort => {
                                    warn!(offset, ?timeout, "seek stalled, aborting run");
                                    self.restore(asset);
                                    return Err(SampleError::Stalled { offset, timeout });
                                }
                            }
                        }
                        SeekStatus::Lost => {
                            self.restore(asset);
                            return Err(SampleError::AssetLost { offset });
                        }
                    }
                }
            }
        }
    }

    /// Park the calling thread on the outstanding seek for at most `max`,
    /// never past the step deadline.
    pub fn wait(&mut self, max: Duration) {
        if let Step::Waiting {
            pending, deadline, ..
        } = &mut self.step
        {
            let budget = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()).min(max),
                None => max,
            };
            pending.wait_timeout(budget);
        }
    }

    /// Abandon the run. Captures made so far are discarded.
    pub fn cancel<A: MediaAsset + ?Sized>(&mut self, asset: &mut A) {
        if self.is_closed() {
            return;
        }
        let (handled, total) = self.progress();
        self.step = Step::Closed;
        self.samples.clear();
        self.restore(asset);
        info!(handled, total, "sampling run cancelled");
    }

    fn capture<A: MediaAsset + ?Sized>(
        &self,
        asset: &A,
        offset: f64,
    ) -> Result<ThumbnailSample, SampleError> {
        let frame = asset
            .capture_frame()
            .map_err(|source| SampleError::Capture { offset, source })?;
        let image =
            EncodedImage::encode_thumbnail(&frame, self.config.thumb_width, self.config.thumb_height)?;
        Ok(ThumbnailSample {
            time_offset: offset,
            image,
        })
    }

    fn finish<A: MediaAsset + ?Sized>(&mut self, asset: &mut A) -> SampleReport {
        self.restore(asset);
        info!(
            captured = self.samples.len(),
            skipped = self.skipped.len(),
            "sampling run finished"
        );
        SampleReport {
            samples: mem::take(&mut self.samples),
            skipped: mem::take(&mut self.skipped),
        }
    }

    fn restore<A: MediaAsset + ?Sized>(&mut self, asset: &mut A) {
        // A run that never moved the cursor has nothing to undo
        if self.seeks_issued > 0 {
            let _ = asset.request_seek(self.restore_to);
            self.seeks_issued = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::test_support::ManualAsset;

    fn config() -> SamplerConfig {
        SamplerConfig {
            thumb_width: 8,
            thumb_height: 4,
            ..Default::default()
        }
    }

    fn offsets_of(report: &SampleReport) -> Vec<f64> {
        report.samples.iter().map(|s| s.time_offset).collect()
    }

    /// Drive a run to completion, confirming each seek as it appears.
    fn drive(run: &mut SamplingRun, asset: &mut ManualAsset) -> SampleReport {
        let now = Instant::now();
        loop {
            match run.poll(asset, now).unwrap() {
                RunPoll::Complete(report) => return report,
                RunPoll::Pending => {
                    asset.complete_next().expect("run waits on an issued seek");
                }
            }
        }
    }

    #[test]
    fn offsets_include_last_boundary() {
        assert_eq!(sample_count(95.0, 10.0), 10);
        assert_eq!(sample_offsets(95.0, 10.0).last(), Some(90.0));
        assert_eq!(sample_count(100.0, 10.0), 11);
        assert_eq!(sample_offsets(9.9, 10.0).collect::<Vec<_>>(), vec![0.0]);
    }

    #[test]
    fn offsets_empty_for_unknown_duration() {
        assert_eq!(sample_count(0.0, 10.0), 0);
        assert_eq!(sample_count(-3.0, 10.0), 0);
        assert_eq!(sample_count(f64::NAN, 10.0), 0);
        assert_eq!(sample_count(f64::INFINITY, 10.0), 0);
        assert_eq!(sample_count(50.0, 0.0), 0);
    }

    #[test]
    fn offsets_count_is_floor_plus_one() {
        for duration in [1.0, 10.0, 29.5, 61.0, 3600.0] {
            let offsets: Vec<f64> = sample_offsets(duration, 10.0).collect();
            assert_eq!(offsets.len(), (duration / 10.0).floor() as usize + 1);
            assert!(offsets.windows(2).all(|w| w[0] < w[1]));
            assert!(offsets.iter().all(|&o| (0.0..=duration).contains(&o)));
        }
    }

    #[test]
    fn huge_plans_are_counted_without_allocating() {
        assert_eq!(sample_count(1e15, 10.0), 100_000_000_000_001);
        assert_eq!(sample_count(1e300, 1e-300), usize::MAX);
        assert_eq!(sample_offsets(1e15, 10.0).nth(3), Some(30.0));
    }

    #[test]
    fn oversized_plan_fails_before_seeking() {
        let mut asset = ManualAsset::new(1e15);
        let mut run = SamplingRun::new(1e15, 5.0, config());
        assert_eq!(run.progress(), (0, 100_000_000_000_001));

        let err = run.poll(&mut asset, Instant::now()).unwrap_err();

        assert!(matches!(
            err,
            SampleError::TooManySamples { max: MAX_SAMPLES, .. }
        ));
        assert!(run.is_closed());
        assert!(asset.requests.is_empty());
    }

    #[test]
    fn run_captures_every_offset_in_order() {
        let mut asset = ManualAsset::new(95.0);
        let mut run = SamplingRun::new(95.0, 0.0, config());

        let report = drive(&mut run, &mut asset);

        assert_eq!(
            offsets_of(&report),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]
        );
        assert!(report.skipped.is_empty());
        assert!(run.is_closed());
    }

    #[test]
    fn each_capture_matches_its_own_seek() {
        let mut asset = ManualAsset::new(40.0);
        let mut run = SamplingRun::new(40.0, 0.0, config());

        let report = drive(&mut run, &mut asset);

        for sample in &report.samples {
            let expected = asset.red_for(sample.time_offset);
            assert!(sample.image.swatch()[0].abs_diff(expected) <= 1);
        }
    }

    #[test]
    fn only_one_seek_outstanding_at_a_time() {
        let mut asset = ManualAsset::new(30.0);
        let mut run = SamplingRun::new(30.0, 0.0, config());
        let now = Instant::now();

        assert!(matches!(run.poll(&mut asset, now).unwrap(), RunPoll::Pending));
        // Polling again without a confirmation must not issue another seek
        assert!(matches!(run.poll(&mut asset, now).unwrap(), RunPoll::Pending));
        assert_eq!(asset.pending_count(), 1);
        assert_eq!(asset.requests, vec![0.0]);
    }

    #[test]
    fn restores_position_after_finishing() {
        let mut asset = ManualAsset::new(25.0);
        let mut run = SamplingRun::new(25.0, 17.5, config());

        drive(&mut run, &mut asset);

        assert_eq!(asset.position, 17.5);
        assert_eq!(asset.requests, vec![0.0, 10.0, 20.0, 17.5]);
    }

    #[test]
    fn zero_duration_issues_no_seeks() {
        let mut asset = ManualAsset::new(0.0);
        let mut run = SamplingRun::new(0.0, 3.0, config());

        let report = drive(&mut run, &mut asset);

        assert!(report.samples.is_empty());
        assert!(asset.requests.is_empty());
    }

    #[test]
    fn stalled_seek_is_skipped_after_deadline() {
        let mut asset = ManualAsset::new(20.0);
        let mut run = SamplingRun::new(
            20.0,
            0.0,
            SamplerConfig {
                seek_timeout_ms: 100,
                ..config()
            },
        );
        let start = Instant::now();

        // offset 0 confirmed
        assert!(matches!(run.poll(&mut asset, start).unwrap(), RunPoll::Pending));
        asset.complete_next();
        // offset 10 issued and never confirmed
        assert!(matches!(run.poll(&mut asset, start).unwrap(), RunPoll::Pending));
        assert_eq!(asset.requests, vec![0.0, 10.0]);

        // Past the deadline the run moves on to offset 20
        let late = start + Duration::from_millis(150);
        assert!(matches!(run.poll(&mut asset, late).unwrap(), RunPoll::Pending));
        assert_eq!(asset.requests, vec![0.0, 10.0, 20.0]);

        // Confirm the stalled seek now; it must not be taken for offset 20
        asset.complete_next();
        assert!(matches!(run.poll(&mut asset, late).unwrap(), RunPoll::Pending));
        asset.complete_next();

        let RunPoll::Complete(report) = run.poll(&mut asset, late).unwrap() else {
            panic!("run should be complete");
        };
        assert_eq!(offsets_of(&report), vec![0.0, 20.0]);
        assert_eq!(report.skipped, vec![10.0]);
    }

    #[test]
    fn stalled_seek_aborts_with_abort_policy() {
        let mut asset = ManualAsset::new(20.0);
        let mut run = SamplingRun::new(
            20.0,
            4.0,
            SamplerConfig {
                seek_timeout_ms: 50,
                stall_policy: StallPolicy::Abort,
                ..config()
            },
        );
        let start = Instant::now();
        run.poll(&mut asset, start).unwrap();

        let err = run
            .poll(&mut asset, start + Duration::from_millis(60))
            .unwrap_err();

        assert!(matches!(err, SampleError::Stalled { offset, .. } if offset == 0.0));
        assert!(run.is_closed());
        assert_eq!(asset.position, 4.0);
    }

    #[test]
    fn cancel_discards_captures_and_restores() {
        let mut asset = ManualAsset::new(60.0);
        let mut run = SamplingRun::new(60.0, 12.0, config());
        let now = Instant::now();
        run.poll(&mut asset, now).unwrap();
        asset.complete_next();
        run.poll(&mut asset, now).unwrap();

        run.cancel(&mut asset);

        assert!(run.is_closed());
        assert_eq!(asset.position, 12.0);
        let RunPoll::Complete(report) = run.poll(&mut asset, now).unwrap() else {
            panic!("closed run reports complete");
        };
        assert!(report.samples.is_empty());
    }

    #[test]
    fn progress_counts_handled_offsets() {
        let mut asset = ManualAsset::new(30.0);
        let mut run = SamplingRun::new(30.0, 0.0, config());
        assert_eq!(run.progress(), (0, 4));

        let now = Instant::now();
        run.poll(&mut asset, now).unwrap();
        asset.complete_next();
        run.poll(&mut asset, now).unwrap();
        assert_eq!(run.progress(), (1, 4));
    }
}
