//! Synthetic test-pattern asset
//!
//! Stands in for a real decoder. Relocation requests are processed on a
//! dedicated decoder thread which confirms each one after a configurable
//! latency. Frames encode their own position: the red channel is
//! `position / duration`, green ramps left to right and blue top to bottom.

use std::ops::RangeInclusive;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace};

use super::{seek_pair, MediaAsset, MediaError, PendingSeek, RawFrame, SeekCompleter, SeekTicket};

const DEFAULT_FRAME_WIDTH: u32 = 160;
const DEFAULT_FRAME_HEIGHT: u32 = 90;

/// Work item for the decoder thread
enum DecodeRequest {
    Seek(SeekCompleter),
    Load { duration: f64 },
}

/// State shared between the asset handle and its decoder thread
#[derive(Debug)]
struct Decoded {
    duration: f64,
    /// Position of the frame currently on screen
    displayed: f64,
}

/// Knobs for the decoder thread
#[derive(Debug, Clone)]
struct DecoderSettings {
    latency: Duration,
    stall: Option<RangeInclusive<f64>>,
}

/// In-process asset producing a deterministic test pattern.
#[derive(Debug)]
pub struct SyntheticAsset {
    shared: Arc<Mutex<Decoded>>,
    requested: f64,
    next_ticket: u64,
    frame_width: u32,
    frame_height: u32,
    request_tx: Option<Sender<DecodeRequest>>,
    worker: Option<JoinHandle<()>>,
}

/// Builder for `SyntheticAsset`.
#[derive(Debug, Clone)]
pub struct SyntheticAssetBuilder {
    duration: f64,
    load_delay: Option<Duration>,
    settings: DecoderSettings,
    frame_width: u32,
    frame_height: u32,
}

impl SyntheticAssetBuilder {
    /// Delay each seek confirmation by `latency`.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.settings.latency = latency;
        self
    }

    /// Never confirm seeks whose target falls inside `window`.
    pub fn stall(mut self, window: RangeInclusive<f64>) -> Self {
        self.settings.stall = Some(window);
        self
    }

    /// Report duration `0` until the decoder has "probed" the media.
    pub fn load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = Some(delay);
        self
    }

    pub fn frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_width = width.max(1);
        self.frame_height = height.max(1);
        self
    }

    pub fn build(self) -> SyntheticAsset {
        let initial_duration = if self.load_delay.is_some() {
            0.0
        } else {
            self.duration
        };
        let shared = Arc::new(Mutex::new(Decoded {
            duration: initial_duration,
            displayed: 0.0,
        }));

        let (request_tx, request_rx) = mpsc::channel();
        let worker_shared = Arc::clone(&shared);
        let settings = self.settings;
        let worker = thread::spawn(move || decoder_loop(request_rx, worker_shared, settings));

        if let Some(delay) = self.load_delay {
            let duration = self.duration;
            let probe = Arc::downgrade(&shared);
            // Weak handle: the probe must not keep the asset alive
            thread::spawn(move || {
                thread::sleep(delay);
                if let Some(shared) = probe.upgrade() {
                    lock_decoded(&shared).duration = duration;
                    debug!(duration, "synthetic source probed");
                }
            });
        }

        SyntheticAsset {
            shared,
            requested: 0.0,
            next_ticket: 0,
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            request_tx: Some(request_tx),
            worker: Some(worker),
        }
    }
}

impl SyntheticAsset {
    /// Asset of the given duration with instant seeks.
    pub fn new(duration: f64) -> Self {
        Self::builder(duration).build()
    }

    pub fn builder(duration: f64) -> SyntheticAssetBuilder {
        SyntheticAssetBuilder {
            duration,
            load_delay: None,
            settings: DecoderSettings {
                latency: Duration::ZERO,
                stall: None,
            },
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
        }
    }

    /// Swap in a different source, as a host does when a new file is opened.
    ///
    /// Duration reads `0` until the decoder thread has processed the load.
    pub fn load(&mut self, duration: f64) {
        self.lock().duration = 0.0;
        self.requested = 0.0;
        self.send(DecodeRequest::Load { duration });
    }

    /// Position of the frame currently on screen.
    pub fn displayed_position(&self) -> f64 {
        self.lock().displayed
    }

    fn lock(&self) -> MutexGuard<'_, Decoded> {
        lock_decoded(&self.shared)
    }

    fn send(&self, request: DecodeRequest) {
        if let Some(tx) = &self.request_tx {
            // Ignore send errors (decoder thread only exits on drop)
            let _ = tx.send(request);
        }
    }
}

impl MediaAsset for SyntheticAsset {
    fn duration(&self) -> f64 {
        self.lock().duration
    }

    fn position(&self) -> f64 {
        self.requested
    }

    fn request_seek(&mut self, secs: f64) -> PendingSeek {
        self.next_ticket += 1;
        self.requested = secs;
        let (pending, completer) = seek_pair(SeekTicket::new(self.next_ticket), secs);
        trace!(ticket = self.next_ticket, target = secs, "seek requested");
        self.send(DecodeRequest::Seek(completer));
        pending
    }

    fn capture_frame(&self) -> Result<RawFrame, MediaError> {
        let (duration, displayed) = {
            let decoded = self.lock();
            (decoded.duration, decoded.displayed)
        };
        if duration <= 0.0 {
            return Err(MediaError::NotLoaded);
        }
        render_pattern(self.frame_width, self.frame_height, displayed / duration)
    }
}

impl Drop for SyntheticAsset {
    fn drop(&mut self) {
        // Closing the channel ends the decoder loop
        self.request_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn lock_decoded(shared: &Mutex<Decoded>) -> MutexGuard<'_, Decoded> {
    shared
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Decoder thread loop.
///
/// Processes requests in order and exits when the request channel is
/// closed (the asset was dropped). Stalled seeks are parked rather than
/// dropped so their waiters keep seeing `Pending` instead of `Lost`.
fn decoder_loop(
    request_rx: Receiver<DecodeRequest>,
    shared: Arc<Mutex<Decoded>>,
    settings: DecoderSettings,
) {
    let mut parked: Vec<SeekCompleter> = Vec::new();

    while let Ok(request) = request_rx.recv() {
        match request {
            DecodeRequest::Load { duration } => {
                let mut decoded = lock_decoded(&shared);
                decoded.duration = duration.max(0.0);
                decoded.displayed = 0.0;
                debug!(duration, "synthetic source loaded");
            }
            DecodeRequest::Seek(completer) => {
                if !settings.latency.is_zero() {
                    thread::sleep(settings.latency);
                }
                let target = completer.target();
                if settings
                    .stall
                    .as_ref()
                    .is_some_and(|window| window.contains(&target))
                {
                    trace!(target, "seek parked in stall window");
                    parked.push(completer);
                    continue;
                }
                {
                    let mut decoded = lock_decoded(&shared);
                    decoded.displayed = target.clamp(0.0, decoded.duration.max(0.0));
                }
                completer.complete();
            }
        }
    }
}

fn render_pattern(width: u32, height: u32, progress: f64) -> Result<RawFrame, MediaError> {
    let red = (progress.clamp(0.0, 1.0) * 255.0).round() as u8;
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        let blue = (y * 255 / height.max(2).saturating_sub(1).max(1)).min(255) as u8;
        for x in 0..width {
            let green = (x * 255 / width.max(2).saturating_sub(1).max(1)).min(255) as u8;
            pixels.extend_from_slice(&[red, green, blue]);
        }
    }
    RawFrame::from_rgb(width, height, pixels)
}
