//! Waveform track data
//!
//! Real audio analysis is out of scope; the timeline takes its amplitudes
//! from a `WaveformSource`. The synthetic source produces a placeholder
//! once per mount rather than on every frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default number of bars across the track.
pub const DEFAULT_WAVEFORM_SAMPLES: usize = 200;

/// Lowest amplitude the synthetic source produces.
pub const MIN_AMPLITUDE: f32 = 0.2;

/// Normalized amplitudes in `[0, 1]`, in track order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Waveform {
    amplitudes: Vec<f32>,
}

impl Waveform {
    /// Build from raw amplitudes, clamping each into `[0, 1]`.
    pub fn new(amplitudes: Vec<f32>) -> Self {
        Self {
            amplitudes: amplitudes
                .into_iter()
                .map(|a| if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) })
                .collect(),
        }
    }

    pub fn amplitudes(&self) -> &[f32] {
        &self.amplitudes
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }
}

/// Supplier of waveform data for the audio track.
pub trait WaveformSource {
    fn waveform(&mut self, samples: usize) -> Waveform;
}

/// Random placeholder amplitudes in `[MIN_AMPLITUDE, 1.0]`.
#[derive(Debug, Clone)]
pub struct SyntheticWaveform {
    rng: StdRng,
}

impl SyntheticWaveform {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence, for tests and snapshots.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SyntheticWaveform {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformSource for SyntheticWaveform {
    fn waveform(&mut self, samples: usize) -> Waveform {
        Waveform::new(
            (0..samples)
                .map(|_| self.rng.gen_range(MIN_AMPLITUDE..=1.0))
                .collect(),
        )
    }
}
