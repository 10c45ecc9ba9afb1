//! Configuration for thumbnail sampling.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What to do when a seek is never confirmed within the step deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StallPolicy {
    /// Omit that thumbnail and continue with the next offset
    #[default]
    Skip,
    /// Stop the run and report thumbnails as unavailable
    Abort,
}

/// Configuration for thumbnail sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Seconds between thumbnails
    pub interval_secs: f64,
    /// Thumbnail width in pixels
    pub thumb_width: u32,
    /// Thumbnail height in pixels
    pub thumb_height: u32,
    /// Per-step deadline for a seek confirmation (0 waits forever)
    pub seek_timeout_ms: u64,
    /// Behaviour when the deadline passes
    pub stall_policy: StallPolicy,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10.0,
            thumb_width: 80,
            thumb_height: 45,
            seek_timeout_ms: 2000,
            stall_policy: StallPolicy::Skip,
        }
    }
}

impl SamplerConfig {
    /// Per-step deadline, `None` when waiting forever.
    pub fn seek_timeout(&self) -> Option<Duration> {
        (self.seek_timeout_ms > 0).then(|| Duration::from_millis(self.seek_timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_ten_second_strip() {
        let config = SamplerConfig::default();
        assert_eq!(config.interval_secs, 10.0);
        assert_eq!((config.thumb_width, config.thumb_height), (80, 45));
        assert_eq!(config.stall_policy, StallPolicy::Skip);
    }

    #[test]
    fn zero_timeout_means_no_deadline() {
        let config = SamplerConfig {
            seek_timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.seek_timeout(), None);
    }

    #[test]
    fn stall_policy_parses_lowercase() {
        let config: SamplerConfig = toml::from_str("stall_policy = \"abort\"").unwrap();
        assert_eq!(config.stall_policy, StallPolicy::Abort);
        assert_eq!(config.interval_secs, 10.0);
    }
}
