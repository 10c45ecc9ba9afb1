//! Configuration
//!
//! Stored as TOML at `<config dir>/scrubline/config.toml`. Every field has
//! a default, so a missing file or a partial file is always valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sampler::SamplerConfig;
use crate::theme::ThemeName;
use crate::timeline::DEFAULT_WAVEFORM_SAMPLES;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Timeline display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Number of waveform bars
    pub waveform_samples: usize,
    /// Seconds moved per arrow key press
    pub nudge_secs: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            waveform_samples: DEFAULT_WAVEFORM_SAMPLES,
            nudge_secs: 5.0,
        }
    }
}

/// TUI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub theme: ThemeName,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sampler: SamplerConfig,
    pub timeline: TimelineConfig,
    pub tui: TuiConfig,
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("scrubline").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(write_err)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the sampler or timeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sampler = &self.sampler;
        if !(sampler.interval_secs.is_finite() && sampler.interval_secs > 0.0) {
            return Err(ConfigError::Invalid {
                field: "sampler.interval_secs",
                reason: format!("must be a positive number, got {}", sampler.interval_secs),
            });
        }
        if sampler.thumb_width == 0 || sampler.thumb_height == 0 {
            return Err(ConfigError::Invalid {
                field: "sampler.thumb_width/thumb_height",
                reason: "must be at least 1 pixel".to_string(),
            });
        }
        if self.timeline.waveform_samples == 0 {
            return Err(ConfigError::Invalid {
                field: "timeline.waveform_samples",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.timeline.nudge_secs.is_finite() && self.timeline.nudge_secs > 0.0) {
            return Err(ConfigError::Invalid {
                field: "timeline.nudge_secs",
                reason: format!("must be a positive number, got {}", self.timeline.nudge_secs),
            });
        }
        Ok(())
    }
}
