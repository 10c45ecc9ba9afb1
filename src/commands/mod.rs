//! Command handlers for the scrubline binary.

pub mod completions;
pub mod config;
pub mod thumbs;
pub mod view;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use scrubline::Config;

/// Config file path: the `--config` override or the default location.
pub fn config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::config_path()?),
    }
}

/// Load configuration, defaults when the file doesn't exist.
pub fn load_config(override_path: Option<&Path>) -> Result<Config> {
    let path = config_path(override_path)?;
    Config::load_from(&path).with_context(|| format!("Failed to load config from {}", path.display()))
}
