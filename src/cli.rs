//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Version string with build date, shown by `--version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("SCRUBLINE_BUILD_DATE"),
    ")"
);

/// Commit the binary was built from, when known.
pub fn git_sha() -> &'static str {
    option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
}

#[derive(Debug, Parser)]
#[command(name = "scrubline")]
#[command(about = "Scrubbable media timeline with thumbnail sampling")]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the interactive timeline over a synthetic asset
    View(ViewArgs),

    /// Sample thumbnails from a synthetic asset and write them out
    Thumbs(ThumbsArgs),

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by commands that build a synthetic asset.
#[derive(Debug, Clone, Args)]
pub struct AssetArgs {
    /// Simulated seek latency in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 30)]
    pub seek_latency_ms: u64,

    /// Start of a window where seeks never complete (seconds)
    #[arg(long, value_name = "SECS", requires = "stall_to")]
    pub stall_from: Option<f64>,

    /// End of the stall window (seconds)
    #[arg(long, value_name = "SECS", requires = "stall_from")]
    pub stall_to: Option<f64>,
}

impl AssetArgs {
    pub fn stall_window(&self) -> Option<std::ops::RangeInclusive<f64>> {
        match (self.stall_from, self.stall_to) {
            (Some(from), Some(to)) => Some(from..=to),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Asset duration in seconds
    #[arg(long, value_name = "SECS", default_value_t = 95.0)]
    pub duration: f64,

    /// Delay before the duration becomes known, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub load_delay_ms: u64,

    #[command(flatten)]
    pub asset: AssetArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ThumbsArgs {
    /// Asset duration in seconds
    #[arg(long, value_name = "SECS")]
    pub duration: f64,

    /// Directory to write PNG thumbnails into
    #[arg(long, short, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Print a JSON manifest instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Seconds between thumbnails (overrides config)
    #[arg(long, value_name = "SECS")]
    pub interval: Option<f64>,

    /// Per-seek deadline in milliseconds, 0 waits forever (overrides config)
    #[arg(long, value_name = "MS")]
    pub seek_timeout_ms: Option<u64>,

    /// Stop at the first stalled seek instead of skipping it
    #[arg(long)]
    pub abort_on_stall: bool,

    #[command(flatten)]
    pub asset: AssetArgs,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
