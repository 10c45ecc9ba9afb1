//! Interactive timeline viewer command

use std::time::Duration;

use anyhow::{bail, Context, Result};
use scrubline::cli::ViewArgs;
use scrubline::media::SyntheticAsset;
use scrubline::{logging, tui, Config};
use tracing::info;

use super::thumbs::build_asset;

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &ViewArgs, config: &Config) -> Result<()> {
    if !(args.duration.is_finite() && args.duration >= 0.0) {
        bail!("Duration must be a non-negative number of seconds");
    }

    // stderr belongs to the terminal UI while it runs
    if let Some(path) = logging::default_log_path() {
        logging::init_file(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
    }

    let asset = view_asset(args);
    info!(duration = args.duration, "opening timeline viewer");
    tui::run_view(asset, args.duration, config).context("Terminal UI failed")
}

fn view_asset(args: &ViewArgs) -> SyntheticAsset {
    let builder = build_asset(args.duration, &args.asset);
    if args.load_delay_ms > 0 {
        builder
            .load_delay(Duration::from_millis(args.load_delay_ms))
            .build()
    } else {
        builder.build()
    }
}
