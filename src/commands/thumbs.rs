//! Thumbnail sampling command
//!
//! Samples a synthetic asset the same way the viewer does and writes the
//! strip as PNG files, a JSON manifest, or a short summary.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use humansize::{format_size, DECIMAL};
use scrubline::cli::{AssetArgs, ThumbsArgs};
use scrubline::media::synthetic::SyntheticAssetBuilder;
use scrubline::media::SyntheticAsset;
use scrubline::sampler::{
    CancelToken, FrameSampler, SampleReport, SamplerConfig, StallPolicy, ThumbnailSample,
};
use scrubline::theme::Theme;
use scrubline::timeline::format_timecode;
use scrubline::Config;
use serde::Serialize;
use tracing::{info, warn};

/// Builder for the synthetic asset described by the shared asset flags.
pub fn build_asset(duration: f64, args: &AssetArgs) -> SyntheticAssetBuilder {
    let builder =
        SyntheticAsset::builder(duration).latency(Duration::from_millis(args.seek_latency_ms));
    match args.stall_window() {
        Some(window) => builder.stall(window),
        None => builder,
    }
}

#[derive(Debug, Serialize)]
struct Manifest {
    duration: f64,
    interval: f64,
    thumbnails: Vec<ManifestEntry>,
    skipped: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry {
    offset: f64,
    timecode: String,
    width: u32,
    height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
}

fn thumbnail_file_name(index: usize) -> String {
    format!("thumb_{:04}.png", index)
}

/// Sampler settings: config values with command-line overrides applied.
fn effective_config(args: &ThumbsArgs, config: &Config) -> Result<SamplerConfig> {
    let mut sampler = config.sampler.clone();
    if let Some(interval) = args.interval {
        sampler.interval_secs = interval;
    }
    if let Some(timeout) = args.seek_timeout_ms {
        sampler.seek_timeout_ms = timeout;
    }
    if args.abort_on_stall {
        sampler.stall_policy = StallPolicy::Abort;
    }
    if !(sampler.interval_secs.is_finite() && sampler.interval_secs > 0.0) {
        bail!("Interval must be a positive number of seconds");
    }
    Ok(sampler)
}

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &ThumbsArgs, config: &Config) -> Result<()> {
    if !(args.duration.is_finite() && args.duration >= 0.0) {
        bail!("Duration must be a non-negative number of seconds");
    }
    let sampler_config = effective_config(args, config)?;
    let interval = sampler_config.interval_secs;

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("Failed to install Ctrl-C handler")?;

    let mut asset = build_asset(args.duration, &args.asset).build();
    let sampler = FrameSampler::new(sampler_config);
    info!(duration = args.duration, interval, "sampling thumbnails");
    let report = sampler
        .sample(&mut asset, args.duration, 0.0, &cancel)
        .context("Thumbnail sampling failed")?;

    let files = match &args.out {
        Some(dir) => Some(write_thumbnails(dir, &report.samples)?),
        None => None,
    };

    if args.json {
        let manifest = build_manifest(args.duration, interval, &report, files.as_deref());
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    } else {
        print_summary(args, interval, &report, files.as_deref(), config);
    }
    Ok(())
}

/// Write each thumbnail as `thumb_NNNN.png`. Returns the file names.
fn write_thumbnails(dir: &Path, samples: &[ThumbnailSample]) -> Result<Vec<String>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let name = thumbnail_file_name(i);
            let path = dir.join(&name);
            fs::write(&path, sample.image.png_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(name)
        })
        .collect()
}

fn build_manifest(
    duration: f64,
    interval: f64,
    report: &SampleReport,
    files: Option<&[String]>,
) -> Manifest {
    let thumbnails = report
        .samples
        .iter()
        .enumerate()
        .map(|(i, sample)| ManifestEntry {
            offset: sample.time_offset,
            timecode: format_timecode(sample.time_offset),
            width: sample.image.width(),
            height: sample.image.height(),
            file: files.and_then(|f| f.get(i)).cloned(),
        })
        .collect();
    Manifest {
        duration,
        interval,
        thumbnails,
        skipped: report.skipped.clone(),
    }
}

fn print_summary(
    args: &ThumbsArgs,
    interval: f64,
    report: &SampleReport,
    files: Option<&[String]>,
    config: &Config,
) {
    let theme = Theme::from_name(config.tui.theme);
    println!(
        "{}",
        theme.primary_text(&format!(
            "Sampled {} thumbnail(s) from {} every {}s",
            report.samples.len(),
            format_timecode(args.duration),
            interval
        ))
    );

    for (i, sample) in report.samples.iter().enumerate() {
        let file = files.and_then(|f| f.get(i)).map_or("", String::as_str);
        println!(
            "  {}  {}x{}  {:>8}  {}",
            theme.accent_text(&format_timecode(sample.time_offset)),
            sample.image.width(),
            sample.image.height(),
            format_size(sample.image.png_bytes().len(), DECIMAL),
            file
        );
    }

    if !report.skipped.is_empty() {
        let offsets: Vec<String> = report.skipped.iter().map(|o| format!("{}s", o)).collect();
        warn!(count = report.skipped.len(), "stalled offsets skipped");
        println!(
            "{}",
            theme.secondary_text(&format!(
                "Skipped {} stalled offset(s): {}",
                report.skipped.len(),
                offsets.join(", ")
            ))
        );
    }

    if let (Some(dir), Some(files)) = (&args.out, files) {
        let total: usize = report.samples.iter().map(|s| s.image.png_bytes().len()).sum();
        println!(
            "{}",
            theme.primary_text(&format!(
                "Wrote {} file(s) ({}) to {}",
                files.len(),
                format_size(total, DECIMAL),
                dir.display()
            ))
        );
    }
}
