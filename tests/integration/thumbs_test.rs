//! Integration tests for the thumbs command

use predicates::prelude::*;
use serde_json::Value;

use crate::helpers::Sandbox;

fn offsets(manifest: &Value) -> Vec<f64> {
    manifest["thumbnails"]
        .as_array()
        .expect("thumbnails array")
        .iter()
        .map(|t| t["offset"].as_f64().expect("offset"))
        .collect()
}

fn run_json(sandbox: &Sandbox, args: &[&str]) -> Value {
    let mut full = vec!["thumbs", "--json"];
    full.extend_from_slice(args);
    let (stdout, stderr, exit_code) = sandbox.run(&full);
    assert_eq!(exit_code, 0, "stderr: {stderr}");
    serde_json::from_str(&stdout).expect("manifest is JSON")
}

// ============================================================================
// Sampling
// ============================================================================

#[test]
fn samples_every_ten_seconds_up_to_duration() {
    let sandbox = Sandbox::new();
    let manifest = run_json(&sandbox, &["--duration", "95", "--seek-latency-ms", "1"]);

    assert_eq!(
        offsets(&manifest),
        vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]
    );
    assert_eq!(manifest["interval"], 10.0);
    assert_eq!(manifest["thumbnails"][0]["width"], 80);
    assert_eq!(manifest["thumbnails"][0]["height"], 45);
    assert_eq!(manifest["thumbnails"][9]["timecode"], "0:01:30");
    assert!(manifest["thumbnails"][0].get("file").is_none());
}

#[test]
fn exact_multiple_includes_final_offset() {
    let sandbox = Sandbox::new();
    let manifest = run_json(&sandbox, &["--duration", "30", "--seek-latency-ms", "0"]);
    assert_eq!(offsets(&manifest), vec![0.0, 10.0, 20.0, 30.0]);
}

#[test]
fn zero_duration_yields_empty_strip() {
    let sandbox = Sandbox::new();
    let manifest = run_json(&sandbox, &["--duration", "0"]);
    assert!(offsets(&manifest).is_empty());
    assert_eq!(manifest["skipped"].as_array().map(Vec::len), Some(0));
}

#[test]
fn interval_from_config_file_is_used() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.config_path(), "[sampler]\ninterval_secs = 20.0\n").unwrap();

    let manifest = run_json(&sandbox, &["--duration", "45", "--seek-latency-ms", "0"]);
    assert_eq!(offsets(&manifest), vec![0.0, 20.0, 40.0]);
}

// ============================================================================
// Stalled seeks
// ============================================================================

#[test]
fn stalled_offsets_are_skipped_by_default() {
    let sandbox = Sandbox::new();
    let manifest = run_json(
        &sandbox,
        &[
            "--duration",
            "50",
            "--seek-latency-ms",
            "0",
            "--stall-from",
            "15",
            "--stall-to",
            "35",
            "--seek-timeout-ms",
            "50",
        ],
    );

    assert_eq!(offsets(&manifest), vec![0.0, 10.0, 40.0, 50.0]);
    assert_eq!(manifest["skipped"], serde_json::json!([20.0, 30.0]));
}

#[test]
fn abort_on_stall_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args([
            "thumbs",
            "--duration",
            "50",
            "--seek-latency-ms",
            "0",
            "--stall-from",
            "15",
            "--stall-to",
            "35",
            "--seek-timeout-ms",
            "50",
            "--abort-on-stall",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("did not complete"));
}

#[test]
fn oversized_plans_are_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["thumbs", "--duration", "1e15"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("more than the limit of 10000"));
    sandbox
        .cmd()
        .args(["thumbs", "--duration", "95", "--interval", "1e-9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("more than the limit"));
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn out_writes_png_files() {
    let sandbox = Sandbox::new();
    let out = sandbox.path().join("strip");
    let out_arg = out.to_string_lossy().to_string();

    let manifest = run_json(
        &sandbox,
        &["--duration", "25", "--seek-latency-ms", "0", "--out", &out_arg],
    );

    assert_eq!(manifest["thumbnails"][2]["file"], "thumb_0002.png");
    for i in 0..3 {
        let bytes = std::fs::read(out.join(format!("thumb_{:04}.png", i))).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
    assert!(!out.join("thumb_0003.png").exists());
}

#[test]
fn summary_reports_count_and_files() {
    let sandbox = Sandbox::new();
    let out = sandbox.path().join("strip");

    sandbox
        .cmd()
        .args(["thumbs", "--duration", "25", "--seek-latency-ms", "0", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sampled 3 thumbnail(s) from 0:00:25 every 10s"))
        .stdout(predicate::str::contains("thumb_0000.png"))
        .stdout(predicate::str::contains("Wrote 3 file(s)"));
}

#[test]
fn missing_duration_is_usage_error() {
    let sandbox = Sandbox::new();
    let (_stdout, stderr, exit_code) = sandbox.run(&["thumbs"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("--duration"));
}

#[test]
fn broken_config_fails_with_path() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.config_path(), "[sampler\n").unwrap();

    let (_stdout, stderr, exit_code) = sandbox.run(&["thumbs", "--duration", "10"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to load config"));
    assert!(stderr.contains("config.toml"));
}
