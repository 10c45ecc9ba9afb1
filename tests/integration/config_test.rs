//! Integration tests for the config command

use predicates::prelude::*;

use crate::helpers::Sandbox;

#[test]
fn show_prints_defaults_without_a_file() {
    let sandbox = Sandbox::new();
    let (stdout, _stderr, exit_code) = sandbox.run(&["config", "show"]);

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout.trim_end(), @r#"
    [sampler]
    interval_secs = 10.0
    thumb_width = 80
    thumb_height = 45
    seek_timeout_ms = 2000
    stall_policy = "skip"

    [timeline]
    waveform_samples = 200
    nudge_secs = 5.0

    [tui]
    theme = "studio"
    "#);
}

#[test]
fn path_prints_override() {
    let sandbox = Sandbox::new();
    let expected = sandbox.config_path().display().to_string();

    sandbox
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn init_writes_file_once() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    let content = std::fs::read_to_string(sandbox.config_path()).unwrap();
    assert!(content.contains("[sampler]"));

    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    sandbox
        .cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn show_reflects_file_values() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.config_path(),
        "[sampler]\nstall_policy = \"abort\"\n\n[tui]\ntheme = \"ocean\"\n",
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stall_policy = \"abort\""))
        .stdout(predicate::str::contains("theme = \"ocean\""))
        .stdout(predicate::str::contains("interval_secs = 10.0"));
}

#[test]
fn invalid_value_is_rejected() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.config_path(), "[timeline]\nnudge_secs = -1.0\n").unwrap();

    let (_stdout, stderr, exit_code) = sandbox.run(&["config", "show"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("timeline.nudge_secs"));
}
