//! Integration tests for top-level CLI behaviour

use predicates::prelude::*;

use crate::helpers::Sandbox;

#[test]
fn help_lists_every_command() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("view"))
        .stdout(predicate::str::contains("thumbs"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_includes_package_version() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_command_exits_2() {
    let sandbox = Sandbox::new();
    let (_stdout, stderr, exit_code) = sandbox.run(&["frobnicate"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("frobnicate"));
}

#[test]
fn thumbs_help_documents_stall_options() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["thumbs", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--stall-from"))
        .stdout(predicate::str::contains("--abort-on-stall"))
        .stdout(predicate::str::contains("--seek-timeout-ms"));
}

#[test]
fn completions_generate_for_bash() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scrubline"));
}

#[test]
fn view_rejects_negative_duration() {
    let sandbox = Sandbox::new();
    let (_stdout, stderr, exit_code) = sandbox.run(&["view", "--duration=-5"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("non-negative"));
}
