//! Shared helpers for integration tests

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Isolated config location: the file does not exist until a test writes it.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `assert_cmd` command with colours off and config isolated.
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_scrubline"));
        cmd.env("NO_COLOR", "1")
            .env_remove("SCRUBLINE_LOG")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }

    /// Run with `args` and capture (stdout, stderr, exit code).
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_scrubline"))
            .args(args)
            .arg("--config")
            .arg(self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("SCRUBLINE_LOG")
            .output()
            .expect("Failed to execute scrubline");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);

        (stdout, stderr, exit_code)
    }
}
