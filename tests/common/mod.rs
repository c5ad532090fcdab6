//! Shared integration-test harness for running the `weft-settings` binary
//! as a child process and inspecting its output.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Helpers for spawning the `weft-settings` binary against fixtures.
pub struct WeftSettingsProcess;

impl WeftSettingsProcess {
    /// Resolves a fixture file under `tests/fixtures/`.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    /// Runs the binary with the given arguments and captures its output.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_weft-settings"))
            .args(args)
            .output()
            .expect("failed to run weft-settings")
    }

    /// Runs the binary with data piped to stdin.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_with_stdin(args: &[&str], stdin_data: &str) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_weft-settings"))
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn weft-settings");

        child
            .stdin
            .as_mut()
            .expect("stdin not captured")
            .write_all(stdin_data.as_bytes())
            .expect("failed to write stdin");

        child.wait_with_output().expect("failed to wait for child")
    }
}
