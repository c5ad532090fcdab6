mod common;

use common::WeftSettingsProcess;

/// A complete, well-formed settings file passes validation.
#[test]
fn validate_valid_settings() {
    let settings = WeftSettingsProcess::fixture_path("simple_settings.yaml");
    let output = WeftSettingsProcess::spawn_command(&["validate", settings.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "validate should succeed for valid settings: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// The empty mapping `{}` is a valid record (everything defaults).
#[test]
fn validate_minimal_settings() {
    let settings = WeftSettingsProcess::fixture_path("minimal.yaml");
    let output = WeftSettingsProcess::spawn_command(&["validate", settings.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "empty mapping should pass validation: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Several files can be validated in one invocation.
#[test]
fn validate_multiple_files() {
    let first = WeftSettingsProcess::fixture_path("minimal.yaml");
    let second = WeftSettingsProcess::fixture_path("admin_disabled.yaml");
    let output = WeftSettingsProcess::spawn_command(&[
        "validate",
        first.to_str().unwrap(),
        second.to_str().unwrap(),
    ]);
    assert!(output.status.success());
}

/// A plaintext password in a credential field is a fatal validation error.
#[test]
fn plaintext_password_rejected() {
    let settings = WeftSettingsProcess::fixture_path("plaintext_password.yaml");
    let output = WeftSettingsProcess::spawn_command(&["validate", settings.to_str().unwrap()]);
    assert!(
        !output.status.success(),
        "plaintext password should fail validation"
    );
    assert_eq!(output.status.code(), Some(2), "settings errors exit with 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("plaintext") || stderr.contains("hashed"),
        "error should explain the hash requirement: {stderr}"
    );
}

/// Only the six documented log levels are accepted.
#[test]
fn unknown_log_level_rejected() {
    let settings = WeftSettingsProcess::fixture_path("bad_level.yaml");
    let output = WeftSettingsProcess::spawn_command(&["validate", settings.to_str().unwrap()]);
    assert!(!output.status.success(), "'verbose' is not a valid level");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("verbose") || stderr.contains("unknown variant"),
        "error should name the bad level: {stderr}"
    );
}

/// Empty files are rejected with a clear error.
#[test]
fn empty_file_rejected() {
    let settings = WeftSettingsProcess::fixture_path("empty.yaml");
    let output = WeftSettingsProcess::spawn_command(&["validate", settings.to_str().unwrap()]);
    assert!(!output.status.success(), "empty file should fail validation");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("empty") || stderr.contains("Empty"),
        "error should mention 'empty': {stderr}"
    );
}

/// YAML syntax errors are caught with a parse error message.
#[test]
fn yaml_syntax_error_rejected() {
    let settings = WeftSettingsProcess::fixture_path("bad_yaml.yaml");
    let output = WeftSettingsProcess::spawn_command(&["validate", settings.to_str().unwrap()]);
    assert!(
        !output.status.success(),
        "invalid YAML syntax should fail validation"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("parse") || stderr.contains("error"),
        "error should describe the parse failure: {stderr}"
    );
}

/// A `default` alias naming an unconfigured store is rejected.
#[test]
fn dangling_store_alias_rejected() {
    let settings = WeftSettingsProcess::fixture_path("dangling_alias.yaml");
    let output = WeftSettingsProcess::spawn_command(&["validate", settings.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("disk"),
        "error should name the missing store: {stderr}"
    );
}

/// A resolvable `default` alias with named stores passes.
#[test]
fn resolvable_store_alias_accepted() {
    let settings = WeftSettingsProcess::fixture_path("multi_store.yaml");
    let output = WeftSettingsProcess::spawn_command(&["validate", settings.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "alias to a configured store should pass: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// JSON settings files are supported.
#[test]
fn json_settings_accepted() {
    let settings = WeftSettingsProcess::fixture_path("node_auth.json");
    let output = WeftSettingsProcess::spawn_command(&["validate", settings.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "JSON settings should pass: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Unknown top-level keys are ignored but warned about, with a suggestion.
#[test]
fn unknown_key_warns_but_passes() {
    let settings = WeftSettingsProcess::fixture_path("unknown_key.yaml");
    let output = WeftSettingsProcess::spawn_command(&["validate", settings.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "unknown keys are ignored, not fatal: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("did you mean 'adminAuth'"),
        "should suggest the recognized key: {stderr}"
    );
}

/// Strict mode promotes warnings to failures.
#[test]
fn strict_mode_fails_on_warnings() {
    let settings = WeftSettingsProcess::fixture_path("unknown_key.yaml");
    let output =
        WeftSettingsProcess::spawn_command(&["validate", "--strict", settings.to_str().unwrap()]);
    assert!(
        !output.status.success(),
        "strict mode should fail on warnings"
    );
    assert_eq!(output.status.code(), Some(2));
}

/// JSON report output carries per-file entries and a summary.
#[test]
fn validate_json_report() {
    let good = WeftSettingsProcess::fixture_path("minimal.yaml");
    let bad = WeftSettingsProcess::fixture_path("plaintext_password.yaml");
    let output = WeftSettingsProcess::spawn_command(&[
        "validate",
        "--format",
        "json",
        good.to_str().unwrap(),
        bad.to_str().unwrap(),
    ]);
    assert!(!output.status.success(), "one failing file fails the run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value =
        serde_json::from_str(&stdout).expect("output should be valid JSON");

    assert_eq!(report["summary"]["total"], 2);
    assert_eq!(report["summary"]["passed"], 1);
    assert_eq!(report["summary"]["failed"], 1);
    assert_eq!(report["files"][0]["status"], "passed");
    assert_eq!(report["files"][1]["status"], "failed");
    assert!(
        report["files"][1]["errors"]
            .as_array()
            .is_some_and(|e| !e.is_empty()),
        "failing file should list its issues"
    );
}

/// Nonexistent paths are an I/O error, not a settings error.
#[test]
fn missing_file_is_io_error() {
    let output = WeftSettingsProcess::spawn_command(&["validate", "/nonexistent/settings.yaml"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(3), "I/O errors exit with 3");
}

/// Unsupported extensions are rejected up front.
#[test]
fn unsupported_format_rejected() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "httpAdminRoot = false\n").unwrap();

    let output = WeftSettingsProcess::spawn_command(&["validate", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unsupported"),
        "error should mention the unsupported format: {stderr}"
    );
}
