//! Error types for `weft-settings`
//!
//! Settings loading is fail-fast: a malformed record is fatal at load time
//! and surfaced to the operator with the offending field paths. This module
//! provides the error hierarchy and the CLI exit-code mapping.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `weft-settings` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Settings error (invalid YAML/JSON, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `weft-settings` operations.
///
/// Aggregates all domain-specific errors and provides a unified interface
/// for error handling and exit code mapping.
#[derive(Debug, Error)]
pub enum WeftError {
    /// Settings loading or validation error
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Password hashing error
    #[error(transparent)]
    Hash(#[from] HashError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl WeftError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Settings(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Hash(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Settings Errors
// ============================================================================

/// Settings loading and validation errors.
///
/// These errors cover all failure modes during parsing, validation, and
/// environment-variable substitution of a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// YAML/JSON parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the settings file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Settings validation failed
    #[error("validation failed for {path}: {} issue(s)", errors.len())]
    ValidationError {
        /// Path to the settings file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Settings file not found or unreadable
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Settings file extension is not a supported format
    #[error("unsupported settings format '{extension}' for {path} (expected .yaml, .yml, or .json)")]
    UnsupportedFormat {
        /// Path to the settings file
        path: PathBuf,
        /// The file extension that was not recognized
        extension: String,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Environment variable referenced in the settings file is not set
    #[error("environment variable '{var}' not set (referenced at {location})")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Location where it was referenced
        location: String,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during settings validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "adminAuth.users[1].password")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - validation failure that prevents the settings from being used
    Error,
    /// Warning - potential issue that does not prevent loading
    Warning,
}

// ============================================================================
// Hashing Errors
// ============================================================================

/// Errors from hashed-secret generation.
#[derive(Debug, Error)]
pub enum HashError {
    /// The hashing backend rejected the input
    #[error("failed to hash secret material: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `weft-settings` operations.
pub type Result<T> = std::result::Result<T, WeftError>;

// ============================================================================
// Tests
// ============================================================================
