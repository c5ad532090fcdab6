//! Settings command handlers
//!
//! Implements `validate` and `show`.

use serde::Serialize;

use crate::cli::args::{OutputFormat, ShowArgs, ShowFormat, ValidateArgs};
use crate::error::{SettingsError, ValidationIssue, WeftError};
use crate::settings::loader::{LoadResult, SettingsLoader};

// ============================================================================
// validate
// ============================================================================

/// Per-file entry in the JSON validation report.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    status: &'static str,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Summary block in the JSON validation report.
#[derive(Debug, Serialize)]
struct ReportSummary {
    total: usize,
    passed: usize,
    failed: usize,
}

/// Full JSON validation report.
#[derive(Debug, Serialize)]
struct ValidationReport {
    files: Vec<FileReport>,
    summary: ReportSummary,
}

/// Validate settings files without starting the host runtime.
///
/// All files are processed even when an early one fails, so the report and
/// the logs cover everything; the first failure is returned at the end for
/// exit-code mapping.
///
/// # Errors
///
/// Returns an I/O error if any file does not exist, or a settings error if
/// validation fails for any file.
pub fn validate(args: &ValidateArgs) -> Result<(), WeftError> {
    let loader = SettingsLoader::with_defaults();
    let mut reports = Vec::with_capacity(args.files.len());
    let mut first_failure: Option<WeftError> = None;

    for path in &args.files {
        if !path.exists() {
            return Err(WeftError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )));
        }
        tracing::info!(file = %path.display(), "validating settings");

        let report = match loader.load(path) {
            Ok(result) => report_loaded(path, &result, args.strict),
            Err(err) => {
                let report = report_failed(path, &err);
                if first_failure.is_none() {
                    first_failure = Some(err.into());
                }
                report
            }
        };

        if report.status == "failed" && first_failure.is_none() {
            // Strict mode promoted warnings to a failure
            first_failure = Some(
                SettingsError::ValidationError {
                    path: path.display().to_string(),
                    errors: strict_issues(&report.warnings),
                }
                .into(),
            );
        }

        reports.push(report);
    }

    if args.format == OutputFormat::Json {
        let failed = reports.iter().filter(|r| r.status == "failed").count();
        let report = ValidationReport {
            summary: ReportSummary {
                total: reports.len(),
                passed: reports.len() - failed,
                failed,
            },
            files: reports,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    first_failure.map_or(Ok(()), Err)
}

/// Builds the report entry for a successfully loaded file.
fn report_loaded(path: &std::path::Path, result: &LoadResult, strict: bool) -> FileReport {
    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    let status = if strict && !result.warnings.is_empty() {
        tracing::error!(file = %path.display(), "warnings present in strict mode");
        "failed"
    } else {
        tracing::info!(file = %path.display(), "settings valid");
        "passed"
    };

    FileReport {
        file: path.display().to_string(),
        status,
        errors: Vec::new(),
        warnings: result.warnings.iter().map(|w| w.message.clone()).collect(),
    }
}

/// Builds the report entry for a file that failed to load.
fn report_failed(path: &std::path::Path, err: &SettingsError) -> FileReport {
    let errors = match err {
        SettingsError::ValidationError { errors, .. } => {
            for issue in errors {
                tracing::error!(location = %issue.path, "{}", issue.message);
            }
            errors.iter().map(ToString::to_string).collect()
        }
        other => {
            tracing::error!(file = %path.display(), "{other}");
            vec![other.to_string()]
        }
    };

    FileReport {
        file: path.display().to_string(),
        status: "failed",
        errors,
        warnings: Vec::new(),
    }
}

/// Re-shapes promoted warnings as validation issues for the exit error.
fn strict_issues(warnings: &[String]) -> Vec<ValidationIssue> {
    warnings
        .iter()
        .map(|message| ValidationIssue {
            path: String::new(),
            message: message.clone(),
            severity: crate::error::Severity::Error,
        })
        .collect()
}

// ============================================================================
// show
// ============================================================================

/// Print the effective (validated, fully-defaulted) settings record.
///
/// # Errors
///
/// Returns a settings error if the file fails to load, or a serialization
/// error if the effective record cannot be rendered.
pub fn show(args: &ShowArgs) -> Result<(), WeftError> {
    let loader = SettingsLoader::with_defaults();
    let result = loader.load(&args.file)?;

    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    match args.format {
        ShowFormat::Yaml => print!("{}", serde_yaml::to_string(&*result.settings)?),
        ShowFormat::Json => println!("{}", serde_json::to_string_pretty(&*result.settings)?),
    }

    Ok(())
}
