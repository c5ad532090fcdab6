//! Settings loader
//!
//! This module implements the settings loading pipeline:
//! 1. File-size guard
//! 2. Environment variable expansion (pre-parse, on raw text)
//! 3. YAML or JSON parsing (chosen by file extension)
//! 4. Unknown-top-level-key scan (ignored with a warning)
//! 5. Deserialization to the typed record
//! 6. Validation
//! 7. Host-default application
//! 8. Freeze with `Arc`
//!
//! Loading is a single synchronous pass with no side effects; identical
//! input yields an identical record.

use crate::error::SettingsError;
use crate::settings::defaults::apply_defaults;
use crate::settings::schema::Settings;
use crate::settings::validation::Validator;

use serde_yaml::Value;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Public API
// ============================================================================

/// Top-level settings keys this crate recognizes.
///
/// Anything else at the root is ignored for forward compatibility.
pub const RECOGNIZED_KEYS: &[&str] = &[
    "adminAuth",
    "editorTheme",
    "httpAdminRoot",
    "httpNodeAuth",
    "contextStorage",
    "logging",
];

/// Limits for settings loading to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct SettingsLimits {
    /// Maximum settings file size in bytes.
    pub max_settings_size: usize,

    /// Maximum number of admin users.
    pub max_users: usize,
}

impl Default for SettingsLimits {
    fn default() -> Self {
        Self {
            max_settings_size: env_or("WEFT_MAX_SETTINGS_SIZE", 1024 * 1024),
            max_users: env_or("WEFT_MAX_USERS", 100),
        }
    }
}

/// Result of loading a settings file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded, validated, fully-defaulted settings record.
    pub settings: Arc<Settings>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during settings loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Settings loader.
///
/// Handles the full pipeline from a settings file to a frozen [`Settings`].
#[derive(Debug)]
pub struct SettingsLoader {
    limits: SettingsLimits,
}

impl SettingsLoader {
    /// Creates a new settings loader with the given limits.
    #[must_use]
    pub const fn new(limits: SettingsLimits) -> Self {
        Self { limits }
    }

    /// Creates a new settings loader with default limits.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(SettingsLimits::default())
    }

    /// Loads a settings file and returns the frozen record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or its extension is not a supported format
    /// - Parsing fails or the root is not a mapping
    /// - A required environment variable is not set
    /// - Validation fails
    pub fn load(&self, path: &Path) -> Result<LoadResult, SettingsError> {
        let mut warnings = Vec::new();

        let format = FileFormat::from_path(path)?;

        // Check file size limit
        let metadata = std::fs::metadata(path).map_err(|_| SettingsError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size =
            usize::try_from(metadata.len()).unwrap_or(self.limits.max_settings_size);
        if file_size > self.limits.max_settings_size {
            return Err(SettingsError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.limits.max_settings_size),
            });
        }

        // Stage 0: Read raw file content
        let raw_content = std::fs::read_to_string(path).map_err(|_| SettingsError::MissingFile {
            path: path.to_path_buf(),
        })?;

        // Handle UTF-8 BOM
        let raw_content = raw_content.strip_prefix('\u{feff}').unwrap_or(&raw_content);

        // Stage 1: Environment variable substitution (before parsing)
        let mut env_sub = EnvSubstitution::new();
        let substituted = env_sub.substitute(raw_content, path)?;
        warnings.extend(env_sub.warnings);

        // Stage 2: Parse into the common value form
        let root = format.parse(&substituted, path)?;

        if root.is_null() {
            return Err(SettingsError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "Settings file is empty".to_string(),
            });
        }

        let Some(mapping) = root.as_mapping() else {
            return Err(SettingsError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "Settings must be a mapping of sections".to_string(),
            });
        };

        // Stage 3: Unknown-top-level-key scan
        for key in mapping.keys() {
            if let Some(name) = key.as_str() {
                if !RECOGNIZED_KEYS.contains(&name) {
                    warnings.push(unknown_key_warning(name, path));
                }
            }
        }

        // Stage 4: Deserialize to the typed record
        let mut settings: Settings =
            serde_yaml::from_value(root).map_err(|e| SettingsError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: format!("Failed to deserialize settings: {e}"),
            })?;

        // Stage 5: Validation
        let mut validator = Validator::new();
        let validation_result = validator.validate(&settings, &self.limits);

        if validation_result.has_errors() {
            return Err(SettingsError::ValidationError {
                path: path.display().to_string(),
                errors: validation_result.errors,
            });
        }

        for issue in validation_result.warnings {
            warnings.push(LoadWarning {
                message: issue.message,
                location: Some(issue.path),
            });
        }

        // Stage 6: Host defaults
        apply_defaults(&mut settings);

        // Stage 7: Freeze
        Ok(LoadResult {
            settings: Arc::new(settings),
            warnings,
        })
    }
}

// ============================================================================
// File Formats
// ============================================================================

/// Supported settings file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Picks the format from the file extension.
    fn from_path(path: &Path) -> Result<Self, SettingsError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            other => Err(SettingsError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.unwrap_or("<none>").to_string(),
            }),
        }
    }

    /// Parses raw text into the common value form.
    fn parse(self, content: &str, path: &Path) -> Result<Value, SettingsError> {
        match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| SettingsError::ParseError {
                path: path.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            }),
            Self::Json => {
                let json: serde_json::Value =
                    serde_json::from_str(content).map_err(|e| SettingsError::ParseError {
                        path: path.to_path_buf(),
                        line: Some(e.line()),
                        message: e.to_string(),
                    })?;
                Ok(json_to_yaml(&json))
            }
        }
    }
}

// ============================================================================
// Environment Variable Substitution
// ============================================================================

/// Pre-parse environment variable substitution.
///
/// Runs on raw text BEFORE parsing to preserve type inference. This is how
/// operators keep hashed secrets out of the settings file itself.
struct EnvSubstitution {
    warnings: Vec<LoadWarning>,
}

impl EnvSubstitution {
    const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Substitutes environment variables in raw settings text.
    ///
    /// Supports:
    /// - `${VAR}` - expand to value (empty string if unset with warning)
    /// - `${VAR:-default}` - expand to default if unset
    /// - `${VAR:?message}` - fail if unset
    /// - `$$` - literal `$`
    fn substitute(&mut self, raw: &str, source_path: &Path) -> Result<String, SettingsError> {
        let mut result = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    // Escaped $$ -> literal $
                    chars.next();
                    result.push('$');
                }
                Some('{') => {
                    chars.next();
                    let (var_name, default, error_msg) = Self::parse_var_spec(&mut chars, source_path)?;

                    match std::env::var(&var_name) {
                        Ok(value) => result.push_str(&value),
                        Err(_) => {
                            if let Some(default_val) = default {
                                result.push_str(&default_val);
                            } else if let Some(msg) = error_msg {
                                return Err(SettingsError::EnvVarNotSet {
                                    var: var_name,
                                    location: msg,
                                });
                            } else {
                                // Missing var without default -> empty string with warning
                                self.warnings.push(LoadWarning {
                                    message: format!(
                                        "Environment variable '{var_name}' is not set, using empty string"
                                    ),
                                    location: Some(source_path.display().to_string()),
                                });
                            }
                        }
                    }
                }
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    /// Parses a variable specification from `${...}`.
    ///
    /// Returns (`var_name`, `default_value`, `error_message`).
    fn parse_var_spec(
        chars: &mut std::iter::Peekable<std::str::Chars>,
        source_path: &Path,
    ) -> Result<(String, Option<String>, Option<String>), SettingsError> {
        let mut var_name = String::new();

        while let Some(&c) = chars.peek() {
            match c {
                '}' => {
                    chars.next();
                    return Ok((var_name, None, None));
                }
                ':' => {
                    chars.next();
                    match chars.peek() {
                        Some('-') => {
                            chars.next();
                            let default = Self::read_until_close(chars, source_path)?;
                            return Ok((var_name, Some(default), None));
                        }
                        Some('?') => {
                            chars.next();
                            let msg = Self::read_until_close(chars, source_path)?;
                            return Ok((var_name, None, Some(msg)));
                        }
                        _ => var_name.push(':'),
                    }
                }
                _ => {
                    chars.next();
                    var_name.push(c);
                }
            }
        }

        Err(SettingsError::ParseError {
            path: source_path.to_path_buf(),
            line: None,
            message: format!("Unclosed environment variable reference: ${{{var_name}"),
        })
    }

    /// Reads content until closing `}`, handling nested braces.
    fn read_until_close(
        chars: &mut std::iter::Peekable<std::str::Chars>,
        source_path: &Path,
    ) -> Result<String, SettingsError> {
        let mut value = String::new();
        let mut depth = 1;

        for c in chars.by_ref() {
            match c {
                '{' => {
                    depth += 1;
                    value.push(c);
                }
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(value);
                    }
                    value.push(c);
                }
                _ => value.push(c),
            }
        }

        Err(SettingsError::ParseError {
            path: source_path.to_path_buf(),
            line: None,
            message: "Unclosed environment variable reference".to_string(),
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds the warning for an ignored top-level key, with a nearest-match
/// suggestion when one of the recognized keys is close enough.
fn unknown_key_warning(name: &str, path: &Path) -> LoadWarning {
    let suggestion = RECOGNIZED_KEYS
        .iter()
        .map(|k| (k, strsim::jaro_winkler(&name.to_lowercase(), &k.to_lowercase())))
        .filter(|(_, score)| *score >= 0.85)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(k, _)| *k);

    let message = suggestion.map_or_else(
        || format!("Unknown setting '{name}' is ignored"),
        |k| format!("Unknown setting '{name}' is ignored (did you mean '{k}'?)"),
    );

    LoadWarning {
        message,
        location: Some(path.display().to_string()),
    }
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Converts a `serde_json::Value` to `serde_yaml::Value`.
#[allow(clippy::option_if_let_else)]
fn json_to_yaml(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                Value::Number(serde_yaml::Number::from(f))
            } else {
                Value::Null
            }
        }
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(arr) => Value::Sequence(arr.iter().map(json_to_yaml).collect()),
        serde_json::Value::Object(obj) => {
            let map: serde_yaml::Mapping = obj
                .iter()
                .map(|(k, v)| (Value::String(k.clone()), json_to_yaml(v)))
                .collect();
            Value::Mapping(map)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
