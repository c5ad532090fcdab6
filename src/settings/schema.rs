//! Settings schema types
//!
//! This module defines the typed settings record for the Weft runtime.
//! Every top-level section is optional; an absent section means the host
//! default applies (see [`crate::settings::defaults`]). Field names on the
//! wire are camelCase.
//!
//! Sections are typed structs rather than loose maps so that a malformed
//! record fails at load time, not at first use inside the host.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Top-Level Settings Record
// ============================================================================

/// Root settings record for the Weft runtime.
///
/// Loaded once at process start and frozen. Unknown top-level fields are
/// ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Credentialed access to the editor/admin surface
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_auth: Option<AdminAuth>,

    /// Branding shown in the editor web UI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_theme: Option<EditorTheme>,

    /// Mount point of the admin UI; `false` disables the editor entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_admin_root: Option<AdminRoot>,

    /// Basic-auth gate for flow-defined HTTP endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_node_auth: Option<HttpNodeAuth>,

    /// Backends for persisted execution context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_storage: Option<ContextStorage>,

    /// Sink configuration for the host's logging subsystem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingSettings>,
}

impl Settings {
    /// Returns `true` if the record disables the admin editor UI.
    #[must_use]
    pub fn admin_ui_disabled(&self) -> bool {
        matches!(self.http_admin_root, Some(AdminRoot::Flag(false)))
    }

    /// Returns `true` if the editor/admin surface requires credentials.
    #[must_use]
    pub const fn requires_admin_auth(&self) -> bool {
        self.admin_auth.is_some()
    }
}

// ============================================================================
// Admin Authentication
// ============================================================================

/// Credentialed access to the editor/admin surface.
///
/// When this section is absent, the editor is open (no authentication).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAuth {
    /// Authentication strategy selector
    #[serde(rename = "type")]
    pub auth_type: AuthType,

    /// Accounts permitted to authenticate, in order
    #[serde(default)]
    pub users: Vec<UserCredential>,
}

/// Authentication strategy.
///
/// `credentials` is the only strategy this record can declare; pluggable
/// strategies are registered in the host, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// Username/hashed-password credential list
    Credentials,
}

/// One credential record.
///
/// `password` holds a one-way hash (bcrypt-shaped or a PHC string), never
/// the plaintext secret. Verification is performed by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredential {
    /// Login name (unique within the user list)
    pub username: String,

    /// Hashed secret
    pub password: String,

    /// Capability grant: `"*"` for full access, or a recognized capability
    /// string such as `read` or `write`
    pub permissions: String,
}

/// Capability strings accepted in `permissions`.
pub const RECOGNIZED_PERMISSIONS: &[&str] = &["*", "read", "write"];

// ============================================================================
// Editor Theme
// ============================================================================

/// Branding text and assets shown in the editor web UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorTheme {
    /// Browser page branding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<ThemePage>,

    /// Editor header branding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<ThemeHeader>,
}

/// Browser page branding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePage {
    /// Page title shown in the browser tab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Favicon path served to the browser
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    /// Additional stylesheet path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
}

/// Editor header branding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeHeader {
    /// Title shown in the editor header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Header image path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Link target for the header title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ============================================================================
// Admin UI Mount Point
// ============================================================================

/// Mount point of the admin UI.
///
/// Two wire forms: the boolean `false` disables the editor, a string sets
/// the mount path. `true` has no meaning and is rejected by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdminRoot {
    /// Boolean form; only `false` is meaningful
    Flag(bool),

    /// Mount path for the admin UI (must begin with `/`)
    Path(String),
}

// ============================================================================
// HTTP Node Authentication
// ============================================================================

/// Basic-auth gate for flow-defined HTTP endpoints.
///
/// Distinct from [`AdminAuth`]: this protects endpoints exposed by flows,
/// not the editor itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpNodeAuth {
    /// Basic-auth username
    pub user: String,

    /// Hashed secret
    pub pass: String,
}

// ============================================================================
// Context Storage
// ============================================================================

/// Backends for persisted execution context.
///
/// `default` selects the store used when flows do not name one explicitly:
/// either an inline store definition or an alias naming one of the other
/// configured stores. Additional named stores are declared as siblings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextStorage {
    /// Store used when no store name is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<StoreTarget>,

    /// Additional named stores
    #[serde(flatten)]
    pub stores: BTreeMap<String, ContextStore>,
}

/// Either an inline store definition or an alias to a named store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreTarget {
    /// Alias naming one of the configured sibling stores
    Alias(String),

    /// Inline store definition
    Store(ContextStore),
}

/// A single context-storage backend.
///
/// Valid `module` values are registered by the host at startup; this crate
/// only requires the selector to be present and non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextStore {
    /// Backend module selector (e.g. `localfilesystem`, `memory`)
    pub module: String,

    /// Backend-specific options, passed through opaquely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

// ============================================================================
// Logging
// ============================================================================

/// Sink configuration for the host's logging subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingSettings {
    /// The console sink
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<ConsoleSink>,
}

/// Console sink settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleSink {
    /// Minimum severity emitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,

    /// Whether the metrics stream is emitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<bool>,

    /// Whether the audit stream is emitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<bool>,
}

/// Log severity accepted by the host.
///
/// Exactly these six values; anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Unrecoverable host failures only
    Fatal,
    /// Errors
    Error,
    /// Warnings
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug detail
    Debug,
    /// Full trace output
    Trace,
}

impl LogLevel {
    /// Returns the wire name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
