//! Settings validation
//!
//! Schema shape is enforced by typed deserialization; this module covers
//! the semantic invariants on top of it. Validation is performed on the
//! fully deserialized [`Settings`] record and collects ALL issues (doesn't
//! stop at first) so the operator gets complete feedback in one pass.

use crate::error::{Severity, ValidationIssue};
use crate::secrets;
use crate::settings::loader::SettingsLimits;
use crate::settings::schema::{
    AdminAuth, AdminRoot, ContextStorage, EditorTheme, HttpNodeAuth, RECOGNIZED_PERMISSIONS,
    Settings, StoreTarget,
};

use std::collections::HashSet;

// ============================================================================
// Public API
// ============================================================================

/// Result of settings validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Settings validator.
///
/// Walks a [`Settings`] record and collects issues with their field paths.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a settings record and returns the result.
    pub fn validate(&mut self, settings: &Settings, limits: &SettingsLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        if let Some(auth) = &settings.admin_auth {
            self.validate_admin_auth(auth, limits);
        }

        if let Some(auth) = &settings.http_node_auth {
            self.validate_http_node_auth(auth);
        }

        if let Some(root) = &settings.http_admin_root {
            self.validate_admin_root(root);
        }

        if let Some(storage) = &settings.context_storage {
            self.validate_context_storage(storage);
        }

        if let Some(theme) = &settings.editor_theme {
            self.validate_editor_theme(theme);
        }

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Admin Authentication
    // ========================================================================

    /// Validates the `adminAuth` section.
    fn validate_admin_auth(&mut self, auth: &AdminAuth, limits: &SettingsLimits) {
        if auth.users.is_empty() {
            self.add_error(
                "adminAuth.users",
                "At least one user is required when adminAuth is present",
            );
            return;
        }

        if auth.users.len() > limits.max_users {
            self.add_error(
                "adminAuth.users",
                &format!(
                    "Too many users: {} (maximum: {}). \
                     Set WEFT_MAX_USERS to increase the limit.",
                    auth.users.len(),
                    limits.max_users
                ),
            );
        }

        let mut usernames = HashSet::new();
        for (idx, user) in auth.users.iter().enumerate() {
            let path = format!("adminAuth.users[{idx}]");

            if user.username.is_empty() {
                self.add_error(&format!("{path}.username"), "Username cannot be empty");
            }

            if !usernames.insert(&user.username) {
                self.add_error(
                    &format!("{path}.username"),
                    &format!("Duplicate username: '{}'", user.username),
                );
            }

            self.validate_hashed_secret(&user.password, &format!("{path}.password"));
            self.validate_permissions(&user.permissions, &format!("{path}.permissions"));
        }
    }

    /// Validates a permission grant against the recognized capability set.
    fn validate_permissions(&mut self, permissions: &str, path: &str) {
        if !RECOGNIZED_PERMISSIONS.contains(&permissions) {
            self.add_error(
                path,
                &format!(
                    "Unrecognized permission '{permissions}'. Valid values: {}",
                    RECOGNIZED_PERMISSIONS.join(", ")
                ),
            );
        }
    }

    // ========================================================================
    // HTTP Node Authentication
    // ========================================================================

    /// Validates the `httpNodeAuth` section.
    fn validate_http_node_auth(&mut self, auth: &HttpNodeAuth) {
        if auth.user.is_empty() {
            self.add_error("httpNodeAuth.user", "Username cannot be empty");
        }

        self.validate_hashed_secret(&auth.pass, "httpNodeAuth.pass");
    }

    // ========================================================================
    // Admin UI Mount Point
    // ========================================================================

    /// Validates the `httpAdminRoot` section.
    fn validate_admin_root(&mut self, root: &AdminRoot) {
        match root {
            AdminRoot::Flag(true) => {
                self.add_error(
                    "httpAdminRoot",
                    "Got 'true'; use a mount path to enable the editor or 'false' to disable it",
                );
            }
            AdminRoot::Flag(false) => {}
            AdminRoot::Path(path) => {
                if path.is_empty() {
                    self.add_error("httpAdminRoot", "Mount path cannot be empty");
                } else if !path.starts_with('/') {
                    self.add_error(
                        "httpAdminRoot",
                        &format!("Mount path '{path}' must begin with '/'"),
                    );
                }
            }
        }
    }

    // ========================================================================
    // Context Storage
    // ========================================================================

    /// Validates the `contextStorage` section.
    fn validate_context_storage(&mut self, storage: &ContextStorage) {
        match &storage.default {
            Some(StoreTarget::Alias(name)) => {
                if !storage.stores.contains_key(name) {
                    let available: Vec<&str> =
                        storage.stores.keys().map(String::as_str).collect();
                    let hint = if available.is_empty() {
                        "no named stores are configured".to_string()
                    } else {
                        format!("available stores: {}", available.join(", "))
                    };
                    self.add_error(
                        "contextStorage.default",
                        &format!("Unknown store '{name}' ({hint})"),
                    );
                }
            }
            Some(StoreTarget::Store(store)) => {
                if store.module.is_empty() {
                    self.add_error(
                        "contextStorage.default.module",
                        "Storage module selector cannot be empty",
                    );
                }
            }
            None => {}
        }

        for (name, store) in &storage.stores {
            if store.module.is_empty() {
                self.add_error(
                    &format!("contextStorage.{name}.module"),
                    "Storage module selector cannot be empty",
                );
            }
        }
    }

    // ========================================================================
    // Editor Theme
    // ========================================================================

    /// Validates the `editorTheme` section.
    fn validate_editor_theme(&mut self, theme: &EditorTheme) {
        if let Some(page) = &theme.page {
            if page.title.as_deref() == Some("") {
                self.add_warning("editorTheme.page.title", "Title is empty");
            }
        }
        if let Some(header) = &theme.header {
            if header.title.as_deref() == Some("") {
                self.add_warning("editorTheme.header.title", "Title is empty");
            }
        }
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Validates that a credential field holds a hashed secret, not plaintext.
    fn validate_hashed_secret(&mut self, value: &str, path: &str) {
        if value.is_empty() {
            self.add_error(path, "Hashed secret is required");
            return;
        }

        if secrets::recognize(value).is_none() {
            self.add_error(
                path,
                "Not a recognized hashed secret (expected a bcrypt '$2b$...' or \
                 PHC '$argon2id$...' hash, never a plaintext password)",
            );
        }
    }

    /// Adds an error to the collection.
    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
