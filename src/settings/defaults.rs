//! Host defaults applied to validated settings.
//!
//! The loader output is fully defaulted: every section a flow or the host
//! may consult is present after [`apply_defaults`]. Absence of `adminAuth`
//! and `httpNodeAuth` is itself the default (no authentication), so those
//! sections are left untouched.

use crate::settings::schema::{
    AdminRoot, ConsoleSink, ContextStorage, ContextStore, EditorTheme, LogLevel, LoggingSettings,
    Settings, StoreTarget, ThemeHeader, ThemePage,
};

/// Minimum severity emitted when the settings file does not say otherwise.
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// Context-storage backend used when none is configured.
pub const DEFAULT_CONTEXT_MODULE: &str = "memory";

/// Mount point of the admin UI when none is configured.
pub const DEFAULT_ADMIN_ROOT: &str = "/";

/// Branding title used when none is configured.
pub const DEFAULT_TITLE: &str = "Weft";

/// Fills absent sections and fields with the host defaults.
///
/// Idempotent: applying defaults to an already-defaulted record is a no-op,
/// which is what makes serialize-then-reload stable.
pub fn apply_defaults(settings: &mut Settings) {
    let theme = settings.editor_theme.get_or_insert_with(EditorTheme::default);
    let page = theme.page.get_or_insert_with(ThemePage::default);
    if page.title.is_none() {
        page.title = Some(DEFAULT_TITLE.to_string());
    }
    let header = theme.header.get_or_insert_with(ThemeHeader::default);
    if header.title.is_none() {
        header.title = Some(DEFAULT_TITLE.to_string());
    }

    if settings.http_admin_root.is_none() {
        settings.http_admin_root = Some(AdminRoot::Path(DEFAULT_ADMIN_ROOT.to_string()));
    }

    let storage = settings
        .context_storage
        .get_or_insert_with(ContextStorage::default);
    if storage.default.is_none() {
        storage.default = Some(StoreTarget::Store(ContextStore {
            module: DEFAULT_CONTEXT_MODULE.to_string(),
            config: None,
        }));
    }

    let logging = settings.logging.get_or_insert_with(LoggingSettings::default);
    let console = logging.console.get_or_insert_with(ConsoleSink::default);
    if console.level.is_none() {
        console.level = Some(DEFAULT_LOG_LEVEL);
    }
    if console.metrics.is_none() {
        console.metrics = Some(false);
    }
    if console.audit.is_none() {
        console.audit = Some(false);
    }
}
