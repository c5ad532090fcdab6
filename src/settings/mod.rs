//! Settings model, loading pipeline, validation, and host defaults.
//!
//! The Weft runtime reads one settings file at startup. The record is
//! loaded, validated, defaulted, and then held immutable for the lifetime
//! of the process.

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{LoadResult, LoadWarning, SettingsLimits, SettingsLoader};
pub use schema::Settings;
pub use validation::{ValidationResult, Validator};
