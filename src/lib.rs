//! `weft-settings` - Runtime settings for the Weft flow runtime
//!
//! This library provides the typed settings model, loading pipeline, and
//! validation used by the Weft runtime at startup, plus the pieces backing
//! the `weft-settings` operator CLI.

pub mod cli;
pub mod error;
pub mod observability;
pub mod secrets;
pub mod settings;
