//! Observability module
//!
//! Logging infrastructure for the `weft-settings` CLI itself. The settings
//! record's `logging` section configures the host runtime's sinks and is
//! plain data; it has nothing to do with this module.

pub mod logging;

pub use logging::{LogFormat, init_logging};
