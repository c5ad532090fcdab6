//! Command-line interface for the `weft-settings` operator tool.

pub mod args;
pub mod commands;
