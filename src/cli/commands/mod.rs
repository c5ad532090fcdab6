//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod hash;
pub mod settings;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::WeftError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), WeftError> {
    match cli.command {
        Commands::Validate(args) => settings::validate(&args),
        Commands::Show(args) => settings::show(&args),
        Commands::HashPw(args) => hash::run(&args),
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
