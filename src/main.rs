//! `weft-settings` — Settings tooling for the Weft flow runtime

use clap::Parser;

use weft_settings::cli::args::Cli;
use weft_settings::cli::commands;
use weft_settings::error::ExitCode;
use weft_settings::observability::{LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(LogFormat::Human, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
