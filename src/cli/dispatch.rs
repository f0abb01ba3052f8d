//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::{Cli, Commands};
use super::handlers::{handle_catalog, handle_init, handle_scan};
use crate::exit::AbapscanExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(cli: &Cli) -> Result<AbapscanExit> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Some(Commands::Scan { input, json }) => {
            handle_scan(input.as_deref(), *json, config_path, cli.verbose)
        }
        Some(Commands::Catalog { json }) => handle_catalog(*json, config_path),
        Some(Commands::Init { force }) => handle_init(*force, config_path),
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            Ok(AbapscanExit::Success)
        }
    }
}
