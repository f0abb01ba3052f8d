// src/cli/handlers.rs
use crate::analysis::Engine;
use crate::config::{io, Config, CONFIG_FILE};
use crate::exit::AbapscanExit;
use crate::reporting;
use crate::types::{ScanReport, Unit};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Handles the scan command.
///
/// # Errors
/// Returns error if the config or input cannot be read, or output fails.
pub fn handle_scan(
    input: Option<&Path>,
    json: bool,
    config_path: Option<&Path>,
    verbose: bool,
) -> Result<AbapscanExit> {
    let config = Config::load(config_path, verbose)?;
    let raw = read_input(input)?;

    let units = match decode_units(&raw) {
        Ok(units) => units,
        Err(e) => {
            eprintln!("{} invalid input: {e}", "error:".red().bold());
            return Ok(AbapscanExit::InvalidInput);
        }
    };
    debug!(units = units.len(), "decoded input");

    let engine = Engine::new(config)?;
    let report = engine.scan(&units);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.units)?);
    } else {
        reporting::print_report(&report)?;
    }

    Ok(exit_for(&report))
}

/// Decodes the request body: a JSON array of units.
///
/// # Errors
/// Returns error if the body is not a valid unit array.
pub fn decode_units(raw: &str) -> Result<Vec<Unit>, serde_json::Error> {
    serde_json::from_str(raw)
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input.filter(|p| *p != Path::new("-")) {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("could not read stdin")?;
            Ok(buf)
        }
    }
}

fn exit_for(report: &ScanReport) -> AbapscanExit {
    if report.has_aborted() {
        AbapscanExit::ScanAborted
    } else if report.has_findings() {
        AbapscanExit::FindingsReported
    } else {
        AbapscanExit::Success
    }
}

/// Handles the catalog command.
///
/// # Errors
/// Returns error if the config cannot be loaded.
pub fn handle_catalog(json: bool, config_path: Option<&Path>) -> Result<AbapscanExit> {
    let config = Config::load(config_path, false)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config.catalog)?);
    } else {
        reporting::print_catalog(&config.catalog);
    }
    Ok(AbapscanExit::Success)
}

/// Handles the init command.
///
/// # Errors
/// Returns error if the file exists (without `force`) or cannot be written.
pub fn handle_init(force: bool, config_path: Option<&Path>) -> Result<AbapscanExit> {
    let path = config_path.unwrap_or_else(|| Path::new(CONFIG_FILE));
    io::write_default(path, force)?;
    println!("{} {}", "Created".green().bold(), path.display());
    Ok(AbapscanExit::Success)
}
