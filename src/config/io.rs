// src/config/io.rs
use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::{AbapscanToml, Config};
use crate::catalog::{CatalogSpec, PatternCatalog};
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE: &str = "abapscan.toml";

/// Reads `path` if it exists; a missing file leaves the defaults in place.
///
/// # Errors
/// Returns error if the file is unreadable, malformed, or breaks catalog invariants.
pub fn load_from(path: &Path, verbose: bool) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config { verbose, ..Config::default() });
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    let mut config = parse_toml(&content).map_err(|err| match err {
        ConfigError::Toml { source, .. } => ConfigError::Toml {
            source,
            path: path.to_path_buf(),
        },
        other => other,
    })?;
    config.verbose = verbose;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Parses TOML content into a validated config.
///
/// # Errors
/// Returns error on invalid TOML or an invalid catalog.
pub fn parse_toml(content: &str) -> Result<Config> {
    let raw: AbapscanToml = toml::from_str(content).map_err(|source| ConfigError::Toml {
        source,
        path: Path::new("<inline>").to_path_buf(),
    })?;
    Ok(Config {
        catalog: PatternCatalog::try_from(raw.catalog)?,
        limits: raw.limits,
        verbose: false,
    })
}

/// Renders `config` back to TOML.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_toml(config: &Config) -> Result<String> {
    let raw = AbapscanToml {
        catalog: CatalogSpec::from(&config.catalog),
        limits: config.limits,
    };
    Ok(toml::to_string_pretty(&raw)?)
}

/// Writes the default configuration to `path`.
///
/// # Errors
/// Returns error if the file exists and `force` is unset, or the write fails.
pub fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists { path: path.to_path_buf() });
    }
    let content = to_toml(&Config::default())?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        source,
        path: path.to_path_buf(),
    })
}
