// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a single unit's scan is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("source is {chars} characters (limit: {limit})")]
    LimitExceeded { chars: usize, limit: usize },

    #[error("scan exceeded its {budget_ms} ms budget")]
    Timeout { budget_ms: u64 },
}

/// Catalog contents that break its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("field {0} is listed as both renamed and removed")]
    Overlap(String),

    #[error("invalid identifier {0:?} in catalog")]
    InvalidIdentifier(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("{path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
