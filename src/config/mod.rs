// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{AbapscanToml, Config, LimitConfig};

use crate::error::Result;
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `abapscan.toml` from the working directory, or `path` when given.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or validated.
    pub fn load(path: Option<&Path>, verbose: bool) -> Result<Self> {
        io::load_from(path.unwrap_or_else(|| Path::new(CONFIG_FILE)), verbose)
    }

    /// # Errors
    /// Returns error on invalid TOML or an invalid catalog.
    pub fn parse_toml(content: &str) -> Result<Self> {
        io::parse_toml(content)
    }

    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        io::to_toml(self)
    }
}
