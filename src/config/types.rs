use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogSpec, PatternCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitConfig {
    #[serde(default = "default_max_unit_chars")]
    pub max_unit_chars: usize,
    #[serde(default = "default_scan_timeout_ms")]
    pub scan_timeout_ms: u64,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_unit_chars: default_max_unit_chars(),
            scan_timeout_ms: default_scan_timeout_ms(),
        }
    }
}

const fn default_max_unit_chars() -> usize { 1_000_000 }
const fn default_scan_timeout_ms() -> u64 { 2_000 }

/// On-disk shape of `abapscan.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AbapscanToml {
    #[serde(default)]
    pub catalog: CatalogSpec,
    #[serde(default)]
    pub limits: LimitConfig,
}

/// Validated runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub catalog: PatternCatalog,
    pub limits: LimitConfig,
    pub verbose: bool,
}
