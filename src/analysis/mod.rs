// src/analysis/mod.rs
//! Core analysis logic: scans batches of units for Note 2198647 usages.

pub mod budget;
pub mod matcher;
pub mod patterns;
pub mod worker;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::types::{ScanReport, Unit, UnitReport};

use self::matcher::{Matcher, RegexMatcher};

/// The main analysis engine. Holds the catalog and compiled matchers; scans
/// share it read-only.
pub struct Engine {
    config: Config,
    matcher: Box<dyn Matcher>,
}

impl Engine {
    /// # Errors
    /// Returns error if a catalog field cannot be compiled into a pattern.
    pub fn new(config: Config) -> Result<Self> {
        let matcher = RegexMatcher::new(config.catalog.sql_fields())?;
        Ok(Self::with_matcher(config, Box::new(matcher)))
    }

    #[must_use]
    pub fn with_matcher(config: Config, matcher: Box<dyn Matcher>) -> Self {
        Self { config, matcher }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scans a batch. `units[i]` maps to `report.units[i]`.
    #[must_use]
    pub fn scan(&self, units: &[Unit]) -> ScanReport {
        let start = std::time::Instant::now();
        info!(units = units.len(), "scan started");

        let results: Vec<UnitReport> = units
            .par_iter()
            .map(|unit| self.scan_unit(unit))
            .collect();

        let report = ScanReport {
            total_findings: results.iter().map(UnitReport::finding_count).sum(),
            aborted_units: results.iter().filter(|r| r.diagnostic.is_some()).count(),
            units: results,
            duration_ms: start.elapsed().as_millis(),
        };

        info!(
            findings = report.total_findings,
            aborted = report.aborted_units,
            duration_ms = report.duration_ms,
            "scan finished"
        );
        report
    }

    /// Scans a single unit.
    #[must_use]
    pub fn scan_unit(&self, unit: &Unit) -> UnitReport {
        let report = worker::scan_unit(unit, &self.config, self.matcher.as_ref());
        debug!(
            program = %unit.program_name,
            include = %unit.include_name,
            findings = report.findings.len(),
            "unit scanned"
        );
        report
    }
}
