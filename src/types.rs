// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ScanError;

/// One scannable fragment of ABAP source (a FORM, METHOD, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(rename = "pgm_name", alias = "pgm")]
    pub program_name: String,
    #[serde(rename = "inc_name", alias = "inc")]
    pub include_name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    #[serde(rename = "name", default)]
    pub unit_name: Option<String>,
    #[serde(rename = "code", default)]
    pub source_text: Option<String>,
}

impl Unit {
    #[must_use]
    pub fn new(program: &str, include: &str, unit_type: &str, source: &str) -> Self {
        Self {
            program_name: program.to_string(),
            include_name: include.to_string(),
            unit_type: unit_type.to_string(),
            unit_name: None,
            source_text: Some(source.to_string()),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.unit_name = Some(name.to_string());
        self
    }

    /// Source text, with an absent body read as empty.
    #[must_use]
    pub fn source(&self) -> &str {
        self.source_text.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetKind {
    Table,
    SqlField,
    Declaration,
}

impl TargetKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::SqlField => "SQL_FIELD",
            Self::Declaration => "DECLARATION",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open `[start, end)` offset range into a unit's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn offset(self, by: usize) -> Self {
        Self { start: self.start + by, end: self.end + by }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A scanner match before deduplication. Spans are byte offsets until the
/// aggregator converts them to character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHit {
    pub target_kind: TargetKind,
    pub target_name: String,
    pub field: Option<String>,
    pub span: Span,
    pub used_identifiers: Vec<String>,
    pub suggested_names: Option<Vec<String>>,
    pub remediation_comment: String,
}

/// A reported obsolete or changed usage, in the service's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub table: Option<String>,
    pub field: Option<String>,
    pub target_type: TargetKind,
    pub target_name: String,
    pub start_char_in_unit: usize,
    pub end_char_in_unit: usize,
    pub used_fields: Vec<String>,
    /// Reserved for confidence scoring; scanners never disambiguate.
    pub ambiguous: bool,
    pub suggested_fields: Option<Vec<String>>,
    pub suggested_statement: String,
}

impl Finding {
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.start_char_in_unit, self.end_char_in_unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ScanLimitExceeded,
    ScanTimeout,
}

/// Marker attached to a unit whose scan was abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl From<&ScanError> for Diagnostic {
    fn from(err: &ScanError) -> Self {
        let kind = match err {
            ScanError::LimitExceeded { .. } => DiagnosticKind::ScanLimitExceeded,
            ScanError::Timeout { .. } => DiagnosticKind::ScanTimeout,
        };
        Self { kind, message: err.to_string() }
    }
}

/// Output record: the input unit echoed back with its findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitReport {
    #[serde(flatten)]
    pub unit: Unit,
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
}

impl UnitReport {
    /// Returns true if no findings were reported and the scan completed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.diagnostic.is_none()
    }

    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }
}

/// Aggregated results from scanning a batch of units.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub units: Vec<UnitReport>,
    pub total_findings: usize,
    pub aborted_units: usize,
    pub duration_ms: u128,
}

impl ScanReport {
    /// Returns true if any findings were reported.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        self.total_findings > 0
    }

    #[must_use]
    pub fn has_aborted(&self) -> bool {
        self.aborted_units > 0
    }

    /// Returns the number of units with nothing to report.
    #[must_use]
    pub fn clean_unit_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_clean()).count()
    }
}
