//! Worker module: scans one unit and folds its raw hits into findings.

use std::collections::HashSet;

use tracing::{trace, warn};

use crate::config::Config;
use crate::error::ScanError;
use crate::types::{Diagnostic, Finding, RawHit, Span, TargetKind, Unit, UnitReport};

use super::budget::Budget;
use super::matcher::Matcher;
use super::patterns;

/// Scans a unit. A scan that hits its limits reports no findings and carries
/// a diagnostic instead.
#[must_use]
pub fn scan_unit(unit: &Unit, config: &Config, matcher: &dyn Matcher) -> UnitReport {
    let (findings, diagnostic) = match try_scan(unit.source(), config, matcher) {
        Ok(findings) => (findings, None),
        Err(err) => {
            warn!(
                program = %unit.program_name,
                include = %unit.include_name,
                error = %err,
                "unit scan aborted"
            );
            (Vec::new(), Some(Diagnostic::from(&err)))
        }
    };

    UnitReport {
        unit: unit.clone(),
        findings,
        diagnostic,
    }
}

fn try_scan(source: &str, config: &Config, matcher: &dyn Matcher) -> Result<Vec<Finding>, ScanError> {
    let budget = Budget::start(&config.limits);
    budget.admit(source)?;
    let hits = patterns::detect_all(source, &config.catalog, matcher, &budget)?;
    Ok(aggregate(source, hits))
}

/// Drops repeated `(kind, name, span)` hits, keeping the first, and converts
/// the rest to findings in scan order.
#[must_use]
pub fn aggregate(source: &str, hits: Vec<RawHit>) -> Vec<Finding> {
    let offsets = CharOffsets::new(source);
    let mut seen = HashSet::new();
    let mut findings = Vec::with_capacity(hits.len());

    for hit in hits {
        if !seen.insert((hit.target_kind, hit.target_name.clone(), hit.span)) {
            trace!(kind = %hit.target_kind, name = %hit.target_name, "duplicate hit dropped");
            continue;
        }
        findings.push(to_finding(hit, &offsets));
    }

    findings
}

fn to_finding(hit: RawHit, offsets: &CharOffsets) -> Finding {
    let span = offsets.convert(hit.span);
    Finding {
        table: (hit.target_kind == TargetKind::Table).then(|| hit.target_name.clone()),
        field: hit.field,
        target_type: hit.target_kind,
        target_name: hit.target_name,
        start_char_in_unit: span.start,
        end_char_in_unit: span.end,
        used_fields: hit.used_identifiers,
        ambiguous: false,
        suggested_fields: hit.suggested_names,
        suggested_statement: hit.remediation_comment,
    }
}

/// Byte offset to character offset translation.
enum CharOffsets {
    Ascii,
    /// Byte index of every char boundary, ascending.
    Boundaries(Vec<usize>),
}

impl CharOffsets {
    fn new(source: &str) -> Self {
        if source.is_ascii() {
            Self::Ascii
        } else {
            Self::Boundaries(source.char_indices().map(|(i, _)| i).collect())
        }
    }

    fn char_at(&self, byte: usize) -> usize {
        match self {
            Self::Ascii => byte,
            Self::Boundaries(b) => b.partition_point(|&i| i < byte),
        }
    }

    fn convert(&self, span: Span) -> Span {
        Span::new(self.char_at(span.start), self.char_at(span.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::matcher::RegexMatcher;
    use crate::config::LimitConfig;

    fn scan(source: &str) -> UnitReport {
        let config = Config::default();
        let matcher = RegexMatcher::new(config.catalog.sql_fields()).unwrap();
        scan_unit(&Unit::new("P1", "I1", "FORM", source), &config, &matcher)
    }

    fn hit(kind: TargetKind, name: &str, span: Span) -> RawHit {
        RawHit {
            target_kind: kind,
            target_name: name.into(),
            field: None,
            span,
            used_identifiers: vec![name.into()],
            suggested_names: None,
            remediation_comment: String::new(),
        }
    }

    #[test]
    fn concrete_vbuk_scenario() {
        let report = scan("SELECT vbeln FROM VBUK WHERE vbeln = wa-vbeln.");
        assert_eq!(report.findings.len(), 1);
        let f = &report.findings[0];
        assert_eq!(f.target_type, TargetKind::Table);
        assert_eq!(f.target_name, "VBUK");
        assert_eq!(f.table.as_deref(), Some("VBUK"));
        assert_eq!(f.suggested_fields, Some(vec!["VBAK".to_string()]));
        assert!(!f.ambiguous);
        assert!(report.diagnostic.is_none());
    }

    #[test]
    fn sql_hits_precede_declaration_hits() {
        let src = "DATA t TYPE vbtyp.\nSELECT * FROM vbup INTO TABLE @DATA(x).";
        let kinds: Vec<_> = scan(src).findings.iter().map(|f| f.target_type).collect();
        assert_eq!(kinds, vec![TargetKind::Table, TargetKind::Declaration]);
    }

    #[test]
    fn table_is_only_set_for_table_findings() {
        let report = scan("DATA t TYPE vbtyp.");
        assert_eq!(report.findings[0].table, None);
        assert_eq!(report.findings[0].field.as_deref(), Some("VBTYP"));
    }

    #[test]
    fn duplicates_collapse_to_first() {
        let a = hit(TargetKind::Table, "VBUK", Span::new(0, 5));
        let mut b = a.clone();
        b.remediation_comment = "second".into();
        let other_kind = hit(TargetKind::SqlField, "VBUK", Span::new(0, 5));
        let findings = aggregate("SELECT", vec![a, b, other_kind]);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].suggested_statement, "");
        assert_eq!(findings[1].target_type, TargetKind::SqlField);
    }

    #[test]
    fn offsets_are_in_characters() {
        let src = "* Ärger\nSELECT * FROM vbuk.";
        let report = scan(src);
        let f = &report.findings[0];
        let byte_start = src.find("SELECT").unwrap();
        assert_eq!(f.start_char_in_unit, byte_start - 1);
        assert_eq!(f.end_char_in_unit, src.chars().count());
    }

    #[test]
    fn empty_source_is_clean() {
        let mut unit = Unit::new("P", "I", "FORM", "");
        unit.source_text = None;
        let config = Config::default();
        let matcher = RegexMatcher::default();
        assert!(scan_unit(&unit, &config, &matcher).is_clean());
    }

    #[test]
    fn oversized_unit_reports_diagnostic() {
        let mut config = Config::default();
        config.limits = LimitConfig { max_unit_chars: 8, ..LimitConfig::default() };
        let matcher = RegexMatcher::default();
        let unit = Unit::new("P", "I", "FORM", "SELECT * FROM vbuk.");
        let report = scan_unit(&unit, &config, &matcher);
        assert!(report.findings.is_empty());
        assert_eq!(
            report.diagnostic.map(|d| d.kind),
            Some(crate::types::DiagnosticKind::ScanLimitExceeded)
        );
    }
}
