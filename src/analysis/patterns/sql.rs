// src/analysis/patterns/sql.rs
//! Obsolete tables in `FROM`/`JOIN` and obsolete SQL-only fields.

use crate::analysis::budget::Budget;
use crate::analysis::matcher::{Matcher, SelectBlock, TokenKind};
use crate::catalog::comments::{sql_field_comment, table_comment};
use crate::catalog::PatternCatalog;
use crate::error::ScanError;
use crate::types::{RawHit, Span, TargetKind};

/// Scans every `SELECT` block in `source`.
///
/// # Errors
/// Returns `ScanError::Timeout` if the budget runs out between blocks.
pub fn detect(
    source: &str,
    catalog: &PatternCatalog,
    matcher: &dyn Matcher,
    budget: &Budget,
) -> Result<Vec<RawHit>, ScanError> {
    let mut out = Vec::new();
    for block in matcher.find_blocks(source) {
        budget.check()?;
        detect_block(source, &block, catalog, matcher, &mut out);
    }
    Ok(out)
}

fn detect_block(
    source: &str,
    block: &SelectBlock<'_>,
    catalog: &PatternCatalog,
    matcher: &dyn Matcher,
    out: &mut Vec<RawHit>,
) {
    let table = block.table.to_uppercase();
    if catalog.is_obsolete_table(&table) {
        out.push(table_hit(catalog, table, block.span));
    }

    let rest = &source[block.rest.start..block.rest.end];
    for join in matcher.find_tokens(TokenKind::Join, rest, block.rest.start) {
        let joined = join.ident.to_uppercase();
        if catalog.is_obsolete_table(&joined) {
            out.push(table_hit(catalog, joined, join.span));
        }
    }

    let text = &source[block.span.start..block.span.end];
    for field in catalog.sql_fields() {
        if matcher.contains_word(text, field) {
            out.push(RawHit {
                target_kind: TargetKind::SqlField,
                target_name: field.to_string(),
                field: Some(field.to_string()),
                span: block.span,
                used_identifiers: vec![field.to_string()],
                suggested_names: None,
                remediation_comment: sql_field_comment(catalog, field),
            });
        }
    }
}

fn table_hit(catalog: &PatternCatalog, table: String, span: Span) -> RawHit {
    let replacement = catalog.table_replacement(&table).unwrap_or_default().to_string();
    RawHit {
        target_kind: TargetKind::Table,
        remediation_comment: table_comment(catalog, &table),
        target_name: table.clone(),
        field: None,
        span,
        used_identifiers: vec![table],
        suggested_names: Some(vec![replacement]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::matcher::RegexMatcher;
    use crate::config::LimitConfig;

    fn scan(source: &str) -> Vec<RawHit> {
        let catalog = PatternCatalog::default();
        let matcher = RegexMatcher::new(catalog.sql_fields()).unwrap();
        let budget = Budget::start(&LimitConfig::default());
        detect(source, &catalog, &matcher, &budget).unwrap()
    }

    #[test]
    fn from_table_spans_whole_block() {
        let src = "SELECT vbeln FROM VBUK WHERE vbeln = wa-vbeln.";
        let hits = scan(src);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target_kind, TargetKind::Table);
        assert_eq!(hits[0].target_name, "VBUK");
        assert_eq!(hits[0].span, Span::new(0, src.len()));
        assert_eq!(hits[0].used_identifiers, vec!["VBUK"]);
        assert_eq!(hits[0].suggested_names, Some(vec!["VBAK".to_string()]));
        assert_eq!(hits[0].field, None);
    }

    #[test]
    fn lower_case_table_is_upper_cased() {
        let hits = scan("select * from vbup into table @data(items).");
        assert_eq!(hits[0].target_name, "VBUP");
        assert_eq!(hits[0].suggested_names, Some(vec!["VBAP".to_string()]));
    }

    #[test]
    fn join_hit_spans_join_clause_only() {
        let src = "SELECT a~vbeln FROM vbak AS a INNER JOIN vbuk AS b ON a~vbeln = b~vbeln.";
        let hits = scan(src);
        assert_eq!(hits.len(), 1);
        let start = src.find("JOIN").unwrap();
        assert_eq!(hits[0].span, Span::new(start, start + "JOIN vbuk".len()));
        assert_eq!(hits[0].target_name, "VBUK");
    }

    #[test]
    fn from_and_join_are_separate_hits() {
        let hits = scan("SELECT * FROM vbuk JOIN vbup ON vbuk~vbeln = vbup~vbeln.");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].target_name, "VBUK");
        assert_eq!(hits[1].target_name, "VBUP");
        assert_ne!(hits[0].span, hits[1].span);
    }

    #[test]
    fn sql_field_reported_once_per_block() {
        let src = "SELECT vbtyp_ext FROM vbak WHERE vbtyp_ext = 'A' OR VBTYP_EXT = 'B'.";
        let hits = scan(src);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target_kind, TargetKind::SqlField);
        assert_eq!(hits[0].field.as_deref(), Some("VBTYP_EXT"));
        assert_eq!(hits[0].suggested_names, None);
        assert_eq!(hits[0].span, Span::new(0, src.len()));
    }

    #[test]
    fn sql_field_needs_word_boundary() {
        assert!(scan("SELECT zvbtyp_ext FROM vbak.").is_empty());
    }

    #[test]
    fn select_without_from_yields_nothing() {
        assert!(scan("SELECT SINGLE vbuk INTO lv.").is_empty());
    }

    #[test]
    fn join_before_from_is_not_scanned() {
        // JOIN is only looked for after the FROM table.
        assert!(scan("SELECT join vbuk FROM vbak.").is_empty());
    }
}
