// src/analysis/patterns/declaration.rs
//! `TYPE`/`LIKE` references to lengthened or removed fields.

use crate::analysis::budget::Budget;
use crate::analysis::matcher::{Matcher, TokenKind};
use crate::catalog::comments::declaration_comment;
use crate::catalog::PatternCatalog;
use crate::error::ScanError;
use crate::types::{RawHit, TargetKind};

/// Scans the whole unit, SQL blocks included.
///
/// # Errors
/// Returns `ScanError::Timeout` if the budget runs out between tokens.
pub fn detect(
    source: &str,
    catalog: &PatternCatalog,
    matcher: &dyn Matcher,
    budget: &Budget,
) -> Result<Vec<RawHit>, ScanError> {
    let mut out = Vec::new();
    for token in matcher.find_tokens(TokenKind::Declaration, source, 0) {
        budget.check()?;
        let field = token.ident.to_uppercase();
        if !catalog.flags_declaration(&field) {
            continue;
        }
        let suggested = catalog.renamed_field(&field).map(|r| vec![r.to_string()]);
        out.push(RawHit {
            target_kind: TargetKind::Declaration,
            remediation_comment: declaration_comment(catalog, &field),
            target_name: field.clone(),
            field: Some(field.clone()),
            span: token.span,
            used_identifiers: vec![field],
            suggested_names: suggested,
        });
    }
    Ok(out)
}
