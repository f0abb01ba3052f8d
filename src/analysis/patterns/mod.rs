//! Note 2198647 pattern detection.

pub mod declaration;
pub mod sql;

use crate::analysis::budget::Budget;
use crate::analysis::matcher::Matcher;
use crate::catalog::PatternCatalog;
use crate::error::ScanError;
use crate::types::RawHit;

/// Runs both scanners over one unit's source. SQL hits come first.
///
/// # Errors
/// Returns error if the unit's budget is exhausted.
pub fn detect_all(
    source: &str,
    catalog: &PatternCatalog,
    matcher: &dyn Matcher,
    budget: &Budget,
) -> Result<Vec<RawHit>, ScanError> {
    let mut out = sql::detect(source, catalog, matcher, budget)?;
    out.extend(declaration::detect(source, catalog, matcher, budget)?);
    Ok(out)
}
