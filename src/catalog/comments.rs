// src/catalog/comments.rs
//! Remediation text attached to findings.

use super::PatternCatalog;

/// Comment for an obsolete table. `table` must be a catalog key.
#[must_use]
pub fn table_comment(catalog: &PatternCatalog, table: &str) -> String {
    let replacement = catalog.table_replacement(table);
    debug_assert!(replacement.is_some(), "{table} is not an obsolete table");
    format!(
        "* TODO: Table {} obsolete in S/4HANA (Note {}). Replace with {}.",
        table.to_uppercase(),
        catalog.note(),
        replacement.unwrap_or_default()
    )
}

/// Comment for a declaration field. Empty when the field is not flagged.
#[must_use]
pub fn declaration_comment(catalog: &PatternCatalog, field: &str) -> String {
    let f = field.to_uppercase();
    if catalog.is_removed_field(&f) {
        return removal(catalog, &f);
    }
    if let Some(replacement) = catalog.renamed_field(&f) {
        return format!(
            "* TODO: Data element {f} was lengthened (Note {}). Use {replacement}.",
            catalog.note()
        );
    }
    String::new()
}

/// Comment for an SQL-only field. Accepts any field name.
#[must_use]
pub fn sql_field_comment(catalog: &PatternCatalog, field: &str) -> String {
    removal(catalog, field)
}

fn removal(catalog: &PatternCatalog, field: &str) -> String {
    format!(
        "* TODO: Field {field} obsolete (Note {}). Remove usage.",
        catalog.note()
    )
}
