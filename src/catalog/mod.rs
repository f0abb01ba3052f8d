// src/catalog/mod.rs
//! Pattern catalog: which tables and fields Note 2198647 flags, and what
//! replaces them.
//!
//! The catalog is built once (from defaults or `abapscan.toml`) and shared by
//! reference with every scan. Lookups take upper-cased identifiers.

pub mod comments;

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_NOTE: &str = "2198647";

/// Read-only lookup tables for the scanners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternCatalog {
    note: String,
    obsolete_tables: BTreeMap<String, String>,
    obsolete_sql_fields: BTreeSet<String>,
    renamed_decl_fields: BTreeMap<String, String>,
    removed_decl_fields: BTreeSet<String>,
}

/// Raw catalog entries as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSpec {
    pub note: String,
    pub obsolete_sql_fields: Vec<String>,
    pub removed_decl_fields: Vec<String>,
    pub obsolete_tables: BTreeMap<String, String>,
    pub renamed_decl_fields: BTreeMap<String, String>,
}

impl Default for CatalogSpec {
    fn default() -> Self {
        Self {
            note: DEFAULT_NOTE.to_string(),
            obsolete_tables: pairs(&[("VBUK", "VBAK"), ("VBUP", "VBAP")]),
            obsolete_sql_fields: vec!["VBTYP_EXT".into()],
            renamed_decl_fields: pairs(&[("VBTYP", "VBTYPL")]),
            removed_decl_fields: vec!["VBTYP_EXT".into()],
        }
    }
}

fn pairs(items: &[(&str, &str)]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self {
            note: DEFAULT_NOTE.to_string(),
            obsolete_tables: pairs(&[("VBUK", "VBAK"), ("VBUP", "VBAP")]),
            obsolete_sql_fields: BTreeSet::from(["VBTYP_EXT".to_string()]),
            renamed_decl_fields: pairs(&[("VBTYP", "VBTYPL")]),
            removed_decl_fields: BTreeSet::from(["VBTYP_EXT".to_string()]),
        }
    }
}

impl TryFrom<CatalogSpec> for PatternCatalog {
    type Error = CatalogError;

    /// Normalizes identifiers to upper case and checks catalog invariants.
    fn try_from(spec: CatalogSpec) -> Result<Self, Self::Error> {
        let catalog = Self {
            note: spec.note,
            obsolete_tables: normalize_map(spec.obsolete_tables)?,
            obsolete_sql_fields: normalize_set(spec.obsolete_sql_fields)?,
            renamed_decl_fields: normalize_map(spec.renamed_decl_fields)?,
            removed_decl_fields: normalize_set(spec.removed_decl_fields)?,
        };

        if let Some(both) = catalog
            .renamed_decl_fields
            .keys()
            .find(|k| catalog.removed_decl_fields.contains(*k))
        {
            return Err(CatalogError::Overlap(both.clone()));
        }

        Ok(catalog)
    }
}

impl From<&PatternCatalog> for CatalogSpec {
    fn from(catalog: &PatternCatalog) -> Self {
        Self {
            note: catalog.note.clone(),
            obsolete_tables: catalog.obsolete_tables.clone(),
            obsolete_sql_fields: catalog.obsolete_sql_fields.iter().cloned().collect(),
            renamed_decl_fields: catalog.renamed_decl_fields.clone(),
            removed_decl_fields: catalog.removed_decl_fields.iter().cloned().collect(),
        }
    }
}

fn normalize_ident(raw: &str) -> Result<String, CatalogError> {
    let ident = raw.trim();
    let valid = !ident.is_empty()
        && ident
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(ident.to_ascii_uppercase())
    } else {
        Err(CatalogError::InvalidIdentifier(raw.to_string()))
    }
}

fn normalize_map(raw: BTreeMap<String, String>) -> Result<BTreeMap<String, String>, CatalogError> {
    raw.into_iter()
        .map(|(k, v)| -> Result<_, CatalogError> { Ok((normalize_ident(&k)?, normalize_ident(&v)?)) })
        .collect()
}

fn normalize_set(raw: Vec<String>) -> Result<BTreeSet<String>, CatalogError> {
    raw.iter().map(|s| normalize_ident(s)).collect()
}

impl PatternCatalog {
    /// Identifier of the note the catalog implements, used in comment text.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    #[must_use]
    pub fn table_replacement(&self, table: &str) -> Option<&str> {
        self.obsolete_tables.get(table).map(String::as_str)
    }

    #[must_use]
    pub fn is_obsolete_table(&self, table: &str) -> bool {
        self.obsolete_tables.contains_key(table)
    }

    /// Obsolete SQL-only fields, in sorted order.
    pub fn sql_fields(&self) -> impl Iterator<Item = &str> {
        self.obsolete_sql_fields.iter().map(String::as_str)
    }

    #[must_use]
    pub fn renamed_field(&self, field: &str) -> Option<&str> {
        self.renamed_decl_fields.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_removed_field(&self, field: &str) -> bool {
        self.removed_decl_fields.contains(field)
    }

    /// True if a declaration referencing `field` must be reported.
    #[must_use]
    pub fn flags_declaration(&self, field: &str) -> bool {
        self.is_removed_field(field) || self.renamed_decl_fields.contains_key(field)
    }

    pub fn tables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.obsolete_tables
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn renamed_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.renamed_decl_fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn removed_fields(&self) -> impl Iterator<Item = &str> {
        self.removed_decl_fields.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_note_2198647() {
        let c = PatternCatalog::default();
        assert_eq!(c.note(), "2198647");
        assert_eq!(c.table_replacement("VBUK"), Some("VBAK"));
        assert_eq!(c.table_replacement("VBUP"), Some("VBAP"));
        assert_eq!(c.table_replacement("VBAK"), None);
        assert_eq!(c.sql_fields().collect::<Vec<_>>(), vec!["VBTYP_EXT"]);
        assert_eq!(c.renamed_field("VBTYP"), Some("VBTYPL"));
        assert!(c.is_removed_field("VBTYP_EXT"));
        assert!(!c.flags_declaration("VBELN"));
    }

    #[test]
    fn default_spec_builds_default_catalog() {
        let built = PatternCatalog::try_from(CatalogSpec::default()).unwrap();
        assert_eq!(built, PatternCatalog::default());
    }

    #[test]
    fn spec_is_normalized_to_upper_case() {
        let spec = CatalogSpec {
            obsolete_tables: pairs(&[("konv", "prcd_elements")]),
            ..CatalogSpec::default()
        };
        let c = PatternCatalog::try_from(spec).unwrap();
        assert_eq!(c.table_replacement("KONV"), Some("PRCD_ELEMENTS"));
    }

    #[test]
    fn renamed_and_removed_must_be_disjoint() {
        let spec = CatalogSpec {
            removed_decl_fields: vec!["vbtyp".into()],
            ..CatalogSpec::default()
        };
        assert_eq!(
            PatternCatalog::try_from(spec),
            Err(CatalogError::Overlap("VBTYP".into()))
        );
    }

    #[test]
    fn rejects_non_identifier_entries() {
        let spec = CatalogSpec {
            obsolete_sql_fields: vec!["VBTYP EXT".into()],
            ..CatalogSpec::default()
        };
        assert!(matches!(
            PatternCatalog::try_from(spec),
            Err(CatalogError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn spec_round_trips_from_catalog() {
        let c = PatternCatalog::default();
        assert_eq!(CatalogSpec::from(&c), CatalogSpec::default());
    }
}
