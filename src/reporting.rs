//! Console output formatting for scan results.
//!
//! Findings are grouped by unit in input order. Units with nothing to report
//! are skipped; aborted units get a warning line instead of findings.

use crate::catalog::PatternCatalog;
use crate::types::{Finding, ScanReport, TargetKind, UnitReport};
use anyhow::Result;
use colored::Colorize;
use std::fmt::Write;

/// Prints a formatted scan report to stdout.
///
/// # Errors
/// Returns error if formatting fails.
pub fn print_report(report: &ScanReport) -> Result<()> {
    print!("{}", render_report(report)?);
    Ok(())
}

/// Renders the console report.
///
/// # Errors
/// Returns error if formatting fails.
pub fn render_report(report: &ScanReport) -> Result<String> {
    let mut out = String::new();
    for unit in report.units.iter().filter(|u| !u.is_clean()) {
        render_unit(&mut out, unit)?;
    }
    render_summary(&mut out, report)?;
    Ok(out)
}

fn render_unit(out: &mut String, report: &UnitReport) -> Result<()> {
    let u = &report.unit;
    let name = u.unit_name.as_deref().map(|n| format!(" {n}")).unwrap_or_default();
    writeln!(
        out,
        "{} › {} › {}{}",
        u.program_name.bold(),
        u.include_name,
        u.unit_type.cyan(),
        name
    )?;

    if let Some(diag) = &report.diagnostic {
        writeln!(out, "  {} {}", "warn:".yellow().bold(), diag.message)?;
    }
    for finding in &report.findings {
        render_finding(out, finding)?;
    }
    writeln!(out)?;
    Ok(())
}

fn render_finding(out: &mut String, f: &Finding) -> Result<()> {
    let kind = match f.target_type {
        TargetKind::Table => f.target_type.as_str().red(),
        TargetKind::SqlField => f.target_type.as_str().magenta(),
        TargetKind::Declaration => f.target_type.as_str().yellow(),
    };
    write!(out, "  [{kind}] {} @ {}", f.target_name.bold(), f.span())?;
    if let Some(suggested) = &f.suggested_fields {
        write!(out, " -> {}", suggested.join(", ").green())?;
    }
    writeln!(out)?;
    writeln!(out, "      {}", f.suggested_statement.dimmed())?;
    Ok(())
}

fn render_summary(out: &mut String, report: &ScanReport) -> Result<()> {
    let units = report.units.len();
    if report.has_findings() {
        write!(
            out,
            "{} {} finding(s) in {} of {units} unit(s)",
            "✗".red().bold(),
            report.total_findings,
            units - report.clean_unit_count()
        )?;
    } else {
        write!(out, "{} No findings in {units} unit(s)", "✓".green().bold())?;
    }
    if report.has_aborted() {
        write!(out, ", {} aborted", report.aborted_units.to_string().yellow())?;
    }
    writeln!(out, " ({} ms)", report.duration_ms)?;
    Ok(())
}

/// Prints the active catalog.
pub fn print_catalog(catalog: &PatternCatalog) {
    print!("{}", render_catalog(catalog));
}

#[must_use]
pub fn render_catalog(catalog: &PatternCatalog) -> String {
    let mut out = format!("{} {}\n", "Note".bold(), catalog.note());
    out.push_str(&section("Obsolete tables", catalog.tables().map(|(t, r)| format!("{t} -> {r}"))));
    out.push_str(&section("Obsolete SQL fields", catalog.sql_fields().map(str::to_string)));
    out.push_str(&section(
        "Lengthened declaration fields",
        catalog.renamed_fields().map(|(f, r)| format!("{f} -> {r}")),
    ));
    out.push_str(&section("Removed declaration fields", catalog.removed_fields().map(str::to_string)));
    out
}

fn section(title: &str, lines: impl Iterator<Item = String>) -> String {
    let mut s = format!("{}\n", title.cyan());
    for line in lines {
        s.push_str("  ");
        s.push_str(&line);
        s.push('\n');
    }
    s
}
