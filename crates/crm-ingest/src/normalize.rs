//! Ordering, de-duplication and invariant checks applied to freshly loaded
//! snapshots.

use std::collections::HashSet;

use tracing::{debug, warn};

use crm_model::{EnrichmentReport, RecordedSeverity, Report};

use crate::error::{IngestError, Result};

/// Validate and order a data-quality report.
///
/// Fields are ordered by column name; warnings and global issues by
/// severity, most urgent first. Unrecognized severities are kept (and sort
/// last) but logged.
pub fn normalize_report(report: &mut Report) -> Result<()> {
    for field in &report.fields {
        if field.populated_count > report.total_records {
            return Err(IngestError::InvalidReport {
                reason: format!(
                    "field '{}' is populated {} times out of {} records",
                    field.column_name, field.populated_count, report.total_records
                ),
            });
        }
    }

    report
        .fields
        .sort_by(|a, b| a.column_name.cmp(&b.column_name));
    for field in &mut report.fields {
        field
            .warnings
            .sort_by_key(|warning| std::cmp::Reverse(warning.severity.rank()));
        for warning in &field.warnings {
            log_unrecognized(&warning.severity, &field.column_name, &warning.id);
        }
    }
    report
        .global_issues
        .sort_by_key(|issue| std::cmp::Reverse(issue.severity.rank()));
    for issue in &report.global_issues {
        log_unrecognized(&issue.severity, "global", &issue.id);
    }
    Ok(())
}

fn log_unrecognized(severity: &RecordedSeverity, scope: &str, id: &str) {
    if let RecordedSeverity::Unrecognized(raw) = severity {
        warn!(scope, id, severity = %raw, "unrecognized severity; issue will not be counted");
    }
}

/// Order column mappings by CRM column and keep one mapping per export
/// column.
///
/// Mappings without an export column (missing or empty) are dropped, and for each export
/// column only the first mapping (in CRM column order) is kept.
pub fn normalize_enrichment(report: &mut EnrichmentReport) {
    report
        .column_mappings
        .sort_by(|a, b| a.crm_column.cmp(&b.crm_column));

    let before = report.column_mappings.len();
    let mut seen = HashSet::new();
    report
        .column_mappings
        .retain(|mapping| match mapping.export_column.as_deref() {
            Some(export) if !export.is_empty() => seen.insert(export.to_string()),
            _ => false,
        });
    let dropped = before - report.column_mappings.len();
    if dropped > 0 {
        debug!(dropped, "dropped unmapped or duplicate column mappings");
    }
}
