//! Reading report snapshots from JSON.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crm_model::{EnrichmentReport, Report};

use crate::error::{IngestError, Result};
use crate::normalize::{normalize_enrichment, normalize_report};

fn read_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse<T: DeserializeOwned>(json: &str, what: &'static str, origin: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| IngestError::Parse {
        what,
        origin: origin.to_string(),
        source: e,
    })
}

/// Parse and normalize a data-quality report from a JSON string.
pub fn parse_report(json: &str) -> Result<Report> {
    let mut report: Report = parse(json, "report", "input")?;
    normalize_report(&mut report)?;
    Ok(report)
}

/// Load and normalize a data-quality report from a JSON file.
pub fn load_report(path: &Path) -> Result<Report> {
    let json = read_file(path)?;
    let mut report: Report = parse(&json, "report", &path.display().to_string())?;
    normalize_report(&mut report)?;
    info!(
        path = %path.display(),
        fields = report.fields.len(),
        global_issues = report.global_issues.len(),
        "loaded report"
    );
    Ok(report)
}

/// Parse and normalize an enrichment report from a JSON string.
pub fn parse_enrichment_report(json: &str) -> Result<EnrichmentReport> {
    let mut report: EnrichmentReport = parse(json, "enrichment report", "input")?;
    normalize_enrichment(&mut report);
    Ok(report)
}

/// Load and normalize an enrichment report from a JSON file.
pub fn load_enrichment_report(path: &Path) -> Result<EnrichmentReport> {
    let json = read_file(path)?;
    let mut report: EnrichmentReport =
        parse(&json, "enrichment report", &path.display().to_string())?;
    normalize_enrichment(&mut report);
    debug!(
        path = %path.display(),
        mappings = report.column_mappings.len(),
        "loaded enrichment report"
    );
    Ok(report)
}
