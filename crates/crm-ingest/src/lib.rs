//! CRM report snapshot loading.
//!
//! Reads data-quality and enrichment reports from JSON and brings them into
//! the shape the metrics code expects:
//!
//! - **Severities**: normalized case-insensitively; unknown values are kept
//!   and logged
//! - **Ordering**: fields by column name, warnings and issues by severity,
//!   column mappings by CRM column
//! - **Mappings**: unmapped and duplicate export columns are dropped
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use crm_ingest::load_report;
//!
//! let report = load_report(Path::new("reports/acme.json"))?;
//! ```

mod error;
mod loader;
mod normalize;

pub use error::{IngestError, Result};
pub use loader::{load_enrichment_report, load_report, parse_enrichment_report, parse_report};
pub use normalize::{normalize_enrichment, normalize_report};
