pub mod enrichment;
pub mod error;
pub mod options;
pub mod report;
pub mod severity;

pub use enrichment::{ColumnComparisonStats, ColumnMapping, ColumnStructure, EnrichmentReport};
pub use error::{ModelError, Result};
pub use options::{AnalysisOptions, PopulationThresholds};
pub use report::{
    CriticalColumnConfig, Field, GlobalIssue, Meta, Report, ReportConfig, Warning,
};
pub use severity::{RecordedSeverity, Severity};
