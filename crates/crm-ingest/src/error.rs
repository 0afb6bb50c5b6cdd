//! Error types for report loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a report snapshot.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Snapshot file not found.
    #[error("report file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON for the expected report shape.
    #[error("failed to parse {what} from {origin}: {source}")]
    Parse {
        what: &'static str,
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot parsed but violates a report invariant.
    #[error("invalid report: {reason}")]
    InvalidReport { reason: String },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;
