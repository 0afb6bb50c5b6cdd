//! Severity levels attached to field warnings and global issues.
//!
//! Stored snapshots carry severities as free-form strings ("CRITICAL",
//! "high", ...). They are normalized once at the loading boundary so the
//! aggregation code only ever compares a closed four-valued enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Issue severity, from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Immediate attention required.
    Critical,
    /// Should be addressed soon.
    High,
    /// Plan for improvement.
    Medium,
    /// Monitor over time.
    Low,
}

impl Severity {
    /// All severities in display order (most urgent first).
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Returns the canonical upper-case name as stored in report snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    /// Rank used for ordering; higher is more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ModelError;

    /// Parse a severity string (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "CRITICAL" => Ok(Severity::Critical),
            "HIGH" => Ok(Severity::High),
            "MEDIUM" => Ok(Severity::Medium),
            "LOW" => Ok(Severity::Low),
            _ => Err(ModelError::UnknownSeverity(s.to_string())),
        }
    }
}

/// Severity as recorded on a warning or issue.
///
/// Values outside the four-level enum are kept verbatim instead of failing
/// the whole snapshot; aggregation skips them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordedSeverity {
    Known(Severity),
    Unrecognized(String),
}

impl RecordedSeverity {
    /// Returns the normalized severity, if the recorded value was recognized.
    pub fn known(&self) -> Option<Severity> {
        match self {
            RecordedSeverity::Known(severity) => Some(*severity),
            RecordedSeverity::Unrecognized(_) => None,
        }
    }

    /// Rank for ordering; unrecognized values sort below every known level.
    pub fn rank(&self) -> u8 {
        self.known().map_or(0, |severity| severity.rank())
    }
}

impl From<Severity> for RecordedSeverity {
    fn from(severity: Severity) -> Self {
        RecordedSeverity::Known(severity)
    }
}

impl From<String> for RecordedSeverity {
    fn from(raw: String) -> Self {
        match raw.parse::<Severity>() {
            Ok(severity) => RecordedSeverity::Known(severity),
            Err(_) => RecordedSeverity::Unrecognized(raw),
        }
    }
}

impl From<&str> for RecordedSeverity {
    fn from(raw: &str) -> Self {
        RecordedSeverity::from(raw.to_string())
    }
}

impl From<RecordedSeverity> for String {
    fn from(severity: RecordedSeverity) -> Self {
        match severity {
            RecordedSeverity::Known(severity) => severity.as_str().to_string(),
            RecordedSeverity::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for RecordedSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordedSeverity::Known(severity) => write!(f, "{severity}"),
            RecordedSeverity::Unrecognized(raw) => write!(f, "{raw}"),
        }
    }
}
