//! Severity histogram over global issues and field warnings.

use serde::Serialize;

use crm_model::{RecordedSeverity, Report, Severity};

/// Issue counts per severity.
///
/// `total` is the sum of the four severity buckets. Issues whose recorded
/// severity is not one of the four levels are counted in `unrecognized` and
/// are not part of `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueStats {
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub total: u64,
    pub unrecognized: u64,
}

impl IssueStats {
    /// Record one issue.
    pub fn record(&mut self, severity: &RecordedSeverity) {
        match severity.known() {
            Some(Severity::Critical) => self.critical += 1,
            Some(Severity::High) => self.high += 1,
            Some(Severity::Medium) => self.medium += 1,
            Some(Severity::Low) => self.low += 1,
            None => {
                self.unrecognized += 1;
                return;
            }
        }
        self.total += 1;
    }

    pub fn count(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    /// Non-zero buckets in order critical, high, medium, low.
    pub fn segments(&self) -> Vec<(Severity, u64)> {
        Severity::ALL
            .into_iter()
            .map(|severity| (severity, self.count(severity)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Tally global issues and field warnings by severity.
pub fn issue_stats(report: &Report) -> IssueStats {
    let mut stats = IssueStats::default();
    for issue in &report.global_issues {
        stats.record(&issue.severity);
    }
    for warning in report.warnings() {
        stats.record(&warning.severity);
    }
    stats
}
