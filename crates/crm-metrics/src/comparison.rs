//! Before/after rollups over enrichment column mappings.

use std::fmt;

use serde::Serialize;

use crm_model::{ColumnComparisonStats, ColumnMapping, EnrichmentReport};

/// Improvement rate above which a column counts as improved.
pub const IMPROVED_RATE_THRESHOLD: f64 = 0.1;

/// Summed comparison counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonTotals {
    pub added: u64,
    pub fixed: u64,
    pub discarded: u64,
    pub good: u64,
}

impl ComparisonTotals {
    pub fn add(&mut self, stats: &ColumnComparisonStats) {
        self.added += stats.added_new_data;
        self.fixed += stats.fixed_data;
        self.discarded += stats.discarded_invalid_data;
        self.good += stats.good_data;
    }

    /// Every classified data point: added, fixed, discarded and good.
    pub fn total_changes(&self) -> u64 {
        self.added + self.fixed + self.discarded + self.good
    }
}

/// Relative change of a percentage, guarded against a zero baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeChange {
    /// `(after - before) / before * 100`.
    Percent(f64),
    /// The baseline was zero; the change has no finite value.
    Unbounded,
}

impl fmt::Display for RelativeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeChange::Percent(value) => write!(f, "{value:+.1}%"),
            RelativeChange::Unbounded => write!(f, "∞"),
        }
    }
}

/// A before/after pair of correctness percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Improvement {
    pub before: f64,
    pub after: f64,
}

impl Improvement {
    pub fn new(before: f64, after: f64) -> Self {
        Self { before, after }
    }

    /// Absolute change in percentage points.
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }

    pub fn relative(&self) -> RelativeChange {
        if self.before > 0.0 {
            RelativeChange::Percent(self.delta() / self.before * 100.0)
        } else {
            RelativeChange::Unbounded
        }
    }
}

/// Dataset-wide rollup of per-column comparison statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComparisonRollup {
    pub totals: ComparisonTotals,
    pub avg_before: f64,
    pub avg_after: f64,
    /// Mappings that contributed (those with comparison stats).
    pub mappings_with_stats: usize,
}

impl ComparisonRollup {
    pub fn improvement(&self) -> Improvement {
        Improvement::new(self.avg_before, self.avg_after)
    }
}

/// Sum counts and average correctness over mappings that have stats.
///
/// Mappings without stats are skipped entirely; they neither add zeros to
/// the totals nor count towards the averages.
pub fn rollup(mappings: &[ColumnMapping]) -> ComparisonRollup {
    let mut result = ComparisonRollup::default();
    let mut before_sum = 0.0;
    let mut after_sum = 0.0;
    for stats in mappings.iter().filter_map(|m| m.comparison_stats.as_ref()) {
        result.totals.add(stats);
        before_sum += stats.correct_percentage_before;
        after_sum += stats.correct_percentage_after;
        result.mappings_with_stats += 1;
    }
    if result.mappings_with_stats > 0 {
        let count = result.mappings_with_stats as f64;
        result.avg_before = before_sum / count;
        result.avg_after = after_sum / count;
    }
    result
}

/// Share of classified values that were added or fixed, in `[0, 1]`.
pub fn improvement_rate(stats: &ColumnComparisonStats) -> f64 {
    let total = stats.classified();
    if total == 0 {
        return 0.0;
    }
    stats.improved() as f64 / total as f64
}

/// Direction of change for one mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTrend {
    Improved,
    Regressed,
    Neutral,
}

impl ChangeTrend {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeTrend::Improved => "improved",
            ChangeTrend::Regressed => "regressed",
            ChangeTrend::Neutral => "neutral",
        }
    }
}

pub fn classify_change(stats: &ColumnComparisonStats) -> ChangeTrend {
    if improvement_rate(stats) > IMPROVED_RATE_THRESHOLD {
        ChangeTrend::Improved
    } else if stats.discarded_invalid_data > stats.added_new_data {
        ChangeTrend::Regressed
    } else {
        ChangeTrend::Neutral
    }
}

/// Comparison view of a single mapping that has stats.
#[derive(Debug, Clone, Serialize)]
pub struct MappingComparison<'a> {
    pub crm_column: &'a str,
    pub export_column: Option<&'a str>,
    pub is_many_to_one: bool,
    pub stats: &'a ColumnComparisonStats,
    pub trend: ChangeTrend,
    pub improvement: Improvement,
}

/// Per-mapping comparisons, in mapping order, for mappings with stats.
pub fn compare_mappings(mappings: &[ColumnMapping]) -> Vec<MappingComparison<'_>> {
    mappings
        .iter()
        .filter_map(|mapping| {
            let stats = mapping.comparison_stats.as_ref()?;
            Some(MappingComparison {
                crm_column: &mapping.crm_column,
                export_column: mapping.export_column.as_deref(),
                is_many_to_one: mapping.is_many_to_one,
                stats,
                trend: classify_change(stats),
                improvement: Improvement::new(
                    stats.correct_percentage_before,
                    stats.correct_percentage_after,
                ),
            })
        })
        .collect()
}

/// Headline metrics for an enrichment report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnrichmentSummary {
    /// Mean per-mapping improvement rate over all mappings, in percent.
    /// Mappings without stats contribute zero.
    pub data_improvement_rate: f64,
    pub totals: ComparisonTotals,
    /// Share of rows modified by enrichment, in percent.
    pub coverage: f64,
}

pub fn enrichment_summary(report: &EnrichmentReport) -> EnrichmentSummary {
    let mut totals = ComparisonTotals::default();
    let mut rate_sum = 0.0;
    for (_, stats) in report.compared_mappings() {
        totals.add(stats);
        rate_sum += improvement_rate(stats);
    }
    let data_improvement_rate = if report.column_mappings.is_empty() {
        0.0
    } else {
        rate_sum / report.column_mappings.len() as f64 * 100.0
    };
    let coverage = if report.total_rows == 0 {
        0.0
    } else {
        report.records_modified_count as f64 / report.total_rows as f64 * 100.0
    };
    EnrichmentSummary {
        data_improvement_rate,
        totals,
        coverage,
    }
}

/// Number of standardized columns listed before the rest are summarized.
pub const FORMAT_PREVIEW_LIMIT: usize = 5;

/// Mappings whose values were standardized to fewer formats, in mapping order.
pub fn format_standardized(mappings: &[ColumnMapping]) -> Vec<&ColumnMapping> {
    mappings
        .iter()
        .filter(|mapping| {
            mapping
                .comparison_stats
                .as_ref()
                .is_some_and(ColumnComparisonStats::standardizes_format)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(added: u64, fixed: u64, discarded: u64, good: u64) -> ColumnComparisonStats {
        ColumnComparisonStats {
            added_new_data: added,
            fixed_data: fixed,
            discarded_invalid_data: discarded,
            good_data: good,
            not_found: 0,
            correct_percentage_before: 50.0,
            correct_percentage_after: 75.0,
            crm_format_count: 1,
            export_format_count: 1,
        }
    }

    #[test]
    fn classify_change_three_ways() {
        assert_eq!(classify_change(&stats(5, 0, 0, 5)), ChangeTrend::Improved);
        assert_eq!(classify_change(&stats(0, 1, 4, 95)), ChangeTrend::Regressed);
        assert_eq!(classify_change(&stats(0, 1, 0, 99)), ChangeTrend::Neutral);
        assert_eq!(classify_change(&stats(0, 0, 0, 0)), ChangeTrend::Neutral);
    }

    #[test]
    fn rate_of_exactly_ten_percent_is_not_improved() {
        assert_eq!(classify_change(&stats(1, 0, 0, 9)), ChangeTrend::Neutral);
    }

    #[test]
    fn relative_change_guards_zero_baseline() {
        assert_eq!(
            Improvement::new(0.0, 40.0).relative(),
            RelativeChange::Unbounded
        );
        assert_eq!(
            Improvement::new(50.0, 75.0).relative(),
            RelativeChange::Percent(50.0)
        );
        assert_eq!(Improvement::new(40.0, 40.0).relative(), RelativeChange::Percent(0.0));
    }

    #[test]
    fn relative_change_display() {
        assert_eq!(RelativeChange::Percent(12.345).to_string(), "+12.3%");
        assert_eq!(RelativeChange::Percent(-5.0).to_string(), "-5.0%");
        assert_eq!(RelativeChange::Unbounded.to_string(), "∞");
    }

    fn formats(crm: u64, export: u64) -> ColumnMapping {
        ColumnMapping {
            id: String::new(),
            crm_column: format!("{crm}->{export}"),
            export_column: Some("out".to_string()),
            is_many_to_one: false,
            comparison_stats: Some(ColumnComparisonStats {
                crm_format_count: crm,
                export_format_count: export,
                ..stats(0, 0, 0, 1)
            }),
        }
    }

    #[test]
    fn format_standardization_needs_strictly_fewer_formats() {
        let mut unmapped = formats(4, 1);
        unmapped.comparison_stats = None;
        let mappings = vec![
            formats(3, 1),
            formats(1, 0),
            formats(2, 2),
            formats(3, 2),
            unmapped,
        ];
        let names: Vec<_> = format_standardized(&mappings)
            .iter()
            .map(|mapping| mapping.crm_column.as_str())
            .collect();
        assert_eq!(names, vec!["3->1", "3->2"]);
    }
}
