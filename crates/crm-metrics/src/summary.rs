//! One-pass derivation of everything a quality report view shows.

use serde::Serialize;
use tracing::debug;

use crm_model::{AnalysisOptions, Report};

use crate::classify::{FieldCategories, classify_fields};
use crate::columns::{CriticalColumn, critical_columns};
use crate::issues::{IssueStats, issue_stats};
use crate::recommend::{
    OpportunityFlags, PlanItem, RecommendedActions, enrichment_plan, opportunity_flags,
    recommend_actions,
};
use crate::score::quality_score;

/// Derived values for one data-quality report.
#[derive(Debug, Clone, Serialize)]
pub struct QualitySummary<'a> {
    pub score: u8,
    pub issues: IssueStats,
    pub categories: FieldCategories<'a>,
    /// Category shares in the order empty, critical, warning, good.
    pub category_percentages: [u64; 4],
    pub critical_columns: Vec<CriticalColumn>,
    pub recommendations: RecommendedActions,
    pub opportunities: OpportunityFlags,
    pub plan: Vec<PlanItem>,
}

pub fn summarize_report<'a>(report: &'a Report, options: &AnalysisOptions) -> QualitySummary<'a> {
    let score = quality_score(report);
    let issues = issue_stats(report);
    let categories = classify_fields(&report.fields, report.total_records, &options.thresholds);
    let category_percentages = categories.percentages(report.total_fields);
    let critical_columns = critical_columns(report, &options.thresholds);
    let recommendations = recommend_actions(report, &categories, &issues);
    let opportunities = opportunity_flags(report, &critical_columns, options);
    let plan = enrichment_plan(report, &opportunities, options);

    debug!(
        score,
        issues = issues.total,
        empty = categories.empty.len(),
        critical = categories.critical.len(),
        warning = categories.warning.len(),
        good = categories.good.len(),
        "summarized report"
    );
    if issues.unrecognized > 0 {
        debug!(
            unrecognized = issues.unrecognized,
            "issues with unrecognized severity were not counted"
        );
    }

    QualitySummary {
        score,
        issues,
        categories,
        category_percentages,
        critical_columns,
        recommendations,
        opportunities,
        plan,
    }
}
