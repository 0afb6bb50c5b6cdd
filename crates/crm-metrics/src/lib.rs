//! Derived metrics for CRM data-quality and enrichment reports.
//!
//! Every function here is a pure computation over a borrowed report
//! snapshot. Degenerate inputs (no records, no fields, a zero baseline)
//! produce defined sentinel values instead of errors.
//!
//! # Example
//!
//! ```ignore
//! use crm_metrics::{quality_score, issue_stats, classify_fields};
//!
//! let score = quality_score(&report);
//! let issues = issue_stats(&report);
//! let categories = classify_fields(&report.fields, report.total_records, &thresholds);
//! let shares = categories.percentages(report.total_fields);
//! ```

mod classify;
mod columns;
mod comparison;
mod issues;
mod percent;
mod recommend;
mod score;
mod summary;

pub use classify::{
    DerivedWarning, FieldCategories, PopulationCategory, classify_fields, coverage_warning,
    field_warnings,
};
pub use columns::{ColumnGroup, CriticalColumn, KNOWN_CATEGORIES, critical_columns, group_by_category};
pub use comparison::{
    ChangeTrend, ComparisonRollup, ComparisonTotals, EnrichmentSummary, FORMAT_PREVIEW_LIMIT,
    IMPROVED_RATE_THRESHOLD, Improvement, MappingComparison, RelativeChange, classify_change,
    compare_mappings, enrichment_summary, format_standardized, improvement_rate, rollup,
};
pub use issues::{IssueStats, issue_stats};
pub use percent::reconcile_percentages;
pub use recommend::{
    CONTACT_COVERAGE_TARGET, OpportunityFlags, PlanItem, PlanPriority, RecommendedActions,
    enrichment_plan, opportunity_flags, recommend_actions,
};
pub use score::{display_population_rate, quality_score};
pub use summary::{QualitySummary, summarize_report};
