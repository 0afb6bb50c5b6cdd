//! Cleanup recommendations and the enrichment plan.

use serde::Serialize;

use crm_model::{AnalysisOptions, Field, Report};

use crate::classify::FieldCategories;
use crate::columns::CriticalColumn;
use crate::issues::IssueStats;

/// Contact-style columns below this fill rate count as a contact gap.
pub const CONTACT_COVERAGE_TARGET: f64 = 50.0;

const CONTACT_KEYWORDS: [&str; 4] = ["linkedin", "website", "email", "phone"];

/// Fields worth removing or fixing before enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecommendedActions {
    pub empty_columns: Vec<String>,
    pub sparse_columns: Vec<String>,
    /// Fields with a warning about inconsistent values or formats.
    pub inconsistent_columns: Vec<String>,
    pub total_problematic: usize,
    /// Problematic fields as a rounded share of all fields.
    pub reduction_percentage: u64,
    /// False when there are neither issues nor problematic fields.
    pub is_actionable: bool,
}

fn column_names(fields: &[&Field]) -> Vec<String> {
    fields
        .iter()
        .map(|field| field.column_name.clone())
        .collect()
}

pub fn recommend_actions(
    report: &Report,
    categories: &FieldCategories<'_>,
    issues: &IssueStats,
) -> RecommendedActions {
    let empty_columns = column_names(&categories.empty);
    let sparse_columns = column_names(&categories.critical);
    let inconsistent_columns: Vec<String> = report
        .fields
        .iter()
        .filter(|field| field.has_format_warning())
        .map(|field| field.column_name.clone())
        .collect();

    // A field can be both sparse and inconsistent; it is counted in each list.
    let total_problematic = empty_columns.len() + sparse_columns.len() + inconsistent_columns.len();
    let reduction_percentage = if report.total_fields == 0 {
        0
    } else {
        (total_problematic as f64 / report.total_fields as f64 * 100.0).round() as u64
    };

    RecommendedActions {
        empty_columns,
        sparse_columns,
        inconsistent_columns,
        total_problematic,
        reduction_percentage,
        is_actionable: issues.total > 0 || total_problematic > 0,
    }
}

/// Which enrichment strategies the data calls for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OpportunityFlags {
    pub revenue_missing: bool,
    pub funding_missing: bool,
    pub contact_missing: bool,
    pub industry_issues: bool,
    pub format_issues: bool,
}

impl OpportunityFlags {
    pub fn any(&self) -> bool {
        self.revenue_missing
            || self.funding_missing
            || self.contact_missing
            || self.industry_issues
            || self.format_issues
    }
}

fn name_has(column: &CriticalColumn, keywords: &[&str]) -> bool {
    let name = column.name.to_lowercase();
    keywords.iter().any(|keyword| name.contains(keyword))
}

pub fn opportunity_flags(
    report: &Report,
    columns: &[CriticalColumn],
    options: &AnalysisOptions,
) -> OpportunityFlags {
    let thresholds = &options.thresholds;
    let stored_warnings = |column: &CriticalColumn| column.warnings.iter().any(|w| !w.coverage);
    OpportunityFlags {
        revenue_missing: columns.iter().any(|column| {
            name_has(column, &["revenue"]) && column.fill_percentage < thresholds.critical_below
        }),
        funding_missing: columns.iter().any(|column| {
            name_has(column, &["funding", "investment"])
                && column.fill_percentage < thresholds.critical_below
        }),
        contact_missing: columns.iter().any(|column| {
            name_has(column, &CONTACT_KEYWORDS) && column.fill_percentage < CONTACT_COVERAGE_TARGET
        }),
        industry_issues: columns.iter().any(|column| {
            name_has(column, &["industry"])
                && (column.fill_percentage < thresholds.good_at || stored_warnings(column))
        }),
        format_issues: report.fields.iter().any(|field| field.has_format_warning()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanPriority {
    High,
    Medium,
    Low,
}

impl PlanPriority {
    pub fn label(&self) -> &'static str {
        match self {
            PlanPriority::High => "high",
            PlanPriority::Medium => "medium",
            PlanPriority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanItem {
    pub title: String,
    pub description: String,
    pub priority: PlanPriority,
}

impl PlanItem {
    fn new(title: &str, description: impl Into<String>, priority: PlanPriority) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            priority,
        }
    }
}

/// Prioritized enrichment steps. Empty when no opportunity is detected.
pub fn enrichment_plan(
    report: &Report,
    flags: &OpportunityFlags,
    options: &AnalysisOptions,
) -> Vec<PlanItem> {
    if !flags.any() {
        return Vec::new();
    }
    let mut items = Vec::new();
    if flags.revenue_missing || flags.funding_missing {
        items.push(PlanItem::new(
            "Data Discovery & Enrichment",
            "Fill critical gaps in revenue, funding, and financial data using premium data sources",
            PlanPriority::High,
        ));
    }
    if flags.industry_issues || flags.format_issues {
        items.push(PlanItem::new(
            "Standardization & Normalization",
            "Clean and standardize industry classifications, company sizes, and contact formats",
            PlanPriority::Medium,
        ));
    }
    let empty_fields = report
        .fields
        .iter()
        .filter(|field| field.populated_count == 0)
        .count();
    if empty_fields > options.cleanup_min_empty_fields {
        items.push(PlanItem::new(
            "CRM Cleanup",
            format!(
                "Remove {empty_fields} unused fields to improve performance and user adoption"
            ),
            PlanPriority::Medium,
        ));
    }
    items.push(PlanItem::new(
        "Quality Validation",
        "Implement ongoing data quality checks and validation rules",
        PlanPriority::Low,
    ));
    items.push(PlanItem::new(
        "Results Reporting",
        "Provide detailed before/after analysis showing tangible improvements",
        PlanPriority::Low,
    ));
    items
}
