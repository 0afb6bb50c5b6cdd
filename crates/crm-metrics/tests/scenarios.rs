//! Integration tests for report metrics on representative snapshots.

use std::collections::BTreeMap;

use crm_metrics::{
    ChangeTrend, PlanPriority, PopulationCategory, RelativeChange, classify_fields,
    compare_mappings, critical_columns, enrichment_summary, field_warnings, group_by_category,
    issue_stats, quality_score, reconcile_percentages, rollup, summarize_report,
};
use crm_model::{
    AnalysisOptions, ColumnComparisonStats, ColumnMapping, EnrichmentReport, Field, GlobalIssue,
    PopulationThresholds, RecordedSeverity, Report, ReportConfig, Severity, Warning,
};

fn warning(id: &str, message: &str, severity: &str) -> Warning {
    Warning {
        id: id.to_string(),
        message: message.to_string(),
        severity: RecordedSeverity::from(severity),
        kind: "quality".to_string(),
        meta: None,
    }
}

fn field(name: &str, populated_count: u64, warnings: Vec<Warning>) -> Field {
    Field {
        id: format!("f-{name}"),
        column_name: name.to_string(),
        populated_count,
        inferred_type: "string".to_string(),
        format_count: None,
        warnings,
    }
}

fn issue(id: &str, severity: &str) -> GlobalIssue {
    GlobalIssue {
        id: id.to_string(),
        title: format!("Issue {id}"),
        description: String::new(),
        severity: RecordedSeverity::from(severity),
        meta: None,
    }
}

fn report(fields: Vec<Field>, global_issues: Vec<GlobalIssue>) -> Report {
    Report {
        token: "token".to_string(),
        company_name: Some("Acme".to_string()),
        generated_at: None,
        total_records: 100,
        total_fields: fields.len() as u64,
        fields_with_issues: 0,
        fields,
        global_issues,
        config: None,
    }
}

fn stats(added: u64, fixed: u64, discarded: u64, good: u64, before: f64, after: f64) -> ColumnComparisonStats {
    ColumnComparisonStats {
        added_new_data: added,
        fixed_data: fixed,
        discarded_invalid_data: discarded,
        good_data: good,
        not_found: 0,
        correct_percentage_before: before,
        correct_percentage_after: after,
        crm_format_count: 2,
        export_format_count: 1,
    }
}

fn mapping(crm: &str, export: &str, stats: Option<ColumnComparisonStats>) -> ColumnMapping {
    ColumnMapping {
        id: String::new(),
        crm_column: crm.to_string(),
        export_column: Some(export.to_string()),
        is_many_to_one: false,
        comparison_stats: stats,
    }
}

#[test]
fn score_for_ten_fields_with_three_issues() {
    let mut snapshot = report(Vec::new(), Vec::new());
    snapshot.total_fields = 10;
    snapshot.fields_with_issues = 3;
    assert_eq!(quality_score(&snapshot), 70);
}

#[test]
fn reconciliation_examples() {
    assert_eq!(reconcile_percentages([2, 3, 4, 1], 10), [20, 30, 40, 10]);
    assert_eq!(reconcile_percentages([1, 1, 1, 7], 10), [10, 10, 10, 70]);
    let shares = reconcile_percentages([1, 2, 3, 3], 9);
    assert_eq!(shares, [11, 22, 34, 33]);
    assert_eq!(shares.iter().sum::<u64>(), 100);
}

#[test]
fn empty_field_gets_critical_coverage_warning_plus_stored() {
    let thresholds = PopulationThresholds::default();
    let empty = field(
        "Revenue",
        0,
        vec![warning("w1", "Inconsistent currency", "high")],
    );
    let snapshot = report(vec![empty.clone()], Vec::new());

    let categories = classify_fields(&snapshot.fields, 100, &thresholds);
    assert_eq!(categories.empty.len(), 1);
    assert_eq!(
        PopulationCategory::from_rate(empty.population_rate(100), &thresholds),
        PopulationCategory::Empty
    );

    let warnings = field_warnings(&empty, 100, &thresholds);
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].message, "Completely empty");
    assert_eq!(warnings[0].severity.known(), Some(Severity::Critical));
    assert!(warnings[0].coverage);
    assert_eq!(warnings[1].id, "w1");
    assert!(!warnings[1].coverage);
}

#[test]
fn mapping_without_stats_is_excluded_from_rollup() {
    let mappings = vec![
        mapping("Revenue", "revenue", Some(stats(10, 5, 2, 83, 40.0, 80.0))),
        mapping("Name", "name", None),
        mapping("Website", "website", Some(stats(0, 0, 6, 94, 60.0, 60.0))),
    ];
    let result = rollup(&mappings);
    assert_eq!(result.mappings_with_stats, 2);
    assert_eq!(result.totals.added, 10);
    assert_eq!(result.totals.fixed, 5);
    assert_eq!(result.totals.discarded, 8);
    assert_eq!(result.totals.good, 177);
    assert!((result.avg_before - 50.0).abs() < 1e-9);
    assert!((result.avg_after - 70.0).abs() < 1e-9);
    assert!((result.improvement().delta() - 20.0).abs() < 1e-9);
    match result.improvement().relative() {
        RelativeChange::Percent(value) => assert!((value - 40.0).abs() < 1e-9),
        RelativeChange::Unbounded => panic!("baseline is non-zero"),
    }
}

#[test]
fn rollup_without_stats_defaults_to_zero() {
    let result = rollup(&[mapping("Name", "name", None)]);
    assert_eq!(result.mappings_with_stats, 0);
    assert_eq!(result.avg_before, 0.0);
    assert_eq!(result.avg_after, 0.0);
    assert_eq!(result.improvement().relative(), RelativeChange::Unbounded);
}

#[test]
fn zero_baseline_is_unbounded_not_zero() {
    let result = rollup(&[mapping("Phone", "phone", Some(stats(30, 0, 0, 0, 0.0, 30.0)))]);
    assert_eq!(result.improvement().relative(), RelativeChange::Unbounded);
    assert_eq!(result.improvement().relative().to_string(), "∞");
}

#[test]
fn per_mapping_comparisons_skip_unmatched() {
    let mappings = vec![
        mapping("Revenue", "revenue", Some(stats(10, 5, 2, 83, 40.0, 80.0))),
        mapping("Name", "name", None),
        mapping("Website", "website", Some(stats(0, 0, 6, 94, 60.0, 60.0))),
    ];
    let comparisons = compare_mappings(&mappings);
    assert_eq!(comparisons.len(), 2);
    assert_eq!(comparisons[0].crm_column, "Revenue");
    assert_eq!(comparisons[0].trend, ChangeTrend::Improved);
    assert_eq!(comparisons[1].export_column, Some("website"));
    assert_eq!(comparisons[1].trend, ChangeTrend::Regressed);
}

#[test]
fn enrichment_summary_averages_over_all_mappings() {
    let enrichment = EnrichmentReport {
        token: "t".to_string(),
        total_rows: 200,
        records_modified_count: 50,
        column_mappings: vec![
            mapping("Revenue", "revenue", Some(stats(10, 10, 0, 80, 40.0, 80.0))),
            mapping("Name", "name", None),
        ],
        ..EnrichmentReport::default()
    };
    let summary = enrichment_summary(&enrichment);
    // 0.2 improvement rate averaged with the stat-less mapping's 0.
    assert!((summary.data_improvement_rate - 10.0).abs() < 1e-9);
    assert!((summary.coverage - 25.0).abs() < 1e-9);
    assert_eq!(summary.totals.total_changes(), 100);
}

#[test]
fn issue_histogram_counts_global_issues_and_warnings() {
    let snapshot = report(
        vec![
            field("A", 50, vec![warning("w1", "x", "critical"), warning("w2", "y", "Low")]),
            field("B", 80, vec![warning("w3", "z", "MEDIUM"), warning("w4", "q", "info")]),
        ],
        vec![issue("g1", "HIGH"), issue("g2", "critical")],
    );
    let stats = issue_stats(&snapshot);
    assert_eq!(stats.critical, 2);
    assert_eq!(stats.high, 1);
    assert_eq!(stats.medium, 1);
    assert_eq!(stats.low, 1);
    assert_eq!(stats.total, 5);
    assert_eq!(stats.unrecognized, 1);
}

fn configured_report() -> Report {
    let mut company = BTreeMap::new();
    company.insert("Website".to_string(), "website".to_string());
    company.insert("Industry".to_string(), "industry".to_string());
    let mut financial = BTreeMap::new();
    financial.insert("Annual Revenue".to_string(), "annual_revenue".to_string());
    let mut critical = BTreeMap::new();
    critical.insert("company_info".to_string(), company);
    critical.insert("financial_data".to_string(), financial);
    critical.insert("custom".to_string(), BTreeMap::new());

    let mut fields = vec![
        field("website", 40, Vec::new()),
        field(
            "industry",
            90,
            vec![warning("w1", "Inconsistent industry format", "medium")],
        ),
    ];
    for index in 0..11 {
        fields.push(field(&format!("unused_{index:02}"), 0, Vec::new()));
    }
    let mut snapshot = report(fields, vec![issue("g1", "high")]);
    snapshot.fields_with_issues = 12;
    snapshot.config = Some(ReportConfig {
        critical_columns: critical,
        extra: BTreeMap::new(),
    });
    snapshot
}

#[test]
fn missing_critical_column_is_zero_populated() {
    let snapshot = configured_report();
    let columns = critical_columns(&snapshot, &PopulationThresholds::default());
    assert_eq!(columns.len(), 3);

    let revenue = columns
        .iter()
        .find(|column| column.column_name == "annual_revenue")
        .expect("revenue column");
    assert!(!revenue.found);
    assert_eq!(revenue.fill_percentage, 0.0);
    assert_eq!(revenue.display_rate, 0);
    let website = columns
        .iter()
        .find(|column| column.column_name == "website")
        .expect("website column");
    assert_eq!(website.display_rate, 40);
    assert_eq!(revenue.warnings.len(), 1);
    assert_eq!(revenue.warnings[0].message, "Completely empty");

    let groups = group_by_category(&columns);
    assert_eq!(groups[0].slug, "company_info");
    assert_eq!(groups[0].columns.len(), 2);
    assert_eq!(groups[1].title, "Financial Data");
    assert_eq!(groups[2].title, "Size & Structure");
    assert!(groups[2].columns.is_empty());
}

#[test]
fn summary_builds_recommendations_and_plan() {
    let snapshot = configured_report();
    let summary = summarize_report(&snapshot, &AnalysisOptions::default());

    assert_eq!(summary.score, 8);
    assert_eq!(summary.categories.empty.len(), 11);
    assert_eq!(summary.category_percentages.iter().sum::<u64>(), 100);

    let actions = &summary.recommendations;
    assert_eq!(actions.empty_columns.len(), 11);
    assert_eq!(actions.inconsistent_columns, vec!["industry".to_string()]);
    assert_eq!(actions.total_problematic, 12);
    assert_eq!(actions.reduction_percentage, 92);
    assert!(actions.is_actionable);

    assert!(summary.opportunities.revenue_missing);
    assert!(summary.opportunities.contact_missing);
    assert!(summary.opportunities.industry_issues);
    assert!(summary.opportunities.format_issues);

    let titles: Vec<_> = summary.plan.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Data Discovery & Enrichment",
            "Standardization & Normalization",
            "CRM Cleanup",
            "Quality Validation",
            "Results Reporting",
        ]
    );
    assert_eq!(summary.plan[0].priority, PlanPriority::High);
    assert_eq!(
        summary.plan[2].description,
        "Remove 11 unused fields to improve performance and user adoption"
    );
}

#[test]
fn clean_report_has_no_plan() {
    let snapshot = report(vec![field("name", 100, Vec::new())], Vec::new());
    let summary = summarize_report(&snapshot, &AnalysisOptions::default());
    assert_eq!(summary.score, 100);
    assert!(summary.plan.is_empty());
    assert!(!summary.recommendations.is_actionable);
    assert_eq!(summary.category_percentages, [0, 0, 0, 100]);
}
