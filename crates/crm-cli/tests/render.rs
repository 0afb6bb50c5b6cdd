//! Tests for CLI option resolution and report rendering.

use std::fs;

use crm_cli::cli::{OutputArgs, QualityArgs};
use crm_cli::commands::analysis_options;
use crm_cli::render::{
    category_table, enrichment_overview, format_standardization_text, issue_table, mapping_table,
    quality_overview,
};
use crm_ingest::{parse_enrichment_report, parse_report};
use crm_metrics::{compare_mappings, enrichment_summary, rollup, summarize_report};
use crm_model::{AnalysisOptions, ColumnComparisonStats, ColumnMapping};
use tempfile::TempDir;

const REPORT_JSON: &str = r#"{
    "token": "r-1",
    "company_name": "Acme",
    "generated_at": "2025-03-01T12:00:00Z",
    "total_records": 10,
    "total_fields": 2,
    "fields_with_issues": 1,
    "fields": [
        {
            "column_name": "website",
            "populated_count": 4,
            "warnings": [{"id": "w1", "message": "Stale values", "severity": "low"}]
        },
        {"column_name": "account_name", "populated_count": 10}
    ],
    "global_issues": [
        {"id": "g1", "title": "Stale records", "description": "Old rows", "severity": "medium"},
        {"id": "g2", "title": "Duplicates", "description": "Same domain", "severity": "high"},
        {"id": "g3", "title": "Misc", "severity": "notice"}
    ]
}"#;

const ENRICHMENT_JSON: &str = r#"{
    "token": "e-1",
    "total_rows": 200,
    "records_modified_count": 40,
    "column_mappings": [
        {
            "crm_column": "Website",
            "export_column": "website",
            "comparison_stats": {
                "added_new_data": 10,
                "fixed_data": 5,
                "discarded_invalid_data": 5,
                "good_data": 80,
                "correct_percentage_before": 50.0,
                "correct_percentage_after": 90.0
            }
        },
        {"crm_column": "Notes", "export_column": "notes"},
        {
            "crm_column": "Industry",
            "export_column": "industry",
            "comparison_stats": {
                "added_new_data": 0,
                "fixed_data": 0,
                "discarded_invalid_data": 30,
                "good_data": 70,
                "correct_percentage_before": 100.0,
                "correct_percentage_after": 70.0
            }
        }
    ]
}"#;

fn quality_args(options: Option<std::path::PathBuf>) -> QualityArgs {
    QualityArgs {
        report: "report.json".into(),
        options,
        critical_threshold: None,
        good_threshold: None,
        output: OutputArgs { json: false },
    }
}

#[test]
fn test_quality_overview_lists_counts() {
    let report = parse_report(REPORT_JSON).unwrap();
    let summary = summarize_report(&report, &AnalysisOptions::default());

    insta::assert_snapshot!(quality_overview(&report, &summary), @r"
    Report: Acme (r-1)
    Generated: 2025-03-01 12:00 UTC
    Records: 10  Fields: 2  Fields with issues: 1
    Quality score: 50/100
    Issues: 3 total (high 1, medium 1, low 1)
    Skipped 1 issue(s) with unrecognized severity
    ");
}

#[test]
fn test_quality_tables_name_columns_and_issues() {
    let report = parse_report(REPORT_JSON).unwrap();
    let summary = summarize_report(&report, &AnalysisOptions::default());

    let categories = category_table(&summary).to_string();
    assert!(categories.contains("website"));
    assert!(categories.contains("account_name"));
    assert!(categories.contains("50%"));

    let issues = issue_table(&report).expect("issue table").to_string();
    assert!(issues.contains("Duplicates"));
    assert!(issues.contains("notice"));
}

#[test]
fn test_enrichment_overview_rolls_up_mappings() {
    let report = parse_enrichment_report(ENRICHMENT_JSON).unwrap();
    let summary = enrichment_summary(&report);
    let rolled = rollup(&report.column_mappings);

    insta::assert_snapshot!(enrichment_overview(&report, &summary, &rolled), @r"
    Rows: 200  Modified: 40 (20.0%)
    Data improvement rate: 5.0%
    Data points: added 10, fixed 5, discarded 35, good 150 (total 200)
    Average completeness: 75.0% -> 80.0% (+5.0 pts, +6.7%)
    ");
}

#[test]
fn test_enrichment_overview_shows_column_structure() {
    let report = parse_enrichment_report(
        r#"{
            "created_at": "2025-04-02T09:30:00Z",
            "total_rows": 50,
            "records_modified_count": 0,
            "total_crm_columns": 40,
            "total_export_columns": 28,
            "new_columns_count": 6,
            "many_to_one_count": 3,
            "columns_reduced_by_merging": 5
        }"#,
    )
    .unwrap();
    let summary = enrichment_summary(&report);
    let rolled = rollup(&report.column_mappings);

    insta::assert_snapshot!(enrichment_overview(&report, &summary, &rolled), @r"
    Created: 2025-04-02 09:30 UTC
    Rows: 50  Modified: 0 (0.0%)
    Columns: 40 CRM -> 28 export (new 6, many-to-one 3, merged away 5, created -)
    Data improvement rate: 0.0%
    Data points: added 0, fixed 0, discarded 0, good 0 (total 0)
    Average completeness: 0.0% -> 0.0% (+0.0 pts, ∞)
    ");
}

fn formats_mapping(crm_column: &str, crm_formats: u64, export_formats: u64) -> ColumnMapping {
    ColumnMapping {
        id: String::new(),
        crm_column: crm_column.to_string(),
        export_column: Some(crm_column.to_lowercase()),
        is_many_to_one: false,
        comparison_stats: Some(ColumnComparisonStats {
            added_new_data: 0,
            fixed_data: 0,
            discarded_invalid_data: 0,
            good_data: 10,
            not_found: 0,
            correct_percentage_before: 90.0,
            correct_percentage_after: 90.0,
            crm_format_count: crm_formats,
            export_format_count: export_formats,
        }),
    }
}

#[test]
fn test_format_standardization_lists_first_five() {
    let mut mappings: Vec<_> = ["A", "B", "C", "D", "E", "F", "G"]
        .into_iter()
        .map(|name| formats_mapping(name, 3, 1))
        .collect();
    mappings.push(formats_mapping("Same", 2, 2));

    insta::assert_snapshot!(format_standardization_text(&mappings), @r"
    Format standardization:
    - A: 3 formats -> 1 format
    - B: 3 formats -> 1 format
    - C: 3 formats -> 1 format
    - D: 3 formats -> 1 format
    - E: 3 formats -> 1 format
    +2 more columns
    ");

    assert!(format_standardization_text(&mappings[7..]).is_empty());
}

#[test]
fn test_mapping_table_shows_trends() {
    let report = parse_enrichment_report(ENRICHMENT_JSON).unwrap();
    let comparisons = compare_mappings(&report.column_mappings);
    assert_eq!(comparisons.len(), 2);

    let table = mapping_table(&comparisons).to_string();
    assert!(table.contains("improved"));
    assert!(table.contains("regressed"));
    assert!(!table.contains("Notes"));
}

#[test]
fn test_analysis_options_flags_override_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("options.json");
    fs::write(
        &path,
        r#"{"thresholds": {"critical_below": 20.0, "good_at": 75.0}, "cleanup_min_empty_fields": 3}"#,
    )
    .unwrap();

    let mut args = quality_args(Some(path));
    args.good_threshold = Some(80.0);
    let options = analysis_options(&args).unwrap();

    assert_eq!(options.thresholds.critical_below, 20.0);
    assert_eq!(options.thresholds.good_at, 80.0);
    assert_eq!(options.cleanup_min_empty_fields, 3);
}

#[test]
fn test_analysis_options_rejects_inverted_thresholds() {
    let mut args = quality_args(None);
    args.critical_threshold = Some(90.0);
    let err = analysis_options(&args).unwrap_err();
    assert!(err.to_string().contains("invalid population thresholds"));
}

#[test]
fn test_analysis_options_reports_unreadable_file() {
    let dir = TempDir::new().unwrap();
    let args = quality_args(Some(dir.path().join("missing.json")));
    let err = analysis_options(&args).unwrap_err();
    assert!(err.to_string().starts_with("read options"));
}
