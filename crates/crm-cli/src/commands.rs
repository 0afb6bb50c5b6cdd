use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{debug, info, info_span};

use crm_ingest::{load_enrichment_report, load_report};
use crm_metrics::{
    compare_mappings, enrichment_summary, format_standardized, rollup, summarize_report,
};
use crm_model::{AnalysisOptions, PopulationThresholds};

use crate::cli::{EnrichmentArgs, QualityArgs};
use crate::render::{print_enrichment, print_quality};

pub fn run_quality(args: &QualityArgs) -> Result<()> {
    let span = info_span!("quality", report = %args.report.display());
    let _guard = span.enter();

    let options = analysis_options(args)?;
    let report = load_report(&args.report)
        .with_context(|| format!("load report {}", args.report.display()))?;
    info!(
        token = %report.token,
        fields = report.fields.len(),
        records = report.total_records,
        "loaded quality report"
    );

    let summary = summarize_report(&report, &options);
    debug!(score = summary.score, issues = summary.issues.total, "summarized report");

    if args.output.json {
        let value = json!({
            "token": report.token,
            "options": options,
            "summary": summary,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("serialize summary")?
        );
    } else {
        print_quality(&report, &summary);
    }
    Ok(())
}

pub fn run_enrichment(args: &EnrichmentArgs) -> Result<()> {
    let span = info_span!("enrichment", report = %args.report.display());
    let _guard = span.enter();

    let report = load_enrichment_report(&args.report)
        .with_context(|| format!("load enrichment report {}", args.report.display()))?;
    info!(
        token = %report.token,
        mappings = report.column_mappings.len(),
        rows = report.total_rows,
        "loaded enrichment report"
    );

    let rolled = rollup(&report.column_mappings);
    let summary = enrichment_summary(&report);
    let comparisons = compare_mappings(&report.column_mappings);
    debug!(
        mappings_with_stats = rolled.mappings_with_stats,
        total_changes = rolled.totals.total_changes(),
        "rolled up comparisons"
    );

    if args.output.json {
        let standardized: Vec<_> = format_standardized(&report.column_mappings)
            .iter()
            .map(|mapping| mapping.crm_column.as_str())
            .collect();
        let value = json!({
            "token": report.token,
            "created_at": report.created_at,
            "structure": report.structure,
            "format_standardized": standardized,
            "summary": summary,
            "rollup": rolled,
            "improvement": rolled.improvement(),
            "mappings": comparisons,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("serialize enrichment summary")?
        );
    } else {
        print_enrichment(&report, &summary, &rolled, &comparisons);
    }
    Ok(())
}

/// Resolve analysis options: file first, then threshold flags on top.
pub fn analysis_options(args: &QualityArgs) -> Result<AnalysisOptions> {
    let mut options = match &args.options {
        Some(path) => read_options(path)?,
        None => AnalysisOptions::default(),
    };
    let thresholds = PopulationThresholds {
        critical_below: args
            .critical_threshold
            .unwrap_or(options.thresholds.critical_below),
        good_at: args.good_threshold.unwrap_or(options.thresholds.good_at),
    };
    thresholds.validate().context("invalid population thresholds")?;
    options.thresholds = thresholds;
    Ok(options)
}

fn read_options(path: &Path) -> Result<AnalysisOptions> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read options {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse options {}", path.display()))
}
