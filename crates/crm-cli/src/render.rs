//! Terminal rendering of derived report metrics.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crm_metrics::{
    ChangeTrend, ComparisonRollup, CriticalColumn, EnrichmentSummary, FORMAT_PREVIEW_LIMIT,
    MappingComparison, PopulationCategory, QualitySummary, format_standardized, group_by_category,
};
use crm_model::{ColumnMapping, EnrichmentReport, RecordedSeverity, Report, Severity};

/// Header lines for a quality report.
pub fn quality_overview(report: &Report, summary: &QualitySummary<'_>) -> String {
    let company = report.company_name.as_deref().unwrap_or("-");
    let mut lines = vec![format!("Report: {company} ({})", report.token)];
    if let Some(generated_at) = report.generated_at {
        lines.push(format!(
            "Generated: {}",
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    lines.push(format!(
        "Records: {}  Fields: {}  Fields with issues: {}",
        report.total_records, report.total_fields, report.fields_with_issues
    ));
    lines.push(format!("Quality score: {}/100", summary.score));
    let issues = &summary.issues;
    let segments = issues
        .segments()
        .into_iter()
        .map(|(severity, count)| format!("{} {count}", severity.label().to_lowercase()))
        .collect::<Vec<_>>();
    if segments.is_empty() {
        lines.push("Issues: 0 total".to_string());
    } else {
        lines.push(format!(
            "Issues: {} total ({})",
            issues.total,
            segments.join(", ")
        ));
    }
    if issues.unrecognized > 0 {
        lines.push(format!(
            "Skipped {} issue(s) with unrecognized severity",
            issues.unrecognized
        ));
    }
    lines.join("\n")
}

/// Field counts and reconciled shares per population category.
pub fn category_table(summary: &QualitySummary<'_>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Fields"),
        header_cell("Share"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (index, category) in PopulationCategory::ALL.into_iter().enumerate() {
        let fields = summary.categories.get(category);
        let share = summary.category_percentages.get(index).copied().unwrap_or(0);
        let columns = fields
            .iter()
            .map(|field| field.column_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(category.label()).fg(category_color(category)),
            Cell::new(fields.len()),
            Cell::new(format!("{share}%")),
            if columns.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(columns)
            },
        ]);
    }
    table
}

/// Global issues, most urgent first. `None` when there are none.
pub fn issue_table(report: &Report) -> Option<Table> {
    if report.global_issues.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Title"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in &report.global_issues {
        table.add_row(vec![
            severity_cell(&issue.severity),
            Cell::new(&issue.title).add_attribute(Attribute::Bold),
            Cell::new(&issue.description),
        ]);
    }
    Some(table)
}

/// Configured critical columns grouped by category.
pub fn critical_column_table(columns: &[CriticalColumn]) -> Option<Table> {
    if columns.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Column"),
        header_cell("Filled"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for group in group_by_category(columns) {
        for column in &group.columns {
            let warnings = column
                .warnings
                .iter()
                .map(|warning| warning.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            let name = if column.found {
                Cell::new(&column.name)
            } else {
                Cell::new(format!("{} (missing)", column.name)).fg(Color::DarkGrey)
            };
            table.add_row(vec![
                Cell::new(&group.title).fg(Color::Blue),
                name,
                Cell::new(format!("{}%", column.display_rate)),
                if warnings.is_empty() {
                    dim_cell("-")
                } else {
                    Cell::new(warnings)
                },
            ]);
        }
    }
    Some(table)
}

/// Recommended actions and the enrichment plan as text.
pub fn recommendations_text(summary: &QualitySummary<'_>) -> String {
    let mut lines = Vec::new();
    let actions = &summary.recommendations;
    if actions.is_actionable {
        lines.push(format!(
            "Immediate priority: remove {} unused/problematic fields ({}% reduction)",
            actions.total_problematic, actions.reduction_percentage
        ));
        let lists = [
            ("Delete", &actions.empty_columns),
            ("Review sparse", &actions.sparse_columns),
            ("Standardize", &actions.inconsistent_columns),
        ];
        for (label, columns) in lists {
            if !columns.is_empty() {
                lines.push(format!(
                    "- {label} ({}): {}",
                    columns.len(),
                    columns.join(", ")
                ));
            }
        }
    }
    if !summary.plan.is_empty() {
        lines.push("Enrichment plan:".to_string());
        for item in &summary.plan {
            lines.push(format!(
                "- [{}] {}: {}",
                item.priority.label(),
                item.title,
                item.description
            ));
        }
        if summary.opportunities.contact_missing {
            lines.push("Contact information gaps detected".to_string());
        }
    }
    lines.join("\n")
}

pub fn print_quality(report: &Report, summary: &QualitySummary<'_>) {
    println!("{}", quality_overview(report, summary));
    println!();
    println!("{}", category_table(summary));
    if let Some(table) = issue_table(report) {
        println!();
        println!("Global issues:");
        println!("{table}");
    }
    if let Some(table) = critical_column_table(&summary.critical_columns) {
        println!();
        println!("Critical columns:");
        println!("{table}");
    }
    let recommendations = recommendations_text(summary);
    if !recommendations.is_empty() {
        println!();
        println!("{recommendations}");
    }
}

/// Header lines for an enrichment report.
pub fn enrichment_overview(
    report: &EnrichmentReport,
    summary: &EnrichmentSummary,
    rollup: &ComparisonRollup,
) -> String {
    let mut lines = Vec::new();
    if let Some(created_at) = report.created_at {
        lines.push(format!(
            "Created: {}",
            created_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    lines.push(format!(
        "Rows: {}  Modified: {} ({:.1}%)",
        report.total_rows, report.records_modified_count, summary.coverage
    ));
    let structure = &report.structure;
    if structure.is_known() {
        lines.push(format!(
            "Columns: {} CRM -> {} export (new {}, many-to-one {}, merged away {}, created {})",
            count_or_dash(structure.total_crm_columns),
            count_or_dash(structure.total_export_columns),
            count_or_dash(structure.new_columns_count),
            count_or_dash(structure.many_to_one_count),
            count_or_dash(structure.columns_reduced_by_merging),
            count_or_dash(structure.export_columns_created),
        ));
    }
    lines.push(format!(
        "Data improvement rate: {:.1}%",
        summary.data_improvement_rate
    ));
    let totals = &summary.totals;
    lines.push(format!(
        "Data points: added {}, fixed {}, discarded {}, good {} (total {})",
        totals.added,
        totals.fixed,
        totals.discarded,
        totals.good,
        totals.total_changes()
    ));
    let improvement = rollup.improvement();
    lines.push(format!(
        "Average completeness: {:.1}% -> {:.1}% ({:+.1} pts, {})",
        improvement.before,
        improvement.after,
        improvement.delta(),
        improvement.relative()
    ));
    lines.join("\n")
}

/// Columns standardized to fewer formats. Empty when there are none.
pub fn format_standardization_text(mappings: &[ColumnMapping]) -> String {
    let standardized = format_standardized(mappings);
    if standardized.is_empty() {
        return String::new();
    }
    let mut lines = vec!["Format standardization:".to_string()];
    for mapping in standardized.iter().take(FORMAT_PREVIEW_LIMIT) {
        if let Some(stats) = &mapping.comparison_stats {
            lines.push(format!(
                "- {}: {} formats -> {} format",
                mapping.crm_column, stats.crm_format_count, stats.export_format_count
            ));
        }
    }
    let hidden = standardized.len().saturating_sub(FORMAT_PREVIEW_LIMIT);
    if hidden > 0 {
        lines.push(format!("+{hidden} more columns"));
    }
    lines.join("\n")
}

/// Per-column before/after comparison.
pub fn mapping_table(comparisons: &[MappingComparison<'_>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("CRM column"),
        header_cell("Export column"),
        header_cell("Trend"),
        header_cell("Added"),
        header_cell("Fixed"),
        header_cell("Discarded"),
        header_cell("Good"),
        header_cell("Before"),
        header_cell("After"),
        header_cell("Change"),
    ]);
    apply_table_style(&mut table);
    for index in 3..10 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for comparison in comparisons {
        let export = comparison.export_column.unwrap_or("-");
        let export = if comparison.is_many_to_one {
            format!("{export} (many-to-one)")
        } else {
            export.to_string()
        };
        let stats = comparison.stats;
        table.add_row(vec![
            Cell::new(comparison.crm_column).add_attribute(Attribute::Bold),
            Cell::new(export),
            trend_cell(comparison.trend),
            count_cell(stats.added_new_data, Color::Green),
            count_cell(stats.fixed_data, Color::Cyan),
            count_cell(stats.discarded_invalid_data, Color::Yellow),
            count_cell(stats.good_data, Color::Reset),
            Cell::new(format!("{:.1}%", comparison.improvement.before)),
            Cell::new(format!("{:.1}%", comparison.improvement.after)),
            Cell::new(comparison.improvement.relative().to_string()),
        ]);
    }
    table
}

pub fn print_enrichment(
    report: &EnrichmentReport,
    summary: &EnrichmentSummary,
    rollup: &ComparisonRollup,
    comparisons: &[MappingComparison<'_>],
) {
    println!("{}", enrichment_overview(report, summary, rollup));
    if !comparisons.is_empty() {
        println!();
        println!("{}", mapping_table(comparisons));
    }
    let formats = format_standardization_text(&report.column_mappings);
    if !formats.is_empty() {
        println!();
        println!("{formats}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn severity_cell(severity: &RecordedSeverity) -> Cell {
    match severity.known() {
        Some(Severity::Critical) => Cell::new("CRITICAL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Some(Severity::High) => Cell::new("HIGH").fg(Color::DarkYellow),
        Some(Severity::Medium) => Cell::new("MEDIUM").fg(Color::Yellow),
        Some(Severity::Low) => Cell::new("LOW").fg(Color::Blue),
        None => dim_cell(severity),
    }
}

fn category_color(category: PopulationCategory) -> Color {
    match category {
        PopulationCategory::Empty => Color::Red,
        PopulationCategory::Critical => Color::DarkYellow,
        PopulationCategory::Warning => Color::Yellow,
        PopulationCategory::Good => Color::Green,
    }
}

fn trend_cell(trend: ChangeTrend) -> Cell {
    match trend {
        ChangeTrend::Improved => Cell::new("▲ improved").fg(Color::Green),
        ChangeTrend::Regressed => Cell::new("▼ regressed").fg(Color::DarkYellow),
        ChangeTrend::Neutral => dim_cell("- neutral"),
    }
}

fn count_cell(count: u64, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn count_or_dash(count: Option<u64>) -> String {
    count.map_or_else(|| "-".to_string(), |count| count.to_string())
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

