//! Configured critical columns, grouped by business category.

use serde::Serialize;

use crm_model::{Field, PopulationThresholds, Report};

use crate::classify::{DerivedWarning, field_warnings};
use crate::score::display_population_rate;

/// Categories with a known title, in display order.
pub const KNOWN_CATEGORIES: [(&str, &str, &str); 3] = [
    (
        "company_info",
        "Company Info",
        "Core company details and online presence",
    ),
    (
        "financial_data",
        "Financial Data",
        "Revenue, funding, and financial metrics",
    ),
    (
        "size_and_structure",
        "Size & Structure",
        "Employee count, leadership, and locations",
    ),
];

/// A configured column resolved against the report fields.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalColumn {
    pub category: String,
    /// Display name from the configuration.
    pub name: String,
    pub column_name: String,
    pub fill_percentage: f64,
    /// `fill_percentage` rounded for display.
    pub display_rate: u8,
    /// False when the column is absent from the report.
    pub found: bool,
    pub warnings: Vec<DerivedWarning>,
}

/// Resolve every configured critical column.
///
/// A configured column that is not present in the report is treated as a
/// zero-populated field without stored warnings.
pub fn critical_columns(report: &Report, thresholds: &PopulationThresholds) -> Vec<CriticalColumn> {
    let Some(configured) = report.critical_columns() else {
        return Vec::new();
    };
    let mut columns = Vec::new();
    for (category, entries) in configured {
        for (name, column_name) in entries {
            let stored = report.field(column_name);
            let missing;
            let field = match stored {
                Some(field) => field,
                None => {
                    missing = Field::missing(column_name);
                    &missing
                }
            };
            columns.push(CriticalColumn {
                category: category.clone(),
                name: name.clone(),
                column_name: column_name.clone(),
                fill_percentage: field.population_rate(report.total_records),
                display_rate: display_population_rate(field.populated_count, report.total_records),
                found: stored.is_some(),
                warnings: field_warnings(field, report.total_records, thresholds),
            });
        }
    }
    columns
}

/// Critical columns of one category.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnGroup<'a> {
    pub slug: String,
    pub title: String,
    pub columns: Vec<&'a CriticalColumn>,
}

/// Group columns by category: known categories first, in their fixed
/// order, then any other slugs alphabetically under their slug.
pub fn group_by_category(columns: &[CriticalColumn]) -> Vec<ColumnGroup<'_>> {
    let mut groups: Vec<ColumnGroup<'_>> = KNOWN_CATEGORIES
        .iter()
        .map(|(slug, title, _)| ColumnGroup {
            slug: (*slug).to_string(),
            title: (*title).to_string(),
            columns: Vec::new(),
        })
        .collect();
    for column in columns {
        match groups.iter_mut().find(|group| group.slug == column.category) {
            Some(group) => group.columns.push(column),
            None => groups.push(ColumnGroup {
                slug: column.category.clone(),
                title: column.category.clone(),
                columns: vec![column],
            }),
        }
    }
    let known = KNOWN_CATEGORIES.len();
    if let Some(extra) = groups.get_mut(known..) {
        extra.sort_by(|a, b| a.slug.cmp(&b.slug));
    }
    groups
}
