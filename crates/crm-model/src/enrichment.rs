//! Enrichment report snapshot: CRM-to-export column mappings and their
//! before/after comparison statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Before/after statistics for a single mapped column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnComparisonStats {
    pub added_new_data: u64,
    pub fixed_data: u64,
    pub discarded_invalid_data: u64,
    pub good_data: u64,
    #[serde(default)]
    pub not_found: u64,
    /// Share of correct values before enrichment, 0-100.
    pub correct_percentage_before: f64,
    /// Share of correct values after enrichment, 0-100.
    pub correct_percentage_after: f64,
    #[serde(default = "default_format_count")]
    pub crm_format_count: u64,
    #[serde(default = "default_format_count")]
    pub export_format_count: u64,
}

fn default_format_count() -> u64 {
    1
}

impl ColumnComparisonStats {
    /// Values that were added or repaired.
    pub fn improved(&self) -> u64 {
        self.added_new_data + self.fixed_data
    }

    /// True when several CRM formats were reduced to fewer export formats.
    pub fn standardizes_format(&self) -> bool {
        self.crm_format_count > 1 && self.crm_format_count > self.export_format_count
    }

    /// All classified values: discarded, improved and already good.
    pub fn classified(&self) -> u64 {
        self.discarded_invalid_data + self.improved() + self.good_data
    }
}

/// Mapping from a CRM column to an export column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default)]
    pub id: String,
    pub crm_column: String,
    #[serde(default)]
    pub export_column: Option<String>,
    #[serde(default)]
    pub is_many_to_one: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_stats: Option<ColumnComparisonStats>,
}

/// Result of enriching a CRM export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentReport {
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub total_rows: u64,
    #[serde(default)]
    pub records_modified_count: u64,
    #[serde(flatten)]
    pub structure: ColumnStructure,
    #[serde(default)]
    pub column_mappings: Vec<ColumnMapping>,
}

/// Column-level shape of the enriched export compared with the CRM input.
///
/// Every count is optional; older snapshots carry none of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnStructure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_crm_columns: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_export_columns: Option<u64>,
    /// Export columns with no CRM counterpart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_columns_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub many_to_one_count: Option<u64>,
    /// CRM columns folded into another column by many-to-one mappings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns_reduced_by_merging: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_columns_created: Option<u64>,
}

impl ColumnStructure {
    /// True when the snapshot carries at least one structural count.
    pub fn is_known(&self) -> bool {
        [
            self.total_crm_columns,
            self.total_export_columns,
            self.new_columns_count,
            self.many_to_one_count,
            self.columns_reduced_by_merging,
            self.export_columns_created,
        ]
        .iter()
        .any(Option::is_some)
    }
}

impl EnrichmentReport {
    /// Mappings that carry comparison statistics.
    pub fn compared_mappings(&self) -> impl Iterator<Item = (&ColumnMapping, &ColumnComparisonStats)> {
        self.column_mappings.iter().filter_map(|mapping| {
            mapping
                .comparison_stats
                .as_ref()
                .map(|stats| (mapping, stats))
        })
    }
}
