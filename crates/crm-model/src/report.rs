//! Data-quality report snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::severity::RecordedSeverity;

/// Free-form key/value metadata (affected counts, example values, ...).
pub type Meta = BTreeMap<String, Value>;

/// Category slug -> display name -> underlying column name.
pub type CriticalColumnConfig = BTreeMap<String, BTreeMap<String, String>>;

/// A warning attached to a single CRM field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub id: String,
    pub message: String,
    pub severity: RecordedSeverity,
    /// Category tag (e.g. "format", "coverage").
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Warning {
    /// Returns true when the message mentions inconsistent values or formats.
    pub fn mentions_format(&self) -> bool {
        let message = self.message.to_lowercase();
        message.contains("inconsistent") || message.contains("format")
    }
}

/// Per-column population statistics for one CRM field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub id: String,
    pub column_name: String,
    pub populated_count: u64,
    #[serde(default)]
    pub inferred_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_count: Option<u64>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

impl Field {
    /// Synthetic record used when a configured column is absent from the report.
    pub fn missing(column_name: &str) -> Self {
        Self {
            id: String::new(),
            column_name: column_name.to_string(),
            populated_count: 0,
            inferred_type: String::new(),
            format_count: None,
            warnings: Vec::new(),
        }
    }

    /// Population rate in percent. Zero when there are no records.
    pub fn population_rate(&self, total_records: u64) -> f64 {
        if total_records == 0 {
            return 0.0;
        }
        (self.populated_count as f64 / total_records as f64) * 100.0
    }

    pub fn has_format_warning(&self) -> bool {
        self.warnings.iter().any(Warning::mentions_format)
    }
}

/// An issue that applies to the dataset as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalIssue {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: RecordedSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// Report-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Entries that are not string mappings are skipped when loading.
    #[serde(
        rename = "criticalColumns",
        default,
        deserialize_with = "deserialize_critical_columns"
    )]
    pub critical_columns: CriticalColumnConfig,
    /// Any other configuration keys, kept untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A precomputed data-quality report for one CRM dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    pub total_records: u64,
    pub total_fields: u64,
    pub fields_with_issues: u64,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub global_issues: Vec<GlobalIssue>,
    /// Free-form; a value that is not an object is ignored.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_config"
    )]
    pub config: Option<ReportConfig>,
}

impl Report {
    /// Look up a field by its column name.
    pub fn field(&self, column_name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.column_name == column_name)
    }

    /// Iterate over every field warning in report order.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.fields.iter().flat_map(|field| field.warnings.iter())
    }

    pub fn critical_columns(&self) -> Option<&CriticalColumnConfig> {
        self.config.as_ref().map(|config| &config.critical_columns)
    }
}

fn deserialize_config<'de, D>(deserializer: D) -> std::result::Result<Option<ReportConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        other => {
            warn!(value = %other, "report config is not an object; ignoring it");
            Ok(None)
        }
    }
}

fn deserialize_critical_columns<'de, D>(
    deserializer: D,
) -> std::result::Result<CriticalColumnConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(critical_columns_from_value(&value))
}

/// Keep string-valued entries of object-valued categories.
fn critical_columns_from_value(value: &Value) -> CriticalColumnConfig {
    let mut columns = CriticalColumnConfig::new();
    let categories = match value {
        Value::Object(categories) => categories,
        Value::Null => return columns,
        Value::Array(items) if items.is_empty() => return columns,
        other => {
            warn!(value = %other, "criticalColumns is not an object; ignoring it");
            return columns;
        }
    };
    for (category, entries) in categories {
        let Value::Object(entries) = entries else {
            warn!(category = %category, "critical column category is not an object; skipping it");
            continue;
        };
        let mut resolved = BTreeMap::new();
        for (name, column) in entries {
            match column.as_str() {
                Some(column_name) => {
                    resolved.insert(name.clone(), column_name.to_string());
                }
                None => warn!(
                    category = %category,
                    name = %name,
                    "critical column entry is not a column name; skipping it"
                ),
            }
        }
        columns.insert(category.clone(), resolved);
    }
    columns
}
