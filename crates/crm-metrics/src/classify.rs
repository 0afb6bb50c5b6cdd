//! Population-rate bucketing and per-field warning derivation.

use serde::Serialize;

use crm_model::{Field, PopulationThresholds, RecordedSeverity, Severity};

use crate::percent::reconcile_percentages;

/// Population-rate category of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationCategory {
    Empty,
    Critical,
    Warning,
    Good,
}

impl PopulationCategory {
    /// Categories in display order.
    pub const ALL: [PopulationCategory; 4] = [
        PopulationCategory::Empty,
        PopulationCategory::Critical,
        PopulationCategory::Warning,
        PopulationCategory::Good,
    ];

    /// Bucket a population rate (percent).
    pub fn from_rate(rate: f64, thresholds: &PopulationThresholds) -> Self {
        if rate <= 0.0 {
            PopulationCategory::Empty
        } else if rate < thresholds.critical_below {
            PopulationCategory::Critical
        } else if rate < thresholds.good_at {
            PopulationCategory::Warning
        } else {
            PopulationCategory::Good
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PopulationCategory::Empty => "Empty Fields",
            PopulationCategory::Critical => "Critical Fields",
            PopulationCategory::Warning => "Warning Fields",
            PopulationCategory::Good => "Good Fields",
        }
    }
}

/// A stable partition of report fields by population category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldCategories<'a> {
    pub empty: Vec<&'a Field>,
    pub critical: Vec<&'a Field>,
    pub warning: Vec<&'a Field>,
    pub good: Vec<&'a Field>,
}

impl<'a> FieldCategories<'a> {
    pub fn get(&self, category: PopulationCategory) -> &[&'a Field] {
        match category {
            PopulationCategory::Empty => &self.empty,
            PopulationCategory::Critical => &self.critical,
            PopulationCategory::Warning => &self.warning,
            PopulationCategory::Good => &self.good,
        }
    }

    /// Field counts in the order empty, critical, warning, good.
    pub fn counts(&self) -> [u64; 4] {
        PopulationCategory::ALL.map(|category| self.get(category).len() as u64)
    }

    pub fn len(&self) -> usize {
        self.empty.len() + self.critical.len() + self.warning.len() + self.good.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Integer percentages per category that sum to exactly 100.
    pub fn percentages(&self, total_fields: u64) -> [u64; 4] {
        reconcile_percentages(self.counts(), total_fields)
    }
}

/// Partition fields into population categories, preserving input order
/// within each bucket.
pub fn classify_fields<'a>(
    fields: &'a [Field],
    total_records: u64,
    thresholds: &PopulationThresholds,
) -> FieldCategories<'a> {
    let mut categories = FieldCategories::default();
    for field in fields {
        let rate = field.population_rate(total_records);
        match PopulationCategory::from_rate(rate, thresholds) {
            PopulationCategory::Empty => categories.empty.push(field),
            PopulationCategory::Critical => categories.critical.push(field),
            PopulationCategory::Warning => categories.warning.push(field),
            PopulationCategory::Good => categories.good.push(field),
        }
    }
    categories
}

/// A warning shown for a field, either stored or derived from its coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedWarning {
    pub id: String,
    pub message: String,
    pub severity: RecordedSeverity,
    /// True when synthesized from the population rate.
    pub coverage: bool,
}

/// Coverage warning for a population rate, if the rate is below `good_at`.
pub fn coverage_warning(
    column_name: &str,
    rate: f64,
    thresholds: &PopulationThresholds,
) -> Option<DerivedWarning> {
    let (message, severity) = match PopulationCategory::from_rate(rate, thresholds) {
        PopulationCategory::Empty => ("Completely empty", Severity::Critical),
        PopulationCategory::Critical => ("Very low data coverage", Severity::Critical),
        PopulationCategory::Warning => ("Incomplete data", Severity::Medium),
        PopulationCategory::Good => return None,
    };
    Some(DerivedWarning {
        id: format!("{column_name}-fill"),
        message: message.to_string(),
        severity: severity.into(),
        coverage: true,
    })
}

/// All warnings for a field: the coverage warning (if any) followed by the
/// stored warnings in their original order.
pub fn field_warnings(
    field: &Field,
    total_records: u64,
    thresholds: &PopulationThresholds,
) -> Vec<DerivedWarning> {
    let rate = field.population_rate(total_records);
    coverage_warning(&field.column_name, rate, thresholds)
        .into_iter()
        .chain(field.warnings.iter().map(|warning| DerivedWarning {
            id: warning.id.clone(),
            message: warning.message.clone(),
            severity: warning.severity.clone(),
            coverage: false,
        }))
        .collect()
}
