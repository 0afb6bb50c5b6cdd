//! Configuration options for report analysis.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Population-rate boundaries between field categories, in percent.
///
/// A field is `critical` below `critical_below`, `warning` below `good_at`
/// and `good` from `good_at` upwards. The same pair drives both bucketing
/// and the synthesized coverage warnings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationThresholds {
    pub critical_below: f64,
    pub good_at: f64,
}

impl Default for PopulationThresholds {
    fn default() -> Self {
        Self {
            critical_below: 25.0,
            good_at: 70.0,
        }
    }
}

impl PopulationThresholds {
    pub fn new(critical_below: f64, good_at: f64) -> Result<Self> {
        let thresholds = Self {
            critical_below,
            good_at,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Both bounds must be finite, within 0-100, and ordered.
    pub fn validate(&self) -> Result<()> {
        let in_range = |value: f64| value.is_finite() && (0.0..=100.0).contains(&value);
        if !in_range(self.critical_below)
            || !in_range(self.good_at)
            || self.critical_below > self.good_at
        {
            return Err(ModelError::InvalidThresholds {
                critical_below: self.critical_below,
                good_at: self.good_at,
            });
        }
        Ok(())
    }
}

/// Options controlling report analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    #[serde(default)]
    pub thresholds: PopulationThresholds,

    /// Number of empty fields above which a CRM cleanup is recommended.
    #[serde(default = "default_cleanup_min_empty_fields")]
    pub cleanup_min_empty_fields: usize,
}

fn default_cleanup_min_empty_fields() -> usize {
    10
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            thresholds: PopulationThresholds::default(),
            cleanup_min_empty_fields: default_cleanup_min_empty_fields(),
        }
    }
}

impl AnalysisOptions {
    pub fn with_thresholds(mut self, thresholds: PopulationThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}
