use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::metrics::{SegmentationCoverage, SegmentationPrecision};

/// Tolerances, in seconds, shared by an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Same-label reference gaps shorter than this are closed before coverage and purity.
    pub coverage_tolerance: f64,
    /// Largest reference/hypothesis boundary distance that still counts as a match.
    pub boundary_tolerance: f64,
}

impl EvaluationConfig {
    pub const DEFAULT_COVERAGE_TOLERANCE: f64 = SegmentationCoverage::DEFAULT_TOLERANCE;
    pub const DEFAULT_BOUNDARY_TOLERANCE: f64 = SegmentationPrecision::DEFAULT_TOLERANCE;

    pub fn load(path: &Path) -> Result<Self, MetricError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| MetricError::io("read evaluation config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| MetricError::json("parse evaluation config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MetricError> {
        for (name, value) in [
            ("coverage_tolerance", self.coverage_tolerance),
            ("boundary_tolerance", self.boundary_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MetricError::invalid_input(format!(
                    "{name} must be a finite, non-negative number of seconds, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            coverage_tolerance: Self::DEFAULT_COVERAGE_TOLERANCE,
            boundary_tolerance: Self::DEFAULT_BOUNDARY_TOLERANCE,
        }
    }
}
