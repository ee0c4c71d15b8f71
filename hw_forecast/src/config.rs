//! Configuration for parameter fitting

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default grid step at which the search stops
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Default grid step of the first, coarsest round
pub const DEFAULT_INITIAL_STEP: f64 = 0.1;

/// Settings for the narrowing grid search
///
/// Missing fields in JSON fall back to their defaults:
///
/// ```json
/// { "tolerance": 0.0001, "max_workers": 4 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Stop once a round has run at a step no larger than this
    pub tolerance: f64,
    /// Step of the first round over the unit cube
    pub initial_step: f64,
    /// Upper bound on concurrent trials; `None` uses available parallelism
    pub max_workers: Option<usize>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            initial_step: DEFAULT_INITIAL_STEP,
            max_workers: None,
        }
    }
}

impl FitConfig {
    /// Set the stopping tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the first-round grid step
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }

    /// Bound the worker pool
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = Some(max_workers);
        self
    }

    /// Check that the search is well defined
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ForecastError::InvalidConfig(format!(
                "Tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        if !self.initial_step.is_finite() || self.initial_step <= 0.0 || self.initial_step > 1.0 {
            return Err(ForecastError::InvalidConfig(format!(
                "Initial step must be in (0, 1], got {}",
                self.initial_step
            )));
        }
        if self.max_workers == Some(0) {
            return Err(ForecastError::InvalidConfig(
                "max_workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of worker threads to use for trials
    pub fn worker_count(&self) -> usize {
        self.max_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
