//! Error scoring for in-sample forecasts

use crate::{MathError, Result};

/// Mean squared error over the scored window `L + 2 .. N`
///
/// The first `L + 2` positions are skipped because the smoothing state is
/// still dominated by its seed there. Both slices must be aligned and of
/// equal length `N`, with `N > L + 2`.
pub fn mse(actual: &[f64], predicted: &[f64], period: usize) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(MathError::InvalidInput(format!(
            "Actual length ({}) doesn't match predicted length ({})",
            actual.len(),
            predicted.len()
        )));
    }

    let mut score = WindowedMse::new(period);
    for (i, (&a, &p)) in actual.iter().zip(predicted).enumerate() {
        score.push(i, a, p);
    }
    score.finish()
}

/// Running MSE over the same window as [`mse`], fed one position at a time
///
/// Positions before `L + 2` are ignored, so predictions can be pushed as
/// they are produced without buffering the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowedMse {
    start: usize,
    sum: f64,
    count: usize,
}

impl WindowedMse {
    pub fn new(period: usize) -> Self {
        Self {
            start: period + 2,
            sum: 0.0,
            count: 0,
        }
    }

    /// Add the error at position `i`
    pub fn push(&mut self, i: usize, actual: f64, predicted: f64) {
        if i >= self.start {
            self.sum += (actual - predicted).powi(2);
            self.count += 1;
        }
    }

    /// Mean over the positions inside the window
    pub fn finish(&self) -> Result<f64> {
        if self.count == 0 {
            return Err(MathError::InsufficientData(format!(
                "Scoring with period {} needs more than {} values",
                self.start - 2,
                self.start
            )));
        }
        Ok(self.sum / self.count as f64)
    }
}
