//! Out-of-sample scoring of a fitted model
//!
//! The search ranks coefficients by one-step-ahead MSE inside the training
//! series. [`HoldoutScore`] puts that figure next to the error of the
//! multi-step forecast over the held-out tail, so overfitting shows up as a
//! ratio well above one.

use crate::error::{ForecastError, Result};
use crate::search::FitResult;
use serde::Serialize;
use std::fmt;

/// Fit error and holdout error of one model, side by side
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoldoutScore {
    /// Number of held-out observations scored
    pub horizon: usize,
    /// In-sample one-step-ahead MSE the search selected on
    pub fit_mse: f64,
    /// MSE of the forecast over the holdout
    pub holdout_mse: f64,
    /// Mean absolute error over the holdout
    pub holdout_mae: f64,
}

impl HoldoutScore {
    /// Score `forecast` against the `actual` holdout for the coefficients in `fit`
    pub fn new(fit: &FitResult, forecast: &[f64], actual: &[f64]) -> Result<Self> {
        if actual.is_empty() {
            return Err(ForecastError::DataError("Holdout is empty".to_string()));
        }
        if forecast.len() != actual.len() {
            return Err(ForecastError::DataError(format!(
                "Forecast covers {} steps but the holdout has {}",
                forecast.len(),
                actual.len()
            )));
        }

        let (squared, absolute) = forecast
            .iter()
            .zip(actual)
            .fold((0.0, 0.0), |(sq, abs), (f, a)| {
                let residual = a - f;
                (sq + residual * residual, abs + residual.abs())
            });
        let n = actual.len() as f64;

        Ok(Self {
            horizon: actual.len(),
            fit_mse: fit.mse,
            holdout_mse: squared / n,
            holdout_mae: absolute / n,
        })
    }

    /// Root of the holdout MSE, in the units of the series
    pub fn holdout_rmse(&self) -> f64 {
        self.holdout_mse.sqrt()
    }

    /// Holdout MSE over fit MSE; NaN when the fit error is zero or unknown
    pub fn degradation(&self) -> f64 {
        if self.fit_mse > 0.0 {
            self.holdout_mse / self.fit_mse
        } else {
            f64::NAN
        }
    }
}

impl fmt::Display for HoldoutScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Holdout score ({} steps):", self.horizon)?;
        writeln!(f, "  fit MSE:      {:.4}", self.fit_mse)?;
        writeln!(f, "  holdout MSE:  {:.4}", self.holdout_mse)?;
        writeln!(f, "  holdout RMSE: {:.4}", self.holdout_rmse())?;
        writeln!(f, "  holdout MAE:  {:.4}", self.holdout_mae)?;
        writeln!(f, "  degradation:  {:.3}x", self.degradation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fit(mse: f64) -> FitResult {
        FitResult {
            alpha: 0.2,
            beta: 0.3,
            gamma: 0.1,
            mse,
        }
    }

    #[test]
    fn test_scores_holdout_against_fit() {
        let score = HoldoutScore::new(&fit(50.0), &[110.0, 90.0], &[100.0, 100.0]).unwrap();

        assert_eq!(score.horizon, 2);
        assert_eq!(score.fit_mse, 50.0);
        assert_relative_eq!(score.holdout_mse, 100.0);
        assert_relative_eq!(score.holdout_rmse(), 10.0);
        assert_relative_eq!(score.holdout_mae, 10.0);
        assert_relative_eq!(score.degradation(), 2.0);
    }

    #[test]
    fn test_degradation_without_fit_error() {
        let score = HoldoutScore::new(&fit(0.0), &[1.0], &[2.0]).unwrap();
        assert!(score.degradation().is_nan());

        let score = HoldoutScore::new(&fit(f64::NAN), &[1.0], &[2.0]).unwrap();
        assert!(score.degradation().is_nan());
    }

    #[test]
    fn test_rejects_misaligned_holdout() {
        assert!(matches!(
            HoldoutScore::new(&fit(1.0), &[1.0], &[1.0, 2.0]),
            Err(ForecastError::DataError(_))
        ));
        assert!(matches!(
            HoldoutScore::new(&fit(1.0), &[], &[]),
            Err(ForecastError::DataError(_))
        ));
    }

    #[test]
    fn test_display() {
        let score = HoldoutScore::new(&fit(4.0), &[1.0, 2.0], &[1.0, 2.0]).unwrap();
        let text = score.to_string();
        assert!(text.contains("Holdout score (2 steps)"));
        assert!(text.contains("fit MSE:      4.0000"));
        assert!(text.contains("holdout RMSE: 0.0000"));
        assert!(text.contains("degradation:  0.000x"));
    }
}
