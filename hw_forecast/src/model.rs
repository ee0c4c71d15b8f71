//! Holt-Winters model with train, forecast and automatic fitting

use crate::config::FitConfig;
use crate::engine::{SmoothingParams, SmoothingState};
use crate::error::{ForecastError, Result};
use crate::search::{FitReport, FitResult, ParameterSearch};

/// Multiplicative triple exponential smoothing for one fixed period
///
/// ```no_run
/// use hw_forecast::TripleExponentialSmoothing;
///
/// # fn main() -> hw_forecast::Result<()> {
/// let series: Vec<f64> = (0..48).map(|i| 100.0 + i as f64 + [5.0, -3.0, 8.0, -10.0][i % 4]).collect();
/// let mut model = TripleExponentialSmoothing::new(4)?;
///
/// let best = model.fit(&series, 0.001)?;
/// model.train(&series, best.alpha, best.beta, best.gamma)?;
/// let forecast = model.forecast(4)?;
/// assert_eq!(forecast.len(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TripleExponentialSmoothing {
    /// Name of the model
    name: String,
    period: usize,
    params: Option<SmoothingParams>,
    fit: Option<FitResult>,
    state: Option<SmoothingState>,
}

impl TripleExponentialSmoothing {
    /// Create an untrained model for seasonal cycles of `period` observations
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(ForecastError::InvalidPeriod(
                "Period must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Holt-Winters (period={})", period),
            period,
            params: None,
            fit: None,
            state: None,
        })
    }

    /// Re-derive the smoothing state from `series`
    ///
    /// Replaces any previous state. Coefficients must lie in [0, 1].
    pub fn train(&mut self, series: &[f64], alpha: f64, beta: f64, gamma: f64) -> Result<()> {
        let params = SmoothingParams::new(alpha, beta, gamma)?;
        let state = SmoothingState::train(series, self.period, params)?;

        self.params = Some(params);
        self.state = Some(state);
        Ok(())
    }

    /// Forecast `horizon` values from the trained state; `horizon` must be in `1..=period`
    pub fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        self.state
            .as_ref()
            .ok_or(ForecastError::ForecastBeforeTrain)?
            .forecast(horizon)
    }

    /// Search for the coefficients with the lowest in-sample MSE
    ///
    /// The winners are remembered on the model, but the trained state is
    /// cleared: call `train` with them before forecasting.
    pub fn fit(&mut self, series: &[f64], tolerance: f64) -> Result<FitResult> {
        let config = FitConfig::default().with_tolerance(tolerance);
        Ok(self.fit_with_config(series, &config)?.best)
    }

    /// Like [`fit`](Self::fit) with full control over the search
    pub fn fit_with_config(&mut self, series: &[f64], config: &FitConfig) -> Result<FitReport> {
        let report = ParameterSearch::new(series, self.period, config.clone())?.run()?;

        self.params = Some(report.best.params());
        self.fit = Some(report.best);
        self.state = None;
        Ok(report)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Coefficients from the last `train` or `fit`
    pub fn params(&self) -> Option<SmoothingParams> {
        self.params
    }

    /// Result of the last `fit`
    pub fn fit_result(&self) -> Option<FitResult> {
        self.fit
    }

    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    /// Trained state, if any
    pub fn state(&self) -> Option<&SmoothingState> {
        self.state.as_ref()
    }
}
