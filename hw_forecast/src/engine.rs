//! Triple exponential smoothing recurrence with ring-buffered state
//!
//! ```text
//! level[i]    = α·y[i]/seasonal[i−L] + (1−α)·(level[i−1] + trend[i−1])
//! trend[i]    = γ·(level[i] − level[i−1]) + (1−γ)·trend[i−1]
//! seasonal[i] = β·y[i]/level[i] + (1−β)·seasonal[i−L]
//! forecast    = (level[i] + m·trend[i]) · seasonal[i−L+m]
//! ```
//!
//! Level and trend are only retained for the last `2L` timesteps, so a
//! trained state can only forecast from the end of its training series.

use crate::error::{ForecastError, Result};
use smoothing_math::{initial_seasonal_indices, initial_trend, RingBuffer};

/// Level (α), seasonal (β) and trend (γ) smoothing coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingParams {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl SmoothingParams {
    /// Create validated coefficients, each finite and within [0, 1]
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        for (name, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidParameterRange(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        Ok(Self { alpha, beta, gamma })
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.alpha, self.beta, self.gamma]
    }
}

/// Initial trend and seasonal factors, shared by every run over one series
#[derive(Debug, Clone, PartialEq)]
pub struct Seeds {
    pub trend: f64,
    pub seasonal: Vec<f64>,
}

impl Seeds {
    /// Estimate seeds from the leading cycles of `series`
    pub fn estimate(series: &[f64], period: usize) -> Result<Self> {
        check_period(series, period)?;

        Ok(Self {
            trend: initial_trend(series, period)?,
            seasonal: initial_seasonal_indices(series, period)?,
        })
    }
}

/// Reject a zero period or a series shorter than two full cycles
pub(crate) fn check_period(series: &[f64], period: usize) -> Result<()> {
    if period == 0 {
        return Err(ForecastError::InvalidPeriod(
            "Period must be at least 1".to_string(),
        ));
    }
    if series.len() < 2 * period {
        return Err(ForecastError::InvalidPeriod(format!(
            "Period {} needs at least {} observations, have {}",
            period,
            2 * period,
            series.len()
        )));
    }
    Ok(())
}

/// State left behind by one pass of the recurrence
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingState {
    period: usize,
    series_len: usize,
    level: RingBuffer,
    trend: RingBuffer,
    seasonal: RingBuffer,
}

impl SmoothingState {
    /// Validate inputs, estimate seeds and run the recurrence over `series`
    pub fn train(series: &[f64], period: usize, params: SmoothingParams) -> Result<Self> {
        let seeds = Seeds::estimate(series, period)?;
        Self::run(series, period, params, &seeds, |_, _| {})
    }

    /// Run the recurrence from precomputed seeds
    ///
    /// `on_prediction(i, p)` receives the one-step-ahead prediction for
    /// every `i >= L`, computed from the state at `i − 1` before step `i`
    /// is applied. The caller must have validated `series` and `period`.
    pub(crate) fn run<F>(
        series: &[f64],
        period: usize,
        params: SmoothingParams,
        seeds: &Seeds,
        mut on_prediction: F,
    ) -> Result<Self>
    where
        F: FnMut(usize, f64),
    {
        let capacity = 2 * period;
        let SmoothingParams { alpha, beta, gamma } = params;

        let mut level = RingBuffer::new(capacity)?;
        let mut trend = RingBuffer::new(capacity)?;
        let mut seasonal = RingBuffer::seeded(capacity, &seeds.seasonal)?;

        level.set(1, series[0]);
        trend.set(1, seeds.trend);
        // With L = 1 step 1 is seasonal but the loop starts at 2
        for t in period..2 {
            seasonal.set(t, seasonal.get(t - period));
        }

        for (i, &y) in series.iter().enumerate().skip(2) {
            let prev = level.get(i - 1) + trend.get(i - 1);

            let smoothed = if i >= period {
                let season = seasonal.get(i - period);
                on_prediction(i, prev * season);
                alpha * y / season + (1.0 - alpha) * prev
            } else {
                alpha * y + (1.0 - alpha) * prev
            };
            level.set(i, smoothed);

            trend.set(
                i,
                gamma * (smoothed - level.get(i - 1)) + (1.0 - gamma) * trend.get(i - 1),
            );

            if i >= period {
                seasonal.set(
                    i,
                    beta * y / smoothed + (1.0 - beta) * seasonal.get(i - period),
                );
            }
        }

        Ok(Self {
            period,
            series_len: series.len(),
            level,
            trend,
            seasonal,
        })
    }

    /// Project `horizon` values anchored at the end of the training series
    ///
    /// Value `k` is built from the state at `N + k − horizon`. The horizon
    /// must be between 1 and the period; longer horizons would read ring
    /// slots that have already been overwritten.
    pub fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        if horizon == 0 || horizon > self.period {
            return Err(ForecastError::InvalidHorizon(format!(
                "Horizon must be between 1 and the period ({}), got {}",
                self.period, horizon
            )));
        }

        let m = horizon as f64;
        let values = (0..horizon)
            .map(|k| {
                let i = self.series_len + k - horizon;
                (self.level.get(i) + m * self.trend.get(i))
                    * self.seasonal.get(i - self.period + horizon)
            })
            .collect();

        Ok(values)
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Length of the series this state was trained on
    pub fn series_len(&self) -> usize {
        self.series_len
    }

    /// Level at `timestep`; only the last `2L` timesteps are meaningful
    pub fn level_at(&self, timestep: usize) -> f64 {
        self.level.get(timestep)
    }

    /// Trend at `timestep`; only the last `2L` timesteps are meaningful
    pub fn trend_at(&self, timestep: usize) -> f64 {
        self.trend.get(timestep)
    }

    /// Seasonal factor at `timestep`; the last `L` timesteps are always valid
    pub fn seasonal_at(&self, timestep: usize) -> f64 {
        self.seasonal.get(timestep)
    }
}
