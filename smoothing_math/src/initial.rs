//! Initial state estimation for multiplicative Holt-Winters smoothing
//!
//! Both estimators look only at whole seasonal cycles at the start of the
//! series. See NIST/SEMATECH e-Handbook of Statistical Methods, 6.4.3.5.

use crate::{MathError, Result};

/// Average per-step slope between the first two seasonal cycles.
///
/// Computes `sum(y[L + i] - y[i] for i in 0..L) / L²`.
pub fn initial_trend(series: &[f64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(MathError::InvalidInput(
            "Period must be greater than zero".to_string(),
        ));
    }
    if series.len() < 2 * period {
        return Err(MathError::InsufficientData(format!(
            "Initial trend needs two full cycles. Need {} values, have {}.",
            2 * period,
            series.len()
        )));
    }

    let sum: f64 = (0..period).map(|i| series[period + i] - series[i]).sum();

    Ok(sum / (period * period) as f64)
}

/// One multiplicative seasonal factor per phase of the period.
///
/// Every complete cycle is normalized by its own average, then the
/// normalized values are averaged phase by phase. Trailing observations
/// that do not fill a whole cycle are ignored.
pub fn initial_seasonal_indices(series: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(MathError::InvalidInput(
            "Period must be greater than zero".to_string(),
        ));
    }

    let seasons = series.len() / period;
    if seasons == 0 {
        return Err(MathError::InsufficientData(format!(
            "Seasonal indices need at least one full cycle of {} values, have {}.",
            period,
            series.len()
        )));
    }

    let cycles: Vec<&[f64]> = series.chunks_exact(period).collect();

    let mut averages = Vec::with_capacity(seasons);
    for (season, cycle) in cycles.iter().enumerate() {
        let average = cycle.iter().sum::<f64>() / period as f64;
        if average == 0.0 {
            return Err(MathError::CalculationError(format!(
                "Cycle {} averages to zero, cannot normalize",
                season
            )));
        }
        averages.push(average);
    }

    let mut indices = vec![0.0; period];
    for (cycle, average) in cycles.iter().zip(&averages) {
        for (phase, value) in cycle.iter().enumerate() {
            indices[phase] += value / average;
        }
    }
    for index in indices.iter_mut() {
        *index /= seasons as f64;
    }

    Ok(indices)
}
