//! # HW Forecast
//!
//! Holt-Winters (triple exponential smoothing) forecasting for periodic
//! time series, with automatic selection of the smoothing coefficients.
//!
//! ## Features
//!
//! - Multiplicative level/trend/seasonal recurrence over ring-buffered state
//! - Forecasts anchored at the end of the training series
//! - Narrowing grid search over (α, β, γ) evaluated on a bounded rayon pool
//! - CSV series loading, holdout accuracy metrics and HTML reports
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hw_forecast::{SeriesLoader, TripleExponentialSmoothing};
//!
//! # fn main() -> hw_forecast::Result<()> {
//! let series = SeriesLoader::new().load_csv("time_series.csv")?;
//! let period = 24;
//!
//! let mut model = TripleExponentialSmoothing::new(period)?;
//! let best = model.fit(&series, 0.0001)?;
//!
//! // Fitting leaves no trained state behind
//! model.train(&series, best.alpha, best.beta, best.gamma)?;
//! let forecast = model.forecast(period)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod model;
pub mod report;
pub mod search;
pub mod utils;

// Re-export commonly used types
pub use crate::config::FitConfig;
pub use crate::data::SeriesLoader;
pub use crate::engine::{SmoothingParams, SmoothingState};
pub use crate::error::{ForecastError, Result};
pub use crate::model::TripleExponentialSmoothing;
pub use crate::search::{FitReport, FitResult, ParameterSearch};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
