//! # Holt-Winters workspace
//!
//! Facade over the workspace crates:
//!
//! - [`smoothing_math`]: seed estimation, ring buffers and MSE scoring
//! - [`hw_forecast`]: the model, parameter search and CSV/report helpers
//!
//! ## Example
//!
//! ```
//! use holtwinters_workspace::TripleExponentialSmoothing;
//!
//! let series = [
//!     362.0, 385.0, 432.0, 341.0, 382.0, 409.0, 498.0, 387.0, 473.0, 513.0, 582.0, 474.0,
//! ];
//! let mut model = TripleExponentialSmoothing::new(4).unwrap();
//! model.train(&series, 0.5, 0.4, 0.6).unwrap();
//! assert_eq!(model.forecast(4).unwrap().len(), 4);
//! ```

pub use hw_forecast;
pub use smoothing_math;

pub use hw_forecast::{
    FitConfig, FitReport, FitResult, ForecastError, SeriesLoader, TripleExponentialSmoothing,
};
