//! Error types for the hw_forecast crate

use smoothing_math::MathError;
use thiserror::Error;

/// Custom error types for the hw_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Period is zero, or the series is shorter than two full cycles
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// A smoothing coefficient is outside [0, 1] or not finite
    #[error("Invalid parameter range: {0}")]
    InvalidParameterRange(String),

    /// Not enough observations to seed or score the model
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// `forecast` was called before `train`
    #[error("Model has not been trained; call train before forecast")]
    ForecastBeforeTrain,

    /// Horizon outside the retained seasonal window
    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),

    /// Fit configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error related to data loading or parsing
    #[error("Data error: {0}")]
    DataError(String),

    /// Worker pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),

    /// Error from seed estimation or scoring
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV decoding
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON encoding or decoding
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<rayon::ThreadPoolBuildError> for ForecastError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        ForecastError::ThreadPoolError(err.to_string())
    }
}
