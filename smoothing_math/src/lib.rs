//! # Smoothing Math
//!
//! Numeric building blocks for seasonal exponential smoothing.
//! This crate provides the initial trend and seasonal-index estimators,
//! the fixed-capacity ring buffer that holds smoothing state, and the
//! error scoring used to rank candidate parameters.

use thiserror::Error;

pub mod initial;
pub mod ring;
pub mod scoring;

pub use initial::{initial_seasonal_indices, initial_trend};
pub use ring::RingBuffer;
pub use scoring::{mse, WindowedMse};

/// Errors that can occur in smoothing calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for smoothing math operations
pub type Result<T> = std::result::Result<T, MathError>;
