//! Error types for the demand_forecast crate

use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A stored sale date could not be interpreted as a date
    #[error("Unparseable sale date: {0}")]
    Parse(String),

    /// Train/test fraction outside (0, 1), or a split that would leave
    /// an empty train or test set
    #[error("Invalid test fraction: {0}")]
    InvalidFraction(String),

    /// Forecast horizon of zero days
    #[error("Invalid forecast horizon: {0}")]
    InvalidHorizon(String),

    /// Failure reported by the regression model capability
    #[error("Regressor error: {0}")]
    Regressor(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    Data(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
