//! Regression model capability used by the forecasting pipeline

use crate::data::FEATURE_WIDTH;
use crate::error::Result;
use std::fmt::Debug;

/// A regression model over the demand feature schema.
///
/// The production model is trained and persisted by an external collaborator
/// and loaded as an opaque object; this trait is the full surface the
/// pipeline relies on. Any failure a model reports should be (or convert
/// into) [`crate::error::ForecastError::Regressor`] — the pipeline propagates
/// it unchanged and never retries, since re-running a deterministic model
/// call would reproduce the same failure.
///
/// `predict` must be safe to call concurrently from multiple forecasts;
/// `fit` takes `&mut self` and must not overlap with predicts on the same
/// instance.
pub trait Regressor: Debug {
    /// Fit the model on a design matrix and target vector
    fn fit(&mut self, features: &[[f64; FEATURE_WIDTH]], target: &[f64]) -> Result<()>;

    /// Predict a continuous demand estimate for each feature row
    fn predict(&self, features: &[[f64; FEATURE_WIDTH]]) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

pub mod baseline;

pub use baseline::MeanRegressor;
