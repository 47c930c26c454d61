//! Baseline regressor for tests, demos, and sanity comparisons

use crate::data::FEATURE_WIDTH;
use crate::error::{ForecastError, Result};
use crate::models::Regressor;

/// Predicts the mean of the training target for every input row.
///
/// A stand-in for the externally trained production model: useful as a
/// fixture and as the floor any real model has to beat.
#[derive(Debug, Clone, Default)]
pub struct MeanRegressor {
    mean: Option<f64>,
}

impl MeanRegressor {
    /// Create a new, unfitted mean regressor
    pub fn new() -> Self {
        Self { mean: None }
    }
}

impl Regressor for MeanRegressor {
    fn fit(&mut self, features: &[[f64; FEATURE_WIDTH]], target: &[f64]) -> Result<()> {
        if target.is_empty() {
            return Err(ForecastError::Regressor(
                "cannot fit on an empty target vector".to_string(),
            ));
        }
        if features.len() != target.len() {
            return Err(ForecastError::Regressor(format!(
                "feature rows ({}) don't match target length ({})",
                features.len(),
                target.len()
            )));
        }

        self.mean = Some(target.iter().sum::<f64>() / target.len() as f64);
        Ok(())
    }

    fn predict(&self, features: &[[f64; FEATURE_WIDTH]]) -> Result<Vec<f64>> {
        let mean = self.mean.ok_or_else(|| {
            ForecastError::Regressor("model has not been fitted".to_string())
        })?;
        Ok(vec![mean; features.len()])
    }

    fn name(&self) -> &str {
        "Mean baseline"
    }
}
