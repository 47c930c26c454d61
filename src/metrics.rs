//! Metrics for evaluating demand model performance

use crate::data::{design_matrix, FeatureVector};
use crate::error::{ForecastError, Result};
use crate::models::Regressor;
use serde::Serialize;

/// Regression accuracy metrics
#[derive(Debug, Clone, Serialize)]
pub struct RegressionMetrics {
    /// Mean Absolute Error, in units sold
    pub mae: f64,
    /// Root Mean Squared Error, in units sold
    pub rmse: f64,
    /// Coefficient of determination
    pub r2: f64,
}

impl RegressionMetrics {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ForecastError::Data(e.to_string()))
    }
}

impl std::fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Model Performance Metrics:")?;
        writeln!(f, "  MAE:  {:.4} units", self.mae)?;
        writeln!(f, "  RMSE: {:.4} units", self.rmse)?;
        writeln!(f, "  R2:   {:.4}", self.r2)?;
        Ok(())
    }
}

/// Summary of the absolute-error distribution of a prediction set
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDistribution {
    /// Mean absolute error
    pub mean: f64,
    /// Median absolute error
    pub median: f64,
    /// Largest absolute error
    pub max: f64,
    /// Smallest absolute error
    pub min: f64,
    /// Percentage of predictions within ±1 unit
    pub within_1: f64,
    /// Percentage of predictions within ±3 units
    pub within_3: f64,
    /// Percentage of predictions within ±5 units
    pub within_5: f64,
}

/// Calculate regression metrics for predicted vs actual values
pub fn regression_metrics(predicted: &[f64], actual: &[f64]) -> Result<RegressionMetrics> {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return Err(ForecastError::Data(
            "predicted and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = predicted.len() as f64;

    let mae = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (a - p).abs())
        .sum::<f64>()
        / n;

    let mse = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (a - p).powi(2))
        .sum::<f64>()
        / n;
    let rmse = mse.sqrt();

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let ss_res: f64 = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (a - p).powi(2))
        .sum();
    // a zero-variance actual series has no explainable variance
    let r2 = if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot };

    Ok(RegressionMetrics { mae, rmse, r2 })
}

/// Summarize the absolute-error distribution of predicted vs actual values
pub fn error_distribution(predicted: &[f64], actual: &[f64]) -> Result<ErrorDistribution> {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return Err(ForecastError::Data(
            "predicted and actual values must have the same non-zero length".to_string(),
        ));
    }

    let mut errors: Vec<f64> = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (a - p).abs())
        .collect();
    errors.sort_by(|a, b| a.total_cmp(b));

    let n = errors.len();
    let median = if n % 2 == 1 {
        errors[n / 2]
    } else {
        (errors[n / 2 - 1] + errors[n / 2]) / 2.0
    };

    let within = |limit: f64| -> f64 {
        errors.iter().filter(|e| **e <= limit).count() as f64 / n as f64 * 100.0
    };

    Ok(ErrorDistribution {
        mean: errors.iter().sum::<f64>() / n as f64,
        median,
        max: errors[n - 1],
        min: errors[0],
        within_1: within(1.0),
        within_3: within(3.0),
        within_5: within(5.0),
    })
}

/// Score a fitted regressor against a feature table's own targets
pub fn evaluate_model<R: Regressor>(
    model: &R,
    features: &[FeatureVector],
) -> Result<RegressionMetrics> {
    let (x, y) = design_matrix(features);
    let predicted = model.predict(&x)?;
    regression_metrics(&predicted, &y)
}
