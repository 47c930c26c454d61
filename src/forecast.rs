//! Recursive multi-day demand forecasting

use crate::data::{CalendarFeatures, FeatureVector, FEATURE_WIDTH};
use crate::error::{ForecastError, Result};
use crate::models::Regressor;
use chrono::Duration;

/// How many trailing actuals seed the forecast buffer
const BUFFER_SEED: usize = 30;

/// Drives a fitted regressor recursively to forecast demand for one product
#[derive(Debug)]
pub struct ForecastEngine;

impl ForecastEngine {
    /// Forecast `horizon` days of demand for one product.
    ///
    /// `history` is the product's feature rows (any order; they are sorted by
    /// date here). The engine seeds a buffer with the last up-to-30 actual
    /// quantities, then for each future day derives calendar features from
    /// `last_known_date + step`, lag and rolling features from the buffer,
    /// asks the model for a single-row prediction, clamps it
    /// (round to nearest, floor at 0), and appends it to the buffer. Later
    /// steps treat earlier predictions as ground truth, so forecast error
    /// compounds with the horizon.
    ///
    /// Lag fallback: when the buffer is shorter than k, `lag_k` uses the most
    /// recent buffer value instead, so short histories never fail. A product
    /// with no history at all yields an empty sequence.
    ///
    /// Fails with [`ForecastError::InvalidHorizon`] for a zero horizon; model
    /// failures propagate unchanged, no retry.
    ///
    /// Given the same model, history, and horizon the output is exactly
    /// reproducible; the engine introduces no randomness of its own.
    pub fn forecast<R: Regressor>(
        model: &R,
        entity_id: u32,
        horizon: usize,
        history: &[FeatureVector],
    ) -> Result<Vec<u32>> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon(
                "horizon must be at least one day".to_string(),
            ));
        }
        if history.is_empty() {
            return Ok(Vec::new());
        }

        let mut sorted: Vec<&FeatureVector> = history.iter().collect();
        sorted.sort_by_key(|f| f.date);
        let last_date = sorted[sorted.len() - 1].date;

        // buffer owned by this call; grows by one value per step
        let seed_start = sorted.len().saturating_sub(BUFFER_SEED);
        let mut buffer: Vec<f64> = sorted[seed_start..].iter().map(|f| f.target).collect();

        let mut predictions = Vec::with_capacity(horizon);
        for step in 1..=horizon {
            let future_date = last_date + Duration::days(step as i64);
            let calendar = CalendarFeatures::from_date(future_date);

            let row: [f64; FEATURE_WIDTH] = [
                f64::from(entity_id),
                f64::from(calendar.day_of_week),
                f64::from(calendar.month),
                f64::from(calendar.iso_week),
                f64::from(calendar.day_of_month),
                f64::from(calendar.quarter),
                buffer_lag(&buffer, 7),
                buffer_lag(&buffer, 14),
                buffer_lag(&buffer, 30),
                tail_mean(&buffer, 7),
                tail_mean(&buffer, 30),
            ];

            let values = model.predict(&[row])?;
            let raw = values.first().copied().ok_or_else(|| {
                ForecastError::Regressor(
                    "model returned no prediction for a single-row input".to_string(),
                )
            })?;

            // round to nearest, floor at 0; no upper bound
            let clamped = raw.round().max(0.0) as u32;

            buffer.push(f64::from(clamped));
            predictions.push(clamped);
        }

        Ok(predictions)
    }
}

/// Value k positions from the end of the buffer, falling back to the most
/// recent value when the buffer is shorter than k
fn buffer_lag(buffer: &[f64], k: usize) -> f64 {
    if buffer.len() >= k {
        buffer[buffer.len() - k]
    } else {
        buffer[buffer.len() - 1]
    }
}

/// Mean of the last up-to-`window` buffer values
fn tail_mean(buffer: &[f64], window: usize) -> f64 {
    let start = buffer.len().saturating_sub(window);
    let tail = &buffer[start..];
    tail.iter().sum::<f64>() / tail.len() as f64
}
