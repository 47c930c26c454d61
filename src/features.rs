//! Feature construction for the demand model

use crate::data::{CalendarFeatures, EntityIndex, FeatureVector, SalesRecord};
use crate::error::Result;

/// Builds the feature table consumed by the demand model
#[derive(Debug)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    /// Turn a raw record collection into a feature table.
    ///
    /// One output row per input record. Rows are grouped by product (ascending
    /// id) and sorted by date within each product's block; blocks are
    /// concatenated, not interleaved by date. Lag features are taken from the
    /// same product's series only; rolling means shrink to the available
    /// window at the start of a series.
    ///
    /// Missing lag cells (the first k positions of each series) are filled by
    /// a backward-fill pass over the whole concatenated table, then any cell
    /// still missing becomes 0. The fill is table-wide, not per product, so a
    /// gap at the end of one product's block takes its value from the next
    /// product's block. That leak is a known property of this pipeline and is
    /// kept as-is; scoping the fill per product would change what the model
    /// was trained on.
    ///
    /// Fails only on an unparseable sale date; a short or empty history is
    /// never an error.
    pub fn build(records: &[SalesRecord]) -> Result<Vec<FeatureVector>> {
        let index = EntityIndex::build(records)?;

        let mut features = Vec::with_capacity(records.len());
        let mut lag_7_col: Vec<Option<f64>> = Vec::with_capacity(records.len());
        let mut lag_14_col: Vec<Option<f64>> = Vec::with_capacity(records.len());
        let mut lag_30_col: Vec<Option<f64>> = Vec::with_capacity(records.len());

        for (entity_id, series) in index.iter() {
            let targets: Vec<f64> = series
                .iter()
                .map(|&i| f64::from(records[i].quantity))
                .collect();

            for (position, &record_index) in series.iter().enumerate() {
                let date = index.date(record_index);
                let calendar = CalendarFeatures::from_date(date);

                lag_7_col.push(lag_at(&targets, position, 7));
                lag_14_col.push(lag_at(&targets, position, 14));
                lag_30_col.push(lag_at(&targets, position, 30));

                features.push(FeatureVector {
                    entity_id,
                    date,
                    day_of_week: calendar.day_of_week,
                    month: calendar.month,
                    iso_week: calendar.iso_week,
                    day_of_month: calendar.day_of_month,
                    quarter: calendar.quarter,
                    // lags are placeholders until the fill pass below
                    lag_7: 0.0,
                    lag_14: 0.0,
                    lag_30: 0.0,
                    rolling_7: window_mean(&targets, position, 7),
                    rolling_30: window_mean(&targets, position, 30),
                    target: targets[position],
                });
            }
        }

        for (row, value) in features.iter_mut().zip(backward_fill(&lag_7_col)) {
            row.lag_7 = value;
        }
        for (row, value) in features.iter_mut().zip(backward_fill(&lag_14_col)) {
            row.lag_14 = value;
        }
        for (row, value) in features.iter_mut().zip(backward_fill(&lag_30_col)) {
            row.lag_30 = value;
        }

        Ok(features)
    }
}

/// Target value k positions back in the series, if the series reaches that far
fn lag_at(targets: &[f64], position: usize, k: usize) -> Option<f64> {
    if position >= k {
        Some(targets[position - k])
    } else {
        None
    }
}

/// Mean of the up-to-`window` most recent values ending at `position`
fn window_mean(targets: &[f64], position: usize, window: usize) -> f64 {
    let start = (position + 1).saturating_sub(window);
    let slice = &targets[start..=position];
    slice.iter().sum::<f64>() / slice.len() as f64
}

/// Backward-fill a column: a missing cell takes the next present value later
/// in the column; cells with nothing after them become 0.
fn backward_fill(column: &[Option<f64>]) -> Vec<f64> {
    let mut filled = vec![0.0; column.len()];
    let mut next_present = None;
    for i in (0..column.len()).rev() {
        if column[i].is_some() {
            next_present = column[i];
        }
        filled[i] = column[i].or(next_present).unwrap_or(0.0);
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backward_fill_takes_next_present_value() {
        let column = vec![None, Some(3.0), None, None, Some(5.0), None];
        assert_eq!(backward_fill(&column), vec![3.0, 3.0, 5.0, 5.0, 5.0, 0.0]);
    }

    #[test]
    fn window_mean_shrinks_at_series_start() {
        let targets = vec![2.0, 4.0, 6.0];
        assert_eq!(window_mean(&targets, 0, 7), 2.0);
        assert_eq!(window_mean(&targets, 1, 7), 3.0);
        assert_eq!(window_mean(&targets, 2, 2), 5.0);
    }
}
