//! Chronological train/test partitioning

use crate::data::FeatureVector;
use crate::error::{ForecastError, Result};

/// Splits a feature table into train and test sets by time order
#[derive(Debug)]
pub struct DatasetSplitter;

impl DatasetSplitter {
    /// Partition a feature table chronologically.
    ///
    /// The table is stable-sorted by date globally, across all products, then
    /// cut at `floor(n * (1 - test_fraction))`: everything before the cut is
    /// train, everything from the cut on is test. A single cutover is shared
    /// by every product, so a product whose history is mostly recent can end
    /// up under-represented in train.
    ///
    /// Train and test are contiguous and non-overlapping; concatenating them
    /// in order reproduces the sorted input exactly.
    ///
    /// Fails with [`ForecastError::InvalidFraction`] if `test_fraction` is
    /// outside (0, 1), or if a non-empty input would leave either side empty.
    pub fn split(
        mut features: Vec<FeatureVector>,
        test_fraction: f64,
    ) -> Result<(Vec<FeatureVector>, Vec<FeatureVector>)> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(ForecastError::InvalidFraction(format!(
                "test fraction must be in (0, 1), got {}",
                test_fraction
            )));
        }

        // stable: equal dates keep their incoming order
        features.sort_by_key(|f| f.date);

        let split_index = (features.len() as f64 * (1.0 - test_fraction)).floor() as usize;
        if !features.is_empty() && (split_index == 0 || split_index >= features.len()) {
            return Err(ForecastError::InvalidFraction(format!(
                "test fraction {} leaves an empty train or test set for {} rows",
                test_fraction,
                features.len()
            )));
        }

        let test = features.split_off(split_index);
        Ok((features, test))
    }
}
