//! Sales records, feature vectors, and the per-product record index

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of columns in the model feature schema
pub const FEATURE_WIDTH: usize = 11;

/// A single historical sale, as stored by the inventory database.
///
/// The sale date is kept in its raw text form; parsing happens inside the
/// feature pipeline so that a malformed date surfaces as an error there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Product the sale belongs to
    pub entity_id: u32,
    /// Sale date as stored (`YYYY-MM-DD`, optionally with a time suffix)
    pub sale_date: String,
    /// Units sold
    pub quantity: u32,
    /// Total monetary amount of the sale
    pub amount: f64,
}

impl SalesRecord {
    /// Create a new sales record
    pub fn new(entity_id: u32, sale_date: impl Into<String>, quantity: u32, amount: f64) -> Self {
        Self {
            entity_id,
            sale_date: sale_date.into(),
            quantity,
            amount,
        }
    }
}

/// Calendar fields derived from a sale date.
///
/// Shared by feature construction and forecasting so both derive the same
/// values for the same date. Day of week is Monday-based (0–6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    pub day_of_week: u32,
    pub month: u32,
    pub iso_week: u32,
    pub day_of_month: u32,
    pub quarter: u32,
}

impl CalendarFeatures {
    /// Derive calendar features from a date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day_of_week: date.weekday().num_days_from_monday(),
            month: date.month(),
            iso_week: date.iso_week().week(),
            day_of_month: date.day(),
            quarter: (date.month() - 1) / 3 + 1,
        }
    }
}

/// One row of the feature table: calendar, lag, and rolling features for a
/// single sales record, plus the target quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Product the row belongs to
    pub entity_id: u32,
    /// Sale date of the underlying record
    pub date: NaiveDate,
    /// Day of week, Monday = 0
    pub day_of_week: u32,
    /// Month of year, 1–12
    pub month: u32,
    /// ISO week number, 1–53
    pub iso_week: u32,
    /// Day of month, 1–31
    pub day_of_month: u32,
    /// Quarter of year, 1–4
    pub quarter: u32,
    /// Quantity sold 7 positions earlier in this product's series
    pub lag_7: f64,
    /// Quantity sold 14 positions earlier in this product's series
    pub lag_14: f64,
    /// Quantity sold 30 positions earlier in this product's series
    pub lag_30: f64,
    /// Mean quantity over the last up-to-7 positions
    pub rolling_7: f64,
    /// Mean quantity over the last up-to-30 positions
    pub rolling_30: f64,
    /// Quantity sold on this date (the regression target)
    pub target: f64,
}

impl FeatureVector {
    /// Flatten into the model feature schema:
    /// `[entity_id, day_of_week, month, iso_week, day_of_month, quarter,
    ///   lag_7, lag_14, lag_30, rolling_7, rolling_30]`
    pub fn to_row(&self) -> [f64; FEATURE_WIDTH] {
        [
            self.entity_id as f64,
            self.day_of_week as f64,
            self.month as f64,
            self.iso_week as f64,
            self.day_of_month as f64,
            self.quarter as f64,
            self.lag_7,
            self.lag_14,
            self.lag_30,
            self.rolling_7,
            self.rolling_30,
        ]
    }
}

/// Extract the design matrix and target vector from a feature table,
/// ready to hand to a [`crate::models::Regressor`].
pub fn design_matrix(features: &[FeatureVector]) -> (Vec<[f64; FEATURE_WIDTH]>, Vec<f64>) {
    let x = features.iter().map(FeatureVector::to_row).collect();
    let y = features.iter().map(|f| f.target).collect();
    (x, y)
}

/// Parse a stored sale date.
///
/// Accepts a plain date or a date with a time component, matching the forms
/// the inventory store writes.
pub fn parse_sale_date(raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(datetime.date());
        }
    }
    Err(ForecastError::Parse(raw.to_string()))
}

/// Per-product index over a record collection.
///
/// Built once per pipeline invocation: maps each product to the indices of
/// its records, sorted ascending by sale date. Records with equal dates keep
/// their input order (stable sort), which is the tie-break contract the lag
/// features rely on. Products iterate in ascending id.
#[derive(Debug, Clone)]
pub struct EntityIndex {
    by_entity: BTreeMap<u32, Vec<usize>>,
    dates: Vec<NaiveDate>,
}

impl EntityIndex {
    /// Build the index over a record slice.
    ///
    /// Fails with [`ForecastError::Parse`] if any sale date is malformed.
    pub fn build(records: &[SalesRecord]) -> Result<Self> {
        let mut dates = Vec::with_capacity(records.len());
        for record in records {
            dates.push(parse_sale_date(&record.sale_date)?);
        }

        let mut by_entity: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (i, record) in records.iter().enumerate() {
            by_entity.entry(record.entity_id).or_default().push(i);
        }
        for indices in by_entity.values_mut() {
            // stable: equal dates keep insertion order
            indices.sort_by_key(|&i| dates[i]);
        }

        Ok(Self { by_entity, dates })
    }

    /// Iterate products and their date-sorted record indices
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[usize])> {
        self.by_entity
            .iter()
            .map(|(&entity_id, indices)| (entity_id, indices.as_slice()))
    }

    /// Date-sorted record indices for one product, if present
    pub fn series(&self, entity_id: u32) -> Option<&[usize]> {
        self.by_entity.get(&entity_id).map(Vec::as_slice)
    }

    /// Parsed date of the record at `index`
    pub fn date(&self, index: usize) -> NaiveDate {
        self.dates[index]
    }

    /// Number of distinct products
    pub fn entity_count(&self) -> usize {
        self.by_entity.len()
    }

    /// Total number of indexed records
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the index holds no records
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
