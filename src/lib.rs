//! # Demand Forecast
//!
//! A Rust library for per-product demand forecasting from historical sales.
//!
//! ## Features
//!
//! - Calendar, lag, and rolling feature engineering per product
//! - Chronological train/test splitting (no future leakage into training)
//! - Recursive multi-day forecasting that feeds each step's prediction back
//!   into the feature window
//! - Model evaluation metrics (MAE, RMSE, R², error distribution)
//!
//! The regression model itself is an opaque capability behind the
//! [`models::Regressor`] trait; training and persistence belong to an
//! external collaborator. The core is pure: no I/O, no shared state, and
//! deterministic output for identical inputs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use demand_forecast::data::{design_matrix, SalesRecord};
//! use demand_forecast::features::FeatureBuilder;
//! use demand_forecast::forecast::ForecastEngine;
//! use demand_forecast::models::{MeanRegressor, Regressor};
//! use demand_forecast::split::DatasetSplitter;
//!
//! fn main() -> demand_forecast::error::Result<()> {
//!     // Historical sales, as loaded from the inventory store
//!     let records = vec![
//!         SalesRecord::new(1, "2024-01-01", 10, 49.90),
//!         SalesRecord::new(1, "2024-01-02", 12, 59.88),
//!         SalesRecord::new(1, "2024-01-03", 9, 44.91),
//!         SalesRecord::new(1, "2024-01-04", 11, 54.89),
//!     ];
//!
//!     // Build the feature table and split it chronologically
//!     let features = FeatureBuilder::build(&records)?;
//!     let (train, _test) = DatasetSplitter::split(features.clone(), 0.25)?;
//!
//!     // Fit a model on the training rows
//!     let (x_train, y_train) = design_matrix(&train);
//!     let mut model = MeanRegressor::new();
//!     model.fit(&x_train, &y_train)?;
//!
//!     // Forecast the next 7 days for product 1
//!     let predictions = ForecastEngine::forecast(&model, 1, 7, &features)?;
//!     println!("next week: {:?}", predictions);
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod error;
pub mod features;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod split;

// Re-export commonly used types
pub use crate::data::{design_matrix, EntityIndex, FeatureVector, SalesRecord};
pub use crate::error::ForecastError;
pub use crate::features::FeatureBuilder;
pub use crate::forecast::ForecastEngine;
pub use crate::metrics::{regression_metrics, RegressionMetrics};
pub use crate::models::Regressor;
pub use crate::split::DatasetSplitter;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
