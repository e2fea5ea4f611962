//! # Sales Features
//!
//! Table transformations for sales forecasting built on polars `DataFrame`s.
//!
//! ## Features
//!
//! - Calendar features for a date column (year, ISO week, quarter, month
//!   boundaries, holiday and business-day flags)
//! - Lagged copies of a target column within groups
//! - Forecast vs. actual sales comparison chart
//!
//! Holiday and business-day flags come from a [`BusinessCalendar`] that is
//! built once and passed in, typically `Calendar::load("ANBIMA")`.
//!
//! ## Quick Start
//!
//! ```rust
//! use polars::prelude::*;
//! use sales_features::{add_lags, Calendar, DateFeatureExtractor};
//!
//! let calendar = Calendar::load("ANBIMA").unwrap();
//! let extractor = DateFeatureExtractor::new(&calendar);
//!
//! let df = df!(
//!     "date" => &["2024-03-01", "2024-03-02"],
//!     "Amount" => &[10.0, 20.0]
//! )
//! .unwrap();
//!
//! let features = extractor.extract(&df, "date").unwrap();
//! assert_eq!(features.column("is_bizdays").unwrap().bool().unwrap().get(1), Some(false));
//!
//! let lagged = add_lags(&df, &[1], "date", "Amount", 0.0).unwrap();
//! assert!(lagged.column("Amount_lag_1").is_ok());
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod date_features;
pub mod error;
pub mod lags;

// Re-export commonly used types
pub use crate::chart::{ChartRenderer, ForecastComparisonChart, GroupedBarChart, PlotlyJsonRenderer};
pub use crate::config::{ChartConfig, DateFeatureConfig, LagConfig};
pub use crate::date_features::{DateFeatureExtractor, DateFeatures, FEATURE_COLUMNS};
pub use crate::error::{FeatureError, Result};
pub use crate::lags::{add_lags, lag_column_name, LagGenerator};
pub use biz_calendar::{BusinessCalendar, Calendar};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
