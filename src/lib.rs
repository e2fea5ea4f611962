//! # Sales Prep
//!
//! `sales_prep_workspace` bundles the business-day calendars and the table
//! transformations used to prepare sales data for forecasting.
//!
//! ## Example
//!
//! ```
//! use sales_prep_workspace::{calendar, features};
//!
//! let anbima = calendar::Calendar::load("ANBIMA").unwrap();
//! let extractor = features::DateFeatureExtractor::new(&anbima);
//! assert_eq!(features::FEATURE_COLUMNS.len(), 12);
//! # let _ = extractor;
//! ```

pub use biz_calendar as calendar;
pub use sales_features as features;

pub use biz_calendar::{BusinessCalendar, Calendar};
pub use sales_features::{add_lags, DateFeatureExtractor, ForecastComparisonChart, LagGenerator};
