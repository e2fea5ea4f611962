//! Parameter sets for the transformations
//!
//! Every config deserializes from JSON with missing fields taking the
//! defaults below.

use crate::error::{FeatureError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Load a config from a JSON string
pub fn from_json_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// Load a config from a JSON file
pub fn from_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = fs::read_to_string(path)?;
    from_json_str(&content)
}

/// Parameters for date feature extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFeatureConfig {
    /// Name of the date column
    pub date_column: String,
}

impl Default for DateFeatureConfig {
    fn default() -> Self {
        Self {
            date_column: "date".to_string(),
        }
    }
}

/// Parameters for lag generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LagConfig {
    /// Lag offsets, each producing one `<target>_lag_<k>` column
    pub lags: Vec<i64>,
    /// Column whose values partition the table
    pub group_column: String,
    /// Column the table is sorted by; the group column when unset
    pub order_column: Option<String>,
    /// Column whose values are shifted
    pub target_column: String,
    /// Value placed where no earlier row exists
    pub fill_value: f64,
}

impl Default for LagConfig {
    fn default() -> Self {
        Self {
            lags: vec![1],
            group_column: "Date".to_string(),
            order_column: None,
            target_column: "Amount".to_string(),
            fill_value: 0.0,
        }
    }
}

impl LagConfig {
    /// Check that every offset is strictly positive
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self.lags.iter().find(|&&k| k <= 0) {
            return Err(FeatureError::InvalidArgument(format!(
                "lag offsets must be positive, got {}",
                bad
            )));
        }
        Ok(())
    }

    /// Column the table is sorted by before shifting
    pub fn order_column(&self) -> &str {
        self.order_column.as_deref().unwrap_or(&self.group_column)
    }
}

/// Parameters for the forecast comparison chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub product_column: String,
    pub real_sales_column: String,
    pub forecast_column: String,
    pub real_trace_name: String,
    pub forecast_trace_name: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            product_column: "Product".to_string(),
            real_sales_column: "Real_sales".to_string(),
            forecast_column: "Forecast".to_string(),
            real_trace_name: "Vendas Reais".to_string(),
            forecast_trace_name: "Vendas Previstas".to_string(),
            x_axis_title: "Product".to_string(),
            y_axis_title: "Sales".to_string(),
        }
    }
}
