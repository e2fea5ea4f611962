//! Lagged copies of a target column within groups

use crate::config::LagConfig;
use crate::data::{require_column, require_numeric_column};
use crate::error::Result;
use log::{debug, warn};
use polars::prelude::*;
use std::collections::HashSet;

/// Name of the column holding the `k`-step lag of `target_column`
pub fn lag_column_name(target_column: &str, k: i64) -> String {
    format!("{}_lag_{}", target_column, k)
}

/// Add one lag column per offset, returning a new table sorted by `group_column`
///
/// Within each group row *i* receives the target of row *i − k*; rows with no
/// earlier value, and rows whose group is null, get `fill_value`. Offsets must be strictly positive.
pub fn add_lags(
    df: &DataFrame,
    lags: &[i64],
    group_column: &str,
    target_column: &str,
    fill_value: f64,
) -> Result<DataFrame> {
    LagGenerator::new(lags.to_vec(), group_column, target_column, fill_value)?.apply(df)
}

/// Generates lag columns for a target within groups
#[derive(Debug, Clone, PartialEq)]
pub struct LagGenerator {
    lags: Vec<i64>,
    group_column: String,
    order_column: Option<String>,
    target_column: String,
    fill_value: f64,
}

impl LagGenerator {
    /// Create a generator; fails if any offset is zero or negative
    pub fn new(
        lags: Vec<i64>,
        group_column: &str,
        target_column: &str,
        fill_value: f64,
    ) -> Result<Self> {
        Self::from_config(&LagConfig {
            lags,
            group_column: group_column.to_string(),
            order_column: None,
            target_column: target_column.to_string(),
            fill_value,
        })
    }

    /// Create a generator from a [`LagConfig`]
    pub fn from_config(config: &LagConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            lags: config.lags.clone(),
            group_column: config.group_column.clone(),
            order_column: config.order_column.clone(),
            target_column: config.target_column.clone(),
            fill_value: config.fill_value,
        })
    }

    /// Sort by `column` instead of the group column before shifting
    pub fn order_by(mut self, column: &str) -> Self {
        self.order_column = Some(column.to_string());
        self
    }

    /// Lag offsets
    pub fn lags(&self) -> &[i64] {
        &self.lags
    }

    /// Names of the columns this generator adds, in offset order
    pub fn output_columns(&self) -> Vec<String> {
        self.lags
            .iter()
            .map(|&k| lag_column_name(&self.target_column, k))
            .collect()
    }

    fn order_column(&self) -> &str {
        self.order_column.as_deref().unwrap_or(&self.group_column)
    }

    /// Sort `df` and append the lag columns; the input is left untouched
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        require_column(df, &self.group_column)?;
        require_column(df, self.order_column())?;
        require_numeric_column(df, &self.target_column)?;

        let mut seen = HashSet::new();
        for k in &self.lags {
            if !seen.insert(*k) {
                warn!("lag offset {} given more than once; column is overwritten", k);
            }
        }

        debug!(
            "adding lags {:?} of '{}' grouped by '{}' ({} rows)",
            self.lags,
            self.target_column,
            self.group_column,
            df.height()
        );

        // nulls sort last; rows without a group key never receive a lagged value
        let sorted = df.clone().lazy().sort(
            self.order_column(),
            SortOptions {
                descending: false,
                nulls_last: true,
                maintain_order: true,
                ..Default::default()
            },
        );
        if self.lags.is_empty() {
            return Ok(sorted.collect()?);
        }

        let exprs: Vec<Expr> = self
            .lags
            .iter()
            .map(|&k| {
                let shifted = col(&self.target_column)
                    .cast(DataType::Float64)
                    .shift(k)
                    .over([col(&self.group_column)])
                    .fill_null(lit(self.fill_value));
                when(col(&self.group_column).is_null())
                    .then(lit(self.fill_value))
                    .otherwise(shifted)
                    .alias(&lag_column_name(&self.target_column, k))
            })
            .collect();

        let out = sorted.with_columns(exprs).collect()?;
        Ok(out)
    }
}
