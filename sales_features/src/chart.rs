//! Forecast vs. actual sales comparison chart
//!
//! Sales are summed per product into a [`GroupedBarChart`], a figure
//! description in the plotly JSON schema. Drawing it is left to a
//! [`ChartRenderer`].

use crate::config::ChartConfig;
use crate::data::{require_column, require_numeric_column};
use crate::error::Result;
use log::debug;
use polars::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One series of bars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub name: String,
    pub x: Vec<Value>,
    pub y: Vec<f64>,
}

/// Axis title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

/// Axis settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
}

/// Figure layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub barmode: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

/// Bar chart with one bar pair per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedBarChart {
    pub data: Vec<BarTrace>,
    pub layout: ChartLayout,
}

impl GroupedBarChart {
    /// Category labels along the x axis
    pub fn categories(&self) -> Vec<String> {
        self.data
            .first()
            .map(|t| t.x.iter().map(category_label).collect())
            .unwrap_or_default()
    }

    /// Find a trace by name
    pub fn trace(&self, name: &str) -> Option<&BarTrace> {
        self.data.iter().find(|t| t.name == name)
    }

    /// Serialize as a plotly figure
    pub fn to_plotly_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Collaborator that displays or stores a chart
pub trait ChartRenderer {
    /// Whatever the renderer hands back for the rendered chart
    type Handle;

    fn render(&self, chart: &GroupedBarChart) -> Result<Self::Handle>;
}

/// Writes the plotly figure JSON to a file and returns its path
#[derive(Debug, Clone)]
pub struct PlotlyJsonRenderer {
    path: PathBuf,
}

impl PlotlyJsonRenderer {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ChartRenderer for PlotlyJsonRenderer {
    type Handle = PathBuf;

    fn render(&self, chart: &GroupedBarChart) -> Result<PathBuf> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, chart)?;
        writer.flush()?;
        debug!(
            "wrote chart with {} categories to {}",
            chart.categories().len(),
            self.path.display()
        );
        Ok(self.path.clone())
    }
}

/// Sum real and forecast sales per product and render them side by side
pub fn render<R: ChartRenderer>(
    df: &DataFrame,
    product_column: &str,
    real_sales_column: &str,
    forecast_column: &str,
    renderer: &R,
) -> Result<R::Handle> {
    let config = ChartConfig {
        product_column: product_column.to_string(),
        real_sales_column: real_sales_column.to_string(),
        forecast_column: forecast_column.to_string(),
        ..ChartConfig::default()
    };
    ForecastComparisonChart::new(config).render(df, renderer)
}

/// Builds the forecast comparison chart from a sales table
#[derive(Debug, Clone, Default)]
pub struct ForecastComparisonChart {
    config: ChartConfig,
}

impl ForecastComparisonChart {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Aggregate `df` into the chart description
    ///
    /// Products are sorted ascending in their own type, so numeric ids keep
    /// numeric order and stay numbers in the figure. Rows without a product
    /// are dropped and null sales count as zero.
    pub fn build(&self, df: &DataFrame) -> Result<GroupedBarChart> {
        let cfg = &self.config;
        require_column(df, &cfg.product_column)?;
        require_numeric_column(df, &cfg.real_sales_column)?;
        require_numeric_column(df, &cfg.forecast_column)?;

        let totals = df
            .clone()
            .lazy()
            .filter(col(&cfg.product_column).is_not_null())
            .groupby([col(&cfg.product_column)])
            .agg([
                sales_total(&cfg.real_sales_column, REAL_TOTAL),
                sales_total(&cfg.forecast_column, FORECAST_TOTAL),
            ])
            .sort(&cfg.product_column, SortOptions::default())
            .collect()?;

        debug!(
            "aggregated {} rows into {} products",
            df.height(),
            totals.height()
        );

        let categories = category_values(totals.column(&cfg.product_column)?)?;
        let real_totals = totals_of(&totals, REAL_TOTAL)?;
        let forecast_totals = totals_of(&totals, FORECAST_TOTAL)?;

        Ok(GroupedBarChart {
            data: vec![
                bar_trace(&cfg.real_trace_name, categories.clone(), real_totals),
                bar_trace(&cfg.forecast_trace_name, categories, forecast_totals),
            ],
            layout: ChartLayout {
                barmode: "group".to_string(),
                xaxis: axis(&cfg.x_axis_title),
                yaxis: axis(&cfg.y_axis_title),
            },
        })
    }

    /// Build the chart and hand it to `renderer`
    pub fn render<R: ChartRenderer>(&self, df: &DataFrame, renderer: &R) -> Result<R::Handle> {
        let chart = self.build(df)?;
        renderer.render(&chart)
    }
}

const REAL_TOTAL: &str = "__real_total";
const FORECAST_TOTAL: &str = "__forecast_total";

fn sales_total(column: &str, alias: &str) -> Expr {
    col(column)
        .cast(DataType::Float64)
        .fill_null(lit(0.0))
        .sum()
        .alias(alias)
}

fn totals_of(totals: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let values = totals
        .column(column)?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();
    Ok(values)
}

/// Product keys as JSON values of their own type
fn category_values(keys: &Series) -> Result<Vec<Value>> {
    fn collect<T: Into<Value>>(values: impl Iterator<Item = Option<T>>) -> Vec<Value> {
        values.map(|v| v.map_or(Value::Null, Into::into)).collect()
    }

    let values = match keys.dtype() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => collect(keys.cast(&DataType::Int64)?.i64()?.into_iter()),
        DataType::UInt64 => collect(keys.u64()?.into_iter()),
        DataType::Float32 | DataType::Float64 => {
            collect(keys.cast(&DataType::Float64)?.f64()?.into_iter())
        }
        DataType::Boolean => collect(keys.bool()?.into_iter()),
        _ => collect(keys.cast(&DataType::Utf8)?.utf8()?.into_iter()),
    };
    Ok(values)
}

fn category_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn bar_trace(name: &str, x: Vec<Value>, y: Vec<f64>) -> BarTrace {
    BarTrace {
        trace_type: "bar".to_string(),
        name: name.to_string(),
        x,
        y,
    }
}

fn axis(title: &str) -> Axis {
    Axis {
        title: AxisTitle {
            text: title.to_string(),
        },
    }
}
