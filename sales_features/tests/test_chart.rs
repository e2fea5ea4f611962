use polars::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use sales_features::chart::{self, GroupedBarChart};
use sales_features::{
    ChartConfig, ChartRenderer, FeatureError, ForecastComparisonChart, PlotlyJsonRenderer,
};
use std::cell::RefCell;
use tempfile::tempdir;

fn sales() -> DataFrame {
    df!(
        "Product" => &["B", "A", "B", "C"],
        "Real_sales" => &[10.0, 20.0, 30.0, 5.0],
        "Forecast" => &[12.0, 18.0, 25.0, 6.0]
    )
    .unwrap()
}

/// Keeps every chart it is asked to render
#[derive(Default)]
struct RecordingRenderer {
    charts: RefCell<Vec<GroupedBarChart>>,
}

impl ChartRenderer for RecordingRenderer {
    type Handle = usize;

    fn render(&self, chart: &GroupedBarChart) -> sales_features::Result<usize> {
        self.charts.borrow_mut().push(chart.clone());
        Ok(self.charts.borrow().len())
    }
}

#[test]
fn test_build_sums_per_product() {
    let chart = ForecastComparisonChart::default().build(&sales()).unwrap();

    assert_eq!(chart.categories(), &["A", "B", "C"]);
    assert_eq!(chart.trace("Vendas Reais").unwrap().y, vec![20.0, 40.0, 5.0]);
    assert_eq!(chart.trace("Vendas Previstas").unwrap().y, vec![18.0, 37.0, 6.0]);
    assert_eq!(chart.layout.barmode, "group");
    assert_eq!(chart.layout.xaxis.title.text, "Product");
    assert_eq!(chart.layout.yaxis.title.text, "Sales");
}

#[test]
fn test_integer_products_and_nulls() {
    let df = df!(
        "sku" => &[Some(2i64), Some(1), None, Some(2)],
        "real" => &[Some(1i32), None, Some(100), Some(3)],
        "forecast" => &[1.5, 2.0, 100.0, 2.5]
    )
    .unwrap();

    let renderer = RecordingRenderer::default();
    let handle = chart::render(&df, "sku", "real", "forecast", &renderer).unwrap();
    assert_eq!(handle, 1);

    let charts = renderer.charts.borrow();
    let chart = &charts[0];
    assert_eq!(chart.categories(), &["1", "2"]);
    assert_eq!(chart.data[0].y, vec![0.0, 4.0]);
    assert_eq!(chart.data[1].y, vec![2.0, 4.0]);
}

#[test]
fn test_numeric_products_keep_numeric_order() {
    let df = df!(
        "Product" => &[2i64, 10, 1, 10],
        "Real_sales" => &[1.0, 2.0, 3.0, 4.0],
        "Forecast" => &[1.0, 1.0, 1.0, 1.0]
    )
    .unwrap();

    let chart = ForecastComparisonChart::default().build(&df).unwrap();

    assert_eq!(chart.categories(), &["1", "2", "10"]);
    assert_eq!(chart.data[0].x, vec![json!(1), json!(2), json!(10)]);
    assert_eq!(chart.data[0].y, vec![3.0, 1.0, 6.0]);
    assert_eq!(chart.data[1].y, vec![1.0, 1.0, 2.0]);

    let value: serde_json::Value = serde_json::from_str(&chart.to_plotly_json().unwrap()).unwrap();
    assert_eq!(value["data"][1]["x"], json!([1, 2, 10]));
}

#[test]
fn test_custom_labels() {
    let config = ChartConfig {
        real_trace_name: "Actual".to_string(),
        forecast_trace_name: "Predicted".to_string(),
        y_axis_title: "Units".to_string(),
        ..ChartConfig::default()
    };
    let chart = ForecastComparisonChart::new(config).build(&sales()).unwrap();

    let names: Vec<&str> = chart.data.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Actual", "Predicted"]);
    assert_eq!(chart.layout.yaxis.title.text, "Units");
}

#[test]
fn test_plotly_json_shape() {
    let chart = ForecastComparisonChart::default().build(&sales()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&chart.to_plotly_json().unwrap()).unwrap();

    assert_eq!(value["layout"]["barmode"], "group");
    assert_eq!(value["data"][0]["type"], "bar");
    assert_eq!(value["data"][1]["name"], "Vendas Previstas");
    assert_eq!(value["data"][0]["x"][2], "C");
}

#[test]
fn test_json_renderer_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("comparison.json");

    let handle = ForecastComparisonChart::default()
        .render(&sales(), &PlotlyJsonRenderer::new(&path))
        .unwrap();
    assert_eq!(handle, path);

    let written = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["data"][0]["y"][1], 40.0);
}

#[test]
fn test_json_renderer_bad_path() {
    let renderer = PlotlyJsonRenderer::new("/nonexistent/dir/chart.json");
    let result = ForecastComparisonChart::default().render(&sales(), &renderer);
    assert!(matches!(result, Err(FeatureError::IoError(_))));
}

#[test]
fn test_missing_column() {
    let renderer = RecordingRenderer::default();
    let result = chart::render(&sales(), "Product", "Real", "Forecast", &renderer);

    assert!(matches!(result, Err(FeatureError::ColumnNotFound(name)) if name == "Real"));
    assert!(renderer.charts.borrow().is_empty());
}

#[test]
fn test_non_numeric_sales() {
    let result = chart::render(
        &sales(),
        "Real_sales",
        "Product",
        "Forecast",
        &RecordingRenderer::default(),
    );
    assert!(matches!(result, Err(FeatureError::DataError(_))));
}

#[test]
fn test_empty_table() {
    let df = df!(
        "Product" => Vec::<&str>::new(),
        "Real_sales" => Vec::<f64>::new(),
        "Forecast" => Vec::<f64>::new()
    )
    .unwrap();

    let chart = ForecastComparisonChart::default().build(&df).unwrap();
    assert!(chart.categories().is_empty());
    assert_eq!(chart.data.len(), 2);
}
