use polars::prelude::*;
use pretty_assertions::assert_eq;
use sales_features::{
    config, Calendar, ChartConfig, DateFeatureExtractor, ForecastComparisonChart, LagConfig,
    LagGenerator,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Daily sales for two products around Carnival 2024
fn carnival_sales() -> DataFrame {
    df!(
        "date" => &[
            "2024-02-09", "2024-02-09",
            "2024-02-12", "2024-02-12",
            "2024-02-13", "2024-02-13",
            "2024-02-14", "2024-02-14",
        ],
        "Product" => &["A", "B", "A", "B", "A", "B", "A", "B"],
        "Amount" => &[100.0, 50.0, 20.0, 10.0, 25.0, 12.0, 90.0, 45.0],
        "Forecast" => &[95.0, 55.0, 80.0, 40.0, 85.0, 42.0, 88.0, 44.0]
    )
    .unwrap()
}

#[test]
fn test_features_then_lags() {
    let calendar = Arc::new(Calendar::load("ANBIMA").unwrap());
    let extractor = DateFeatureExtractor::new(Arc::clone(&calendar));

    let features = extractor.extract(&carnival_sales(), "date").unwrap();

    let lags = LagGenerator::new(vec![1, 2], "Product", "Amount", 0.0)
        .unwrap()
        .order_by("date")
        .apply(&features)
        .unwrap();

    assert_eq!(lags.height(), 8);
    assert_eq!(lags.width(), 4 + 12 + 2);

    let products: Vec<&str> = lags
        .column("Product")
        .unwrap()
        .utf8()
        .unwrap()
        .into_no_null_iter()
        .collect();
    let lag_1: Vec<f64> = lags
        .column("Amount_lag_1")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    let bizdays: Vec<bool> = lags
        .column("is_bizdays")
        .unwrap()
        .bool()
        .unwrap()
        .into_no_null_iter()
        .collect();

    assert_eq!(products, vec!["A", "B", "A", "B", "A", "B", "A", "B"]);
    assert_eq!(lag_1, vec![0.0, 0.0, 100.0, 50.0, 20.0, 10.0, 25.0, 12.0]);
    assert_eq!(
        bizdays,
        vec![true, true, false, false, false, false, true, true]
    );
}

#[test]
fn test_pipeline_from_json_configs() {
    let mut lag_file = NamedTempFile::new().unwrap();
    writeln!(
        lag_file,
        r#"{{"lags": [1], "group_column": "Product", "order_column": "date", "fill_value": -1.0}}"#
    )
    .unwrap();
    let lag_config: LagConfig = config::from_json_file(lag_file.path()).unwrap();
    let chart_config: ChartConfig =
        config::from_json_str(r#"{"real_sales_column": "Amount"}"#).unwrap();

    let lagged = LagGenerator::from_config(&lag_config)
        .unwrap()
        .apply(&carnival_sales())
        .unwrap();
    let first: Vec<f64> = lagged
        .column("Amount_lag_1")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .take(2)
        .collect();
    assert_eq!(first, vec![-1.0, -1.0]);

    let chart = ForecastComparisonChart::new(chart_config)
        .build(&lagged)
        .unwrap();
    assert_eq!(chart.categories(), &["A", "B"]);
    assert_eq!(chart.data[0].y, vec![235.0, 117.0]);
    assert_eq!(chart.data[1].y, vec![348.0, 181.0]);
}
