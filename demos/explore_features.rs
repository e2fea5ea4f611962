//! Walk a small sales table through every transformation.
//!
//! Run with `RUST_LOG=debug cargo run --example explore_features` to see the
//! library logs.

use log::info;
use polars::prelude::*;
use sales_prep_workspace::features::{
    ChartConfig, ChartRenderer, DateFeatureExtractor, ForecastComparisonChart, LagGenerator,
    PlotlyJsonRenderer,
};
use sales_prep_workspace::{BusinessCalendar, Calendar};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let calendar = Calendar::load("ANBIMA")?;
    info!(
        "{} holidays between {:?} and {:?}",
        calendar.holidays().len(),
        calendar.holidays().iter().next(),
        calendar.holidays().iter().next_back()
    );

    let sales = df!(
        "Date" => &["2024-02-09", "2024-02-12", "2024-02-13", "2024-02-14", "2024-02-09", "2024-02-14"],
        "Product" => &["A", "A", "A", "A", "B", "B"],
        "Amount" => &[100.0, 20.0, 25.0, 90.0, 50.0, 45.0],
        "Forecast" => &[95.0, 80.0, 85.0, 88.0, 55.0, 44.0]
    )?;

    let extractor = DateFeatureExtractor::new(&calendar);
    let with_features = extractor.extract(&sales, "Date")?;
    println!("{}", with_features);

    // lags per product, in date order
    let lagged = LagGenerator::new(vec![1, 2], "Product", "Amount", 0.0)?
        .order_by("Date")
        .apply(&with_features)?;
    println!(
        "{}",
        lagged.select(["Date", "Product", "Amount", "Amount_lag_1", "Amount_lag_2"])?
    );

    let chart = ForecastComparisonChart::new(ChartConfig {
        real_sales_column: "Amount".to_string(),
        ..ChartConfig::default()
    });
    let comparison = chart.build(&sales)?;
    let path = std::env::temp_dir().join("forecast_comparison.json");
    let written = PlotlyJsonRenderer::new(&path).render(&comparison)?;
    println!("chart written to {}", written.display());

    Ok(())
}
