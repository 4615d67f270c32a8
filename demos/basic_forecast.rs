//! Fit a logistic curve to a synthetic outbreak and print the forecast.
//!
//! Run with: cargo run --example basic_forecast

use chrono::NaiveDate;
use epicurve_dashboard::analysis::{Analyzer, CurveModel};
use epicurve_dashboard::models::{CaseSeries, Metric};
use epicurve_dashboard::visualization::{print_fit_summary, print_forecast_table};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A plateauing outbreak: logistic with L=5000, k=0.35, midpoint day 15.
    let values: Vec<f64> = (0..28)
        .map(|i| 5000.0 / (1.0 + (-0.35 * (i as f64 - 15.0)).exp()) + 20.0)
        .collect();

    let series = CaseSeries::new(
        "Demo - Total cases",
        Metric::TotalCases,
        None,
        NaiveDate::from_ymd_opt(2020, 2, 24).unwrap(),
        values,
    );

    let analyzer = Analyzer::new(&series);
    let outcome = analyzer.fit(CurveModel::Logistic, series.day_count(), 14)?;

    print_fit_summary(&outcome);
    print_forecast_table(&series, &outcome);

    Ok(())
}
