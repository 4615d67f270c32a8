//! Compare exponential and logistic fits over growing training windows,
//! showing where the exponential model stops being a sensible choice.
//!
//! Run with: cargo run --example model_comparison

use chrono::NaiveDate;
use colored::Colorize;
use epicurve_dashboard::analysis::{Analyzer, CurveModel};
use epicurve_dashboard::models::{CaseSeries, Metric};

fn main() {
    let values: Vec<f64> = (0..40)
        .map(|i| 8000.0 / (1.0 + (-0.3 * (i as f64 - 18.0)).exp()) + 100.0)
        .collect();

    let series = CaseSeries::new(
        "Demo - Total cases",
        Metric::TotalCases,
        None,
        NaiveDate::from_ymd_opt(2020, 2, 24).unwrap(),
        values,
    );
    let analyzer = Analyzer::new(&series);

    println!("{}", "Window  Model        RSS           Iterations".bold());
    for window in [8, 12, 16, 20, 28, 40] {
        for model in [CurveModel::Exponential, CurveModel::Logistic] {
            match analyzer.fit(model, window, 10) {
                Ok(outcome) => println!(
                    "{window:>6}  {:<11}  {:>12.3}  {:>10}",
                    model.label(),
                    outcome.residual_sum_squares,
                    outcome.iterations
                ),
                Err(e) => println!(
                    "{window:>6}  {:<11}  {}",
                    model.label(),
                    format!("failed: {e}").red()
                ),
            }
        }
        let preferred = CurveModel::preferred_for_window(window);
        println!("        preferred for this window: {}\n", preferred.label().cyan());
    }
}
