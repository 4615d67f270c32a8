use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::FitOutcome;
use crate::models::CaseSeries;

/// Format the forecast table as a string: one row per day of the projection,
/// with the observed value alongside while the series covers it.
pub fn format_forecast_table(series: &CaseSeries, outcome: &FitOutcome) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("{} forecast", outcome.model.label()).bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let labels = series.date_labels(outcome.projection.len());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Day", "Date", "Observed", "Fitted"]);

    for (i, fitted) in outcome.projection.iter().enumerate() {
        let observed = series
            .values
            .get(i)
            .map(|v| format!("{v:.0}"))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(format!("{i}")),
            Cell::new(&labels[i]),
            Cell::new(observed),
            Cell::new(format!("{fitted:.0}")),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the forecast table.
pub fn print_forecast_table(series: &CaseSeries, outcome: &FitOutcome) {
    print!("{}", format_forecast_table(series, outcome));
}

/// Format a one-line fit summary: parameters, residual, iteration count.
pub fn format_fit_summary(outcome: &FitOutcome) -> String {
    let params = outcome
        .params
        .iter()
        .map(|p| format!("{p:.4}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "  {} fit: params [{params}], rss {:.3e}, {} iterations\n",
        outcome.model.label(),
        outcome.residual_sum_squares,
        outcome.iterations
    )
}

/// Print the fit summary line.
pub fn print_fit_summary(outcome: &FitOutcome) {
    print!("{}", format_fit_summary(outcome));
}
