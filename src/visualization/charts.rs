use colored::Colorize;

use crate::analysis::FitOutcome;
use crate::models::CaseSeries;

/// Format a text bar chart of a fitted projection as a string. Days inside
/// the training window are drawn in green, forecast days in cyan.
pub fn format_projection_chart(
    series: &CaseSeries,
    outcome: &FitOutcome,
    window: usize,
) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("{} projection", outcome.model.label()).bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if outcome.projection.is_empty() {
        output.push_str("  No projection available.\n");
        return output;
    }

    let max_value = outcome
        .projection
        .iter()
        .copied()
        .fold(0.0f64, f64::max);
    let bar_width = 40;
    let labels = series.date_labels(outcome.projection.len());

    for (i, value) in outcome.projection.iter().enumerate() {
        let bar_len = if max_value > 0.0 {
            ((value / max_value) * bar_width as f64).round() as usize
        } else {
            0
        };
        let bar = "\u{2588}".repeat(bar_len);
        let bar = if i < window {
            bar.green()
        } else {
            bar.cyan()
        };
        output.push_str(&format!("  {:>6}  {:>10.0}  {}\n", labels[i], value, bar));
    }

    output.push('\n');
    output
}

/// Print a text bar chart of a fitted projection.
pub fn print_projection_chart(series: &CaseSeries, outcome: &FitOutcome, window: usize) {
    print!("{}", format_projection_chart(series, outcome, window));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CurveModel;
    use crate::models::Metric;
    use chrono::NaiveDate;

    fn sample() -> (CaseSeries, FitOutcome) {
        let series = CaseSeries::new(
            "Italia - Total cases",
            Metric::TotalCases,
            None,
            NaiveDate::from_ymd_opt(2020, 2, 24).unwrap(),
            vec![10.0, 20.0, 40.0],
        );
        let outcome = FitOutcome {
            model: CurveModel::Exponential,
            params: vec![10.0, 0.693, 0.0],
            projection: vec![10.0, 20.0, 40.0, 80.0],
            residual_sum_squares: 0.0,
            iterations: 5,
        };
        (series, outcome)
    }

    #[test]
    fn test_chart_contains_header_and_labels() {
        let (series, outcome) = sample();
        let output = format_projection_chart(&series, &outcome, 3);
        assert!(output.contains("exponential projection"));
        assert!(output.contains("24 Feb"));
        assert!(output.contains("27 Feb"));
    }

    #[test]
    fn test_chart_empty_projection() {
        let (series, mut outcome) = sample();
        outcome.projection.clear();
        let output = format_projection_chart(&series, &outcome, 3);
        assert!(output.contains("No projection available."));
    }

    #[test]
    fn test_chart_bar_scales_to_max() {
        let (series, outcome) = sample();
        let output = format_projection_chart(&series, &outcome, 3);
        // The largest value gets the full-width bar
        assert!(output.contains(&"\u{2588}".repeat(40)));
    }
}
