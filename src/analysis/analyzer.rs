use serde::{Deserialize, Serialize};

use crate::analysis::curves::CurveModel;
use crate::analysis::derived::{daily_increment, windowed_max, EMPTY_WINDOW};
use crate::analysis::fit::{fit_curve, FitOutcome};
use crate::error::DashboardError;
use crate::models::CaseSeries;

/// Days projected past the last observed day.
pub const DEFAULT_FORECAST_DAYS: usize = 30;

/// Smallest training window the dashboard accepts. Below this every model is
/// under-determined (the logistic alone has four free parameters).
pub const MIN_TRAINING_WINDOW: usize = 5;

/// Headroom factor applied to the recommended y-axis maximum.
const Y_AXIS_HEADROOM: f64 = 1.05;

/// Models fitted on every chart render, each independently.
const CHART_MODELS: [CurveModel; 2] = [CurveModel::Exponential, CurveModel::Logistic];

/// One named line for the chart renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    /// Day labels, one per point.
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

/// Everything the presentation layer needs for one render: raw data, every
/// projection that converged, messages for every fit that did not, and a
/// recommended y-axis maximum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartView {
    pub series: Vec<ChartSeries>,
    pub fit_errors: Vec<String>,
    pub y_axis_max: f64,
}

/// Analysis operations over one immutable case series.
///
/// The series is borrowed, never owned or mutated: the caller owns the
/// fetch-once data and passes it in on every render.
pub struct Analyzer<'a> {
    series: &'a CaseSeries,
}

impl<'a> Analyzer<'a> {
    pub fn new(series: &'a CaseSeries) -> Self {
        Self { series }
    }

    /// Fit one model over the leading `window` days and project it over the
    /// observed span plus `forecast_days`.
    pub fn fit(
        &self,
        model: CurveModel,
        window: usize,
        forecast_days: usize,
    ) -> Result<FitOutcome, DashboardError> {
        let day_count = self.series.day_count();
        if window < MIN_TRAINING_WINDOW {
            return Err(DashboardError::InsufficientData(format!(
                "Training window {window} is below the minimum of {MIN_TRAINING_WINDOW} days"
            )));
        }
        if window > day_count {
            return Err(DashboardError::ValidationError(format!(
                "Training window {window} exceeds the {day_count} observed days"
            )));
        }

        let x_full: Vec<f64> = (0..day_count).map(|i| i as f64).collect();
        let guess = model.initial_guess(&x_full, &self.series.values);
        fit_curve(
            model,
            &x_full[..window],
            &self.series.values[..window],
            &guess,
            day_count + forecast_days,
        )
    }

    /// Fit the model preferred for this window size (exponential for short
    /// windows, logistic once an inflection point can be estimated).
    pub fn fit_preferred(
        &self,
        window: usize,
        forecast_days: usize,
    ) -> Result<FitOutcome, DashboardError> {
        self.fit(CurveModel::preferred_for_window(window), window, forecast_days)
    }

    /// Build the full render payload for one interaction.
    ///
    /// Exponential and logistic are fitted independently; each failure is
    /// absorbed into `fit_errors` and rendering continues with whatever
    /// converged. `axis_range` is the visible range from a pan/zoom event and
    /// drives the recommended y-axis maximum.
    pub fn chart(
        &self,
        window: usize,
        forecast_days: usize,
        axis_range: Option<(&str, &str)>,
    ) -> Result<ChartView, DashboardError> {
        let day_count = self.series.day_count();
        let fit_span = day_count + forecast_days;
        let fit_labels = self.series.date_labels(fit_span);

        let mut series = vec![ChartSeries {
            name: self.series.name.clone(),
            x: fit_labels[..day_count].to_vec(),
            y: self.series.values.clone(),
        }];
        let mut fit_errors = Vec::new();

        for model in CHART_MODELS {
            match self.fit(model, window, forecast_days) {
                Ok(outcome) => series.push(ChartSeries {
                    name: format!("{} fit ({window} days)", outcome.model.label()),
                    x: fit_labels.clone(),
                    y: outcome.projection,
                }),
                Err(e) => {
                    tracing::debug!(model = model.label(), window, error = %e, "fit failed");
                    fit_errors.push(e.to_string());
                }
            }
        }

        Ok(ChartView {
            series,
            fit_errors,
            y_axis_max: self.recommended_y_max(axis_range)?,
        })
    }

    /// Day-over-day fractional growth of the series, for the auxiliary chart.
    pub fn daily_increment_series(&self) -> ChartSeries {
        ChartSeries {
            name: format!("{} - daily growth", self.series.name),
            x: self.series.date_labels(self.series.day_count()),
            y: daily_increment(&self.series.values),
        }
    }

    /// Recommended y-axis maximum: the largest raw value inside the visible
    /// range, with headroom; falls back to the global maximum when no range
    /// is given or the visible window is empty.
    fn recommended_y_max(
        &self,
        axis_range: Option<(&str, &str)>,
    ) -> Result<f64, DashboardError> {
        let visible = match axis_range {
            Some((start, end)) => {
                let m = windowed_max(&self.series.dates(), &self.series.values, start, end)?;
                if m == EMPTY_WINDOW {
                    self.series.max_value()
                } else {
                    m
                }
            }
            None => self.series.max_value(),
        };
        Ok(visible * Y_AXIS_HEADROOM)
    }
}
