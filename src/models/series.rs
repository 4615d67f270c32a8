use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::timeline::{day_dates, day_labels};
use crate::models::Metric;

/// An immutable daily time series of one cumulative metric.
///
/// Index `i` corresponds to the calendar date `first_date + i` days. The
/// constructor in `io::series_from_records` validates that the feed rows are
/// contiguous, so holders of a `CaseSeries` may rely on the day-index
/// invariant without rechecking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSeries {
    pub name: String,
    pub metric: Metric,
    /// Region name for regional feeds, `None` for the national series.
    pub region: Option<String>,
    pub first_date: NaiveDate,
    pub values: Vec<f64>,
}

impl CaseSeries {
    pub fn new(
        name: impl Into<String>,
        metric: Metric,
        region: Option<String>,
        first_date: NaiveDate,
        values: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            metric,
            region,
            first_date,
            values,
        }
    }

    /// Number of observed days.
    pub fn day_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Calendar dates for the observed days.
    pub fn dates(&self) -> Vec<NaiveDate> {
        day_dates(self.first_date, self.day_count())
    }

    /// Display labels (`%d %b`) spanning `span` days from the first date.
    /// Spans longer than the observed data extend into the forecast horizon.
    pub fn date_labels(&self, span: usize) -> Vec<String> {
        day_labels(self.first_date, span)
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }
}
