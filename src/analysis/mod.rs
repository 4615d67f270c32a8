mod analyzer;
mod curves;
mod derived;
mod fit;
pub mod timeline;

pub use analyzer::{
    Analyzer, ChartSeries, ChartView, DEFAULT_FORECAST_DAYS, MIN_TRAINING_WINDOW,
};
pub use curves::{CurveModel, EXPONENTIAL_WINDOW_LIMIT};
pub use derived::{daily_increment, windowed_max, EMPTY_WINDOW};
pub use fit::{fit_curve, fit_curve_with, FitOptions, FitOutcome};
pub use timeline::{day_dates, day_labels, nearest_index, parse_feed_date};
