mod charts;
mod tables;

pub use charts::{format_projection_chart, print_projection_chart};
pub use tables::{format_fit_summary, format_forecast_table, print_fit_summary, print_forecast_table};
