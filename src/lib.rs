pub mod analysis;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

#[cfg(feature = "web")]
pub mod web;

pub use analysis::{Analyzer, CurveModel, FitOutcome};
pub use error::DashboardError;
pub use models::{CaseSeries, FeedRecord, Metric};
