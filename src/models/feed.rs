use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// One daily report object from the DPC COVID-19 feed.
///
/// Only the fields the dashboard consumes are deserialized; the feed carries
/// many more. The national feed omits `denominazione_regione`, the regional
/// feed carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRecord {
    /// Report date, either `YYYY-MM-DD HH:MM:SS` or ISO-8601 `YYYY-MM-DDTHH:MM:SS`.
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denominazione_regione: Option<String>,
    pub totale_casi: f64,
    #[serde(default)]
    pub deceduti: f64,
    #[serde(default)]
    pub dimessi_guariti: f64,
}

impl FeedRecord {
    /// The cumulative value this record reports for the given metric.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TotalCases => self.totale_casi,
            Metric::Deaths => self.deceduti,
            Metric::Recovered => self.dimessi_guariti,
        }
    }
}

/// A cumulative metric reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalCases,
    Deaths,
    Recovered,
}

impl Metric {
    /// All metrics the dashboard exposes.
    pub const ALL: [Metric; 3] = [Metric::TotalCases, Metric::Deaths, Metric::Recovered];

    /// Human-readable label for chart legends and tables.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::TotalCases => "Total cases",
            Metric::Deaths => "Deaths",
            Metric::Recovered => "Recovered",
        }
    }

    /// The feed field name this metric maps to.
    pub fn feed_field(&self) -> &'static str {
        match self {
            Metric::TotalCases => "totale_casi",
            Metric::Deaths => "deceduti",
            Metric::Recovered => "dimessi_guariti",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::TotalCases => write!(f, "total-cases"),
            Metric::Deaths => write!(f, "deaths"),
            Metric::Recovered => write!(f, "recovered"),
        }
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "total-cases" | "total_cases" | "cases" | "totale_casi" => Ok(Metric::TotalCases),
            "deaths" | "deceduti" => Ok(Metric::Deaths),
            "recovered" | "dimessi_guariti" => Ok(Metric::Recovered),
            _ => Err(DashboardError::NotFound(format!(
                "Unknown metric '{s}'. Use: total-cases, deaths, or recovered"
            ))),
        }
    }
}
