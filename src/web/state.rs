use crate::models::{CaseSeries, Metric};

/// Shared state for the web server: the fetch-once series, one per metric.
///
/// The data is immutable for the life of the process (there is no refresh
/// mechanism), so handlers share plain references with no locking. Every
/// render recomputes fits from scratch; nothing per-session is stored.
pub struct AppState {
    series: Vec<CaseSeries>,
}

impl AppState {
    pub fn new(series: Vec<CaseSeries>) -> Self {
        Self { series }
    }

    /// The series for a metric, if the feed provided it.
    pub fn get(&self, metric: Metric) -> Option<&CaseSeries> {
        self.series.iter().find(|s| s.metric == metric)
    }

    pub fn all(&self) -> &[CaseSeries] {
        &self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(metric: Metric) -> CaseSeries {
        CaseSeries::new(
            format!("Italia - {}", metric.label()),
            metric,
            None,
            NaiveDate::from_ymd_opt(2020, 2, 24).unwrap(),
            vec![1.0, 2.0, 3.0],
        )
    }

    #[test]
    fn test_get_by_metric() {
        let state = AppState::new(vec![series(Metric::TotalCases), series(Metric::Deaths)]);
        assert!(state.get(Metric::TotalCases).is_some());
        assert!(state.get(Metric::Deaths).is_some());
        assert!(state.get(Metric::Recovered).is_none());
    }

    #[test]
    fn test_all_preserves_order() {
        let state = AppState::new(vec![series(Metric::Deaths), series(Metric::TotalCases)]);
        assert_eq!(state.all()[0].metric, Metric::Deaths);
    }
}
