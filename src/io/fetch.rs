use crate::error::DashboardError;
use crate::models::FeedRecord;

/// The DPC national feed: one JSON object per daily report since 2020-02-24.
pub const DEFAULT_FEED_URL: &str = "https://raw.githubusercontent.com/pcm-dpc/COVID-19/master/dati-json/dpc-covid19-ita-andamento-nazionale.json";

/// Fetch the feed over HTTP. Blocking; called once at startup.
///
/// Network and schema failures propagate — a dashboard without data has
/// nothing to render, so there is no fallback here.
pub fn fetch_feed(url: &str) -> Result<Vec<FeedRecord>, DashboardError> {
    tracing::info!(url, "fetching feed");
    let mut response = ureq::get(url).call()?;
    let records: Vec<FeedRecord> = response
        .body_mut()
        .read_json()
        .map_err(|e| DashboardError::Http(format!("Failed to read feed body: {e}")))?;
    tracing::info!(records = records.len(), "feed fetched");
    Ok(records)
}
