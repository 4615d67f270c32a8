use chrono::NaiveDate;

use crate::analysis::timeline::nearest_index;
use crate::error::DashboardError;

/// Sentinel returned by [`windowed_max`] when the visible range contains no
/// full day. Routine during interactive panning, so not an error.
pub const EMPTY_WINDOW: f64 = -1.0;

/// Day-over-day fractional growth: `y[i] / y[i-1] - 1`.
///
/// The first element is fixed at 0 (no preceding day). A zero previous value
/// also yields 0 rather than an infinity that would poison the growth chart.
pub fn daily_increment(y: &[f64]) -> Vec<f64> {
    let mut increments = Vec::with_capacity(y.len());
    for (i, value) in y.iter().enumerate() {
        if i == 0 || y[i - 1] == 0.0 {
            increments.push(0.0);
        } else {
            increments.push(value / y[i - 1] - 1.0);
        }
    }
    increments
}

/// Maximum `y` value whose date falls inside the visible range.
///
/// Both range ends are snapped to the nearest day index. Returns
/// [`EMPTY_WINDOW`] when the snapped window is empty (equal or crossing
/// indices), which happens whenever the visible range lies between two days
/// or entirely outside the series.
pub fn windowed_max(
    dates: &[NaiveDate],
    y: &[f64],
    range_start: &str,
    range_end: &str,
) -> Result<f64, DashboardError> {
    if dates.len() != y.len() {
        return Err(DashboardError::ValidationError(format!(
            "Date and value lengths differ: {} vs {}",
            dates.len(),
            y.len()
        )));
    }
    let start = nearest_index(dates, range_start)?;
    let end = nearest_index(dates, range_end)?;
    if start >= end {
        return Ok(EMPTY_WINDOW);
    }
    Ok(y[start..=end].iter().copied().fold(f64::NEG_INFINITY, f64::max))
}
