use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::DashboardError;

/// Calendar dates for `span` consecutive days starting at `first`.
pub fn day_dates(first: NaiveDate, span: usize) -> Vec<NaiveDate> {
    (0..span)
        .map(|i| first + Duration::days(i as i64))
        .collect()
}

/// Display labels (`%d %b`, e.g. "24 Feb") for `span` consecutive days.
pub fn day_labels(first: NaiveDate, span: usize) -> Vec<String> {
    day_dates(first, span)
        .into_iter()
        .map(|d| d.format("%d %b").to_string())
        .collect()
}

/// Parse a feed or axis-range timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, ISO-8601 `YYYY-MM-DDTHH:MM:SS`, a bare
/// date, and truncated times as produced by chart pan/zoom events.
/// Fractional-second and timezone suffixes are stripped before parsing.
pub fn parse_feed_date(s: &str) -> Result<NaiveDateTime, DashboardError> {
    let normalized = s.trim().replacen('T', " ", 1);
    let stripped = normalized
        .split(['.', '+', 'Z'])
        .next()
        .unwrap_or(&normalized)
        .trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(stripped, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(stripped, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(stripped, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN));
    }

    Err(DashboardError::ParseError(format!(
        "Unrecognized date '{s}'. Expected YYYY-MM-DD[ HH:MM:SS]"
    )))
}

/// Index of the date in `dates` closest in time to `target`.
///
/// The target may fall between day boundaries (pan/zoom ranges are
/// continuous); the nearest day wins, with ties going to the earlier index.
pub fn nearest_index(dates: &[NaiveDate], target: &str) -> Result<usize, DashboardError> {
    if dates.is_empty() {
        return Err(DashboardError::InsufficientData(
            "No dates to search for nearest index".to_string(),
        ));
    }
    let t = parse_feed_date(target)?;

    let mut best = 0;
    let mut best_diff = i64::MAX;
    for (i, d) in dates.iter().enumerate() {
        let diff = (d.and_time(NaiveTime::MIN) - t).num_seconds().abs();
        if diff < best_diff {
            best_diff = diff;
            best = i;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_day_dates_length_and_step() {
        let dates = day_dates(d(2020, 2, 24), 10);
        assert_eq!(dates.len(), 10);
        assert_eq!(dates[0], d(2020, 2, 24));
        for (i, date) in dates.iter().enumerate() {
            assert_eq!(*date, d(2020, 2, 24) + Duration::days(i as i64));
        }
    }

    #[test]
    fn test_day_dates_crosses_month_boundary() {
        let dates = day_dates(d(2020, 2, 28), 4);
        // 2020 is a leap year
        assert_eq!(dates[1], d(2020, 2, 29));
        assert_eq!(dates[2], d(2020, 3, 1));
    }

    #[test]
    fn test_day_labels_format() {
        let labels = day_labels(d(2020, 2, 24), 3);
        assert_eq!(labels, vec!["24 Feb", "25 Feb", "26 Feb"]);
    }

    #[test]
    fn test_day_labels_zero_span() {
        assert!(day_labels(d(2020, 2, 24), 0).is_empty());
    }

    #[test]
    fn test_parse_feed_date_space_separated() {
        let dt = parse_feed_date("2020-02-24 18:00:00").unwrap();
        assert_eq!(dt.date(), d(2020, 2, 24));
    }

    #[test]
    fn test_parse_feed_date_iso8601() {
        let dt = parse_feed_date("2020-02-24T18:00:00").unwrap();
        assert_eq!(dt.date(), d(2020, 2, 24));
    }

    #[test]
    fn test_parse_feed_date_strips_fractional_seconds() {
        let dt = parse_feed_date("2020-03-01 12:30:45.1234").unwrap();
        assert_eq!(dt, d(2020, 3, 1).and_hms_opt(12, 30, 45).unwrap());
    }

    #[test]
    fn test_parse_feed_date_strips_timezone() {
        let dt = parse_feed_date("2020-03-01T12:30:45+01:00").unwrap();
        assert_eq!(dt.date(), d(2020, 3, 1));
    }

    #[test]
    fn test_parse_feed_date_bare_date() {
        let dt = parse_feed_date("2020-03-01").unwrap();
        assert_eq!(dt, d(2020, 3, 1).and_time(NaiveTime::MIN));
    }

    #[test]
    fn test_parse_feed_date_rejects_garbage() {
        assert!(parse_feed_date("not a date").is_err());
        assert!(parse_feed_date("24/02/2020").is_err());
    }

    #[test]
    fn test_nearest_index_exact_match_is_idempotent() {
        let dates = day_dates(d(2020, 2, 24), 10);
        for (k, date) in dates.iter().enumerate() {
            let target = date.format("%Y-%m-%d").to_string();
            assert_eq!(nearest_index(&dates, &target).unwrap(), k);
        }
    }

    #[test]
    fn test_nearest_index_mid_day_rounds_to_closest() {
        let dates = day_dates(d(2020, 2, 24), 5);
        // 05:00 on day 1 is closer to day 1's midnight than day 2's
        assert_eq!(nearest_index(&dates, "2020-02-25 05:00:00").unwrap(), 1);
        // 20:00 on day 1 is closer to day 2's midnight
        assert_eq!(nearest_index(&dates, "2020-02-25 20:00:00").unwrap(), 2);
    }

    #[test]
    fn test_nearest_index_tie_breaks_to_first() {
        let dates = day_dates(d(2020, 2, 24), 5);
        // Exactly noon is equidistant; the earlier index wins
        assert_eq!(nearest_index(&dates, "2020-02-25 12:00:00").unwrap(), 1);
    }

    #[test]
    fn test_nearest_index_before_series_clamps_to_zero() {
        let dates = day_dates(d(2020, 2, 24), 5);
        assert_eq!(nearest_index(&dates, "2019-12-01").unwrap(), 0);
    }

    #[test]
    fn test_nearest_index_after_series_clamps_to_last() {
        let dates = day_dates(d(2020, 2, 24), 5);
        assert_eq!(nearest_index(&dates, "2021-01-01").unwrap(), 4);
    }

    #[test]
    fn test_nearest_index_empty_dates_errors() {
        assert!(nearest_index(&[], "2020-02-24").is_err());
    }
}
