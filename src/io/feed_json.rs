use std::path::Path;

use chrono::Duration;

use crate::analysis::timeline::parse_feed_date;
use crate::error::DashboardError;
use crate::models::{CaseSeries, FeedRecord, Metric};

/// Parse the feed's JSON array of daily report objects.
pub fn parse_feed(data: &[u8]) -> Result<Vec<FeedRecord>, DashboardError> {
    let records: Vec<FeedRecord> = serde_json::from_slice(data)?;
    Ok(records)
}

/// Read a feed snapshot from a local JSON file.
pub fn read_feed_file(path: impl AsRef<Path>) -> Result<Vec<FeedRecord>, DashboardError> {
    let content = std::fs::read(path.as_ref())?;
    parse_feed(&content)
}

/// Write a feed snapshot to a local JSON file.
pub fn write_feed_file(
    records: &[FeedRecord],
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), DashboardError> {
    let content = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

/// Build the immutable time series for one metric from ordered feed records.
///
/// `region` filters the regional feed; `None` takes every record (the
/// national feed carries no region). Dates must be contiguous daily reports —
/// a gap, duplicate, or malformed date is a fatal validation failure, not
/// something to paper over.
pub fn series_from_records(
    records: &[FeedRecord],
    metric: Metric,
    region: Option<&str>,
) -> Result<CaseSeries, DashboardError> {
    let selected: Vec<&FeedRecord> = match region {
        Some(name) => records
            .iter()
            .filter(|r| r.denominazione_regione.as_deref() == Some(name))
            .collect(),
        None => records.iter().collect(),
    };

    if selected.is_empty() {
        return match region {
            Some(name) => Err(DashboardError::NotFound(format!(
                "No feed records for region '{name}'"
            ))),
            None => Err(DashboardError::InsufficientData(
                "Feed contains no records".to_string(),
            )),
        };
    }

    let first_date = parse_feed_date(&selected[0].data)?.date();
    for (i, record) in selected.iter().enumerate() {
        let date = parse_feed_date(&record.data)?.date();
        let expected = first_date + Duration::days(i as i64);
        if date != expected {
            return Err(DashboardError::ValidationError(format!(
                "Feed day {i} reports {date}, expected {expected} (gap or out-of-order report)"
            )));
        }
    }

    let values = selected.iter().map(|r| r.value(metric)).collect();
    let name = format!("{} - {}", region.unwrap_or("Italia"), metric.label());

    tracing::debug!(
        metric = %metric,
        region = region.unwrap_or("national"),
        days = selected.len(),
        "built case series"
    );

    Ok(CaseSeries::new(
        name,
        metric,
        region.map(str::to_string),
        first_date,
        values,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, region: Option<&str>, cases: f64) -> FeedRecord {
        FeedRecord {
            data: date.to_string(),
            denominazione_regione: region.map(str::to_string),
            totale_casi: cases,
            deceduti: cases / 10.0,
            dimessi_guariti: cases / 5.0,
        }
    }

    fn national_records() -> Vec<FeedRecord> {
        vec![
            record("2020-02-24 18:00:00", None, 229.0),
            record("2020-02-25 18:00:00", None, 322.0),
            record("2020-02-26 18:00:00", None, 400.0),
            record("2020-02-27 18:00:00", None, 650.0),
        ]
    }

    #[test]
    fn test_parse_feed_array() {
        let json = r#"[
            {"data": "2020-02-24T18:00:00", "totale_casi": 229, "deceduti": 7, "dimessi_guariti": 1},
            {"data": "2020-02-25T18:00:00", "totale_casi": 322, "deceduti": 10, "dimessi_guariti": 1}
        ]"#;
        let records = parse_feed(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].totale_casi, 322.0);
    }

    #[test]
    fn test_parse_feed_rejects_malformed_json() {
        assert!(parse_feed(b"{not json").is_err());
    }

    #[test]
    fn test_series_from_national_records() {
        let series =
            series_from_records(&national_records(), Metric::TotalCases, None).unwrap();
        assert_eq!(series.day_count(), 4);
        assert_eq!(
            series.first_date,
            NaiveDate::from_ymd_opt(2020, 2, 24).unwrap()
        );
        assert_eq!(series.values, vec![229.0, 322.0, 400.0, 650.0]);
        assert_eq!(series.name, "Italia - Total cases");
        assert_eq!(series.region, None);
    }

    #[test]
    fn test_series_selects_metric() {
        let series = series_from_records(&national_records(), Metric::Deaths, None).unwrap();
        assert_eq!(series.values[0], 22.9);
    }

    #[test]
    fn test_series_from_regional_records_filters() {
        let records = vec![
            record("2020-02-24 18:00:00", Some("Lombardia"), 172.0),
            record("2020-02-24 18:00:00", Some("Veneto"), 33.0),
            record("2020-02-25 18:00:00", Some("Lombardia"), 240.0),
            record("2020-02-25 18:00:00", Some("Veneto"), 43.0),
        ];
        let series =
            series_from_records(&records, Metric::TotalCases, Some("Lombardia")).unwrap();
        assert_eq!(series.values, vec![172.0, 240.0]);
        assert_eq!(series.region.as_deref(), Some("Lombardia"));
        assert_eq!(series.name, "Lombardia - Total cases");
    }

    #[test]
    fn test_series_unknown_region_not_found() {
        let records = vec![record("2020-02-24 18:00:00", Some("Lombardia"), 172.0)];
        let err =
            series_from_records(&records, Metric::TotalCases, Some("Molise")).unwrap_err();
        assert!(matches!(err, DashboardError::NotFound(_)));
    }

    #[test]
    fn test_series_empty_feed_errors() {
        let err = series_from_records(&[], Metric::TotalCases, None).unwrap_err();
        assert!(matches!(err, DashboardError::InsufficientData(_)));
    }

    #[test]
    fn test_series_gap_in_dates_is_fatal() {
        let records = vec![
            record("2020-02-24 18:00:00", None, 229.0),
            record("2020-02-26 18:00:00", None, 400.0), // 25th missing
        ];
        let err = series_from_records(&records, Metric::TotalCases, None).unwrap_err();
        assert!(matches!(err, DashboardError::ValidationError(_)));
    }

    #[test]
    fn test_series_malformed_date_is_fatal() {
        let records = vec![record("yesterday", None, 1.0)];
        let err = series_from_records(&records, Metric::TotalCases, None).unwrap_err();
        assert!(matches!(err, DashboardError::ParseError(_)));
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.json");
        let records = national_records();
        write_feed_file(&records, &path, true).unwrap();
        let back = read_feed_file(&path).unwrap();
        assert_eq!(back.len(), records.len());
        assert_eq!(back[0].totale_casi, 229.0);
    }
}
