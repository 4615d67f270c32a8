use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::analysis::{Analyzer, DEFAULT_FORECAST_DAYS, MIN_TRAINING_WINDOW};
use crate::error::DashboardError;
use crate::models::Metric;

use super::state::AppState;

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug)]
pub(crate) struct WebError(DashboardError);

impl From<DashboardError> for WebError {
    fn from(e: DashboardError) -> Self {
        WebError(e)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_type) = match &self.0 {
            DashboardError::ValidationError(_) | DashboardError::ParseError(_) => {
                (actix_web::http::StatusCode::BAD_REQUEST, "Bad Request")
            }
            DashboardError::NotFound(_) => (actix_web::http::StatusCode::NOT_FOUND, "Not Found"),
            DashboardError::InsufficientData(_) => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "Unprocessable Entity",
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        };
        HttpResponse::build(status).json(ErrorBody {
            error: error_type.to_string(),
            details: self.0.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_metric(raw: Option<&str>) -> Result<Metric, DashboardError> {
    match raw {
        Some(s) => s.parse(),
        None => Ok(Metric::TotalCases),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct SeriesInfo {
    metric: Metric,
    name: String,
    first_date: String,
    day_count: usize,
    min_window: usize,
}

/// Metadata for every series the feed provided, so the page can size its
/// slider and populate the metric dropdown.
pub async fn series_info(state: web::Data<AppState>) -> HttpResponse {
    let info: Vec<SeriesInfo> = state
        .all()
        .iter()
        .map(|s| SeriesInfo {
            metric: s.metric,
            name: s.name.clone(),
            first_date: s.first_date.to_string(),
            day_count: s.day_count(),
            min_window: MIN_TRAINING_WINDOW,
        })
        .collect();
    HttpResponse::Ok().json(info)
}

#[derive(Deserialize)]
pub struct ChartQuery {
    metric: Option<String>,
    window: Option<usize>,
    horizon: Option<usize>,
    range_start: Option<String>,
    range_end: Option<String>,
}

/// One render: fit the chart models over the requested training window and
/// return raw data, converged projections, fit errors, and the y-axis hint.
pub async fn chart(
    state: web::Data<AppState>,
    query: web::Query<ChartQuery>,
) -> Result<HttpResponse, WebError> {
    let metric = parse_metric(query.metric.as_deref())?;
    let series = state.get(metric).ok_or_else(|| {
        WebError(DashboardError::NotFound(format!(
            "No series for metric '{metric}'"
        )))
    })?;

    let window = query.window.unwrap_or_else(|| series.day_count());
    let horizon = query.horizon.unwrap_or(DEFAULT_FORECAST_DAYS);
    let axis_range = match (&query.range_start, &query.range_end) {
        (Some(start), Some(end)) => Some((start.as_str(), end.as_str())),
        _ => None,
    };

    let view = Analyzer::new(series).chart(window, horizon, axis_range)?;
    Ok(HttpResponse::Ok().json(view))
}

#[derive(Deserialize)]
pub struct IncrementsQuery {
    metric: Option<String>,
}

/// Day-over-day fractional growth series for the auxiliary chart.
pub async fn increments(
    state: web::Data<AppState>,
    query: web::Query<IncrementsQuery>,
) -> Result<HttpResponse, WebError> {
    let metric = parse_metric(query.metric.as_deref())?;
    let series = state.get(metric).ok_or_else(|| {
        WebError(DashboardError::NotFound(format!(
            "No series for metric '{metric}'"
        )))
    })?;
    Ok(HttpResponse::Ok().json(Analyzer::new(series).daily_increment_series()))
}

// ---------------------------------------------------------------------------
// Static file handlers
// ---------------------------------------------------------------------------

pub async fn index_html() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../static/index.html"))
}

pub async fn app_js() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(include_str!("../../static/app.js"))
}

pub async fn style_css() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(include_str!("../../static/style.css"))
}
