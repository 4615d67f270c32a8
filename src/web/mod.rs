mod handlers;
mod state;

use actix_web::{web, App, HttpServer};
use state::AppState;

use crate::models::CaseSeries;

/// Serve the dashboard. `series` is the fetch-once data, shared read-only
/// across every request for the life of the process.
pub async fn start_server(port: u16, series: Vec<CaseSeries>) -> std::io::Result<()> {
    let data = web::Data::new(AppState::new(series));

    tracing::info!(port, "starting dashboard server on http://localhost:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            // Static files
            .route("/", web::get().to(handlers::index_html))
            .route("/app.js", web::get().to(handlers::app_js))
            .route("/style.css", web::get().to(handlers::style_css))
            // API routes
            .route("/api/series", web::get().to(handlers::series_info))
            .route("/api/chart", web::get().to(handlers::chart))
            .route("/api/increments", web::get().to(handlers::increments))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
