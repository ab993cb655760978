//! HTTP front end: the HTML dashboard page and a JSON summary endpoint.
//!
//! Every request re-runs the full pipeline against a fresh connection.

mod error;
mod html;
mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AsyncPnlDashboard;

pub use error::AppError;
pub use html::render_page;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    pub dashboard: AsyncPnlDashboard,
}

/// Build the dashboard router.
pub fn router(dashboard: AsyncPnlDashboard) -> Router {
    let state = Arc::new(AppState { dashboard });

    Router::new()
        .route("/", get(routes::index))
        .route("/api/summary", get(routes::summary))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve the dashboard until the process is stopped.
pub async fn serve(dashboard: AsyncPnlDashboard, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dashboard listening");
    axum::serve(listener, router(dashboard)).await
}
