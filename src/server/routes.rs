use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Json};
use serde_json::Value;

use super::error::AppError;
use super::html::render_page;
use super::AppState;

/// GET /
///
/// The dashboard page. Any query string (e.g. `?refresh=true`) is ignored;
/// every load recomputes from the database.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let report = state.dashboard.report().await?;
    let settings = state.dashboard.settings();
    Ok(Html(render_page(&report, &settings.server.title, &settings.labels)))
}

/// GET /api/summary
///
/// The same report as JSON, tagged by `status` (`ok` or `no_data`).
pub async fn summary(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let report = state.dashboard.report().await?;
    Ok(Json(serde_json::to_value(&report).map_err(crate::PnlError::from)?))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
