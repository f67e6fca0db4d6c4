use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use coinfolio_core::AggregatedView;

use crate::error::WebError;
use crate::render;
use crate::state::AppState;

/// Assemble the dashboard router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard))
        .route("/api", get(api))
        .route("/health", get(health))
}

/// GET /: rendered dashboard with net-worth metrics.
async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    let dashboard = state.service.load_dashboard(false).await?;
    Ok(Html(render::dashboard_page(&dashboard)))
}

/// GET /api: aggregated accounts, products and orders with raw records.
async fn api(State(state): State<Arc<AppState>>) -> Result<Json<AggregatedView>, WebError> {
    let view = state.service.load_view(true).await?;
    Ok(Json(view))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
