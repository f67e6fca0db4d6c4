//! # Coinfolio Web
//!
//! HTTP surface for the portfolio dashboard.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | Rendered dashboard with net-worth metrics |
//! | `GET /api` | Aggregated accounts, products and orders as JSON |
//! | `GET /health` | `{"status":"ok"}` |
//!
//! Upstream failures map to `502 Bad Gateway` with an `{"error": ...}` body.

pub mod error;
pub mod render;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::WebError;
pub use state::AppState;

/// Router with tracing attached and state applied.
pub fn app(state: Arc<AppState>) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
