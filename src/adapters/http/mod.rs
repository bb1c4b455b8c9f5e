//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers and routes. They share
//! one [`AppState`] and the [`ApiError`] error body.

pub mod conversation;
pub mod error;
pub mod lifecycle;
pub mod service;
mod state;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Assembles every endpoint into one router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/conversations", conversation::conversation_routes())
        .nest("/services", service::service_routes())
        .nest("/tests", lifecycle::lifecycle_routes())
        .with_state(state)
}
