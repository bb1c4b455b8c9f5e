//! HTTP routes for service endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_artifacts, list_services};
use crate::adapters::http::state::AppState;

pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services))
        .route("/:id/artifacts", get(get_artifacts))
}
