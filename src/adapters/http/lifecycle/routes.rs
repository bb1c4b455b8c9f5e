//! HTTP routes for lifecycle test endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_test_run, run_tests};
use crate::adapters::http::state::AppState;

pub fn lifecycle_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(run_tests))
        .route("/:id", get(get_test_run))
}
