//! HTTP routes for conversation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{generate_code, get_conversation, send_answer, start_conversation};
use crate::adapters::http::state::AppState;

pub fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(start_conversation))
        .route("/:id", get(get_conversation))
        .route("/:id/messages", post(send_answer))
        .route("/:id/generate", post(generate_code))
}
