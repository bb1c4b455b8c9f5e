//! HTTP handlers for lifecycle test endpoints.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::OrchestrateCommand;
use crate::domain::foundation::TestRunId;

use super::dto::{TestRequest, TestRunResponse};

/// POST /tests - Run a lifecycle test
pub async fn run_tests(
    State(state): State<AppState>,
    Json(req): Json<TestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .orchestrator
        .handle(OrchestrateCommand {
            test_type: req.test_type,
            target: req.target,
        })
        .await?;
    Ok(Json(TestRunResponse::from(report)))
}

/// GET /tests/:id - A persisted test run
pub async fn get_test_run(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let test_run_id: TestRunId = id
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid test run ID: {}", id)))?;
    let run = state.orchestrator.find_run(test_run_id).await?;
    Ok(Json(TestRunResponse::from(run)))
}
