//! HTTP handlers for service endpoints.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::ServiceId;

use super::dto::{ArtifactsResponse, ServiceListResponse, ServiceResponse};

/// GET /services - Services owned by the acting principal
pub async fn list_services(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let services: Vec<ServiceResponse> = state
        .list_services
        .handle()
        .await?
        .into_iter()
        .map(ServiceResponse::from)
        .collect();
    Ok(Json(ServiceListResponse {
        count: services.len(),
        services,
    }))
}

/// GET /services/:id/artifacts - Most recent generated code for a service
pub async fn get_artifacts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let service_id: ServiceId = id
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid service ID: {}", id)))?;
    let set = state.get_artifacts.handle(service_id).await?;
    Ok(Json(ArtifactsResponse::from(set)))
}
