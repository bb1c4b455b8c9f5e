//! HTTP error body and the mapping from error codes to status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::{
    ConversationError, GenerateCodeError, GetArtifactsError, OrchestrationError,
};
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::{GenerationError, StorageError};

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::ConversationNotFound
        | ErrorCode::ServiceNotFound
        | ErrorCode::ArtifactNotFound
        | ErrorCode::TestRunNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidState => StatusCode::CONFLICT,
        ErrorCode::UpstreamRateLimit => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::UpstreamAuthError | ErrorCode::UpstreamFailure => StatusCode::BAD_GATEWAY,
        ErrorCode::StorageFault | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// An error ready to be rendered as a JSON response.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: status_for(code),
            body: ErrorResponse::new(code, message),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.body = self.body.with_details(details);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.body.code, message = %self.body.message, "Request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::new(ErrorCode::StorageFault, err.to_string())
    }
}

impl From<ConversationError> for ApiError {
    fn from(err: ConversationError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<GenerateCodeError> for ApiError {
    fn from(err: GenerateCodeError) -> Self {
        let api = Self::new(err.code(), err.to_string());
        match err {
            GenerateCodeError::Generation(GenerationError::RateLimited { retry_after_secs }) => {
                api.with_details(serde_json::json!({ "retry_after_secs": retry_after_secs }))
            }
            _ => api,
        }
    }
}

impl From<GetArtifactsError> for ApiError {
    fn from(err: GetArtifactsError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<OrchestrationError> for ApiError {
    fn from(err: OrchestrationError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}
