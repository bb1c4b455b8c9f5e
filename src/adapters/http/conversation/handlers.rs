//! HTTP handlers for conversation endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::{AdvanceCommand, AdvanceResult, GenerateCodeCommand};
use crate::domain::foundation::{ConversationId, ServiceId};

use super::dto::{
    AdvanceResponse, AnswerRequest, ConversationResponse, GenerateRequest, GenerateResponse,
    QuestionResponse, StartConversationResponse,
};

fn parse_conversation_id(raw: &str) -> Result<ConversationId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid conversation ID: {}", raw)))
}

/// POST /conversations - Start a questionnaire
pub async fn start_conversation(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let started = state.conversations.start().await?;
    let response = StartConversationResponse {
        conversation_id: started.conversation_id.to_string(),
        question: QuestionResponse::new(started.question, started.total_steps),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /conversations/:id/messages - Answer the current question
pub async fn send_answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let conversation_id = parse_conversation_id(&id)?;
    let result = state
        .conversations
        .advance(AdvanceCommand {
            conversation_id,
            answer: req.answer,
        })
        .await?;

    let response = match result {
        AdvanceResult::NextQuestion {
            conversation_id,
            question,
            total_steps,
        } => AdvanceResponse::Active {
            conversation_id: conversation_id.to_string(),
            question: QuestionResponse::new(question, total_steps),
        },
        AdvanceResult::Completed {
            conversation_id,
            answers,
        } => AdvanceResponse::completed(conversation_id.to_string(), answers),
    };
    Ok(Json(response))
}

/// GET /conversations/:id - Conversation state and log
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let conversation_id = parse_conversation_id(&id)?;
    let conversation = state.conversations.get(conversation_id).await?;
    let total_steps = state.conversations.catalog().len();
    Ok(Json(ConversationResponse::new(&conversation, total_steps)))
}

/// POST /conversations/:id/generate - Generate code from collected answers
pub async fn generate_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<GenerateRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let conversation_id = parse_conversation_id(&id)?;
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let service_id = match req.service_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            raw.parse::<ServiceId>()
                .map_err(|_| ApiError::bad_request(format!("Invalid service ID: {}", raw)))?,
        ),
        None => None,
    };

    let result = state
        .generate_code
        .handle(GenerateCodeCommand {
            conversation_id,
            service_id,
        })
        .await?;
    Ok(Json(GenerateResponse::from(result)))
}
