//! Axum handlers for `/api/*` routes.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, info};

use super::AppState;
use super::request::{ChatRequest, EmptyQuestion};

// ── Response types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatResponse {
    message: AssistantMessage,
}

#[derive(Debug, Serialize)]
struct AssistantMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct TermSummary<'a> {
    slug: &'a str,
    term: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    en: Option<&'a str>,
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub(super) enum ApiError {
    /// 400: no usable question text in the request.
    EmptyQuestion,
    /// 500: the answer service failed; carries the underlying message.
    Internal(String),
}

impl From<EmptyQuestion> for ApiError {
    fn from(_: EmptyQuestion) -> Self {
        ApiError::EmptyQuestion
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::EmptyQuestion => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": "empty_question" }))).into_response()
            }
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": message })),
            )
                .into_response(),
        }
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// POST /api/chat
///
/// The body is taken as raw bytes so malformed JSON degrades to an empty
/// request (and a 400) instead of axum's extractor rejection.
pub(super) async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let question = ChatRequest::from_body(&body).question()?;
    debug!(question_len = question.as_str().len(), "chat request");

    let answer = state.assistant.ask(question.as_str()).await.map_err(|e| {
        error!("/api/chat error: {e}");
        ApiError::Internal(e.to_string())
    })?;

    info!(answer_len = answer.len(), "chat answered");
    let body = ChatResponse {
        message: AssistantMessage { role: "assistant", content: answer },
    };
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// GET /api/health
pub(super) async fn health(State(state): State<AppState>) -> Response {
    let terms = state.assistant.glossary().store().len();
    (StatusCode::OK, Json(json!({ "status": "ok", "terms": terms }))).into_response()
}

/// GET /api/terms: glossary summary for the page's hint line.
pub(super) async fn terms(State(state): State<AppState>) -> Response {
    let glossary = state.assistant.glossary();
    let terms: Vec<TermSummary<'_>> = glossary
        .store()
        .entries()
        .map(|e| TermSummary {
            slug: &e.slug,
            term: &e.display_name,
            en: e.english_label.as_deref(),
        })
        .collect();
    (StatusCode::OK, Json(terms)).into_response()
}
