//! Axum HTTP channel serving the chat page and the chat API.
//!
//! ## URL layout
//!
//! ```text
//! POST /api/chat       — { prompt } | { messages } → { message: { role, content } }
//! GET  /api/health
//! GET  /api/terms      — glossary summary
//! GET  /favicon.ico    → 204
//! GET  /               → chat page
//! ```
//!
//! The server loop is wired to a [`CancellationToken`] for graceful
//! shutdown.

mod api;
pub mod request;
mod ui;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::assistant::AnswerService;
use crate::error::AppError;

// ── Shared request state ──────────────────────────────────────────────────────

/// Axum router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone: the glossary is behind an `Arc` and the provider client
/// is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub assistant: AnswerService,
}

impl AppState {
    pub fn new(assistant: AnswerService) -> Self {
        Self { assistant }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(api::chat))
        .route("/api/health", get(api::health))
        .route("/api/terms", get(api::terms))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .route("/", get(ui::root))
        .with_state(state)
}

// ── Server loop ───────────────────────────────────────────────────────────────

/// Bind `bind_addr` and serve until `shutdown` is cancelled.
pub async fn serve(
    bind_addr: &str,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Http(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "http channel listening");
    serve_on(listener, state, shutdown).await
}

/// Serve on an already-bound listener. Tests bind to port 0 and pass the
/// listener in.
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Http(format!("server error: {e}")))?;

    info!("http channel shut down");
    Ok(())
}
