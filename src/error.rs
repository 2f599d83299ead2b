//! Startup and server-loop errors. Per-request failures are mapped to HTTP
//! responses in `http::api` and never reach this type.

use thiserror::Error;

use crate::glossary::GlossaryError;
use crate::llm::ProviderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    #[error("llm error: {0}")]
    Llm(#[from] ProviderError),

    #[error("http error: {0}")]
    Http(String),
}
