//! Answer service: glossary priming plus one completion round-trip.
//!
//! ```text
//! question ──► match_terms ──► build_context ──► [system, system(context)?, user] ──► LLM
//! ```
//!
//! The service expects a non-empty trimmed question; the HTTP layer rejects
//! empty ones before they get here.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::glossary::Glossary;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider, ProviderError};

/// Persona and answering rules.
pub const SYSTEM_PROMPT: &str = "Ti je 'Ndërtimtari Bot' – një asistent që shpjegon terma ndërtimi në shqip, \
me emrin teknik anglisht në kllapa kur është e dobishme. Jep shpjegim të shkurtër, \
si përdoret, materiale tipike dhe një këshillë sigurie nëse ka rrezik. Nëse nuk je i sigurt, thuaj hapur.";

/// Heading for the glossary context system message.
pub const CONTEXT_HEADER: &str = "Informacion bazë për terma që mund të jenë të rëndësishëm:";

/// Returned when the model sends back no usable text.
pub const NO_ANSWER: &str = "(asnjë përgjigje)";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("{0}")]
    Upstream(#[from] ProviderError),
}

/// Stateless per call; clone freely.
#[derive(Debug, Clone)]
pub struct AnswerService {
    glossary: Arc<Glossary>,
    provider: LlmProvider,
    max_tokens: u32,
    temperature: f32,
}

impl AnswerService {
    pub fn new(glossary: Arc<Glossary>, provider: LlmProvider, max_tokens: u32, temperature: f32) -> Self {
        Self { glossary, provider, max_tokens, temperature }
    }

    /// Build from the `[llm]` config section.
    pub fn from_config(glossary: Arc<Glossary>, provider: LlmProvider, config: &LlmConfig) -> Self {
        Self::new(glossary, provider, config.max_tokens, config.openai.temperature)
    }

    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// Answer `question`. Fails only when the completion request fails; an
    /// empty completion yields [`NO_ANSWER`].
    pub async fn ask(&self, question: &str) -> Result<String, AssistantError> {
        let slugs = self.glossary.match_terms(question);
        let context = self.glossary.build_context(&slugs);
        debug!(?slugs, context_len = context.len(), "glossary terms matched");

        let request = CompletionRequest {
            messages: build_messages(question, &context),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self.provider.complete(&request).await.map_err(|e| {
            warn!(provider = self.provider.name(), error = %e, "completion request failed");
            e
        })?;

        if let Some(usage) = response.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "completion usage"
            );
        }

        Ok(response.text.unwrap_or_else(|| NO_ANSWER.to_string()))
    }
}

/// Fixed instructions, the context block when there is one, then the question.
pub fn build_messages(question: &str, context: &str) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];
    if !context.is_empty() {
        messages.push(ChatMessage::system(format!("{CONTEXT_HEADER}\n{context}")));
    }
    messages.push(ChatMessage::user(question));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::dummy::DummyProvider;

    fn service() -> AnswerService {
        AnswerService::new(
            Arc::new(Glossary::builtin().unwrap()),
            LlmProvider::Dummy(DummyProvider),
            400,
            0.2,
        )
    }

    #[test]
    fn messages_without_context() {
        let msgs = build_messages("pershendetje", "");
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0], ChatMessage::system(SYSTEM_PROMPT));
        assert_eq!(msgs[1], ChatMessage::user("pershendetje"));
    }

    #[test]
    fn messages_with_context() {
        let msgs = build_messages("çka është fuga?", "• fugë: ...");
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1].role, "system");
        assert_eq!(msgs[1].content, format!("{CONTEXT_HEADER}\n• fugë: ..."));
        assert_eq!(msgs[2], ChatMessage::user("çka është fuga?"));
    }

    #[test]
    fn system_prompt_mentions_rules() {
        assert!(SYSTEM_PROMPT.contains("Ndërtimtari Bot"));
        assert!(SYSTEM_PROMPT.contains("anglisht në kllapa"));
        assert!(SYSTEM_PROMPT.contains("sigurie"));
        assert!(SYSTEM_PROMPT.contains("thuaj hapur"));
    }

    #[tokio::test]
    async fn ask_without_known_terms_still_answers() {
        let answer = service().ask("pershendetje").await.unwrap();
        assert_eq!(answer, "[echo] pershendetje");
    }

    #[tokio::test]
    async fn ask_with_terms_passes_question_through() {
        let answer = service().ask("Sa kushton epoksi dhe llak?").await.unwrap();
        assert_eq!(answer, "[echo] Sa kushton epoksi dhe llak?");
    }

    #[tokio::test]
    async fn upstream_failure_is_error() {
        let provider = crate::llm::providers::openai_compatible::OpenAiCompatibleProvider::new(
            // nothing listens on port 1
            "http://127.0.0.1:1/v1/chat/completions".into(),
            "test-model".into(),
            2,
            None,
        )
        .unwrap();
        let svc = AnswerService::new(
            Arc::new(Glossary::builtin().unwrap()),
            LlmProvider::OpenAiCompatible(provider),
            16,
            0.0,
        );
        let err = svc.ask("fuga").await.unwrap_err();
        assert!(matches!(err, AssistantError::Upstream(ProviderError::Request(_))));
    }
}
