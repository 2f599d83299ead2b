//! Dummy LLM provider. Echoes the last user message back prefixed with
//! `[echo]`. Used for keyless local runs and for tests.

use crate::llm::{CompletionRequest, LlmResponse, ProviderError};

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse, ProviderError> {
        let content = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        Ok(LlmResponse {
            text: Some(format!("[echo] {content}")),
            usage: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    fn request(messages: Vec<ChatMessage>) -> CompletionRequest {
        CompletionRequest { messages, max_tokens: 16, temperature: 0.0 }
    }

    #[tokio::test]
    async fn complete_prefixes_echo() {
        let p = DummyProvider;
        let req = request(vec![ChatMessage::system("sys"), ChatMessage::user("hello")]);
        assert_eq!(p.complete(&req).await.unwrap().text.as_deref(), Some("[echo] hello"));
    }

    #[tokio::test]
    async fn complete_without_user_message() {
        let p = DummyProvider;
        let req = request(vec![ChatMessage::system("sys")]);
        assert_eq!(p.complete(&req).await.unwrap().text.as_deref(), Some("[echo] "));
    }

    #[tokio::test]
    async fn complete_usage_is_none() {
        let p = DummyProvider;
        let req = request(vec![ChatMessage::user("test")]);
        assert!(p.complete(&req).await.unwrap().usage.is_none());
    }
}
