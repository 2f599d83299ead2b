//! Chat request parsing.
//!
//! The body is parsed once, leniently, into [`ChatRequest`]; question
//! extraction then yields a validated [`Question`] or [`EmptyQuestion`].
//! Handlers never look at raw JSON.
//!
//! Accepted shapes:
//!
//! ```text
//! { "prompt": "..." }
//! { "messages": [{ "role": "user", "content": "..." }, ...] }
//! ```
//!
//! Unparseable bodies, non-object bodies and fields of the wrong type are
//! treated as absent.

use serde_json::Value;

/// One entry of `messages`. Fields of the wrong type are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

/// Typed view of a chat request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub prompt: Option<String>,
    pub messages: Vec<IncomingMessage>,
}

/// A non-empty, trimmed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// No usable question in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyQuestion;

impl ChatRequest {
    /// Parse raw body bytes. Malformed input gives an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::debug!(error = %e, "unparseable chat body, treating as empty");
                Self::default()
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let prompt = obj.get("prompt").and_then(Value::as_str).map(str::to_string);
        let messages = obj
            .get("messages")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(IncomingMessage::from_value).collect())
            .unwrap_or_default();
        Self { prompt, messages }
    }

    /// The last user message with string content; when there is none (or it
    /// is the empty string), `prompt`. The result must be non-blank.
    pub fn question(&self) -> Result<Question, EmptyQuestion> {
        let from_messages = self
            .messages
            .iter()
            .rev()
            .find(|m| m.role.as_deref() == Some("user") && m.content.is_some())
            .and_then(|m| m.content.as_deref())
            .filter(|c| !c.is_empty());

        let raw = from_messages.or(self.prompt.as_deref()).unwrap_or_default();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyQuestion);
        }
        Ok(Question(trimmed.to_string()))
    }
}

impl IncomingMessage {
    fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self { role: field("role"), content: field("content") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(body: &str) -> Result<Question, EmptyQuestion> {
        ChatRequest::from_body(body.as_bytes()).question()
    }

    #[test]
    fn prompt_only() {
        assert_eq!(question(r#"{"prompt":"  çka është llaku? "}"#).unwrap().as_str(), "çka është llaku?");
    }

    #[test]
    fn last_user_message_wins() {
        let body = json!({
            "messages": [
                { "role": "user", "content": "e para" },
                { "role": "assistant", "content": "hi" },
                { "role": "user", "content": "çka është fuga?" }
            ]
        });
        let req = ChatRequest::from_value(&body);
        assert_eq!(req.question().unwrap().as_str(), "çka është fuga?");
    }

    #[test]
    fn messages_take_priority_over_prompt() {
        let body = r#"{"prompt":"prompt","messages":[{"role":"user","content":"mesazh"}]}"#;
        assert_eq!(question(body).unwrap().as_str(), "mesazh");
    }

    #[test]
    fn no_user_message_falls_back_to_prompt() {
        let body = r#"{"prompt":"beton?","messages":[{"role":"assistant","content":"hi"}]}"#;
        assert_eq!(question(body).unwrap().as_str(), "beton?");
    }

    #[test]
    fn empty_user_content_falls_back_to_prompt() {
        let body = r#"{"prompt":"beton?","messages":[{"role":"user","content":""}]}"#;
        assert_eq!(question(body).unwrap().as_str(), "beton?");
    }

    #[test]
    fn blank_user_content_does_not_fall_back() {
        let body = r#"{"prompt":"beton?","messages":[{"role":"user","content":"   "}]}"#;
        assert_eq!(question(body), Err(EmptyQuestion));
    }

    #[test]
    fn non_string_content_skipped() {
        let body = r#"{"messages":[{"role":"user","content":"llak"},{"role":"user","content":42},null,"x"]}"#;
        assert_eq!(question(body).unwrap().as_str(), "llak");
    }

    #[test]
    fn empty_inputs_rejected() {
        assert_eq!(question(r#"{"prompt":"   "}"#), Err(EmptyQuestion));
        assert_eq!(question(r#"{"messages":[]}"#), Err(EmptyQuestion));
        assert_eq!(question("{}"), Err(EmptyQuestion));
        assert_eq!(question(""), Err(EmptyQuestion));
    }

    #[test]
    fn malformed_json_is_empty_request() {
        assert_eq!(ChatRequest::from_body(b"{not json"), ChatRequest::default());
        assert_eq!(question("{not json"), Err(EmptyQuestion));
    }

    #[test]
    fn wrong_types_ignored() {
        let req = ChatRequest::from_body(br#"{"prompt":7,"messages":"user"}"#);
        assert_eq!(req, ChatRequest::default());
        let req = ChatRequest::from_body(br#"["prompt"]"#);
        assert_eq!(req, ChatRequest::default());
    }
}
