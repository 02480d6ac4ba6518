use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("model service request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
    #[error("model service returned no choices")]
    EmptyResponse,
    #[error("environment variable {0} is not set (API key)")]
    MissingKey(String),
}

/// One role-tagged message in a chat exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Response constraint for a completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseFormat {
    /// Free-form text.
    Text,
    /// Response constrained to a single JSON object.
    JsonObject,
}

/// Abstraction over the chat-completions service.
///
/// The scorer depends on this trait rather than the HTTP client directly,
/// so tests can substitute a canned-response stub.
pub trait ChatService {
    /// Submit one turn: a message list in, one assistant message out.
    fn complete(
        &self,
        messages: &[ChatMessage],
        format: ResponseFormat,
    ) -> Result<ChatMessage, ServiceError>;
}

/// Chat-completions request body (OpenAI wire format).
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<FormatBody>,
}

#[derive(Debug, Serialize)]
struct FormatBody {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Blocking HTTP client for an OpenAI-compatible chat-completions endpoint.
///
/// Constructed once at startup and passed by reference to every scoring
/// call; it holds no mutable state.
#[derive(Debug)]
pub struct ChatClient {
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Build a client, reading the API key from the environment variable
    /// named by `key_env`.
    pub fn from_env(base_url: &str, key_env: &str, model: &str) -> Result<Self, ServiceError> {
        let api_key = std::env::var(key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ServiceError::MissingKey(key_env.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ChatService for ChatClient {
    fn complete(
        &self,
        messages: &[ChatMessage],
        format: ResponseFormat,
    ) -> Result<ChatMessage, ServiceError> {
        let body = ChatRequest {
            model: &self.model,
            messages,
            response_format: match format {
                ResponseFormat::Text => None,
                ResponseFormat::JsonObject => Some(FormatBody { kind: "json_object" }),
            },
        };

        let url = format!("{}/chat/completions", self.base_url);
        log::debug!("POST {url} ({} messages)", messages.len());

        let response: ChatResponse = ureq::post(&url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body)
            .map_err(Box::new)?
            .body_mut()
            .read_json()
            .map_err(Box::new)?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or(ServiceError::EmptyResponse)
    }
}
