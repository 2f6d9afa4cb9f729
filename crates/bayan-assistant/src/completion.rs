//! Remote completion endpoint used in AI mode.
//!
//! The endpoint is opaque: it receives the recent conversation and the
//! active locale and answers with free text. Prompting and provider choice
//! live behind it, not here.
//!
//! # Wire format
//!
//! ```text
//! POST <endpoint>
//! {"messages":[{"role":"user","content":"..."}],"locale":"en"}
//!
//! 200 OK
//! {"reply":"..."}
//! ```
//!
//! `message` is accepted in place of `reply`. Any non-2xx status, an
//! unparseable body, or a blank reply is a failure.

use std::time::Duration;

use async_trait::async_trait;
use bayan_core::models::locale::Locale;
use bayan_core::models::message::{Message, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AssistantError;

/// Most recent messages sent to the endpoint. Older turns stay in the
/// stored history but are not sent.
pub const MAX_CONTEXT_TURNS: usize = 12;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<CompletionMessage>,
    pub locale: Locale,
}

impl CompletionRequest {
    /// Build a request from stored history, keeping the last
    /// [`MAX_CONTEXT_TURNS`] messages with their content trimmed.
    pub fn from_history(history: &[Message], locale: Locale) -> Self {
        let start = history.len().saturating_sub(MAX_CONTEXT_TURNS);
        let messages = history[start..]
            .iter()
            .map(|m| CompletionMessage {
                role: m.role,
                content: m.content.trim().to_string(),
            })
            .collect();

        Self { messages, locale }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(alias = "message")]
    reply: Option<String>,
}

/// Something that can answer a [`CompletionRequest`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError>;
}

/// [`CompletionClient`] that POSTs JSON to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpCompletionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AssistantError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssistantError::Config(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
        debug!(
            endpoint = %self.endpoint,
            turns = request.messages.len(),
            locale = %request.locale,
            "requesting completion"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        parse_reply(&body)
    }
}

/// Extract the reply text from a response body.
pub fn parse_reply(body: &[u8]) -> Result<String, AssistantError> {
    let parsed: CompletionResponse = serde_json::from_slice(body)
        .map_err(|e| AssistantError::ResponseParse(e.to_string()))?;

    parsed
        .reply
        .map(|reply| reply.trim().to_string())
        .filter(|reply| !reply.is_empty())
        .ok_or(AssistantError::EmptyReply)
}
