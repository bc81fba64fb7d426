//! Remote chat endpoint.
//!
//! The endpoint receives the whole conversation as `{ "messages": [...] }`
//! and answers with `{ "response": "...", "symptomToLog"?: {...} }`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::ChatConfig;
use crate::symptoms::types::ChatTurn;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    #[error("invalid response: {0}")]
    Decode(String),
}

/// A successful endpoint answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    /// Raw observation payload, validated by the session before it is stored.
    #[serde(rename = "symptomToLog", default)]
    pub symptom_to_log: Option<serde_json::Value>,
}

impl ChatReply {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            symptom_to_log: None,
        }
    }
}

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    messages: &'a [ChatTurn],
}

#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Send the full history and wait for the reply.
    async fn send(&self, history: &[ChatTurn]) -> Result<ChatReply, ChatError>;
}

/// [`ChatEndpoint`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpChatEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpChatEndpoint {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        Self::new(config.endpoint.clone(), config.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatEndpoint for HttpChatEndpoint {
    async fn send(&self, history: &[ChatTurn]) -> Result<ChatReply, ChatError> {
        tracing::debug!(url = %self.url, turns = history.len(), "posting conversation");

        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequestBody { messages: history })
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status.as_u16()));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ChatError::Decode(e.to_string()))
    }
}
