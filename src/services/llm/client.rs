use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation server returned {0}")]
    Status(StatusCode),
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    #[error("generation task ended unexpectedly: {0}")]
    Aborted(String),
}

/// The text-generation collaborator. Stateless and idempotent, so a call
/// whose result is no longer wanted can simply be left to finish.
#[async_trait]
pub trait PollGenerator: Send + Sync {
    async fn generate(&self, message: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the chat endpoint (`{message}` in, `{message}` out).
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    url: String,
}

impl ChatClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl PollGenerator for ChatClient {
    async fn generate(&self, message: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequest { message })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::Status(response.status()));
        }

        // A reply without a message is not a transport failure; it parses to the fallback poll.
        let body: ChatResponse = response.json().await?;
        Ok(body.message.unwrap_or_default())
    }
}
