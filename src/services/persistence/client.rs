use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("persistence request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("persistence server returned {0}")]
    Status(StatusCode),
    #[error("persistence rejected the record: {0}")]
    Rejected(String),
}

/// Lightweight answer record. The category travels under the `religion` key on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub headline: String,
    pub question: String,
    #[serde(rename = "selectedOption")]
    pub selected_option: String,
    #[serde(rename = "religion")]
    pub category: String,
}

/// Full poll record kept for analytics and later rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollRecord {
    pub headline: String,
    pub description: String,
    #[serde(rename = "religion")]
    pub category: String,
    pub poll_question: String,
    pub options: Vec<String>,
    pub user_choice: String,
}

/// Primary destination.
#[async_trait]
pub trait AnswerStore: Send + Sync {
    async fn save_answer(&self, record: &AnswerRecord) -> Result<(), PersistError>;
}

/// Secondary destination.
#[async_trait]
pub trait PollArchive: Send + Sync {
    async fn save_poll(&self, record: &PollRecord) -> Result<(), PersistError>;
}

fn build_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_default()
}

#[derive(Clone)]
pub struct HttpAnswerStore {
    client: Client,
    url: String,
}

impl HttpAnswerStore {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            url: url.into(),
        }
    }
}

#[async_trait]
impl AnswerStore for HttpAnswerStore {
    async fn save_answer(&self, record: &AnswerRecord) -> Result<(), PersistError> {
        let response = self.client.post(&self.url).json(record).send().await?;
        if !response.status().is_success() {
            return Err(PersistError::Status(response.status()));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct SavePollResponse {
    success: bool,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct HttpPollArchive {
    client: Client,
    url: String,
}

impl HttpPollArchive {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            url: url.into(),
        }
    }
}

#[async_trait]
impl PollArchive for HttpPollArchive {
    async fn save_poll(&self, record: &PollRecord) -> Result<(), PersistError> {
        let response = self.client.post(&self.url).json(record).send().await?;
        if !response.status().is_success() {
            return Err(PersistError::Status(response.status()));
        }

        let body: SavePollResponse = response.json().await?;
        if !body.success {
            let reason = body
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(PersistError::Rejected(reason));
        }

        debug!("Poll record stored: {:?}", body.data);
        Ok(())
    }
}
