use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::poll::types::ParsedPoll;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("translation server returned {0}")]
    Status(StatusCode),
    #[error("translation reply had no text")]
    Empty,
}

#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError>;
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    #[serde(rename = "targetLang")]
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText", default)]
    translated_text: Option<String>,
}

#[derive(Clone)]
pub struct HttpTranslator {
    client: Client,
    url: String,
}

impl HttpTranslator {
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
impl TranslationService for HttpTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .post(&self.url)
            .json(&TranslateRequest { text, target_lang })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslateError::Status(response.status()));
        }

        let body: TranslateResponse = response.json().await?;
        match body.translated_text {
            Some(t) if !t.trim().is_empty() => Ok(t),
            _ => Err(TranslateError::Empty),
        }
    }
}

/// Outcome of a best-effort translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translated {
    Translated(String),
    /// The service failed; this is the caller's original text.
    Original(String),
}

impl Translated {
    pub fn into_text(self) -> String {
        match self {
            Translated::Translated(t) | Translated::Original(t) => t,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Translated::Original(_))
    }
}

/// Wraps a [`TranslationService`] so that failures never block the poll flow.
#[derive(Clone)]
pub struct Translator {
    service: Arc<dyn TranslationService>,
}

impl Translator {
    pub fn new(service: Arc<dyn TranslationService>) -> Self {
        Self { service }
    }

    pub async fn translate_text(&self, text: &str, target_lang: &str) -> Translated {
        match self.service.translate(text, target_lang).await {
            Ok(t) => Translated::Translated(t),
            Err(e) => {
                tracing::warn!("Translation to {} failed, keeping original: {}", target_lang, e);
                Translated::Original(text.to_string())
            }
        }
    }

    /// Question and every option are translated independently; each falls back on its own.
    pub async fn translate_poll(&self, poll: &ParsedPoll, target_lang: &str) -> ParsedPoll {
        let question = self.translate_text(&poll.question, target_lang).await.into_text();

        let mut options = Vec::with_capacity(poll.options.len());
        for opt in &poll.options {
            options.push(self.translate_text(opt, target_lang).await.into_text());
        }

        ParsedPoll { question, options }
    }
}
