use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },
}

/// Collaborator endpoints and limits. Every field has a default; the
/// environment overrides individual entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    pub chat_url: String,
    pub answer_url: String,
    pub record_url: String,
    pub translate_url: String,
    pub timeout: Duration,
    /// When set, the generated poll is also shown translated into this language.
    pub target_lang: Option<String>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            chat_url: format!("{}/api/chat", DEFAULT_BASE_URL),
            answer_url: format!("{}/api/savePollAnswer", DEFAULT_BASE_URL),
            record_url: format!("{}/components/save-poll", DEFAULT_BASE_URL),
            translate_url: format!("{}/api/translate", DEFAULT_BASE_URL),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            target_lang: None,
        }
    }
}

impl PollConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(v) = get("FAITH_POLL_CHAT_URL") {
            config.chat_url = v;
        }
        if let Some(v) = get("FAITH_POLL_ANSWER_URL") {
            config.answer_url = v;
        }
        if let Some(v) = get("FAITH_POLL_RECORD_URL") {
            config.record_url = v;
        }
        if let Some(v) = get("FAITH_POLL_TRANSLATE_URL") {
            config.translate_url = v;
        }
        if let Some(v) = get("FAITH_POLL_TIMEOUT_SECS") {
            let secs = v
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    key: "FAITH_POLL_TIMEOUT_SECS",
                    value: v.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }
        config.target_lang = get("FAITH_POLL_TARGET_LANG");

        Ok(config)
    }
}
