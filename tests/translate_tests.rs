use async_trait::async_trait;
use faith_poll::poll::types::ParsedPoll;
use faith_poll::services::translate::{HttpTranslator, TranslateError, Translated, TranslationService, Translator};
use std::sync::Arc;
use std::time::Duration;

/// Upper-cases text, except anything containing "fail".
struct ShoutingService;

#[async_trait]
impl TranslationService for ShoutingService {
    async fn translate(&self, text: &str, _target_lang: &str) -> Result<String, TranslateError> {
        if text.contains("fail") {
            return Err(TranslateError::Empty);
        }
        Ok(text.to_uppercase())
    }
}

#[tokio::test]
async fn test_successful_translation() {
    let translator = Translator::new(Arc::new(ShoutingService));
    let out = translator.translate_text("peace", "es").await;
    assert_eq!(out, Translated::Translated("PEACE".to_string()));
    assert!(!out.is_fallback());
}

#[tokio::test]
async fn test_each_poll_field_falls_back_independently() {
    let translator = Translator::new(Arc::new(ShoutingService));
    let poll = ParsedPoll {
        question: "Is charity a duty?".to_string(),
        options: vec!["yes".to_string(), "fail here".to_string(), "no".to_string()],
    };

    let translated = translator.translate_poll(&poll, "hi").await;
    assert_eq!(translated.question, "IS CHARITY A DUTY?");
    assert_eq!(translated.options, vec!["YES", "fail here", "NO"]);
}

#[tokio::test]
async fn test_unreachable_service_returns_original_text() {
    let http = HttpTranslator::new("http://127.0.0.1:9/translate", Duration::from_millis(500));
    let translator = Translator::new(Arc::new(http));

    let out = translator.translate_text("Hello world", "es").await;
    assert!(out.is_fallback());
    assert_eq!(out.into_text(), "Hello world");
}
