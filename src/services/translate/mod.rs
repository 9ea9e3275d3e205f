pub mod client;

pub use client::{HttpTranslator, TranslateError, Translated, TranslationService, Translator};
