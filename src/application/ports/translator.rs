//! Translation port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::language::Language;

/// Translation errors
#[derive(Debug, Clone, Error)]
pub enum TranslationError {
    #[error("Translator credentials not configured")]
    MissingCredentials,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for text translation out of English
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a single text into the target language
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError>;

    /// Translate a batch of texts into the target language, preserving
    /// order
    async fn translate_batch(
        &self,
        texts: &[String],
        target: Language,
    ) -> Result<Vec<String>, TranslationError>;
}
