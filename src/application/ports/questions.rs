//! Question source port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::assessment::Question;
use crate::domain::language::Language;

/// Question source errors
#[derive(Debug, Clone, Error)]
pub enum QuestionSourceError {
    #[error("Question bank unavailable: {0}")]
    Unavailable(String),
}

/// Port for fetching the localized question bank
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Get the question bank in the given language. Implementations fall
    /// back to English rather than failing on translation problems.
    async fn questions(&self, language: Language) -> Result<Vec<Question>, QuestionSourceError>;
}
