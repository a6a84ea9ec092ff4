//! Recommendation advisor port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::assessment::{Answer, Recommendation};
use crate::domain::language::Language;

/// Advisor errors
#[derive(Debug, Clone, Error)]
pub enum AdvisorError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for turning a completed answer sheet into a ranked
/// recommendation
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn recommend(
        &self,
        answers: &[Answer],
        language: Language,
    ) -> Result<Recommendation, AdvisorError>;
}
