//! Speech synthesis port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioData;
use crate::domain::language::Language;

/// Synthesis errors
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    #[error("Speech service credentials not configured")]
    MissingCredentials,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Synthesized audio was empty")]
    EmptyAudio,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for text-to-speech synthesis
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize spoken audio for the text in the given language.
    ///
    /// # Arguments
    /// * `text` - What to speak
    /// * `language` - Selects the synthesis voice
    /// * `cache_key` - Optional stable key letting the adapter reuse a
    ///   previously synthesized payload
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        cache_key: Option<&str>,
    ) -> Result<AudioData, SynthesisError>;
}
