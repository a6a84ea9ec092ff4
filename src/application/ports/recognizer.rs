//! Speech recognition port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioData;
use crate::domain::language::Language;

/// Recognition errors
#[derive(Debug, Clone, Error)]
pub enum RecognitionError {
    #[error("Speech service credentials not configured")]
    MissingCredentials,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("No speech recognized")]
    NoSpeech,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for speech-to-text recognition
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe a finalized audio payload.
    ///
    /// # Returns
    /// The transcript, or `NoSpeech` when the service found no usable
    /// speech in the audio.
    async fn recognize(
        &self,
        audio: &AudioData,
        language: Language,
    ) -> Result<String, RecognitionError>;
}
