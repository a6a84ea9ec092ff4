//! Audio playback port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioData;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Audio output device unavailable: {0}")]
    DeviceNotAvailable(String),

    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Port for playing synthesized prompt audio.
/// `play` resolves when playback has finished.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, audio: &AudioData) -> Result<(), PlaybackError>;
}
