//! No-op playback adapter for text-only sessions

use async_trait::async_trait;

use crate::application::ports::{AudioPlayer, PlaybackError};
use crate::domain::audio::AudioData;

/// Player that discards audio and returns immediately
pub struct NoopPlayer;

impl NoopPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioPlayer for NoopPlayer {
    async fn play(&self, _audio: &AudioData) -> Result<(), PlaybackError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::AudioMimeType;

    #[tokio::test]
    async fn always_succeeds() {
        let player = NoopPlayer::new();
        let audio = AudioData::new(vec![], AudioMimeType::Mp3);
        assert!(player.play(&audio).await.is_ok());
    }
}
