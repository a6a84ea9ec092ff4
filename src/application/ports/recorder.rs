//! Voice recorder port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioData;
use crate::domain::capture::StopReason;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Audio input device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("A capture session is already active")]
    AlreadyRecording,
}

/// Port for microphone capture with voice-activity auto-stop.
///
/// One session may be active at a time; `start` rejects a second. The
/// adapter runs its own silence monitoring and resolves `auto_stopped`
/// when the session should end; the caller then calls `stop` to collect
/// the encoded audio. `stop` with no active session returns `Ok(None)`
/// and never releases the device twice.
#[async_trait]
pub trait VoiceRecorder: Send + Sync {
    /// Begin a capture session.
    ///
    /// # Errors
    /// `DeviceUnavailable` when no input device can be acquired;
    /// `AlreadyRecording` when a session is active.
    async fn start(&self) -> Result<(), CaptureError>;

    /// Wait until the voice-activity monitor ends the current session,
    /// either on trailing silence or on the hard duration cap.
    async fn auto_stopped(&self) -> StopReason;

    /// Stop the session and return the encoded audio, or None when no
    /// session is active.
    async fn stop(&self) -> Result<Option<AudioData>, CaptureError>;

    /// Check if currently recording
    fn is_recording(&self) -> bool;

    /// Get elapsed recording time in milliseconds
    fn elapsed_ms(&self) -> u64;
}
