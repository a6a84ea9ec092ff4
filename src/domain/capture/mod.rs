//! Microphone capture entities and voice-activity detection

pub mod session;
pub mod vad;

pub use session::RecordingSession;
pub use vad::{StopReason, VadConfig, Verdict, VoiceActivityMonitor};
