//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod advisor;
pub mod config;
pub mod player;
pub mod questions;
pub mod recognizer;
pub mod recorder;
pub mod synthesizer;
pub mod translator;

// Re-export common types
pub use advisor::{Advisor, AdvisorError};
pub use config::ConfigStore;
pub use player::{AudioPlayer, PlaybackError};
pub use questions::{QuestionSource, QuestionSourceError};
pub use recognizer::{RecognitionError, SpeechRecognizer};
pub use recorder::{CaptureError, VoiceRecorder};
pub use synthesizer::{SpeechSynthesizer, SynthesisError};
pub use translator::{TranslationError, Translator};
