//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal, rodio, and the Azure Cognitive Services
//! REST APIs.

pub mod advisor;
pub mod config;
pub mod playback;
pub mod questions;
pub mod recording;
pub mod speech;
pub mod translation;

// Re-export adapters
pub use advisor::AzureOpenAiAdvisor;
pub use config::XdgConfigStore;
pub use playback::{NoopPlayer, RodioPlayer};
pub use questions::TranslatedQuestionCatalog;
pub use recording::CpalVoiceRecorder;
pub use speech::{AzureSpeechRecognizer, AzureSpeechSynthesizer, TtsCache};
pub use translation::AzureTranslator;
