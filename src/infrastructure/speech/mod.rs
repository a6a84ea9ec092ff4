//! Azure Speech service adapters

pub mod azure_stt;
pub mod azure_tts;
pub mod tts_cache;

pub use azure_stt::AzureSpeechRecognizer;
pub use azure_tts::AzureSpeechSynthesizer;
pub use tts_cache::TtsCache;
