//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::capture::VadConfig;
use crate::domain::language::Language;

/// Azure Cognitive Services credentials and endpoints.
/// The OpenAI endpoint carries the full deployment URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AzureConfig {
    pub speech_key: Option<String>,
    pub speech_region: Option<String>,
    pub translator_key: Option<String>,
    pub translator_region: Option<String>,
    pub translator_endpoint: Option<String>,
    pub openai_endpoint: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_deployment: Option<String>,
}

/// Voice-activity detection tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub silence_threshold_db: Option<f32>,
    pub quiet_period_ms: Option<u64>,
    pub grace_period_ms: Option<u64>,
    pub max_duration_ms: Option<u64>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub language: Option<String>,
    pub auto_mic: Option<bool>,
    pub voice: Option<bool>,
    pub cache_dir: Option<String>,
    pub azure: Option<AzureConfig>,
    pub capture: Option<CaptureConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            language: Some("en".to_string()),
            auto_mic: Some(true),
            voice: Some(true),
            cache_dir: None,
            azure: Some(AzureConfig::default()),
            capture: Some(CaptureConfig {
                silence_threshold_db: Some(VadConfig::default().silence_threshold_db),
                quiet_period_ms: Some(VadConfig::default().quiet_period_ms),
                grace_period_ms: Some(VadConfig::default().grace_period_ms),
                max_duration_ms: Some(VadConfig::default().max_duration_ms),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            language: other.language.or(self.language),
            auto_mic: other.auto_mic.or(self.auto_mic),
            voice: other.voice.or(self.voice),
            cache_dir: other.cache_dir.or(self.cache_dir),
            azure: Self::merge_azure(self.azure, other.azure),
            capture: Self::merge_capture(self.capture, other.capture),
        }
    }

    fn merge_azure(base: Option<AzureConfig>, other: Option<AzureConfig>) -> Option<AzureConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(AzureConfig {
                speech_key: o.speech_key.or(b.speech_key),
                speech_region: o.speech_region.or(b.speech_region),
                translator_key: o.translator_key.or(b.translator_key),
                translator_region: o.translator_region.or(b.translator_region),
                translator_endpoint: o.translator_endpoint.or(b.translator_endpoint),
                openai_endpoint: o.openai_endpoint.or(b.openai_endpoint),
                openai_api_key: o.openai_api_key.or(b.openai_api_key),
                openai_deployment: o.openai_deployment.or(b.openai_deployment),
            }),
        }
    }

    fn merge_capture(
        base: Option<CaptureConfig>,
        other: Option<CaptureConfig>,
    ) -> Option<CaptureConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(CaptureConfig {
                silence_threshold_db: o.silence_threshold_db.or(b.silence_threshold_db),
                quiet_period_ms: o.quiet_period_ms.or(b.quiet_period_ms),
                grace_period_ms: o.grace_period_ms.or(b.grace_period_ms),
                max_duration_ms: o.max_duration_ms.or(b.max_duration_ms),
            }),
        }
    }

    /// Get language as parsed Language, or English if not set/invalid
    pub fn language_or_default(&self) -> Language {
        self.language
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get auto-mic setting, or true if not set
    pub fn auto_mic_or_default(&self) -> bool {
        self.auto_mic.unwrap_or(true)
    }

    /// Get voice setting, or true if not set
    pub fn voice_or_default(&self) -> bool {
        self.voice.unwrap_or(true)
    }

    /// Build the VAD tuning, using defaults for unset fields
    pub fn vad_config(&self) -> VadConfig {
        let defaults = VadConfig::default();
        match self.capture.as_ref() {
            None => defaults,
            Some(c) => VadConfig {
                silence_threshold_db: c
                    .silence_threshold_db
                    .unwrap_or(defaults.silence_threshold_db),
                quiet_period_ms: c.quiet_period_ms.unwrap_or(defaults.quiet_period_ms),
                grace_period_ms: c.grace_period_ms.unwrap_or(defaults.grace_period_ms),
                max_duration_ms: c.max_duration_ms.unwrap_or(defaults.max_duration_ms),
            },
        }
    }

    /// Azure section accessor, empty when unset
    pub fn azure_or_default(&self) -> AzureConfig {
        self.azure.clone().unwrap_or_default()
    }
}
