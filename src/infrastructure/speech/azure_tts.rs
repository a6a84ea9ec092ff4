//! Azure Speech synthesis adapter

use async_trait::async_trait;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};
use crate::domain::audio::{AudioData, AudioMimeType};
use crate::domain::language::Language;

use super::tts_cache::TtsCache;

/// Output format requested from the synthesis service
const OUTPUT_FORMAT: &str = "audio-16khz-32kbitrate-mono-mp3";

/// Azure Speech text-to-speech client with an optional file cache
pub struct AzureSpeechSynthesizer {
    subscription_key: String,
    region: String,
    endpoint_override: Option<String>,
    cache: Option<TtsCache>,
    client: reqwest::Client,
}

impl AzureSpeechSynthesizer {
    /// Create a synthesizer for the given subscription
    pub fn new(subscription_key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            region: region.into(),
            endpoint_override: None,
            cache: None,
            client: reqwest::Client::new(),
        }
    }

    /// Attach a file cache for synthesized prompts
    pub fn with_cache(mut self, cache: TtsCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Override the service endpoint (used by tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_override = Some(endpoint.into());
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        match &self.endpoint_override {
            Some(endpoint) => endpoint.clone(),
            None => format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                self.region
            ),
        }
    }

    /// Build the SSML request body
    fn ssml(text: &str, language: Language) -> String {
        format!(
            "<speak version='1.0' xml:lang='{locale}'><voice name='{voice}'>{text}</voice></speak>",
            locale = language.locale(),
            voice = language.voice(),
            text = escape_xml(text),
        )
    }
}

/// Escape text for embedding in an SSML document
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[async_trait]
impl SpeechSynthesizer for AzureSpeechSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        cache_key: Option<&str>,
    ) -> Result<AudioData, SynthesisError> {
        if self.subscription_key.is_empty() || self.region.is_empty() {
            return Err(SynthesisError::MissingCredentials);
        }

        // Cache hits skip the network call entirely
        if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
            if let Some(bytes) = cache.get(language, key).await {
                return Ok(AudioData::new(bytes, AudioMimeType::Mp3));
            }
        }

        let response = self
            .client
            .post(self.api_url())
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .body(Self::ssml(text, language))
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SynthesisError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SynthesisError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SynthesisError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        if bytes.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        // Cache writes are best-effort
        if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
            let _ = cache.put(language, key, &bytes).await;
        }

        Ok(AudioData::new(bytes.to_vec(), AudioMimeType::Mp3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_contains_region() {
        let tts = AzureSpeechSynthesizer::new("key", "centralindia");
        assert_eq!(
            tts.api_url(),
            "https://centralindia.tts.speech.microsoft.com/cognitiveservices/v1"
        );
    }

    #[test]
    fn endpoint_override_wins() {
        let tts = AzureSpeechSynthesizer::new("key", "centralindia")
            .with_endpoint("http://localhost:9999/tts");
        assert_eq!(tts.api_url(), "http://localhost:9999/tts");
    }

    #[test]
    fn ssml_carries_voice_and_locale() {
        let body = AzureSpeechSynthesizer::ssml("Hello there", Language::Hi);
        assert!(body.contains("xml:lang='hi-IN'"));
        assert!(body.contains("hi-IN-SwaraNeural"));
        assert!(body.contains("Hello there"));
    }

    #[test]
    fn ssml_escapes_markup() {
        let body = AzureSpeechSynthesizer::ssml("a < b & c", Language::En);
        assert!(body.contains("a &lt; b &amp; c"));
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected() {
        let tts = AzureSpeechSynthesizer::new("", "");
        let err = tts.synthesize("hi", Language::En, None).await.unwrap_err();
        assert!(matches!(err, SynthesisError::MissingCredentials));
    }
}
