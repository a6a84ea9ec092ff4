//! Azure Speech recognition adapter

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{RecognitionError, SpeechRecognizer};
use crate::domain::audio::AudioData;
use crate::domain::language::Language;

/// Content type for the 16kHz mono PCM WAV payload
const AUDIO_CONTENT_TYPE: &str = "audio/wav; codecs=audio/pcm; samplerate=16000";

// Response types for the short-audio recognition API

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: String,
    display_text: Option<String>,
}

/// Azure Speech speech-to-text client
pub struct AzureSpeechRecognizer {
    subscription_key: String,
    region: String,
    endpoint_override: Option<String>,
    client: reqwest::Client,
}

impl AzureSpeechRecognizer {
    /// Create a recognizer for the given subscription
    pub fn new(subscription_key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            region: region.into(),
            endpoint_override: None,
            client: reqwest::Client::new(),
        }
    }

    /// Override the service endpoint (used by tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_override = Some(endpoint.into());
        self
    }

    /// Build the API URL
    fn api_url(&self, language: Language) -> String {
        let base = match &self.endpoint_override {
            Some(endpoint) => endpoint.clone(),
            None => format!(
                "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1",
                self.region
            ),
        };
        format!("{}?language={}&format=simple", base, language.locale())
    }

    /// Extract the transcript from a parsed response
    fn extract_text(response: &RecognitionResponse) -> Result<String, RecognitionError> {
        match response.recognition_status.as_str() {
            "Success" => {
                let text = response
                    .display_text
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default();
                if text.is_empty() {
                    Err(RecognitionError::NoSpeech)
                } else {
                    Ok(text.to_string())
                }
            }
            "NoMatch" | "InitialSilenceTimeout" => Err(RecognitionError::NoSpeech),
            other => Err(RecognitionError::ApiError(format!(
                "recognition status {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for AzureSpeechRecognizer {
    async fn recognize(
        &self,
        audio: &AudioData,
        language: Language,
    ) -> Result<String, RecognitionError> {
        if self.subscription_key.is_empty() || self.region.is_empty() {
            return Err(RecognitionError::MissingCredentials);
        }

        let response = self
            .client
            .post(self.api_url(language))
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .header("Content-Type", AUDIO_CONTENT_TYPE)
            .header("Accept", "application/json")
            .body(audio.data().to_vec())
            .send()
            .await
            .map_err(|e| RecognitionError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RecognitionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RecognitionError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RecognitionError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| RecognitionError::ParseError(e.to_string()))?;

        Self::extract_text(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_carries_locale() {
        let stt = AzureSpeechRecognizer::new("key", "centralindia");
        let url = stt.api_url(Language::Ta);
        assert!(url.starts_with("https://centralindia.stt.speech.microsoft.com/"));
        assert!(url.contains("language=ta-IN"));
        assert!(url.contains("format=simple"));
    }

    #[test]
    fn extract_text_success() {
        let response = RecognitionResponse {
            recognition_status: "Success".to_string(),
            display_text: Some("  Protecting systems.  ".to_string()),
        };
        assert_eq!(
            AzureSpeechRecognizer::extract_text(&response).unwrap(),
            "Protecting systems."
        );
    }

    #[test]
    fn extract_text_no_match_is_no_speech() {
        let response = RecognitionResponse {
            recognition_status: "NoMatch".to_string(),
            display_text: None,
        };
        assert!(matches!(
            AzureSpeechRecognizer::extract_text(&response),
            Err(RecognitionError::NoSpeech)
        ));
    }

    #[test]
    fn extract_text_empty_success_is_no_speech() {
        let response = RecognitionResponse {
            recognition_status: "Success".to_string(),
            display_text: Some("   ".to_string()),
        };
        assert!(matches!(
            AzureSpeechRecognizer::extract_text(&response),
            Err(RecognitionError::NoSpeech)
        ));
    }

    #[test]
    fn extract_text_unknown_status_is_api_error() {
        let response = RecognitionResponse {
            recognition_status: "Error".to_string(),
            display_text: None,
        };
        assert!(matches!(
            AzureSpeechRecognizer::extract_text(&response),
            Err(RecognitionError::ApiError(_))
        ));
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected() {
        let stt = AzureSpeechRecognizer::new("", "");
        let audio = AudioData::new(vec![0u8; 46], Default::default());
        let err = stt.recognize(&audio, Language::En).await.unwrap_err();
        assert!(matches!(err, RecognitionError::MissingCredentials));
    }
}
