//! Azure Translator adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranslationError, Translator};
use crate::domain::language::Language;

/// Default Translator service endpoint
const DEFAULT_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";

// Request and response types for the Translator v3 API

#[derive(Debug, Serialize)]
struct TranslateItem {
    #[serde(rename = "Text")]
    text: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResult {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Azure Translator client. Questions are authored in English, so the
/// source language is fixed.
pub struct AzureTranslator {
    subscription_key: String,
    region: String,
    endpoint: String,
    client: reqwest::Client,
}

impl AzureTranslator {
    /// Create a translator for the given subscription
    pub fn new(subscription_key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            region: region.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the service endpoint (custom endpoint or tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Build the API URL
    fn api_url(&self, target: Language) -> String {
        format!(
            "{}/translate?api-version=3.0&from=en&to={}",
            self.endpoint.trim_end_matches('/'),
            target.as_str()
        )
    }

    async fn call(
        &self,
        texts: &[String],
        target: Language,
    ) -> Result<Vec<String>, TranslationError> {
        if self.subscription_key.is_empty() || self.region.is_empty() {
            return Err(TranslationError::MissingCredentials);
        }

        let body: Vec<TranslateItem> = texts
            .iter()
            .map(|text| TranslateItem { text: text.clone() })
            .collect();

        let response = self
            .client
            .post(self.api_url(target))
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslationError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranslationError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let results: Vec<TranslateResult> = response
            .json()
            .await
            .map_err(|e| TranslationError::ParseError(e.to_string()))?;

        if results.len() != texts.len() {
            return Err(TranslationError::ParseError(format!(
                "expected {} results, got {}",
                texts.len(),
                results.len()
            )));
        }

        results
            .into_iter()
            .map(|r| {
                r.translations
                    .into_iter()
                    .next()
                    .map(|t| t.text)
                    .ok_or_else(|| TranslationError::ParseError("empty translations".into()))
            })
            .collect()
    }
}

#[async_trait]
impl Translator for AzureTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        let mut results = self.call(&[text.to_string()], target).await?;
        Ok(results.remove(0))
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target: Language,
    ) -> Result<Vec<String>, TranslationError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.call(texts, target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_has_source_and_target() {
        let translator = AzureTranslator::new("key", "centralindia");
        let url = translator.api_url(Language::Te);
        assert!(url.starts_with(DEFAULT_ENDPOINT));
        assert!(url.contains("from=en"));
        assert!(url.contains("to=te"));
        assert!(url.contains("api-version=3.0"));
    }

    #[test]
    fn endpoint_override_strips_trailing_slash() {
        let translator =
            AzureTranslator::new("key", "region").with_endpoint("http://localhost:9/");
        assert!(translator
            .api_url(Language::Hi)
            .starts_with("http://localhost:9/translate?"));
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected() {
        let translator = AzureTranslator::new("", "");
        let err = translator.translate("hello", Language::Hi).await.unwrap_err();
        assert!(matches!(err, TranslationError::MissingCredentials));
    }

    #[tokio::test]
    async fn empty_batch_short_circuits() {
        let translator = AzureTranslator::new("", "");
        // No credentials needed since no call is made
        let out = translator.translate_batch(&[], Language::Hi).await.unwrap();
        assert!(out.is_empty());
    }
}
