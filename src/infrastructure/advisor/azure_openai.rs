//! Azure OpenAI advisor adapter
//!
//! Asks a chat-completion deployment for the ranked recommendation and
//! falls back to the rule-based scorer whenever the service is not
//! configured, the call fails, or the reply does not parse. Analysis
//! therefore always produces a recommendation.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Advisor, AdvisorError};
use crate::domain::assessment::{
    rule_based_recommendation, Answer, Recommendation, ALL_STREAMS,
};
use crate::domain::language::Language;

/// System prompt for the career counselor persona
const SYSTEM_PROMPT: &str = "You are a career counselor specializing in Computer Science and Engineering career paths. Analyze student responses and recommend suitable CSE specializations based on their psychology, interests, and traits.";

/// Request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Request and response types for the chat completions API

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Azure OpenAI advisor with rule-based fallback.
/// The endpoint carries the full deployment URL including API version.
pub struct AzureOpenAiAdvisor {
    endpoint: Option<String>,
    api_key: Option<String>,
    deployment: Option<String>,
    client: reqwest::Client,
}

impl AzureOpenAiAdvisor {
    /// Create an advisor; any missing field disables the cloud path
    pub fn new(
        endpoint: Option<String>,
        api_key: Option<String>,
        deployment: Option<String>,
    ) -> Self {
        Self {
            endpoint,
            api_key,
            deployment,
            client: reqwest::Client::new(),
        }
    }

    /// Whether the cloud path can be attempted
    fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some() && self.deployment.is_some()
    }

    /// Build the analysis prompt listing every answer
    fn build_prompt(answers: &[Answer]) -> String {
        let streams_list = ALL_STREAMS
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ");

        let responses = answers
            .iter()
            .enumerate()
            .map(|(index, answer)| {
                format!(
                    "Question {}: {}\nAnswer: {}\n",
                    index + 1,
                    answer.question,
                    answer.answer
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Based on the following student responses to career assessment questions, recommend the TOP 3 most suitable Computer Science specializations from this list: {streams_list}.

Student Responses:
{responses}

Analyze the student's:
1. Problem-solving approach
2. Interest areas
3. Personality traits
4. Learning preferences
5. Career motivations

Provide recommendations in this exact JSON format:
{{
    "primary": {{
        "stream": "Stream Name",
        "match_percentage": 85,
        "reasons": ["reason 1", "reason 2", "reason 3"]
    }},
    "secondary": {{
        "stream": "Stream Name",
        "match_percentage": 70,
        "reasons": ["reason 1", "reason 2"]
    }},
    "tertiary": {{
        "stream": "Stream Name",
        "match_percentage": 60,
        "reasons": ["reason 1", "reason 2"]
    }}
}}"#
        )
    }

    /// Pull the JSON object out of a model reply that may carry prose or
    /// code fences around it
    fn extract_json(reply: &str) -> Option<&str> {
        let start = reply.find('{')?;
        let end = reply.rfind('}')?;
        (end >= start).then(|| &reply[start..=end])
    }

    /// Parse a model reply into a recommendation
    fn parse_reply(reply: &str) -> Option<Recommendation> {
        let json = Self::extract_json(reply)?;
        serde_json::from_str(json).ok()
    }

    /// Attempt the cloud call
    async fn call_api(&self, answers: &[Answer]) -> Result<Recommendation, AdvisorError> {
        let (endpoint, api_key) = match (self.endpoint.as_deref(), self.api_key.as_deref()) {
            (Some(endpoint), Some(api_key)) => (endpoint, api_key),
            _ => return Err(AdvisorError::RequestFailed("service not configured".into())),
        };

        let body = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::build_prompt(answers),
                },
            ],
            temperature: 0.7,
            max_tokens: 1000,
        };

        let response = self
            .client
            .post(endpoint)
            .header("api-key", api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AdvisorError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::ParseError(e.to_string()))?;

        let content = response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AdvisorError::ParseError("no choices in response".into()))?;

        Self::parse_reply(content)
            .ok_or_else(|| AdvisorError::ParseError("reply did not contain the expected JSON".into()))
    }
}

#[async_trait]
impl Advisor for AzureOpenAiAdvisor {
    async fn recommend(
        &self,
        answers: &[Answer],
        _language: Language,
    ) -> Result<Recommendation, AdvisorError> {
        if !self.is_configured() {
            return Ok(rule_based_recommendation(answers));
        }

        match self.call_api(answers).await {
            Ok(recommendation) => Ok(recommendation),
            Err(_) => Ok(rule_based_recommendation(answers)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> Answer {
        Answer {
            question_id: 1,
            question: "What type of problems do you enjoy solving?".to_string(),
            answer: text.to_string(),
            answer_index: 0,
        }
    }

    #[test]
    fn prompt_lists_streams_and_answers() {
        let answers = vec![answer("Protecting systems"), answer("Analyzing data")];
        let prompt = AzureOpenAiAdvisor::build_prompt(&answers);

        assert!(prompt.contains("Cyber Security"));
        assert!(prompt.contains("Computer Networks"));
        assert!(prompt.contains("Question 1:"));
        assert!(prompt.contains("Question 2:"));
        assert!(prompt.contains("Answer: Protecting systems"));
        assert!(prompt.contains("exact JSON format"));
    }

    #[test]
    fn extract_json_strips_surrounding_prose() {
        let reply = "Sure! Here you go:\n```json\n{\"a\": 1}\n```\nHope that helps.";
        assert_eq!(AzureOpenAiAdvisor::extract_json(reply), Some("{\"a\": 1}"));
    }

    #[test]
    fn extract_json_none_without_object() {
        assert!(AzureOpenAiAdvisor::extract_json("no json here").is_none());
    }

    #[test]
    fn parse_reply_accepts_recommendation_json() {
        let reply = r#"{
            "primary": {"stream": "Data Science", "match_percentage": 85, "reasons": ["a", "b", "c"]},
            "secondary": {"stream": "Cyber Security", "match_percentage": 70, "reasons": ["a", "b"]},
            "tertiary": {"stream": "DevOps", "match_percentage": 60, "reasons": ["a", "b"]}
        }"#;
        let rec = AzureOpenAiAdvisor::parse_reply(reply).unwrap();
        assert_eq!(rec.primary.stream, "Data Science");
        assert_eq!(rec.tertiary.match_percentage, 60);
    }

    #[test]
    fn parse_reply_rejects_malformed_json() {
        assert!(AzureOpenAiAdvisor::parse_reply("{\"primary\": 1}").is_none());
    }

    #[tokio::test]
    async fn unconfigured_advisor_uses_rule_based_fallback() {
        let advisor = AzureOpenAiAdvisor::new(None, None, None);
        let answers = vec![answer("security protect ethical")];

        let rec = advisor.recommend(&answers, Language::En).await.unwrap();
        assert_eq!(rec.primary.stream, "Cyber Security");
    }

    #[tokio::test]
    async fn partially_configured_advisor_still_falls_back() {
        let advisor = AzureOpenAiAdvisor::new(
            Some("https://example.invalid/openai".to_string()),
            None,
            None,
        );
        let answers = vec![answer("training ai models")];

        let rec = advisor.recommend(&answers, Language::En).await.unwrap();
        assert_eq!(
            rec.primary.stream,
            "Artificial Intelligence & Machine Learning"
        );
    }
}
