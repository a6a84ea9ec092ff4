//! Answer analysis use case

use thiserror::Error;

use crate::domain::assessment::{Answer, Recommendation};
use crate::domain::language::Language;

use super::ports::{Advisor, AdvisorError};

/// Errors from the analysis use case
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("No answers to analyze")]
    NoAnswers,

    #[error("Analysis failed: {0}")]
    Advisor(#[from] AdvisorError),
}

/// Turn a completed answer sheet into a ranked recommendation
pub struct AnalyzeAnswersUseCase<A>
where
    A: Advisor,
{
    advisor: A,
}

impl<A> AnalyzeAnswersUseCase<A>
where
    A: Advisor,
{
    /// Create a new use case instance
    pub fn new(advisor: A) -> Self {
        Self { advisor }
    }

    /// Execute the analysis
    pub async fn execute(
        &self,
        answers: &[Answer],
        language: Language,
    ) -> Result<Recommendation, AnalyzeError> {
        if answers.is_empty() {
            return Err(AnalyzeError::NoAnswers);
        }
        Ok(self.advisor.recommend(answers, language).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::rule_based_recommendation;
    use async_trait::async_trait;

    struct MockAdvisor;

    #[async_trait]
    impl Advisor for MockAdvisor {
        async fn recommend(
            &self,
            answers: &[Answer],
            _language: Language,
        ) -> Result<Recommendation, AdvisorError> {
            Ok(rule_based_recommendation(answers))
        }
    }

    fn answer(text: &str) -> Answer {
        Answer {
            question_id: 1,
            question: "q".to_string(),
            answer: text.to_string(),
            answer_index: 0,
        }
    }

    #[tokio::test]
    async fn execute_returns_recommendation() {
        let use_case = AnalyzeAnswersUseCase::new(MockAdvisor);
        let answers = vec![answer("security protect")];

        let rec = use_case.execute(&answers, Language::En).await.unwrap();
        assert_eq!(rec.primary.stream, "Cyber Security");
    }

    #[tokio::test]
    async fn empty_answers_are_rejected() {
        let use_case = AnalyzeAnswersUseCase::new(MockAdvisor);
        let err = use_case.execute(&[], Language::En).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::NoAnswers));
    }
}
