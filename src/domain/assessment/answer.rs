//! Answer value object

use serde::{Deserialize, Serialize};

use super::question::Question;

/// One recorded answer: the question it belongs to and the chosen option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    pub question: String,
    pub answer: String,
    pub answer_index: usize,
}

impl Answer {
    /// Build an answer from a question and a chosen option index.
    /// Returns None when the index is out of range.
    pub fn chosen(question: &Question, index: usize) -> Option<Self> {
        let option = question.options.get(index)?;
        Some(Self {
            question_id: question.id,
            question: question.text.clone(),
            answer: option.clone(),
            answer_index: index,
        })
    }
}
