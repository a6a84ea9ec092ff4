//! Assessment domain: questions, answers, matching, recommendation

pub mod answer;
pub mod matcher;
pub mod question;
pub mod recommendation;
pub mod session;

pub use answer::Answer;
pub use question::{english_questions, Question};
pub use recommendation::{
    rule_based_recommendation, Recommendation, StreamId, StreamMatch, ALL_STREAMS,
};
pub use session::{AssessmentSession, AssessmentState, InvalidStateTransition};
