//! Application layer - Use cases and port interfaces

pub mod analyze;
pub mod ask;
pub mod ports;

pub use analyze::{AnalyzeAnswersUseCase, AnalyzeError};
pub use ask::{AskCallbacks, AskError, AskOutcome, AskQuestionUseCase};
