//! Question bank adapters

pub mod catalog;

pub use catalog::TranslatedQuestionCatalog;
