//! Recommendation advisor adapters

pub mod azure_openai;

pub use azure_openai::AzureOpenAiAdvisor;
