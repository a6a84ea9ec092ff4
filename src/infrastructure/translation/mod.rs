//! Translation adapters

pub mod azure;

pub use azure::AzureTranslator;
