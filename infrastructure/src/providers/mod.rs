//! Generative-text provider adapters

pub mod error;
pub mod openai;

pub use error::ProviderError;
pub use openai::{OpenAiCompatibleConfig, OpenAiCompatibleGateway, classify_failure};
