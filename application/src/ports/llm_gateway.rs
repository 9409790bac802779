//! LLM Gateway port
//!
//! Defines the interface to the external generative-text service: a prompt
//! goes in, completion text comes out. Retry and tier selection live in
//! [`GenerationGateway`](crate::use_cases::generate::GenerationGateway), not
//! in adapters.

use async_trait::async_trait;
use council_domain::Model;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Quota exhausted or HTTP 429; the only class retried on the fallback tier
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Any other transport or server failure
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The completion arrived but could not be decoded as structured data
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GatewayError::RateLimited(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, GatewayError::MalformedResponse(_))
    }
}

/// Shape the caller expects the completion to take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseShape {
    /// Free text
    #[default]
    Text,
    /// A JSON object; adapters may ask the provider for JSON mode
    Structured,
}

/// A single completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub shape: ResponseShape,
}

impl CompletionRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            shape: ResponseShape::Text,
        }
    }

    pub fn structured(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            shape: ResponseShape::Structured,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer reaches the generative-text
/// service. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one prompt to `model` and return the completion text
    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
    ) -> Result<String, GatewayError>;

    /// Provider name for logs
    fn provider_name(&self) -> &str {
        "llm"
    }
}
