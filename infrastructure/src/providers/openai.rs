//! OpenAI-compatible chat-completions adapter.
//!
//! Implements the [`LlmGateway`] port over HTTP. Any endpoint speaking the
//! `/chat/completions` wire format works, including Gemini's
//! OpenAI-compatible surface (the default base URL).

use crate::config::FileProviderConfig;
use crate::providers::error::ProviderError;
use async_trait::async_trait;
use council_application::{CompletionRequest, GatewayError, LlmGateway, ResponseShape};
use council_domain::Model;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

const MAX_ERROR_BODY: usize = 300;

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    pub base_url: String,
    pub api_key: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Transport-level timeout; the application applies its own per-call
    /// limit as well
    pub timeout: Option<Duration>,
}

impl OpenAiCompatibleConfig {
    /// Build from the `[provider]` section. Fails when no API key can be
    /// resolved.
    pub fn from_file(
        provider: &FileProviderConfig,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let api_key = provider
            .resolve_api_key()
            .ok_or_else(|| ProviderError::MissingApiKey {
                env: provider.api_key_env.clone(),
            })?;

        Ok(Self {
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            api_key,
            max_tokens: provider.max_tokens,
            temperature: provider.temperature,
            timeout,
        })
    }
}

impl fmt::Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP gateway for OpenAI-compatible chat-completions endpoints
#[derive(Debug)]
pub struct OpenAiCompatibleGateway {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleGateway {
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenAiCompatibleConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn transport_error(&self, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout(self.config.timeout.unwrap_or_default())
        } else {
            GatewayError::NetworkFailure(error.to_string())
        }
    }
}

/// Map a non-success HTTP response to a gateway error.
///
/// 429 and quota-exhaustion bodies are rate limits; everything else is a
/// network failure.
pub fn classify_failure(status: StatusCode, body: &str) -> GatewayError {
    let lowered = body.to_lowercase();
    let detail = truncate(body.trim(), MAX_ERROR_BODY);

    if status == StatusCode::TOO_MANY_REQUESTS
        || lowered.contains("resource_exhausted")
        || lowered.contains("quota")
        || lowered.contains("rate limit")
    {
        GatewayError::RateLimited(format!("HTTP {}: {}", status.as_u16(), detail))
    } else {
        GatewayError::NetworkFailure(format!("HTTP {}: {}", status.as_u16(), detail))
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
    ) -> Result<String, GatewayError> {
        let body = ChatRequest {
            model: model.as_str(),
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_format: match request.shape {
                ResponseShape::Structured => Some(ResponseFormat {
                    kind: "json_object",
                }),
                ResponseShape::Text => None,
            },
        };

        debug!("POST {} ({})", self.endpoint(), model);
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(format!("undecodable body: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GatewayError::MalformedResponse("empty completion".to_string()))
    }

    fn provider_name(&self) -> &str {
        "openai-compatible"
    }
}
