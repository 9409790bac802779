//! Generation gateway: one resilient call to the generative-text service.
//!
//! Every Council stage goes through [`GenerationGateway::complete`]:
//!
//! 1. Call the primary tier (bounded by the per-call timeout, if any).
//! 2. If the primary is rate limited, call the fallback tier once with the
//!    same prompt. Any other failure is returned as-is.
//! 3. If the fallback fails too, escalate to `NetworkFailure`.
//! 4. For structured requests, decode the text as JSON; a decode failure is
//!    `MalformedResponse`, which callers may treat as recoverable.

use crate::config::{BehaviorConfig, ModelTiers};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway, ResponseShape};
use council_domain::{Model, ModelTier, extract_json};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Body of a successful completion
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionContent {
    Text(String),
    Structured(Value),
}

/// A successful completion and the tier that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: CompletionContent,
    pub tier: ModelTier,
    pub model: Model,
}

impl Completion {
    pub fn used_fallback(&self) -> bool {
        self.tier == ModelTier::Fallback
    }

    /// Completion text; structured content is re-serialized
    pub fn into_text(self) -> String {
        match self.content {
            CompletionContent::Text(text) => text,
            CompletionContent::Structured(value) => value.to_string(),
        }
    }
}

/// Resilient wrapper around an [`LlmGateway`]
pub struct GenerationGateway<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    tiers: ModelTiers,
    behavior: BehaviorConfig,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized> GenerationGateway<G> {
    pub fn new(gateway: Arc<G>, tiers: ModelTiers) -> Self {
        Self {
            gateway,
            tiers,
            behavior: BehaviorConfig::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn tiers(&self) -> &ModelTiers {
        &self.tiers
    }

    /// Complete `prompt` in the requested shape, retrying once on the
    /// fallback tier after a rate limit.
    pub async fn complete(
        &self,
        prompt: &str,
        shape: ResponseShape,
    ) -> Result<Completion, GatewayError> {
        let request = CompletionRequest {
            prompt: prompt.to_string(),
            shape,
        };

        let (text, tier) = match self.call_tier(ModelTier::Primary, &request).await {
            Ok(text) => (text, ModelTier::Primary),
            Err(primary_err) if primary_err.is_rate_limited() => {
                warn!(
                    "Primary tier ({}) rate limited, retrying on fallback ({})",
                    self.tiers.primary, self.tiers.fallback
                );
                match self.call_tier(ModelTier::Fallback, &request).await {
                    Ok(text) => (text, ModelTier::Fallback),
                    Err(fallback_err) => {
                        return Err(GatewayError::NetworkFailure(format!(
                            "primary {}; fallback {}",
                            primary_err, fallback_err
                        )));
                    }
                }
            }
            Err(e) => return Err(e),
        };

        let model = self.tiers.model(tier).clone();
        let content = match shape {
            ResponseShape::Text => CompletionContent::Text(text),
            ResponseShape::Structured => match extract_json(&text) {
                Ok(value) => CompletionContent::Structured(value),
                Err(e) => {
                    debug!("Structured decode failed on {}: {}", model, e);
                    return Err(GatewayError::MalformedResponse(e.to_string()));
                }
            },
        };

        Ok(Completion {
            content,
            tier,
            model,
        })
    }

    /// Free-text completion
    pub async fn complete_text(&self, prompt: &str) -> Result<Completion, GatewayError> {
        self.complete(prompt, ResponseShape::Text).await
    }

    /// Structured completion decoded into `T`.
    ///
    /// Both a JSON syntax failure and a schema mismatch are
    /// `MalformedResponse`.
    pub async fn complete_structured<T: DeserializeOwned>(
        &self,
        prompt: &str,
    ) -> Result<(T, Completion), GatewayError> {
        let completion = self.complete(prompt, ResponseShape::Structured).await?;
        let value = match &completion.content {
            CompletionContent::Structured(value) => value.clone(),
            CompletionContent::Text(_) => {
                return Err(GatewayError::MalformedResponse(
                    "expected structured content".to_string(),
                ));
            }
        };
        let decoded = serde_json::from_value(value)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        Ok((decoded, completion))
    }

    async fn call_tier(
        &self,
        tier: ModelTier,
        request: &CompletionRequest,
    ) -> Result<String, GatewayError> {
        let model = self.tiers.model(tier);
        debug!(
            "Calling {} ({} tier) via {}",
            model,
            tier,
            self.gateway.provider_name()
        );

        let call = self.gateway.complete(model, request);
        let result = match self.behavior.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout(limit)),
            },
            None => call.await,
        };

        match &result {
            Ok(text) => self.logger.log(ConversationEvent::new(
                "llm_response",
                serde_json::json!({
                    "model": model.as_str(),
                    "tier": tier.as_str(),
                    "prompt": request.prompt,
                    "text": text,
                }),
            )),
            Err(e) => self.logger.log(ConversationEvent::new(
                "llm_error",
                serde_json::json!({
                    "model": model.as_str(),
                    "tier": tier.as_str(),
                    "error": e.to_string(),
                }),
            )),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGateway;
    use std::time::Duration;

    fn generation(gateway: Arc<ScriptedGateway>) -> GenerationGateway<ScriptedGateway> {
        GenerationGateway::new(gateway, ModelTiers::default())
    }

    #[tokio::test]
    async fn test_primary_success_uses_primary_only() {
        let gateway = Arc::new(ScriptedGateway::new());
        let completion = generation(gateway.clone())
            .complete_text("hello")
            .await
            .unwrap();

        assert_eq!(completion.tier, ModelTier::Primary);
        assert_eq!(gateway.calls_to(&Model::default_fallback()), 0);
        assert_eq!(gateway.calls_to(&Model::default_primary()), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_retries_once_on_fallback() {
        let gateway = Arc::new(ScriptedGateway::new().rate_limit(Model::default_primary()));
        let completion = generation(gateway.clone())
            .complete_text("hello")
            .await
            .unwrap();

        assert!(completion.used_fallback());
        assert_eq!(completion.model, Model::default_fallback());
        assert_eq!(completion.into_text(), "echo: hello");
        assert_eq!(gateway.calls_to(&Model::default_primary()), 1);
        assert_eq!(gateway.calls_to(&Model::default_fallback()), 1);
    }

    #[tokio::test]
    async fn test_fallback_failure_escalates_to_network_failure() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .rate_limit(Model::default_primary())
                .rate_limit(Model::default_fallback()),
        );
        let err = generation(gateway.clone())
            .complete_text("hello")
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::NetworkFailure(_)));
        // exactly one retry
        assert_eq!(gateway.total_calls(), 2);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let gateway = Arc::new(ScriptedGateway::new().fail_model(Model::default_primary()));
        let err = generation(gateway.clone())
            .complete_text("hello")
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::NetworkFailure(_)));
        assert_eq!(gateway.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_structured_parse_failure_is_malformed() {
        let gateway = Arc::new(ScriptedGateway::new());
        let err = generation(gateway)
            .complete_structured::<Value>("not asking for json")
            .await
            .unwrap_err();

        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_structured_success() {
        let gateway = Arc::new(ScriptedGateway::new());
        let (value, completion) = generation(gateway)
            .complete_structured::<Value>(r#"please echo {"ok": true}"#)
            .await
            .unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(completion.tier, ModelTier::Primary);
    }

    #[tokio::test]
    async fn test_structured_schema_mismatch_is_malformed() {
        #[derive(serde::Deserialize, Debug)]
        struct Expected {
            #[allow(dead_code)]
            score: f64,
        }

        let gateway = Arc::new(ScriptedGateway::new());
        let err = generation(gateway)
            .complete_structured::<Expected>(r#"echo {"other": 1}"#)
            .await
            .unwrap_err();

        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_timeout_is_its_own_class_and_not_retried() {
        let gateway = Arc::new(ScriptedGateway::new().delay(Duration::from_secs(5)));
        let err = generation(gateway.clone())
            .with_behavior(BehaviorConfig {
                timeout: Some(Duration::from_millis(20)),
            })
            .complete_text("slow")
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::Timeout(Duration::from_millis(20)));
        assert_eq!(gateway.calls_to(&Model::default_fallback()), 0);
    }
}
