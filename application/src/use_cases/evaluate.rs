//! Scorer: rates a candidate concept from 0 to 100.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::use_cases::generate::GenerationGateway;
use council_domain::{Evaluation, EvaluationPayload, PromptTemplate, Topic};
use std::sync::Arc;
use tracing::{debug, warn};

/// Use case scoring a candidate against its topic
pub struct EvaluateUseCase<G: LlmGateway + ?Sized> {
    generation: Arc<GenerationGateway<G>>,
}

impl<G: LlmGateway + ?Sized> EvaluateUseCase<G> {
    pub fn new(generation: Arc<GenerationGateway<G>>) -> Self {
        Self { generation }
    }

    /// Score `candidate`. An unreadable verdict scores 0 with the decode
    /// diagnostic as feedback.
    pub async fn evaluate(
        &self,
        topic: &Topic,
        candidate: &str,
    ) -> Result<Evaluation, GatewayError> {
        let prompt = PromptTemplate::evaluation(topic.content(), candidate);

        let evaluation = match self
            .generation
            .complete_structured::<EvaluationPayload>(&prompt)
            .await
        {
            Ok((payload, _)) => Evaluation::try_from(payload).unwrap_or_else(|e| {
                warn!("Scorer response did not match the expected shape: {}", e);
                Evaluation::malformed(e.to_string())
            }),
            Err(GatewayError::MalformedResponse(reason)) => {
                warn!("Scorer response was unreadable: {}", reason);
                Evaluation::malformed(reason)
            }
            Err(e) => return Err(e),
        };

        debug!("Candidate scored {:.1}", evaluation.score);
        Ok(evaluation)
    }
}
