//! Synthesizer: merges a round's critiques into one hardened concept.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::use_cases::generate::GenerationGateway;
use council_domain::{
    CritiqueMessage, HardenedConcept, PromptTemplate, SynthesisPayload, Topic,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Use case producing a [`HardenedConcept`] from a complete critique set.
///
/// An undecodable synthesis is replaced by [`HardenedConcept::fallback`];
/// transport failures are returned to the caller.
pub struct SynthesizeUseCase<G: LlmGateway + ?Sized> {
    generation: Arc<GenerationGateway<G>>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized> SynthesizeUseCase<G> {
    pub fn new(generation: Arc<GenerationGateway<G>>) -> Self {
        Self {
            generation,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub async fn synthesize(
        &self,
        topic: &Topic,
        critiques: &[CritiqueMessage],
    ) -> Result<HardenedConcept, GatewayError> {
        info!("Synthesizing {} critiques", critiques.len());

        let labelled: Vec<(String, String)> = critiques
            .iter()
            .map(|c| (c.label(), c.content.clone()))
            .collect();
        let prompt = PromptTemplate::synthesis(topic.content(), &labelled);

        let hardened = match self
            .generation
            .complete_structured::<SynthesisPayload>(&prompt)
            .await
        {
            Ok((payload, _)) => HardenedConcept::try_from(payload).unwrap_or_else(|e| {
                warn!("Synthesis did not match the expected shape: {}", e);
                HardenedConcept::fallback(topic.content())
            }),
            Err(GatewayError::MalformedResponse(reason)) => {
                warn!("Synthesis was unreadable: {}", reason);
                HardenedConcept::fallback(topic.content())
            }
            Err(e) => return Err(e),
        };

        self.logger.log(ConversationEvent::new(
            "synthesis",
            serde_json::json!({
                "concept": hardened.concept,
                "risks": hardened.risks,
                "opportunities": hardened.opportunities,
            }),
        ));

        Ok(hardened)
    }
}
