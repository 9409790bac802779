//! Run Round use case
//!
//! The debate orchestrator: fans one round out to every critic concurrently,
//! joins the critiques and, for [`debate`](RunRoundUseCase::debate), hands
//! them to the Synthesizer.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::error::CouncilError;
use crate::use_cases::generate::GenerationGateway;
use crate::use_cases::shared::{cancellable, cancelled, check_cancelled};
use crate::use_cases::synthesize::SynthesizeUseCase;
use council_domain::{
    AgentDefinition, AgentRoster, CritiqueMessage, DebateResult, ProgressEvent, RoundPolicy,
    Topic,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case running critique rounds
pub struct RunRoundUseCase<G: LlmGateway + ?Sized + 'static> {
    generation: Arc<GenerationGateway<G>>,
    synthesizer: SynthesizeUseCase<G>,
    policy: RoundPolicy,
    logger: Arc<dyn ConversationLogger>,
    cancellation: Option<CancellationToken>,
}

impl<G: LlmGateway + ?Sized + 'static> RunRoundUseCase<G> {
    pub fn new(generation: Arc<GenerationGateway<G>>) -> Self {
        Self {
            synthesizer: SynthesizeUseCase::new(Arc::clone(&generation)),
            generation,
            policy: RoundPolicy::default(),
            logger: Arc::new(NoConversationLogger),
            cancellation: None,
        }
    }

    pub fn with_policy(mut self, policy: RoundPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.synthesizer = self.synthesizer.with_logger(Arc::clone(&logger));
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn synthesizer(&self) -> &SynthesizeUseCase<G> {
        &self.synthesizer
    }

    /// Single-round entry point: one round of critiques, then synthesis.
    pub async fn debate(
        &self,
        topic: &Topic,
        context: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<DebateResult, CouncilError> {
        let critiques = self.run_round(topic, context, 1, progress).await?;

        let hardened = cancellable(&self.cancellation, async {
            self.synthesizer
                .synthesize(topic, &critiques)
                .await
                .map_err(CouncilError::from)
        })
        .await?;
        progress.notify(ProgressEvent::synthesized(1));

        Ok(DebateResult::new(critiques, hardened))
    }

    /// Ask every critic about `context`, concurrently.
    ///
    /// Critiques come back in completion order. Under the default
    /// all-or-nothing policy the first failure aborts the outstanding
    /// critics and discards the ones already received.
    pub async fn run_round(
        &self,
        topic: &Topic,
        context: &str,
        iteration: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<CritiqueMessage>, CouncilError> {
        check_cancelled(&self.cancellation)?;

        let critics: Vec<&'static AgentDefinition> = AgentRoster::critics().collect();
        info!("Round {}: convening {} critics", iteration, critics.len());
        progress.notify(ProgressEvent::round_started(iteration, critics.len()));

        let topic: Arc<str> = Arc::from(topic.content());
        let context: Arc<str> = Arc::from(context);
        let mut join_set = JoinSet::new();

        for agent in &critics {
            let agent = *agent;
            let generation = Arc::clone(&self.generation);
            let topic = Arc::clone(&topic);
            let context = Arc::clone(&context);

            join_set.spawn(async move {
                let prompt = agent.prompt(&topic, &context);
                let result = generation.complete_text(&prompt).await;
                (agent, result)
            });
        }

        let mut critiques = Vec::with_capacity(critics.len());
        let mut failed = 0usize;

        loop {
            let joined = tokio::select! {
                biased;
                _ = cancelled(&self.cancellation) => {
                    join_set.abort_all();
                    return Err(CouncilError::Cancelled);
                }
                joined = join_set.join_next() => joined,
            };
            let Some(joined) = joined else { break };

            match joined {
                Ok((agent, Ok(completion))) => {
                    if completion.used_fallback() {
                        progress.notify(ProgressEvent::fallback_used(
                            iteration,
                            completion.model.as_str(),
                        ));
                    }
                    debug!("{} answered", agent.display_name);
                    let critique = CritiqueMessage::new(agent, completion.into_text());
                    self.logger.log(ConversationEvent::new(
                        "critique",
                        serde_json::json!({
                            "iteration": iteration,
                            "agent_id": critique.agent_id,
                            "content": critique.content,
                        }),
                    ));
                    progress.notify(ProgressEvent::critique(iteration, critique.clone()));
                    critiques.push(critique);
                }
                Ok((agent, Err(e))) => {
                    warn!("{} failed: {}", agent.display_name, e);
                    if self.policy == RoundPolicy::AllOrNothing {
                        join_set.abort_all();
                        return Err(CouncilError::CritiqueFailed {
                            agent_id: agent.id.to_string(),
                            source: e,
                        });
                    }
                    progress.notify(ProgressEvent::critique_failed(
                        iteration,
                        agent.id,
                        &e.to_string(),
                    ));
                    failed += 1;
                }
                Err(e) => {
                    warn!("Critic task join error: {}", e);
                    if self.policy == RoundPolicy::AllOrNothing {
                        join_set.abort_all();
                        return Err(CouncilError::TaskFailed(e.to_string()));
                    }
                    failed += 1;
                }
            }
        }

        if let RoundPolicy::Tolerant { min_critiques } = self.policy {
            let required = min_critiques.max(1);
            if critiques.len() < required {
                return Err(CouncilError::InsufficientCritiques {
                    received: critiques.len(),
                    required,
                });
            }
            if failed > 0 {
                info!(
                    "Round {}: continuing with {} of {} critiques",
                    iteration,
                    critiques.len(),
                    critics.len()
                );
            }
        }

        Ok(critiques)
    }
}
