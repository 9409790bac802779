//! Run Refinement use case
//!
//! Drives the autonomous loop: debate, synthesize, score, repeat. Each
//! iteration's synthesized concept becomes the next iteration's working
//! draft; the first iteration drafts from the topic itself. Scorer feedback
//! is recorded but never fed back into prompts.
//!
//! ```text
//! Drafting -> Debating -> Synthesizing -> Scoring -+-> Converged
//!                ^                                 +-> Exhausted
//!                +---------------------------------+
//! ```
//!
//! A hard error in any stage ends in `Failed`, a cancellation in
//! `Cancelled`; both are reported as progress and returned as errors.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::error::CouncilError;
use crate::use_cases::evaluate::EvaluateUseCase;
use crate::use_cases::generate::GenerationGateway;
use crate::use_cases::run_round::RunRoundUseCase;
use crate::use_cases::shared::{cancellable, check_cancelled};
use council_domain::{
    IterationRecord, LoopConfig, LoopResult, LoopState, ProgressEvent, RoundPolicy, Topic,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Use case running the refinement loop
pub struct RunRefinementUseCase<G: LlmGateway + ?Sized + 'static> {
    round: RunRoundUseCase<G>,
    scorer: EvaluateUseCase<G>,
    logger: Arc<dyn ConversationLogger>,
    cancellation: Option<CancellationToken>,
}

impl<G: LlmGateway + ?Sized + 'static> RunRefinementUseCase<G> {
    pub fn new(generation: Arc<GenerationGateway<G>>) -> Self {
        Self {
            round: RunRoundUseCase::new(Arc::clone(&generation)),
            scorer: EvaluateUseCase::new(generation),
            logger: Arc::new(NoConversationLogger),
            cancellation: None,
        }
    }

    pub fn with_policy(mut self, policy: RoundPolicy) -> Self {
        self.round = self.round.with_policy(policy);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.round = self.round.with_logger(Arc::clone(&logger));
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.round = self.round.with_cancellation(token.clone());
        self.cancellation = Some(token);
        self
    }

    /// Run without progress reporting
    pub async fn execute(
        &self,
        topic: &Topic,
        config: LoopConfig,
    ) -> Result<LoopResult, CouncilError> {
        self.run(topic, config, &NoProgress).await
    }

    /// Run the loop until the score clears `config.threshold` or
    /// `config.max_iterations` cycles have run.
    ///
    /// The result always carries the last iteration's concept, even when an
    /// earlier iteration scored higher.
    pub async fn run(
        &self,
        topic: &Topic,
        config: LoopConfig,
        progress: &dyn ProgressNotifier,
    ) -> Result<LoopResult, CouncilError> {
        config.validate()?;
        info!(
            "Starting refinement: threshold {}, up to {} iterations",
            config.threshold, config.max_iterations
        );

        let mut iteration = 0;
        let result = self.drive(topic, &config, progress, &mut iteration).await;

        if let Err(e) = &result {
            let terminal = if e.is_cancelled() {
                LoopState::Cancelled
            } else {
                LoopState::Failed
            };
            warn!("Refinement ended in {} at iteration {}: {}", terminal, iteration, e);
            progress.notify(ProgressEvent::state(terminal, iteration));
        }

        result
    }

    async fn drive(
        &self,
        topic: &Topic,
        config: &LoopConfig,
        progress: &dyn ProgressNotifier,
        iteration: &mut usize,
    ) -> Result<LoopResult, CouncilError> {
        let mut draft = topic.content().to_string();
        let mut history = Vec::new();

        loop {
            *iteration += 1;
            let n = *iteration;

            if n == 1 {
                self.enter(LoopState::Drafting, n, progress)?;
            }
            self.enter(LoopState::Debating, n, progress)?;
            let critiques = self.round.run_round(topic, &draft, n, progress).await?;

            self.enter(LoopState::Synthesizing, n, progress)?;
            let hardened = cancellable(&self.cancellation, async {
                self.round
                    .synthesizer()
                    .synthesize(topic, &critiques)
                    .await
                    .map_err(CouncilError::from)
            })
            .await?;
            progress.notify(ProgressEvent::synthesized(n));

            self.enter(LoopState::Scoring, n, progress)?;
            let evaluation = cancellable(&self.cancellation, async {
                self.scorer
                    .evaluate(topic, &hardened.concept)
                    .await
                    .map_err(CouncilError::from)
            })
            .await?;
            progress.notify(ProgressEvent::scored(n, evaluation.score));
            info!("Iteration {} scored {:.1}", n, evaluation.score);

            self.logger.log(ConversationEvent::new(
                "iteration_scored",
                serde_json::json!({
                    "iteration": n,
                    "score": evaluation.score,
                    "feedback": evaluation.feedback,
                    "concept": hardened.concept,
                }),
            ));

            history.push(IterationRecord {
                iteration: n,
                score: evaluation.score,
                feedback: evaluation.feedback,
            });
            draft = hardened.concept;

            if let Some(status) = config.decide(n, evaluation.score) {
                progress.notify(ProgressEvent::state(status.into(), n));
                return Ok(LoopResult {
                    final_concept: draft,
                    final_score: evaluation.score,
                    iteration_count: n,
                    status,
                    history,
                });
            }
        }
    }

    fn enter(
        &self,
        state: LoopState,
        iteration: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), CouncilError> {
        check_cancelled(&self.cancellation)?;
        progress.notify(ProgressEvent::state(state, iteration));
        Ok(())
    }
}
