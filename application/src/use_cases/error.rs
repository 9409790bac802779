//! Errors surfaced by the Council use cases

use crate::ports::llm_gateway::GatewayError;
use council_domain::DomainError;
use thiserror::Error;

/// Terminal failure of a round or a refinement run.
///
/// Exhausting the iteration budget is not an error; it is reported as
/// [`LoopStatus::Exhausted`](council_domain::LoopStatus::Exhausted).
#[derive(Error, Debug)]
pub enum CouncilError {
    /// One critic failed, so the whole round was abandoned
    #[error("Critic {agent_id} failed: {source}")]
    CritiqueFailed {
        agent_id: String,
        #[source]
        source: GatewayError,
    },

    /// Under a tolerant policy, too few critics answered
    #[error("Only {received} of {required} required critiques arrived")]
    InsufficientCritiques { received: usize, required: usize },

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Critic task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl CouncilError {
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            CouncilError::Cancelled | CouncilError::Domain(DomainError::Cancelled)
        )
    }
}
