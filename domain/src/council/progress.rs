//! Progress events published by the Council while it works.

use crate::council::entities::CritiqueMessage;
use crate::council::refinement::LoopState;
use serde::{Deserialize, Serialize};

/// Milestone category, so consumers can render without parsing `message`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    /// The loop entered a new state
    StateChanged(LoopState),
    /// A round was dispatched to this many critics
    RoundStarted { critics: usize },
    /// One critic answered
    CritiqueReceived,
    /// One critic failed (only reported under a tolerant round policy)
    CritiqueFailed,
    /// The Synthesizer produced the round's hardened concept
    Synthesized,
    /// The Scorer evaluated the working draft
    Scored,
    /// A generative call was retried on the fallback tier
    FallbackUsed,
}

/// A milestone notification. Ephemeral: emitted and forgotten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub kind: ProgressKind,
    pub message: String,
    pub iteration: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critique: Option<CritiqueMessage>,
}

impl ProgressEvent {
    pub fn new(kind: ProgressKind, iteration: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            iteration,
            score: None,
            critique: None,
        }
    }

    pub fn state(state: LoopState, iteration: usize) -> Self {
        Self::new(
            ProgressKind::StateChanged(state),
            iteration,
            format!("Iteration {}: {}", iteration, state),
        )
    }

    pub fn round_started(iteration: usize, critics: usize) -> Self {
        Self::new(
            ProgressKind::RoundStarted { critics },
            iteration,
            format!("Convening {} critics", critics),
        )
    }

    pub fn critique(iteration: usize, critique: CritiqueMessage) -> Self {
        let message = format!("{} has spoken", critique.label());
        Self {
            critique: Some(critique),
            ..Self::new(ProgressKind::CritiqueReceived, iteration, message)
        }
    }

    pub fn critique_failed(iteration: usize, agent_id: &str, error: &str) -> Self {
        Self::new(
            ProgressKind::CritiqueFailed,
            iteration,
            format!("{} failed: {}", agent_id, error),
        )
    }

    pub fn synthesized(iteration: usize) -> Self {
        Self::new(
            ProgressKind::Synthesized,
            iteration,
            "Critiques synthesized into a hardened concept",
        )
    }

    pub fn scored(iteration: usize, score: f64) -> Self {
        Self {
            score: Some(score),
            ..Self::new(
                ProgressKind::Scored,
                iteration,
                format!("Iteration {} scored {:.0}", iteration, score),
            )
        }
    }

    pub fn fallback_used(iteration: usize, model: &str) -> Self {
        Self::new(
            ProgressKind::FallbackUsed,
            iteration,
            format!("Rate limited, retried on {}", model),
        )
    }
}
