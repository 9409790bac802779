//! Autonomous refinement loop entities.
//!
//! The loop runs `Drafting → Debating → Synthesizing → Scoring` and then
//! either stops (`Converged`/`Exhausted`) or goes back to `Debating` with the
//! synthesized concept as the new working draft. [`LoopConfig::decide`] holds
//! the stop rule so the use case only sequences calls.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Highest score the Scorer can award
pub const MAX_SCORE: f64 = 100.0;

/// Numeric evaluation of a candidate concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: f64,
    pub feedback: String,
}

impl Evaluation {
    /// Creates an evaluation, clamping the score into `0..=100`.
    pub fn new(score: f64, feedback: impl Into<String>) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, MAX_SCORE)
        } else {
            0.0
        };
        Self {
            score,
            feedback: feedback.into(),
        }
    }

    /// Score 0 with a diagnostic, used when the scoring response is unusable
    pub fn malformed(diagnostic: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            feedback: diagnostic.into(),
        }
    }
}

/// One loop pass's outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub score: f64,
    pub feedback: String,
}

/// How a successful loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopStatus {
    /// A score met or exceeded the threshold
    Converged,
    /// The iteration budget ran out first
    Exhausted,
}

impl std::fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopStatus::Converged => f.write_str("converged"),
            LoopStatus::Exhausted => f.write_str("exhausted"),
        }
    }
}

/// States of the refinement state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopState {
    Drafting,
    Debating,
    Synthesizing,
    Scoring,
    Converged,
    Exhausted,
    Failed,
    Cancelled,
}

impl LoopState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LoopState::Converged | LoopState::Exhausted | LoopState::Failed | LoopState::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoopState::Drafting => "drafting",
            LoopState::Debating => "debating",
            LoopState::Synthesizing => "synthesizing",
            LoopState::Scoring => "scoring",
            LoopState::Converged => "converged",
            LoopState::Exhausted => "exhausted",
            LoopState::Failed => "failed",
            LoopState::Cancelled => "cancelled",
        }
    }
}

impl From<LoopStatus> for LoopState {
    fn from(status: LoopStatus) -> Self {
        match status {
            LoopStatus::Converged => LoopState::Converged,
            LoopStatus::Exhausted => LoopState::Exhausted,
        }
    }
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-chosen quality bar and iteration budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    pub threshold: f64,
    pub max_iterations: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            threshold: 85.0,
            max_iterations: 3,
        }
    }
}

impl LoopConfig {
    pub fn new(threshold: f64, max_iterations: usize) -> Self {
        Self {
            threshold,
            max_iterations,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_iterations == 0 {
            return Err(DomainError::InvalidLoopConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !(0.0..=MAX_SCORE).contains(&self.threshold) {
            return Err(DomainError::InvalidLoopConfig(format!(
                "threshold must be within 0-100, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Stop rule, checked after each Scoring state.
    ///
    /// Returns `None` when the loop should run another iteration.
    pub fn decide(&self, iteration: usize, score: f64) -> Option<LoopStatus> {
        if score >= self.threshold {
            Some(LoopStatus::Converged)
        } else if iteration >= self.max_iterations {
            Some(LoopStatus::Exhausted)
        } else {
            None
        }
    }
}

/// Failure handling for a critique round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoundPolicy {
    /// Any critic failure aborts the whole round
    #[default]
    AllOrNothing,
    /// Keep going with the critics that answered, as long as at least
    /// `min_critiques` did
    Tolerant { min_critiques: usize },
}

/// Final answer of an autonomous run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopResult {
    pub final_concept: String,
    pub final_score: f64,
    pub iteration_count: usize,
    pub status: LoopStatus,
    pub history: Vec<IterationRecord>,
}

impl LoopResult {
    pub fn is_converged(&self) -> bool {
        self.status == LoopStatus::Converged
    }

    /// Highest-scoring iteration seen. Informational only: the result always
    /// carries the last iteration's concept.
    pub fn best_iteration(&self) -> Option<&IterationRecord> {
        self.history
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_clamps_score() {
        assert_eq!(Evaluation::new(140.0, "").score, 100.0);
        assert_eq!(Evaluation::new(-3.0, "").score, 0.0);
        assert_eq!(Evaluation::new(f64::NAN, "").score, 0.0);
        assert_eq!(Evaluation::new(72.5, "").score, 72.5);
    }

    #[test]
    fn test_decide_converges_at_threshold() {
        let config = LoopConfig::new(70.0, 3);
        assert_eq!(config.decide(1, 70.0), Some(LoopStatus::Converged));
        assert_eq!(config.decide(1, 69.9), None);
    }

    #[test]
    fn test_decide_exhausts_on_last_iteration() {
        let config = LoopConfig::new(90.0, 2);
        assert_eq!(config.decide(1, 60.0), None);
        assert_eq!(config.decide(2, 65.0), Some(LoopStatus::Exhausted));
    }

    #[test]
    fn test_convergence_wins_on_last_iteration() {
        let config = LoopConfig::new(80.0, 2);
        assert_eq!(config.decide(2, 81.0), Some(LoopStatus::Converged));
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        assert!(LoopConfig::new(70.0, 0).validate().is_err());
        assert!(LoopConfig::new(170.0, 1).validate().is_err());
        assert!(LoopConfig::default().validate().is_ok());
    }

    #[test]
    fn test_terminal_states() {
        assert!(LoopState::Converged.is_terminal());
        assert!(LoopState::Cancelled.is_terminal());
        assert!(!LoopState::Scoring.is_terminal());
        assert_eq!(LoopState::from(LoopStatus::Exhausted), LoopState::Exhausted);
    }

    #[test]
    fn test_best_iteration_does_not_change_final() {
        let result = LoopResult {
            final_concept: "third".to_string(),
            final_score: 50.0,
            iteration_count: 3,
            status: LoopStatus::Exhausted,
            history: vec![
                IterationRecord { iteration: 1, score: 40.0, feedback: String::new() },
                IterationRecord { iteration: 2, score: 75.0, feedback: String::new() },
                IterationRecord { iteration: 3, score: 50.0, feedback: String::new() },
            ],
        };
        assert_eq!(result.best_iteration().map(|r| r.iteration), Some(2));
        assert_eq!(result.final_concept, "third");
    }

    #[test]
    fn test_round_policy_serde() {
        let policy: RoundPolicy =
            serde_json::from_str(r#"{"mode": "tolerant", "min_critiques": 2}"#).unwrap();
        assert_eq!(policy, RoundPolicy::Tolerant { min_critiques: 2 });
        assert_eq!(RoundPolicy::default(), RoundPolicy::AllOrNothing);
    }
}
