//! Council configuration container.
//!
//! [`CouncilConfig`] groups everything needed to assemble the Council use
//! cases: model tiers, call behavior, the round failure policy and the
//! default loop bounds. The CLI builds one from the config file and flags.

use crate::config::{BehaviorConfig, ModelTiers};
use council_domain::{AgentRoster, ConfigIssue, ConfigIssueCode, LoopConfig, RoundPolicy};

#[derive(Debug, Clone, Default)]
pub struct CouncilConfig {
    pub tiers: ModelTiers,
    pub behavior: BehaviorConfig,
    pub round_policy: RoundPolicy,
    pub loop_config: LoopConfig,
}

impl CouncilConfig {
    pub fn with_tiers(mut self, tiers: ModelTiers) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_round_policy(mut self, policy: RoundPolicy) -> Self {
        self.round_policy = policy;
        self
    }

    pub fn with_loop_config(mut self, loop_config: LoopConfig) -> Self {
        self.loop_config = loop_config;
        self
    }

    /// Check the combination of settings, returning every issue found.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.tiers.primary == self.tiers.fallback {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::SameModelForBothTiers,
                format!(
                    "primary and fallback tiers both use {}; rate-limit retries will hit the same quota",
                    self.tiers.primary
                ),
            ));
        }

        if self.loop_config.max_iterations == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroIterations,
                "max_iterations must be at least 1",
            ));
        }

        if !(0.0..=council_domain::MAX_SCORE).contains(&self.loop_config.threshold) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ThresholdOutOfRange,
                format!(
                    "threshold must be within 0-100, got {}",
                    self.loop_config.threshold
                ),
            ));
        }

        if let RoundPolicy::Tolerant { min_critiques } = self.round_policy {
            let critics = AgentRoster::critic_count();
            if min_critiques == 0 || min_critiques > critics {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MinCritiquesUnreachable {
                        min: min_critiques,
                        critics,
                    },
                    format!(
                        "min_critiques must be between 1 and {}, got {}",
                        critics, min_critiques
                    ),
                ));
            }
        }

        issues
    }
}
