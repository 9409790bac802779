//! Council behavior from TOML (`[council]` section)

use council_application::BehaviorConfig;
use council_domain::{ConfigIssue, ConfigIssueCode, LoopConfig, RoundPolicy};
use serde::{Deserialize, Serialize};

const ROUND_POLICIES: [&str; 2] = ["all_or_nothing", "tolerant"];

/// Council settings from TOML
///
/// # Example
///
/// ```toml
/// [council]
/// threshold = 85
/// max_iterations = 3
/// round_policy = "tolerant"   # or "all_or_nothing" (default)
/// min_critiques = 3           # only read by "tolerant"
/// timeout_seconds = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Score (0-100) at which the loop stops
    pub threshold: f64,
    /// Iteration budget
    pub max_iterations: usize,
    pub round_policy: String,
    pub min_critiques: usize,
    /// Per-call timeout; unset or 0 disables it
    pub timeout_seconds: Option<u64>,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        let loop_config = LoopConfig::default();
        Self {
            threshold: loop_config.threshold,
            max_iterations: loop_config.max_iterations,
            round_policy: "all_or_nothing".to_string(),
            min_critiques: 3,
            timeout_seconds: None,
        }
    }
}

impl FileCouncilConfig {
    pub fn to_loop_config(&self) -> LoopConfig {
        LoopConfig::new(self.threshold, self.max_iterations)
    }

    pub fn to_behavior(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(self.timeout_seconds)
    }

    /// Parse `round_policy`; unknown values fall back to all-or-nothing
    /// with a warning.
    pub fn parse_round_policy(&self) -> (RoundPolicy, Vec<ConfigIssue>) {
        match self.round_policy.trim().to_lowercase().replace('-', "_").as_str() {
            "all_or_nothing" | "strict" => (RoundPolicy::AllOrNothing, Vec::new()),
            "tolerant" => (
                RoundPolicy::Tolerant {
                    min_critiques: self.min_critiques,
                },
                Vec::new(),
            ),
            _ => (
                RoundPolicy::AllOrNothing,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "council.round_policy".to_string(),
                        value: self.round_policy.clone(),
                        valid_values: ROUND_POLICIES.iter().map(|s| s.to_string()).collect(),
                    },
                    format!(
                        "council.round_policy: unknown value '{}', falling back to 'all_or_nothing'",
                        self.round_policy
                    ),
                )],
            ),
        }
    }
}
