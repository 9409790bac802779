//! Raw TOML configuration data types
//!
//! These structs mirror the config file one section at a time. They are
//! deserialized as-is and converted into application types on demand, with
//! problems collected as [`ConfigIssue`]s rather than failing the load.

mod council;
mod models;
mod output;
mod provider;

pub use council::FileCouncilConfig;
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;

use council_application::CouncilConfig;
use council_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Primary and fallback model tiers
    pub models: FileModelsConfig,
    /// Loop bounds, round policy and call timeout
    pub council: FileCouncilConfig,
    /// HTTP endpoint settings
    pub provider: FileProviderConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Build the application-level [`CouncilConfig`], along with any issues
    /// found while parsing individual fields.
    pub fn to_council_config(&self) -> (CouncilConfig, Vec<ConfigIssue>) {
        let (tiers, mut issues) = self.models.to_tiers();
        let (policy, policy_issues) = self.council.parse_round_policy();
        issues.extend(policy_issues);

        let config = CouncilConfig::default()
            .with_tiers(tiers)
            .with_behavior(self.council.to_behavior())
            .with_round_policy(policy)
            .with_loop_config(self.council.to_loop_config());
        (config, issues)
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Covers field-level parse problems (empty model names, unknown enum
    /// values) and cross-field checks on the assembled council settings.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (config, mut issues) = self.to_council_config();
        issues.extend(config.validate());
        issues
    }
}
