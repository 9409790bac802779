//! Execution parameters for generative calls.
//!
//! [`ModelTiers`] names the primary and fallback backends, and
//! [`BehaviorConfig`] holds per-call limits. Together they configure the
//! [`GenerationGateway`](crate::use_cases::generate::GenerationGateway).

use council_domain::{Model, ModelTier};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Primary and fallback model tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTiers {
    pub primary: Model,
    pub fallback: Model,
}

impl Default for ModelTiers {
    fn default() -> Self {
        Self {
            primary: Model::default_primary(),
            fallback: Model::default_fallback(),
        }
    }
}

impl ModelTiers {
    pub fn new(primary: Model, fallback: Model) -> Self {
        Self { primary, fallback }
    }

    pub fn model(&self, tier: ModelTier) -> &Model {
        match tier {
            ModelTier::Primary => &self.primary,
            ModelTier::Fallback => &self.fallback,
        }
    }
}

/// Application behavior configuration.
///
/// Controls runtime behavior of generative calls, such as the per-call
/// timeout. A timeout is its own failure class and is never retried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a single completion.
    pub timeout: Option<Duration>,
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None` (or zero), no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }
}
