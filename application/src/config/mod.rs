//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`ModelTiers`] / [`BehaviorConfig`] — which models to call and per-call limits
//! - [`CouncilConfig`] — container used to assemble the Council use cases

pub mod council_config;
pub mod execution_params;

pub use council_config::CouncilConfig;
pub use execution_params::{BehaviorConfig, ModelTiers};
