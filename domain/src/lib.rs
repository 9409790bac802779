//! Domain layer for content-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A fixed roster of critics ([`RoleTag`]) reviews a draft concept in
//! parallel. A synthesizer merges their critiques into a [`HardenedConcept`],
//! and a scorer rates it.
//!
//! ## Refinement loop
//!
//! Rounds repeat until a score clears the caller's threshold or the
//! iteration budget runs out ([`LoopConfig`], [`LoopResult`]).

pub mod config;
pub mod core;
pub mod council;
pub mod prompt;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use crate::core::{
    error::DomainError,
    model::{Model, ModelTier},
    topic::Topic,
};
pub use council::{
    entities::{CritiqueMessage, DebateResult, HardenedConcept},
    parsing::{DecodeError, EvaluationPayload, RawScore, SynthesisPayload, extract_json},
    progress::{ProgressEvent, ProgressKind},
    refinement::{
        Evaluation, IterationRecord, LoopConfig, LoopResult, LoopState, LoopStatus, MAX_SCORE,
        RoundPolicy,
    },
    roster::{AgentDefinition, AgentRoster, RoleTag},
};
pub use prompt::PromptTemplate;
