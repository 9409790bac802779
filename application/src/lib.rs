//! Application layer for content-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{BehaviorConfig, CouncilConfig, ModelTiers};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway, ResponseShape},
    progress::{CallbackProgress, NoProgress, ProgressChannel, ProgressNotifier},
};
pub use use_cases::error::CouncilError;
pub use use_cases::evaluate::EvaluateUseCase;
pub use use_cases::generate::{Completion, CompletionContent, GenerationGateway};
pub use use_cases::run_refinement::RunRefinementUseCase;
pub use use_cases::run_round::RunRoundUseCase;
pub use use_cases::synthesize::SynthesizeUseCase;
