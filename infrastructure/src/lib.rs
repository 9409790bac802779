//! Infrastructure layer for content-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileCouncilConfig, FileModelsConfig, FileOutputConfig,
    FileProviderConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{OpenAiCompatibleConfig, OpenAiCompatibleGateway, ProviderError};
