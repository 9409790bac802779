//! Presentation layer for content-council
//!
//! This crate contains the CLI definition, output formatters and progress
//! renderers.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputMode};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress, drain};
