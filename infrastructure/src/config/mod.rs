//! Configuration file loading for content-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `CONTENT_COUNCIL_*` environment variables
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. Global: `$XDG_CONFIG_HOME/content-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileCouncilConfig, FileModelsConfig, FileOutputConfig, FileProviderConfig,
};
pub use loader::ConfigLoader;
