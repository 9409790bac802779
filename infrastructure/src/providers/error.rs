//! Errors raised while setting up a provider adapter

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No API key found: set the {env} environment variable or provider.api_key")]
    MissingApiKey { env: String },

    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}
