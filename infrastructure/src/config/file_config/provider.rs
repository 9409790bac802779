//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat-completions endpoint.
///
/// The default points at Gemini's OpenAI-compatible surface; any endpoint
/// speaking the same wire format works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Environment variable holding the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Max tokens per response.
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

impl FileProviderConfig {
    /// The configured key, else the value of `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}
