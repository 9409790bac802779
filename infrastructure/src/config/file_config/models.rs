//! Model tier configuration from TOML (`[models]` section)

use council_application::ModelTiers;
use council_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Model tiers from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// primary = "gemini-2.5-flash"    # every call starts here
/// fallback = "gemini-2.0-flash"   # used once after a rate limit
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub primary: Option<String>,
    pub fallback: Option<String>,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    fn parse_single_model(
        field: &str,
        value: Option<&String>,
    ) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: field.to_string(),
                    },
                    format!("models.{}: model name cannot be empty", field),
                )],
            ),
            // unknown names become Model::Custom
            Some(s) => (s.trim().parse::<Model>().ok(), Vec::new()),
        }
    }

    pub fn parse_primary(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("primary", self.primary.as_ref())
    }

    pub fn parse_fallback(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("fallback", self.fallback.as_ref())
    }

    /// Resolve both tiers, falling back to the built-in defaults.
    pub fn to_tiers(&self) -> (ModelTiers, Vec<ConfigIssue>) {
        let (primary, mut issues) = self.parse_primary();
        let (fallback, fallback_issues) = self.parse_fallback();
        issues.extend(fallback_issues);

        let tiers = ModelTiers::new(
            primary.unwrap_or_else(Model::default_primary),
            fallback.unwrap_or_else(Model::default_fallback),
        );
        (tiers, issues)
    }
}
