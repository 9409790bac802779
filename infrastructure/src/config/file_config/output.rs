//! Rendering settings from TOML (`[output]` section)

use council_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// How results are printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// `full`, `concept` or `json`; unset means `concept`
    pub format: Option<OutputFormat>,
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// A format given on the command line beats the file's.
    pub fn resolve_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.format).unwrap_or_default()
    }
}
