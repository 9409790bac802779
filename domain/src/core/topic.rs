//! Topic value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The concept put before the Council (Value Object)
///
/// A topic is the caller's draft idea for a post. It is the working draft of
/// the first refinement iteration and is embedded in every prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Topic {
    content: String,
}

impl Topic {
    /// Create a topic, rejecting empty or whitespace-only text
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidTopic(
                "topic cannot be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    /// Get the topic text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner text
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Topic {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Topic::new(s)
    }
}

impl TryFrom<&str> for Topic {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Topic::new(s)
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.content
    }
}
