//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Invalid loop configuration: {0}")]
    InvalidLoopConfig(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::UnknownAgent("x".to_string()).is_cancelled());
        assert!(!DomainError::InvalidTopic("".to_string()).is_cancelled());
    }
}
