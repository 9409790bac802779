//! Configuration issues reported by config validation.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model field is present but blank.
    EmptyModelName { field: String },
    /// Primary and fallback tiers point at the same model, so a rate-limit
    /// retry hits the same quota.
    SameModelForBothTiers,
    /// Threshold is outside 0-100.
    ThresholdOutOfRange,
    /// Iteration budget is zero.
    ZeroIterations,
    /// Tolerant round policy asks for more critiques than there are critics.
    MinCritiquesUnreachable { min: usize, critics: usize },
    /// An enum-valued field holds an unknown value.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
