//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording the Council's
//! transcript (prompts, completions, critiques, syntheses, scores) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the full transcript
//! in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured transcript event.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "llm_response", "critique", "iteration_scored").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events.
///
/// `log` is synchronous and infallible so a broken log never disturbs a
/// round; implementations swallow their own I/O errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
