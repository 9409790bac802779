//! JSONL transcript writer.
//!
//! Every [`ConversationEvent`] becomes one JSON line carrying `type`,
//! `seq` (per-file sequence number) and `timestamp` next to the event's
//! own payload fields.

use council_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct TranscriptWriter {
    out: BufWriter<File>,
    seq: u64,
}

/// Transcript logger writing one JSON object per line.
///
/// Shared across critic tasks, so writes go through a `Mutex`. Each line is
/// flushed as it is written; `Drop` flushes once more.
pub struct JsonlConversationLogger {
    writer: Mutex<TranscriptWriter>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Create (or truncate) the transcript at `path`, creating parent
    /// directories as needed.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::open(path, false)
    }

    /// Append to an existing transcript, creating it if missing.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::open(path, true)
    }

    fn open(path: impl AsRef<Path>, append: bool) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)?;

        Ok(Self {
            writer: Mutex::new(TranscriptWriter {
                out: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent, seq: u64) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("seq".to_string(), Value::from(seq));
        map.insert("timestamp".to_string(), Value::from(timestamp));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };

        writer.seq += 1;
        let record = Self::record(event, writer.seq);
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Err(e) = writeln!(writer.out, "{}", line).and_then(|_| writer.out.flush()) {
            warn!("Transcript write to {} failed: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.transcript.jsonl");
        let logger = JsonlConversationLogger::create(&path).unwrap();

        logger.log(ConversationEvent::new(
            "critique",
            serde_json::json!({
                "iteration": 1,
                "agent_id": "skeptic",
                "content": "Too vague."
            }),
        ));
        logger.log(ConversationEvent::new(
            "iteration_scored",
            serde_json::json!({"iteration": 1, "score": 64.0}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0]["type"], "critique");
        assert_eq!(records[0]["agent_id"], "skeptic");
        assert_eq!(records[0]["seq"], 1);
        assert!(records[0]["timestamp"].is_string());

        assert_eq!(records[1]["type"], "iteration_scored");
        assert_eq!(records[1]["score"], 64.0);
        assert_eq!(records[1]["seq"], 2);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrapped.jsonl");
        let logger = JsonlConversationLogger::create(&path).unwrap();

        logger.log(ConversationEvent::new("note", serde_json::json!("plain text")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "plain text");
    }

    #[test]
    fn test_append_keeps_previous_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("append.jsonl");

        let first = JsonlConversationLogger::create(&path).unwrap();
        first.log(ConversationEvent::new("synthesis", serde_json::json!({"concept": "a"})));
        drop(first);

        let second = JsonlConversationLogger::append(&path).unwrap();
        second.log(ConversationEvent::new("synthesis", serde_json::json!({"concept": "b"})));
        drop(second);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["concept"], "b");
    }

    #[test]
    fn test_create_fails_under_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlConversationLogger::create(blocker.join("log.jsonl")).is_err());
    }
}
