//! JSONL file writer for the conversation transcript.
//!
//! Each [`ConversationEvent`] is serialized as a single JSON line with a
//! `type` field and a UTC `timestamp`, appended via a buffered writer. The
//! file is opened in append mode so one transcript spans assistant
//! sessions.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use vox_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};

/// Transcript logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event —
/// a transcript that loses its tail on a crash is not much of a
/// transcript. Flushes again on `Drop`.
pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Open (or create) the transcript at the given path, creating parent
    /// directories as needed. Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(err) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                err
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!("Could not open transcript file {}: {}", path.display(), err);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Path of the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlTranscriptLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Merge type + timestamp into the payload record.
        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_json_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "user_turn",
            serde_json::json!({ "content": "hello" }),
        ));
        logger.log(ConversationEvent::new(
            "assistant_turn",
            serde_json::json!({ "content": "hi", "duration_ms": 420 }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "user_turn");
        assert_eq!(lines[0]["content"], "hello");
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[1]["type"], "assistant_turn");
        assert_eq!(lines[1]["duration_ms"], 420);
    }

    #[test]
    fn test_appends_across_logger_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.jsonl");

        {
            let logger = JsonlTranscriptLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new("session_reset", serde_json::json!({})));
        }
        {
            let logger = JsonlTranscriptLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new("session_reset", serde_json::json!({})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("t.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();
        logger.log(ConversationEvent::new("user_turn", serde_json::json!({})));
        assert!(path.exists());
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();
        logger.log(ConversationEvent::new(
            "provider_attempt",
            serde_json::json!("bare string"),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "provider_attempt");
        assert_eq!(lines[0]["data"], "bare string");
    }
}
