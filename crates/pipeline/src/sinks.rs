//! Built-in action sinks.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use handsign_common::error::{HandsignError, HandsignResult};
use handsign_pose_model::event::{EventLogHeader, RecognizedEvent};

use crate::ActionSink;

/// Logs every event at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ActionSink for TracingSink {
    fn dispatch(&mut self, event: &RecognizedEvent) -> HandsignResult<()> {
        tracing::info!(t = event.timestamp_secs(), "{}", event.kind);
        Ok(())
    }
}

/// Collects events in memory.
impl ActionSink for Vec<RecognizedEvent> {
    fn dispatch(&mut self, event: &RecognizedEvent) -> HandsignResult<()> {
        self.push(event.clone());
        Ok(())
    }
}

/// Lets a caller keep a handle on a sink after giving it to a pipeline.
impl<S: ActionSink> ActionSink for Arc<Mutex<S>> {
    fn dispatch(&mut self, event: &RecognizedEvent) -> HandsignResult<()> {
        self.lock()
            .map_err(|_| HandsignError::sink("Shared sink lock poisoned"))?
            .dispatch(event)
    }

    fn flush(&mut self) -> HandsignResult<()> {
        self.lock()
            .map_err(|_| HandsignError::sink("Shared sink lock poisoned"))?
            .flush()
    }
}

/// Writes events to a JSONL file in append-only mode.
pub struct JsonlEventSink {
    writer: BufWriter<File>,
    path: PathBuf,
    events_written: u64,
}

impl JsonlEventSink {
    /// Create the log, writing the header as the first line.
    pub fn new(path: PathBuf, header: EventLogHeader) -> HandsignResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        let header_json = serde_json::to_string(&header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| HandsignError::sink(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            events_written: 0,
        })
    }

    /// Number of events written.
    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    /// Path to the output file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ActionSink for JsonlEventSink {
    fn dispatch(&mut self, event: &RecognizedEvent) -> HandsignResult<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| HandsignError::sink(format!("Failed to write event: {e}")))?;
        self.events_written += 1;

        // Events are sparse compared to frames; keep the file close to live.
        if self.events_written % 16 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    fn flush(&mut self) -> HandsignResult<()> {
        self.writer
            .flush()
            .map_err(|e| HandsignError::sink(format!("Failed to flush events: {e}")))
    }
}

impl Drop for JsonlEventSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handsign_pose_model::event::{parse_event_log_header, parse_events, GestureEventKind};
    use handsign_pose_model::landmark::HandRole;
    use handsign_pose_model::signal::Letter;

    #[test]
    fn test_jsonl_sink_writes_header_and_events() {
        let dir = std::env::temp_dir().join("handsign_test_sink");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("events.jsonl");
        let header = EventLogHeader {
            schema_version: "1.0".to_string(),
            epoch_wall: "2026-01-01T00:00:00Z".to_string(),
            source: "test".to_string(),
        };

        let events = vec![
            RecognizedEvent::new(0, GestureEventKind::ModeChanged { accepting: true }),
            RecognizedEvent::new(
                1_000_000_000,
                GestureEventKind::LetterHeld {
                    letter: Letter::B,
                    role: HandRole::Right,
                },
            ),
        ];

        {
            let mut sink = JsonlEventSink::new(path.clone(), header.clone()).unwrap();
            for event in &events {
                sink.dispatch(event).unwrap();
            }
            assert_eq!(sink.events_written(), 2);
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(parse_event_log_header(&content), Some(header));
        assert_eq!(parse_events(&content).unwrap(), events);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<RecognizedEvent> = Vec::new();
        let event = RecognizedEvent::new(5, GestureEventKind::SwipeLeft);
        sink.dispatch(&event).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink, vec![event]);
    }
}
