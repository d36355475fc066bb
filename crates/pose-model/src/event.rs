//! Discrete gesture events emitted by the recognizer.
//!
//! Events are the only thing that crosses from recognition into action
//! handling. They serialize to the same append-only JSONL shape as pose
//! recordings so a session can be logged and inspected afterwards.

use handsign_common::clock::TimestampNs;
use serde::{Deserialize, Serialize};

use crate::landmark::HandRole;
use crate::signal::Letter;

/// A recognized gesture with the frame timestamp that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedEvent {
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    #[serde(flatten)]
    pub kind: GestureEventKind,
}

/// Discriminated union of gesture events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEventKind {
    /// A letter was held continuously for the hold threshold.
    LetterHeld { letter: Letter, role: HandRole },

    /// The right hand completed the wake sequence.
    WakeToggle,

    /// The Rock sign flipped command mode.
    ModeChanged { accepting: bool },

    /// Right index fingertip moved sharply leftward.
    SwipeLeft,

    /// Left index fingertip moved sharply rightward.
    SwipeRight,

    /// Both hands started showing `L` at the same time.
    BothHandsExitSign,
}

/// Header line written as `# {json}` at the top of an event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogHeader {
    pub schema_version: String,
    /// Wall-clock time at which timestamp zero was taken (RFC 3339).
    pub epoch_wall: String,
    /// Name of the pose source that produced the frames.
    pub source: String,
}

impl RecognizedEvent {
    pub fn new(timestamp_ns: TimestampNs, kind: GestureEventKind) -> Self {
        Self { timestamp_ns, kind }
    }

    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

impl std::fmt::Display for GestureEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureEventKind::LetterHeld { letter, role } => {
                write!(f, "letter {letter} held ({role})")
            }
            GestureEventKind::WakeToggle => f.write_str("wake toggle"),
            GestureEventKind::ModeChanged { accepting: true } => {
                f.write_str("mode: accepting commands")
            }
            GestureEventKind::ModeChanged { accepting: false } => f.write_str("mode: sleeping"),
            GestureEventKind::SwipeLeft => f.write_str("swipe left"),
            GestureEventKind::SwipeRight => f.write_str("swipe right"),
            GestureEventKind::BothHandsExitSign => f.write_str("both hands exit sign"),
        }
    }
}

/// Parse events from JSONL content (one JSON object per line).
pub fn parse_events(jsonl: &str) -> Result<Vec<RecognizedEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Extract the event log header from the first `# ` line, if present.
pub fn parse_event_log_header(jsonl: &str) -> Option<EventLogHeader> {
    let first = jsonl.lines().map(str::trim).find(|l| !l.is_empty())?;
    let json = first.strip_prefix('#')?.trim();
    serde_json::from_str(json).ok()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[RecognizedEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_held_json_shape() {
        let event = RecognizedEvent::new(
            1_234_000_000,
            GestureEventKind::LetterHeld {
                letter: Letter::B,
                role: HandRole::Right,
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"t\":1234000000"));
        assert!(json.contains("\"type\":\"letter_held\""));
        assert!(json.contains("\"letter\":\"B\""));
        assert!(json.contains("\"role\":\"right\""));
    }

    #[test]
    fn test_unit_variant_json_shape() {
        let event = RecognizedEvent::new(0, GestureEventKind::BothHandsExitSign);
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            "{\"t\":0,\"type\":\"both_hands_exit_sign\"}"
        );
    }

    #[test]
    fn test_jsonl_roundtrip_skips_header() {
        let events = vec![
            RecognizedEvent::new(0, GestureEventKind::ModeChanged { accepting: true }),
            RecognizedEvent::new(500_000_000, GestureEventKind::SwipeLeft),
            RecognizedEvent::new(900_000_000, GestureEventKind::WakeToggle),
        ];
        let jsonl = format!("# {{\"schema_version\":\"1.0\"}}\n{}", serialize_events(&events).unwrap());
        assert_eq!(parse_events(&jsonl).unwrap(), events);
    }

    #[test]
    fn test_display() {
        let kind = GestureEventKind::LetterHeld {
            letter: Letter::Y,
            role: HandRole::Left,
        };
        assert_eq!(kind.to_string(), "letter Y held (left)");
        assert_eq!(
            GestureEventKind::ModeChanged { accepting: false }.to_string(),
            "mode: sleeping"
        );
    }

    #[test]
    fn test_event_log_header() {
        let jsonl = "# {\"schema_version\":\"1.0\",\"epoch_wall\":\"2026-01-01T00:00:00Z\",\"source\":\"replay\"}\n{\"t\":0,\"type\":\"wake_toggle\"}\n";
        let header = parse_event_log_header(jsonl).unwrap();
        assert_eq!(header.source, "replay");
        assert!(parse_event_log_header("{\"t\":0,\"type\":\"wake_toggle\"}").is_none());
    }
}
