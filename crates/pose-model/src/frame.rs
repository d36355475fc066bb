//! Recorded pose streams.
//!
//! A pose stream is JSONL: an optional `# {header}` comment line followed by
//! one [`Frame`] per line. Each frame lists the hands the pose estimator
//! reported, with their raw landmark lists. Landmark counts are not checked
//! on parse; [`HandObservation::snapshot`] validates them per hand so a
//! single malformed hand never poisons the rest of a recording.

use handsign_common::clock::TimestampNs;
use handsign_common::error::HandsignResult;
use serde::{Deserialize, Serialize};

use crate::landmark::{HandRole, Landmark, PoseSnapshot};

/// Metadata written as the first (comment) line of a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Capture frame size in pixels.
    pub frame_width: u32,
    pub frame_height: u32,

    /// Nominal capture rate.
    pub fps: u32,
}

impl Default for RecordingHeader {
    fn default() -> Self {
        Self {
            schema_version: "1.0".to_string(),
            frame_width: 640,
            frame_height: 480,
            fps: 30,
        }
    }
}

/// One hand reported by the pose estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    pub role: HandRole,
    pub landmarks: Vec<Landmark>,
}

impl HandObservation {
    pub fn new(role: HandRole, snapshot: &PoseSnapshot) -> Self {
        Self {
            role,
            landmarks: snapshot.landmarks().to_vec(),
        }
    }

    /// Validate the landmark list into a fixed-size snapshot.
    pub fn snapshot(&self) -> HandsignResult<PoseSnapshot> {
        PoseSnapshot::from_slice(&self.landmarks)
    }
}

/// All hands detected in one captured frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Monotonic nanoseconds since session start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    #[serde(default)]
    pub hands: Vec<HandObservation>,
}

impl Frame {
    /// A frame in which no hands were detected.
    pub fn empty(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            hands: Vec::new(),
        }
    }

    pub fn with_hand(mut self, role: HandRole, snapshot: &PoseSnapshot) -> Self {
        self.hands.push(HandObservation::new(role, snapshot));
        self
    }

    /// The first reported hand with the given role. Later duplicates are ignored.
    pub fn hand(&self, role: HandRole) -> Option<&HandObservation> {
        self.hands.iter().find(|h| h.role == role)
    }

    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

/// Parse frames from JSONL content, skipping blank and `#` lines.
pub fn parse_frames(jsonl: &str) -> Result<Vec<Frame>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Extract the recording header from the first `# ` line, if present.
pub fn parse_header(jsonl: &str) -> Option<RecordingHeader> {
    let first = jsonl.lines().map(str::trim).find(|l| !l.is_empty())?;
    let json = first.strip_prefix('#')?.trim();
    serde_json::from_str(json).ok()
}

/// Serialize a header and frames to JSONL.
pub fn serialize_frames(
    header: &RecordingHeader,
    frames: &[Frame],
) -> Result<String, serde_json::Error> {
    let mut output = format!("# {}\n", serde_json::to_string(header)?);
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
