//! Pose source backed by a recorded frame stream.

use std::collections::VecDeque;
use std::path::Path;

use handsign_common::clock::{SessionClock, TimestampNs};
use handsign_common::error::{HandsignError, HandsignResult};
use handsign_pose_model::frame::{parse_frames, parse_header, Frame, RecordingHeader};

use crate::{PoseSource, SourcePoll};

/// Replays recorded frames in file order.
///
/// Unpaced replay yields frames as fast as they are polled. Paced replay
/// holds each frame back until its timestamp, measured from the first
/// frame, has elapsed in wall time, which is how a live camera behaves.
#[derive(Debug)]
pub struct ReplaySource {
    frames: VecDeque<Frame>,
    header: RecordingHeader,
    paced: bool,
    started: Option<(SessionClock, TimestampNs)>,
    name: String,
}

impl ReplaySource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
            header: RecordingHeader::default(),
            paced: false,
            started: None,
            name: "replay".to_string(),
        }
    }

    /// Load a recording from a JSONL file.
    pub fn from_path(path: &Path) -> HandsignResult<Self> {
        if !path.exists() {
            return Err(HandsignError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let frames = parse_frames(&content)?;
        let header = parse_header(&content).unwrap_or_default();
        tracing::debug!(path = %path.display(), frames = frames.len(), "Loaded recording");

        Ok(Self {
            frames: frames.into(),
            header,
            paced: false,
            started: None,
            name: format!("replay:{}", path.display()),
        })
    }

    pub fn paced(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    pub fn header(&self) -> &RecordingHeader {
        &self.header
    }

    /// Frames not yet replayed.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    fn is_due(&mut self, frame: &Frame) -> bool {
        if !self.paced {
            return true;
        }
        let (clock, first_ns) = self
            .started
            .get_or_insert_with(|| (SessionClock::start(), frame.timestamp_ns));
        clock.elapsed_ns() >= frame.timestamp_ns.saturating_sub(*first_ns)
    }
}

impl PoseSource for ReplaySource {
    fn poll(&mut self) -> HandsignResult<SourcePoll> {
        let Some(next) = self.frames.front().cloned() else {
            return Ok(SourcePoll::Finished);
        };
        if !self.is_due(&next) {
            return Ok(SourcePoll::Pending);
        }
        self.frames.pop_front();
        Ok(SourcePoll::Frame(next))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
