//! Ordered letter-sequence matching for the wake gesture.
//!
//! The right hand must hold each letter of [`WAKE_SEQUENCE`] for the dwell
//! time, in order. Any other signal, or losing the right hand, resets the
//! match to the first element.
//!
//! After an element completes the hand is necessarily still showing it for
//! a few frames before moving on, so the just-completed letter is tolerated
//! while waiting for the next one; it only pauses the dwell timer.

use handsign_common::clock::TimestampNs;
use handsign_pose_model::signal::{Letter, Signal};

/// The wake sequence: B, A, B.
pub const WAKE_SEQUENCE: [Letter; 3] = [Letter::B, Letter::A, Letter::B];

/// Progress through the wake sequence.
#[derive(Debug, Clone)]
pub struct WakeSequence {
    dwell_ns: u64,
    expected_index: usize,
    dwell_start: Option<TimestampNs>,
}

impl WakeSequence {
    pub fn new(dwell_ns: u64) -> Self {
        Self {
            dwell_ns,
            expected_index: 0,
            dwell_start: None,
        }
    }

    /// Feed this frame's right-hand signal (`None` if the right hand is
    /// absent). Returns true when the full sequence has just completed.
    pub fn update(&mut self, right: Option<Signal>, now: TimestampNs) -> bool {
        let Some(signal) = right else {
            self.reset();
            return false;
        };

        let expected = Signal::Letter(WAKE_SEQUENCE[self.expected_index]);
        if signal == expected {
            let start = *self.dwell_start.get_or_insert(now);
            if now.saturating_sub(start) >= self.dwell_ns {
                self.expected_index += 1;
                self.dwell_start = None;
                tracing::debug!(step = self.expected_index, "Wake sequence advanced");

                if self.expected_index == WAKE_SEQUENCE.len() {
                    self.reset();
                    return true;
                }
            }
        } else if self.is_previous_step(signal) {
            self.dwell_start = None;
        } else {
            if self.expected_index > 0 {
                tracing::debug!(got = %signal, expected = %expected, "Wake sequence broken");
            }
            self.reset();
        }
        false
    }

    fn is_previous_step(&self, signal: Signal) -> bool {
        self.expected_index
            .checked_sub(1)
            .map(|prev| signal == Signal::Letter(WAKE_SEQUENCE[prev]))
            .unwrap_or(false)
    }

    pub fn reset(&mut self) {
        self.expected_index = 0;
        self.dwell_start = None;
    }

    /// Index of the next letter the sequence is waiting for.
    pub fn expected_index(&self) -> usize {
        self.expected_index
    }

    pub fn dwell_start(&self) -> Option<TimestampNs> {
        self.dwell_start
    }
}
