//! Dwell-time stabilization of per-frame signals.
//!
//! A [`HoldTracker`] follows one hand role. It promotes a signal to a
//! "held" event once the same signal has been observed continuously for the
//! hold threshold. Holds are edge-triggered: a held event fires once, and
//! the signal must change (or the hand disappear) before it can fire again.

use handsign_common::clock::TimestampNs;
use handsign_pose_model::signal::Signal;

/// Per-role hold state.
#[derive(Debug, Clone)]
pub struct HoldTracker {
    threshold_ns: u64,
    current: Signal,
    held_since: Option<TimestampNs>,
    fired: bool,
}

impl HoldTracker {
    pub fn new(threshold_ns: u64) -> Self {
        Self {
            threshold_ns,
            current: Signal::None,
            held_since: None,
            fired: false,
        }
    }

    /// Feed this frame's observation for the role.
    ///
    /// `observed` is `None` when no hand of this role is present. Returns the
    /// signal when it has just crossed the hold threshold.
    pub fn update(&mut self, observed: Option<Signal>, now: TimestampNs) -> Option<Signal> {
        let Some(signal) = observed else {
            self.reset();
            return None;
        };

        if signal != self.current || self.held_since.is_none() {
            if signal != self.current {
                tracing::trace!(from = %self.current, to = %signal, "Hold tracker re-armed");
            }
            self.current = signal;
            self.held_since = Some(now);
            self.fired = false;
        }

        let since = self.held_since?;
        if self.fired || !signal.is_recognized() {
            return None;
        }
        if now.saturating_sub(since) >= self.threshold_ns {
            self.fired = true;
            return Some(signal);
        }
        None
    }

    /// Drop any in-progress hold.
    pub fn reset(&mut self) {
        self.current = Signal::None;
        self.held_since = None;
        self.fired = false;
    }

    pub fn current(&self) -> Signal {
        self.current
    }

    pub fn held_since(&self) -> Option<TimestampNs> {
        self.held_since
    }

    /// How long the current signal has been held at `now`.
    pub fn held_for(&self, now: TimestampNs) -> Option<u64> {
        self.held_since.map(|since| now.saturating_sub(since))
    }
}
