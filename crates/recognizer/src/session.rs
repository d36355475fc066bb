//! The per-frame recognition state machine.
//!
//! [`GestureSession`] owns every tracker for one capture session and turns
//! each [`Frame`] into zero or more [`RecognizedEvent`]s. It performs no I/O
//! and never reads the system clock: all timing comes from frame
//! timestamps, so a recorded session replays identically.
//!
//! # Per-frame order
//!
//! 1. **Resolve** each role. While sleeping only the wake sign is evaluated.
//! 2. **Mode:** a right-hand Rock flips command mode (with cooldown).
//! 3. If sleeping, clear all hold/sequence/swipe state and stop here.
//! 4. **Holds:** per-role letter holds (left, then right).
//! 5. **Wake sequence** on the right hand.
//! 6. **Swipe** detection.
//! 7. **Exit sign:** both hands showing `L`.

use handsign_common::clock::{SessionClock, TimestampNs};
use handsign_common::config::RecognizerConfig;
use handsign_common::error::HandsignResult;
use handsign_pose_model::event::{GestureEventKind, RecognizedEvent};
use handsign_pose_model::frame::Frame;
use handsign_pose_model::landmark::HandRole;
use handsign_pose_model::signal::{Letter, Signal};

use crate::mode::ModeToggle;
use crate::resolver::{resolve_frame, ResolveMode, ResolvedFrame};
use crate::sequence::WakeSequence;
use crate::stability::HoldTracker;
use crate::swipe::{SwipeDetector, SwipeDirection};

/// Recognition state for one capture session.
#[derive(Debug, Clone)]
pub struct GestureSession {
    mode: ModeToggle,
    left_hold: HoldTracker,
    right_hold: HoldTracker,
    wake: WakeSequence,
    swipe: SwipeDetector,
    exit_latched: bool,
    frames_processed: u64,
}

impl GestureSession {
    /// Create a session from configuration, rejecting invalid tunables.
    pub fn new(config: &RecognizerConfig) -> HandsignResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Session with default tunables.
    pub fn with_defaults() -> Self {
        Self::from_valid(&RecognizerConfig::default())
    }

    fn from_valid(config: &RecognizerConfig) -> Self {
        let hold_ns = SessionClock::secs_to_ns(config.hold_threshold_secs);
        Self {
            mode: ModeToggle::new(
                SessionClock::secs_to_ns(config.mode_toggle_cooldown_secs),
                config.accepting_on_start,
            ),
            left_hold: HoldTracker::new(hold_ns),
            right_hold: HoldTracker::new(hold_ns),
            wake: WakeSequence::new(SessionClock::secs_to_ns(config.sequence_dwell_secs)),
            swipe: SwipeDetector::new(
                config.swipe_threshold_px,
                SessionClock::secs_to_ns(config.swipe_cooldown_secs),
                config.frame_width_px,
            ),
            exit_latched: false,
            frames_processed: 0,
        }
    }

    /// Run one frame through the pipeline and return the events it produced.
    pub fn process_frame(&mut self, frame: &Frame) -> Vec<RecognizedEvent> {
        let now = frame.timestamp_ns;
        let mut events = Vec::new();
        let mut emit = |kind: GestureEventKind| events.push(RecognizedEvent::new(now, kind));

        let resolve_mode = if self.mode.is_accepting() {
            ResolveMode::Full
        } else {
            ResolveMode::WakeOnly
        };
        let resolved = resolve_frame(frame, resolve_mode);
        self.frames_processed += 1;

        if let Some(accepting) = self.mode.update(resolved.signal(HandRole::Right), now) {
            tracing::info!(accepting, t = now, "Command mode toggled");
            emit(GestureEventKind::ModeChanged { accepting });
        }

        if !self.mode.is_accepting() {
            self.suspend();
            return events;
        }

        for role in HandRole::ALL {
            if let Some(letter) = self.update_hold(role, &resolved, now) {
                tracing::debug!(%role, %letter, t = now, "Letter held");
                emit(GestureEventKind::LetterHeld { letter, role });
            }
        }

        if self.wake.update(resolved.signal(HandRole::Right), now) {
            tracing::info!(t = now, "Wake sequence completed");
            emit(GestureEventKind::WakeToggle);
        }

        match self.swipe.update(&resolved, now) {
            Some(SwipeDirection::Left) => {
                tracing::info!(t = now, "Swipe left");
                emit(GestureEventKind::SwipeLeft);
            }
            Some(SwipeDirection::Right) => {
                tracing::info!(t = now, "Swipe right");
                emit(GestureEventKind::SwipeRight);
            }
            None => {}
        }

        if self.update_exit_sign(&resolved) {
            tracing::info!(t = now, "Both hands exit sign");
            emit(GestureEventKind::BothHandsExitSign);
        }

        events
    }

    fn update_hold(
        &mut self,
        role: HandRole,
        resolved: &ResolvedFrame,
        now: TimestampNs,
    ) -> Option<Letter> {
        let tracker = match role {
            HandRole::Left => &mut self.left_hold,
            HandRole::Right => &mut self.right_hold,
        };
        tracker
            .update(resolved.signal(role), now)
            .and_then(Signal::letter)
    }

    /// Edge-triggered: true only on the frame both hands start showing `L`.
    fn update_exit_sign(&mut self, resolved: &ResolvedFrame) -> bool {
        let l = Some(Signal::Letter(Letter::L));
        let both = resolved.signal(HandRole::Left) == l && resolved.signal(HandRole::Right) == l;
        let rising = both && !self.exit_latched;
        self.exit_latched = both;
        rising
    }

    /// Sleeping: nothing carries over into the next awake period.
    fn suspend(&mut self) {
        self.left_hold.reset();
        self.right_hold.reset();
        self.wake.reset();
        self.swipe.clear_positions();
        self.exit_latched = false;
    }

    pub fn is_accepting(&self) -> bool {
        self.mode.is_accepting()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn hold_tracker(&self, role: HandRole) -> &HoldTracker {
        match role {
            HandRole::Left => &self.left_hold,
            HandRole::Right => &self.right_hold,
        }
    }

    pub fn wake_sequence(&self) -> &WakeSequence {
        &self.wake
    }
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::HandBuilder;

    const MS: u64 = 1_000_000;

    fn awake() -> GestureSession {
        GestureSession::new(&RecognizerConfig {
            accepting_on_start: true,
            ..Default::default()
        })
        .unwrap()
    }

    fn frame(t_ms: u64, hands: &[(HandRole, HandBuilder)]) -> Frame {
        hands
            .iter()
            .fold(Frame::empty(t_ms * MS), |f, (role, b)| f.with_hand(*role, &b.build()))
    }

    fn kinds(events: Vec<RecognizedEvent>) -> Vec<GestureEventKind> {
        events.into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RecognizerConfig {
            frame_width_px: 0,
            ..Default::default()
        };
        assert!(GestureSession::new(&config).is_err());
    }

    #[test]
    fn test_starts_sleeping_by_default() {
        let mut session = GestureSession::with_defaults();
        assert!(!session.is_accepting());

        let b = HandBuilder::letter(Letter::B);
        let mut events = vec![];
        for t in (0..3_000).step_by(100) {
            events.extend(session.process_frame(&frame(t, &[(HandRole::Right, b)])));
        }
        assert!(events.is_empty());
        assert_eq!(session.hold_tracker(HandRole::Right).held_since(), None);
    }

    #[test]
    fn test_rock_wakes_session() {
        let mut session = GestureSession::with_defaults();
        let events = session.process_frame(&frame(0, &[(HandRole::Right, HandBuilder::rock())]));
        assert_eq!(
            kinds(events),
            vec![GestureEventKind::ModeChanged { accepting: true }]
        );
        assert!(session.is_accepting());
    }

    #[test]
    fn test_left_rock_does_not_toggle() {
        let mut session = GestureSession::with_defaults();
        let events = session.process_frame(&frame(0, &[(HandRole::Left, HandBuilder::rock())]));
        assert!(events.is_empty());
        assert!(!session.is_accepting());
    }

    #[test]
    fn test_letter_held_event_carries_role() {
        let mut session = awake();
        let y = HandBuilder::letter(Letter::Y);
        let mut events = vec![];
        for t in (0..=1_000).step_by(100) {
            events.extend(session.process_frame(&frame(t, &[(HandRole::Left, y)])));
        }
        assert_eq!(
            kinds(events),
            vec![GestureEventKind::LetterHeld {
                letter: Letter::Y,
                role: HandRole::Left
            }]
        );
    }

    #[test]
    fn test_exit_sign_is_edge_triggered() {
        let mut session = awake();
        let l = HandBuilder::letter(Letter::L);
        let both = [(HandRole::Left, l), (HandRole::Right, l)];

        let first = kinds(session.process_frame(&frame(0, &both)));
        assert_eq!(first, vec![GestureEventKind::BothHandsExitSign]);
        assert!(session.process_frame(&frame(100, &both)).is_empty());

        session.process_frame(&frame(200, &[(HandRole::Left, l)]));
        let again = kinds(session.process_frame(&frame(300, &both)));
        assert_eq!(again, vec![GestureEventKind::BothHandsExitSign]);
    }

    #[test]
    fn test_frame_counter() {
        let mut session = awake();
        session.process_frame(&Frame::empty(0));
        session.process_frame(&Frame::empty(MS));
        assert_eq!(session.frames_processed(), 2);
    }
}
