//! Per-frame resolution of hands into signals.
//!
//! Each detected hand is evaluated exactly once per frame, yielding a single
//! [`Signal`]. Only derived scalars (the signal and the index fingertip x)
//! survive past this step; raw snapshots are dropped with the frame.

use handsign_pose_model::frame::{Frame, HandObservation};
use handsign_pose_model::landmark::{idx, HandRole, PoseSnapshot};
use handsign_pose_model::signal::Signal;

use crate::classifier::{is_rock, FALLBACK, LETTER_PRIORITY};

/// Which classifiers run this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Wake sign first, then letters in priority order, then the fallback.
    Full,
    /// Sleeping: only the wake sign is evaluated.
    WakeOnly,
}

/// What survives of one hand after resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandReading {
    pub signal: Signal,
    /// Normalized x of the index fingertip; `None` for malformed poses.
    pub index_tip_x: Option<f64>,
}

/// Readings for at most one hand per role.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedFrame {
    pub left: Option<HandReading>,
    pub right: Option<HandReading>,
}

impl ResolvedFrame {
    pub fn get(&self, role: HandRole) -> Option<&HandReading> {
        match role {
            HandRole::Left => self.left.as_ref(),
            HandRole::Right => self.right.as_ref(),
        }
    }

    pub fn signal(&self, role: HandRole) -> Option<Signal> {
        self.get(role).map(|r| r.signal)
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Classify a single snapshot.
///
/// The wake sign cannot co-occur with any letter (it needs index up with
/// middle down and thumb tucked), so checking it first never shadows one.
pub fn resolve_snapshot(snapshot: &PoseSnapshot, role: HandRole, mode: ResolveMode) -> Signal {
    if is_rock(snapshot, role) {
        return Signal::Rock;
    }
    if mode == ResolveMode::WakeOnly {
        return Signal::None;
    }

    LETTER_PRIORITY
        .iter()
        .chain(std::iter::once(&FALLBACK))
        .find(|classifier| classifier.matches(snapshot, role))
        .map(|classifier| Signal::Letter(classifier.letter))
        .unwrap_or(Signal::None)
}

fn resolve_hand(hand: &HandObservation, mode: ResolveMode) -> HandReading {
    match hand.snapshot() {
        Ok(snapshot) => HandReading {
            signal: resolve_snapshot(&snapshot, hand.role, mode),
            index_tip_x: Some(snapshot[idx::INDEX_TIP].x),
        },
        Err(e) => {
            tracing::warn!(role = %hand.role, error = %e, "Malformed hand pose, treating as no signal");
            HandReading {
                signal: Signal::None,
                index_tip_x: None,
            }
        }
    }
}

/// Resolve every role present in the frame. Duplicate roles after the first
/// are ignored.
pub fn resolve_frame(frame: &Frame, mode: ResolveMode) -> ResolvedFrame {
    ResolvedFrame {
        left: frame
            .hand(HandRole::Left)
            .map(|hand| resolve_hand(hand, mode)),
        right: frame
            .hand(HandRole::Right)
            .map(|hand| resolve_hand(hand, mode)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::HandBuilder;
    use handsign_pose_model::landmark::Landmark;
    use handsign_pose_model::signal::Letter;

    fn resolve(builder: HandBuilder) -> Signal {
        resolve_snapshot(&builder.build(), HandRole::Right, ResolveMode::Full)
    }

    #[test]
    fn test_canonical_letters_resolve() {
        for letter in [Letter::A, Letter::B, Letter::I, Letter::L, Letter::W, Letter::Y] {
            assert_eq!(
                resolve(HandBuilder::letter(letter)),
                Signal::Letter(letter),
                "letter {letter}"
            );
        }
        assert_eq!(resolve(HandBuilder::rock()), Signal::Rock);
        assert_eq!(resolve(HandBuilder::unrecognized()), Signal::None);
    }

    #[test]
    fn test_c_shape_is_shadowed_by_b() {
        let c = HandBuilder::c_shape();
        assert_eq!(
            resolve_snapshot(&c, HandRole::Right, ResolveMode::Full),
            Signal::Letter(Letter::B)
        );
    }

    #[test]
    fn test_wake_only_mode_skips_letters() {
        let b = HandBuilder::letter(Letter::B).build();
        assert_eq!(
            resolve_snapshot(&b, HandRole::Right, ResolveMode::WakeOnly),
            Signal::None
        );
        let rock = HandBuilder::rock().build();
        assert_eq!(
            resolve_snapshot(&rock, HandRole::Right, ResolveMode::WakeOnly),
            Signal::Rock
        );
    }

    #[test]
    fn test_frame_with_no_hands() {
        let resolved = resolve_frame(&Frame::empty(0), ResolveMode::Full);
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_frame_per_role_and_duplicates() {
        let frame = Frame::empty(0)
            .with_hand(HandRole::Left, &HandBuilder::letter(Letter::L).build())
            .with_hand(HandRole::Right, &HandBuilder::letter(Letter::W).build())
            .with_hand(HandRole::Right, &HandBuilder::letter(Letter::A).build());

        let resolved = resolve_frame(&frame, ResolveMode::Full);
        assert_eq!(resolved.signal(HandRole::Left), Some(Signal::Letter(Letter::L)));
        assert_eq!(resolved.signal(HandRole::Right), Some(Signal::Letter(Letter::W)));
    }

    #[test]
    fn test_malformed_hand_is_present_without_signal() {
        let mut frame = Frame::empty(0);
        frame.hands.push(HandObservation {
            role: HandRole::Left,
            landmarks: vec![Landmark::default(); 5],
        });

        let resolved = resolve_frame(&frame, ResolveMode::Full);
        let reading = resolved.get(HandRole::Left).unwrap();
        assert_eq!(reading.signal, Signal::None);
        assert_eq!(reading.index_tip_x, None);
        assert!(resolved.get(HandRole::Right).is_none());
    }

    #[test]
    fn test_index_tip_x_is_carried() {
        let frame =
            Frame::empty(0).with_hand(HandRole::Right, &HandBuilder::new().shifted(0.1).build());
        let reading = resolve_frame(&frame, ResolveMode::Full).right.unwrap();
        assert!((reading.index_tip_x.unwrap() - 0.66).abs() < 1e-12);
    }
}
