//! Horizontal swipe detection from index-fingertip travel.
//!
//! Each role remembers the fingertip's pixel x from the previous frame in
//! which that hand was present with a recognized signal. A gap (hand absent
//! or unrecognized) clears the memory, so a re-acquired hand cannot swipe
//! against a stale position.
//!
//! Only the right hand swipes left and only the left hand swipes right. The
//! cooldown is shared: any swipe suppresses both hands until it expires.

use handsign_common::clock::TimestampNs;
use handsign_pose_model::landmark::HandRole;

use crate::resolver::{HandReading, ResolvedFrame};

/// Direction of a detected swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Per-role swipe memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwipeTracker {
    pub last_x: Option<i32>,
}

/// Swipe detector for both hands.
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    threshold_px: i32,
    cooldown_ns: u64,
    frame_width_px: u32,
    left: SwipeTracker,
    right: SwipeTracker,
    last_fire: Option<TimestampNs>,
}

impl SwipeDetector {
    pub fn new(threshold_px: i32, cooldown_ns: u64, frame_width_px: u32) -> Self {
        Self {
            threshold_px,
            cooldown_ns,
            frame_width_px,
            left: SwipeTracker::default(),
            right: SwipeTracker::default(),
            last_fire: None,
        }
    }

    /// Update both roles from one resolved frame. At most one swipe fires
    /// per frame because of the shared cooldown.
    pub fn update(&mut self, frame: &ResolvedFrame, now: TimestampNs) -> Option<SwipeDirection> {
        let mut fired = None;
        for role in HandRole::ALL {
            if let Some(direction) = self.update_role(role, frame.get(role), now) {
                fired.get_or_insert(direction);
            }
        }
        fired
    }

    fn update_role(
        &mut self,
        role: HandRole,
        reading: Option<&HandReading>,
        now: TimestampNs,
    ) -> Option<SwipeDirection> {
        let current_x = reading
            .filter(|r| r.signal.is_recognized())
            .and_then(|r| r.index_tip_x)
            .map(|x| self.to_pixels(x));

        let tracker = match role {
            HandRole::Left => &mut self.left,
            HandRole::Right => &mut self.right,
        };
        let previous = std::mem::replace(&mut tracker.last_x, current_x);

        let (Some(prev), Some(curr)) = (previous, current_x) else {
            return None;
        };
        // Widened so saturated pixel positions cannot overflow.
        let delta = i64::from(curr) - i64::from(prev);
        let threshold = i64::from(self.threshold_px);

        let direction = match role {
            HandRole::Right if delta < -threshold => SwipeDirection::Left,
            HandRole::Left if delta > threshold => SwipeDirection::Right,
            _ => return None,
        };

        let cooled_down = self
            .last_fire
            .map(|last| now.saturating_sub(last) >= self.cooldown_ns)
            .unwrap_or(true);
        if !cooled_down {
            tracing::trace!(%role, delta, "Swipe suppressed by cooldown");
            return None;
        }

        self.last_fire = Some(now);
        Some(direction)
    }

    fn to_pixels(&self, normalized_x: f64) -> i32 {
        (normalized_x * self.frame_width_px as f64) as i32
    }

    /// Forget both hands' positions (the cooldown is kept).
    pub fn clear_positions(&mut self) {
        self.left = SwipeTracker::default();
        self.right = SwipeTracker::default();
    }

    pub fn tracker(&self, role: HandRole) -> SwipeTracker {
        match role {
            HandRole::Left => self.left,
            HandRole::Right => self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handsign_pose_model::signal::{Letter, Signal};

    const MS: u64 = 1_000_000;

    fn reading(x: f64) -> HandReading {
        HandReading {
            signal: Signal::Letter(Letter::B),
            index_tip_x: Some(x),
        }
    }

    fn right_at(x: f64) -> ResolvedFrame {
        ResolvedFrame {
            left: None,
            right: Some(reading(x)),
        }
    }

    fn left_at(x: f64) -> ResolvedFrame {
        ResolvedFrame {
            left: Some(reading(x)),
            right: None,
        }
    }

    fn detector() -> SwipeDetector {
        SwipeDetector::new(50, 1_000 * MS, 640)
    }

    #[test]
    fn test_right_hand_swipes_left() {
        let mut d = detector();
        assert_eq!(d.update(&right_at(0.6), 0), None);
        assert_eq!(d.tracker(HandRole::Right).last_x, Some(384));
        // 384 -> 320: delta -64
        assert_eq!(d.update(&right_at(0.5), 33 * MS), Some(SwipeDirection::Left));
    }

    #[test]
    fn test_wrong_direction_per_hand_ignored() {
        let mut d = detector();
        d.update(&right_at(0.3), 0);
        assert_eq!(d.update(&right_at(0.6), 33 * MS), None);

        d.update(&left_at(0.6), 66 * MS);
        assert_eq!(d.update(&left_at(0.3), 100 * MS), None);
    }

    #[test]
    fn test_left_hand_swipes_right() {
        let mut d = detector();
        d.update(&left_at(0.3), 0);
        assert_eq!(d.update(&left_at(0.45), 33 * MS), Some(SwipeDirection::Right));
    }

    #[test]
    fn test_small_motion_is_not_a_swipe() {
        let mut d = detector();
        d.update(&right_at(0.5), 0);
        // 320 -> 290: delta -30
        assert_eq!(d.update(&right_at(0.453), 33 * MS), None);
    }

    #[test]
    fn test_gap_clears_position() {
        let mut d = detector();
        d.update(&right_at(0.8), 0);
        d.update(&ResolvedFrame::default(), 33 * MS);
        assert_eq!(d.tracker(HandRole::Right).last_x, None);
        assert_eq!(d.update(&right_at(0.2), 66 * MS), None);
    }

    #[test]
    fn test_unrecognized_signal_clears_position() {
        let mut d = detector();
        d.update(&right_at(0.8), 0);
        let blank = ResolvedFrame {
            left: None,
            right: Some(HandReading {
                signal: Signal::None,
                index_tip_x: Some(0.5),
            }),
        };
        d.update(&blank, 33 * MS);
        assert_eq!(d.update(&right_at(0.2), 66 * MS), None);
    }

    #[test]
    fn test_extreme_positions_do_not_overflow() {
        let mut d = detector();
        d.update(&right_at(1.0e12), 0);
        assert_eq!(d.tracker(HandRole::Right).last_x, Some(i32::MAX));
        assert_eq!(d.update(&right_at(-1.0e12), 33 * MS), Some(SwipeDirection::Left));

        let mut d = detector();
        d.update(&right_at(-1.0e12), 0);
        assert_eq!(d.update(&right_at(1.0e12), 33 * MS), None);
        d.update(&left_at(-1.0e12), 66 * MS);
        assert_eq!(d.update(&left_at(1.0e12), 100 * MS), Some(SwipeDirection::Right));
    }

    #[test]
    fn test_cooldown_is_shared_between_hands() {
        let mut d = detector();
        d.update(&right_at(0.8), 0);
        assert_eq!(d.update(&right_at(0.6), 33 * MS), Some(SwipeDirection::Left));

        d.update(&left_at(0.2), 100 * MS);
        assert_eq!(d.update(&left_at(0.4), 133 * MS), None);

        d.update(&left_at(0.2), 1_100 * MS);
        assert_eq!(
            d.update(&left_at(0.4), 1_133 * MS),
            Some(SwipeDirection::Right)
        );
    }
}
