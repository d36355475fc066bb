//! Command-mode toggle driven by the right-hand Rock sign.

use handsign_common::clock::TimestampNs;
use handsign_pose_model::signal::Signal;

/// Whether the session is acting on letters and swipes.
///
/// Each Rock observation on the right hand flips the mode, but never more
/// often than once per cooldown. A Rock sign held past the cooldown toggles
/// again.
#[derive(Debug, Clone)]
pub struct ModeToggle {
    cooldown_ns: u64,
    accepting: bool,
    last_toggle: Option<TimestampNs>,
}

impl ModeToggle {
    pub fn new(cooldown_ns: u64, accepting: bool) -> Self {
        Self {
            cooldown_ns,
            accepting,
            last_toggle: None,
        }
    }

    /// Feed this frame's right-hand signal. Returns the new mode if it flipped.
    pub fn update(&mut self, right: Option<Signal>, now: TimestampNs) -> Option<bool> {
        if right != Some(Signal::Rock) {
            return None;
        }

        let cooled_down = self
            .last_toggle
            .map(|last| now.saturating_sub(last) >= self.cooldown_ns)
            .unwrap_or(true);
        if !cooled_down {
            return None;
        }

        self.accepting = !self.accepting;
        self.last_toggle = Some(now);
        Some(self.accepting)
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handsign_pose_model::signal::Letter;

    const MS: u64 = 1_000_000;

    #[test]
    fn test_first_rock_toggles_immediately() {
        let mut mode = ModeToggle::new(2_000 * MS, false);
        assert_eq!(mode.update(Some(Signal::Rock), 0), Some(true));
        assert!(mode.is_accepting());
    }

    #[test]
    fn test_cooldown_blocks_double_toggle() {
        let mut mode = ModeToggle::new(2_000 * MS, false);
        let toggles: Vec<bool> = (0..30)
            .filter_map(|i| mode.update(Some(Signal::Rock), i * 100 * MS))
            .collect();
        // t = 0 and t = 2.0s
        assert_eq!(toggles, vec![true, false]);
    }

    #[test]
    fn test_other_signals_ignored() {
        let mut mode = ModeToggle::new(2_000 * MS, true);
        assert_eq!(mode.update(None, 0), None);
        assert_eq!(mode.update(Some(Signal::Letter(Letter::B)), 0), None);
        assert_eq!(mode.update(Some(Signal::None), 0), None);
        assert!(mode.is_accepting());
    }
}
