//! Synthetic hand poses.
//!
//! Builds anatomically plausible 21-point snapshots with chosen fingers up
//! or down. Used by unit and scenario tests, and by the CLI to script demo
//! recordings without a camera.
//!
//! Generated hands have the index MCP to the right of the pinky MCP, i.e.
//! a right hand with the palm away (or a left hand with the palm toward the
//! camera). Thumb readings are role-independent for such poses.

use handsign_pose_model::landmark::{idx, Landmark, PoseSnapshot, LANDMARK_COUNT};
use handsign_pose_model::signal::{Letter, Signal};

const WRIST: (f64, f64) = (0.5, 0.9);
const PIP_Y: f64 = 0.55;
const TIP_UP_Y: f64 = 0.40;
const TIP_DOWN_Y: f64 = 0.65;
const THUMB_MCP: (f64, f64) = (0.60, 0.75);

/// Thumb abducted away from the palm.
pub const THUMB_OUT: bool = true;
/// Thumb tucked across the palm.
pub const THUMB_IN: bool = false;

/// Column x of index, middle, ring, pinky.
const FINGER_X: [f64; 4] = [0.56, 0.52, 0.48, 0.44];
const FINGER_JOINTS: [[usize; 4]; 4] = [
    [5, 6, 7, 8],
    [9, 10, 11, 12],
    [13, 14, 15, 16],
    [17, 18, 19, 20],
];

/// Builder for synthetic snapshots.
#[derive(Debug, Clone, Copy)]
pub struct HandBuilder {
    fingers: [bool; 4],
    thumb_out: bool,
    dx: f64,
}

impl Default for HandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HandBuilder {
    /// A closed fist with the thumb tucked.
    pub fn new() -> Self {
        Self {
            fingers: [false; 4],
            thumb_out: THUMB_IN,
            dx: 0.0,
        }
    }

    /// Extension of index, middle, ring, pinky.
    pub fn fingers(mut self, extended: [bool; 4]) -> Self {
        self.fingers = extended;
        self
    }

    pub fn thumb(mut self, extended: bool) -> Self {
        self.thumb_out = extended;
        self
    }

    /// Translate the whole hand horizontally (normalized units).
    pub fn shifted(mut self, dx: f64) -> Self {
        self.dx = dx;
        self
    }

    pub fn build(&self) -> PoseSnapshot {
        let mut points = [Landmark::new(WRIST.0, WRIST.1, 0.0); LANDMARK_COUNT];

        points[1] = Landmark::new(0.56, 0.82, 0.0);
        points[idx::THUMB_MCP] = Landmark::new(THUMB_MCP.0, THUMB_MCP.1, 0.0);
        let tip_x = if self.thumb_out { 0.72 } else { 0.52 };
        points[3] = Landmark::new((THUMB_MCP.0 + tip_x) / 2.0, 0.70, 0.0);
        points[idx::THUMB_TIP] = Landmark::new(tip_x, 0.66, 0.0);

        for (finger, joints) in FINGER_JOINTS.iter().enumerate() {
            let x = FINGER_X[finger];
            let tip_y = if self.fingers[finger] { TIP_UP_Y } else { TIP_DOWN_Y };
            points[joints[0]] = Landmark::new(x, 0.70, 0.0);
            points[joints[1]] = Landmark::new(x, PIP_Y, 0.0);
            points[joints[2]] = Landmark::new(x, (PIP_Y + tip_y) / 2.0, 0.0);
            points[joints[3]] = Landmark::new(x, tip_y, 0.0);
        }

        for p in &mut points {
            p.x += self.dx;
        }
        PoseSnapshot::new(points)
    }

    /// Wake sign: index and pinky up, thumb tucked.
    pub fn rock() -> Self {
        Self::new().fingers([true, false, false, true]).thumb(THUMB_IN)
    }

    /// A pose that matches no classifier (middle finger only).
    pub fn unrecognized() -> Self {
        Self::new().fingers([false, true, false, false]).thumb(THUMB_IN)
    }

    /// Canonical pose for a letter. `C` is not expressible with straight
    /// fingers; see [`HandBuilder::c_shape`].
    pub fn letter(letter: Letter) -> Self {
        match letter {
            Letter::A => Self::new(),
            Letter::B | Letter::C => Self::new().fingers([true; 4]),
            Letter::I => Self::new().fingers([false, false, false, true]),
            Letter::L => Self::new()
                .fingers([true, false, false, false])
                .thumb(THUMB_OUT),
            Letter::W => Self::new().fingers([true, true, true, false]),
            Letter::Y => Self::new()
                .fingers([false, false, false, true])
                .thumb(THUMB_OUT),
        }
    }

    /// Canonical pose for any signal.
    pub fn for_signal(signal: Signal) -> Self {
        match signal {
            Signal::Letter(letter) => Self::letter(letter),
            Signal::Rock => Self::rock(),
            Signal::None => Self::unrecognized(),
        }
    }

    /// Fingers half-curled with a moderate index-to-pinky span.
    pub fn c_shape() -> PoseSnapshot {
        let mut snapshot = Self::new().build();
        let tips_x = [0.65, 0.55, 0.45, 0.35];
        for (finger, joints) in FINGER_JOINTS.iter().enumerate() {
            snapshot.set(joints[1], Landmark::new(FINGER_X[finger], PIP_Y, 0.0));
            snapshot.set(joints[3], Landmark::new(tips_x[finger], 0.50, 0.0));
        }
        snapshot
    }
}
