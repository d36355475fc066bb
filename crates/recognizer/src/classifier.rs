//! One predicate per supported hand shape.
//!
//! Every classifier is frame-local and exact: no smoothing or hysteresis is
//! applied here. Whether a shape was held long enough to mean something is
//! decided downstream by [`crate::stability`].

use handsign_pose_model::landmark::{idx, HandRole, PoseSnapshot};
use handsign_pose_model::signal::Letter;

use crate::geometry::{
    distance, finger_extended, hand_size, is_thumb_extended, moderate_extension, Finger,
};

/// Index-to-pinky fingertip span for a `C`, as a fraction of hand size.
pub const C_SPAN_RANGE: (f64, f64) = (0.6, 0.9);

/// Shape predicate signature shared by all classifiers.
pub type Predicate = fn(&PoseSnapshot, HandRole) -> bool;

/// A letter paired with the predicate that recognizes it.
#[derive(Clone, Copy)]
pub struct LetterClassifier {
    pub letter: Letter,
    pub predicate: Predicate,
}

impl LetterClassifier {
    pub fn matches(&self, snapshot: &PoseSnapshot, role: HandRole) -> bool {
        (self.predicate)(snapshot, role)
    }
}

impl std::fmt::Debug for LetterClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LetterClassifier")
            .field("letter", &self.letter)
            .finish()
    }
}

/// Letters evaluated in this order; the first match wins.
pub const LETTER_PRIORITY: [LetterClassifier; 6] = [
    LetterClassifier { letter: Letter::A, predicate: is_a },
    LetterClassifier { letter: Letter::B, predicate: is_b },
    LetterClassifier { letter: Letter::C, predicate: is_c },
    LetterClassifier { letter: Letter::L, predicate: is_l },
    LetterClassifier { letter: Letter::Y, predicate: is_y },
    LetterClassifier { letter: Letter::W, predicate: is_w },
];

/// Checked only when nothing in [`LETTER_PRIORITY`] matched. Its condition
/// overlaps several others and would shadow them if checked earlier.
pub const FALLBACK: LetterClassifier = LetterClassifier {
    letter: Letter::I,
    predicate: is_i,
};

/// Extension state of the four non-thumb fingers plus the thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Digits {
    thumb: bool,
    index: bool,
    middle: bool,
    ring: bool,
    pinky: bool,
}

impl Digits {
    fn read(snapshot: &PoseSnapshot, role: HandRole) -> Self {
        Self {
            thumb: is_thumb_extended(snapshot, role),
            index: finger_extended(snapshot, Finger::Index),
            middle: finger_extended(snapshot, Finger::Middle),
            ring: finger_extended(snapshot, Finger::Ring),
            pinky: finger_extended(snapshot, Finger::Pinky),
        }
    }
}

/// Wake sign: index and pinky up, middle and ring down, thumb tucked.
pub fn is_rock(snapshot: &PoseSnapshot, role: HandRole) -> bool {
    let d = Digits::read(snapshot, role);
    d.index && d.pinky && !d.middle && !d.ring && !d.thumb
}

/// Closed fist.
pub fn is_a(snapshot: &PoseSnapshot, _role: HandRole) -> bool {
    Finger::ALL.iter().all(|&f| !finger_extended(snapshot, f))
}

/// Flat open hand.
pub fn is_b(snapshot: &PoseSnapshot, _role: HandRole) -> bool {
    Finger::ALL.iter().all(|&f| finger_extended(snapshot, f))
}

/// Curved hand: moderate fingertip span and every finger half-curled.
pub fn is_c(snapshot: &PoseSnapshot, _role: HandRole) -> bool {
    let size = hand_size(snapshot);
    if !size.is_finite() || size <= 0.0 {
        return false;
    }

    let span = distance(&snapshot[idx::INDEX_TIP], &snapshot[idx::PINKY_TIP]);
    let (lo, hi) = C_SPAN_RANGE;
    if !(lo * size < span && span < hi * size) {
        return false;
    }

    Finger::ALL
        .iter()
        .all(|&f| moderate_extension(snapshot, f.tip(), f.pip(), size))
}

pub fn is_l(snapshot: &PoseSnapshot, role: HandRole) -> bool {
    let d = Digits::read(snapshot, role);
    d.index && d.thumb && !d.middle && !d.ring && !d.pinky
}

pub fn is_y(snapshot: &PoseSnapshot, role: HandRole) -> bool {
    let d = Digits::read(snapshot, role);
    d.thumb && d.pinky && !d.index && !d.middle && !d.ring
}

pub fn is_i(snapshot: &PoseSnapshot, role: HandRole) -> bool {
    let d = Digits::read(snapshot, role);
    d.pinky && !d.index && !d.middle && !d.ring && !d.thumb
}

pub fn is_w(snapshot: &PoseSnapshot, role: HandRole) -> bool {
    let d = Digits::read(snapshot, role);
    d.index && d.middle && d.ring && !d.thumb && !d.pinky
}
