//! Landmark geometry used by the letter classifiers.
//!
//! All distance heuristics are 2D (`z` is ignored). Extension tests compare
//! image-space `y`, which grows downward: a fingertip with a smaller `y`
//! than its PIP joint is pointing up.

use handsign_pose_model::landmark::{idx, HandRole, Landmark, PoseSnapshot};

/// Lower and upper bounds (exclusive) of the tip-over-PIP ratio that counts
/// as a half-curled finger.
pub const MODERATE_EXTENSION_RANGE: (f64, f64) = (0.05, 0.15);

/// A non-thumb finger, identified by its tip and PIP landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn tip(self) -> usize {
        match self {
            Finger::Index => idx::INDEX_TIP,
            Finger::Middle => idx::MIDDLE_TIP,
            Finger::Ring => idx::RING_TIP,
            Finger::Pinky => idx::PINKY_TIP,
        }
    }

    pub fn pip(self) -> usize {
        match self {
            Finger::Index => idx::INDEX_PIP,
            Finger::Middle => idx::MIDDLE_PIP,
            Finger::Ring => idx::RING_PIP,
            Finger::Pinky => idx::PINKY_PIP,
        }
    }
}

/// Euclidean distance in the image plane.
pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Wrist to middle fingertip; the scale normalizer for ratio thresholds.
pub fn hand_size(snapshot: &PoseSnapshot) -> f64 {
    distance(&snapshot[idx::WRIST], &snapshot[idx::MIDDLE_TIP])
}

/// True iff the tip sits strictly above its PIP joint on screen.
pub fn is_extended(snapshot: &PoseSnapshot, tip: usize, pip: usize) -> bool {
    snapshot[tip].y < snapshot[pip].y
}

pub fn finger_extended(snapshot: &PoseSnapshot, finger: Finger) -> bool {
    is_extended(snapshot, finger.tip(), finger.pip())
}

/// Tip-over-PIP rise as a fraction of hand size, or `None` for a degenerate
/// (zero or non-finite) hand size.
pub fn extension_ratio(snapshot: &PoseSnapshot, tip: usize, pip: usize, hand_size: f64) -> Option<f64> {
    if !hand_size.is_finite() || hand_size <= 0.0 {
        return None;
    }
    Some((snapshot[pip].y - snapshot[tip].y) / hand_size)
}

/// Neither fully bent nor fully extended. False when hand size is degenerate.
pub fn moderate_extension(snapshot: &PoseSnapshot, tip: usize, pip: usize, hand_size: f64) -> bool {
    let (lo, hi) = MODERATE_EXTENSION_RANGE;
    extension_ratio(snapshot, tip, pip, hand_size)
        .map(|ratio| lo < ratio && ratio < hi)
        .unwrap_or(false)
}

/// Whether the back of the hand faces the camera.
///
/// Right hand: index MCP lies right of pinky MCP. Left hand: mirrored.
pub fn is_palm_away(snapshot: &PoseSnapshot, role: HandRole) -> bool {
    let index_mcp = snapshot[idx::INDEX_MCP].x;
    let pinky_mcp = snapshot[idx::PINKY_MCP].x;
    match role {
        HandRole::Right => index_mcp > pinky_mcp,
        HandRole::Left => index_mcp < pinky_mcp,
    }
}

/// Orientation-aware thumb abduction test.
///
/// The direction a thumb opens flips with both handedness and palm
/// orientation, so the tip-vs-MCP comparison has four branches:
///
/// | role  | palm   | extended when      |
/// |-------|--------|--------------------|
/// | right | away   | `tip.x > mcp.x`    |
/// | right | toward | `tip.x < mcp.x`    |
/// | left  | away   | `tip.x < mcp.x`    |
/// | left  | toward | `tip.x > mcp.x`    |
pub fn is_thumb_extended(snapshot: &PoseSnapshot, role: HandRole) -> bool {
    let tip = snapshot[idx::THUMB_TIP].x;
    let mcp = snapshot[idx::THUMB_MCP].x;
    let opens_right = match role {
        HandRole::Right => is_palm_away(snapshot, role),
        HandRole::Left => !is_palm_away(snapshot, role),
    };
    if opens_right {
        tip > mcp
    } else {
        tip < mcp
    }
}

/// Angle at `b` in degrees (0..=180) between rays `b->a` and `b->c`, in 3D.
/// Returns 0 if either ray has zero length.
pub fn angle_at_vertex(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    let ba = [a.x - b.x, a.y - b.y, a.z - b.z];
    let bc = [c.x - b.x, c.y - b.y, c.z - b.z];

    let dot: f64 = ba.iter().zip(&bc).map(|(p, q)| p * q).sum();
    let mag_ba = ba.iter().map(|v| v * v).sum::<f64>().sqrt();
    let mag_bc = bc.iter().map(|v| v * v).sum::<f64>().sqrt();

    if mag_ba == 0.0 || mag_bc == 0.0 {
        return 0.0;
    }

    (dot / (mag_ba * mag_bc)).clamp(-1.0, 1.0).acos().to_degrees()
}
