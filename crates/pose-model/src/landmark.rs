//! Hand landmarks and per-hand pose snapshots.
//!
//! Coordinates are normalized to `[0.0, 1.0]` relative to the (mirrored)
//! capture frame. Image y grows downward, so a smaller `y` is higher on
//! screen.

use std::ops::Index;

use handsign_common::error::{HandsignError, HandsignResult};
use serde::{Deserialize, Serialize};

/// Number of keypoints the pose estimator reports per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Named landmark indices in the 21-point hand model.
pub mod idx {
    pub const WRIST: usize = 0;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;
}

/// A single tracked keypoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Which hand a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandRole {
    Left,
    Right,
}

impl HandRole {
    pub const ALL: [HandRole; 2] = [HandRole::Left, HandRole::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            HandRole::Left => "left",
            HandRole::Right => "right",
        }
    }
}

impl std::fmt::Display for HandRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hand's 21 landmarks for a single frame.
///
/// The fixed-size array makes out-of-range indexing impossible once a
/// snapshot exists; malformed input is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSnapshot {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl PoseSnapshot {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Build a snapshot from a slice, which must contain exactly 21 points
    /// with finite coordinates.
    pub fn from_slice(points: &[Landmark]) -> HandsignResult<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| HandsignError::InvalidPose {
                    expected: LANDMARK_COUNT,
                    actual: points.len(),
                })?;
        if let Some(index) = landmarks.iter().position(|lm| !lm.is_finite()) {
            return Err(HandsignError::NonFiniteLandmark { index });
        }
        Ok(Self { landmarks })
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    /// Mutable access for building synthetic poses.
    pub fn set(&mut self, index: usize, landmark: Landmark) {
        self.landmarks[index] = landmark;
    }

    /// Reflect the snapshot horizontally (`x -> 1 - x`).
    pub fn mirrored_x(&self) -> Self {
        let mut landmarks = self.landmarks;
        for lm in &mut landmarks {
            lm.x = 1.0 - lm.x;
        }
        Self { landmarks }
    }
}

impl Index<usize> for PoseSnapshot {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }
}

impl TryFrom<&[Landmark]> for PoseSnapshot {
    type Error = HandsignError;

    fn try_from(points: &[Landmark]) -> HandsignResult<Self> {
        Self::from_slice(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_requires_21_points() {
        let short = vec![Landmark::default(); 20];
        let err = PoseSnapshot::from_slice(&short).unwrap_err();
        assert!(matches!(
            err,
            HandsignError::InvalidPose {
                expected: 21,
                actual: 20
            }
        ));

        let long = vec![Landmark::default(); 22];
        assert!(PoseSnapshot::try_from(long.as_slice()).is_err());

        let exact = vec![Landmark::new(0.1, 0.2, 0.0); 21];
        let snapshot = PoseSnapshot::from_slice(&exact).unwrap();
        assert_eq!(snapshot[idx::PINKY_TIP], Landmark::new(0.1, 0.2, 0.0));
    }

    #[test]
    fn test_from_slice_rejects_non_finite_coordinates() {
        let mut points = vec![Landmark::new(0.4, 0.6, 0.0); 21];
        points[idx::INDEX_TIP].x = f64::NAN;
        assert!(matches!(
            PoseSnapshot::from_slice(&points),
            Err(HandsignError::NonFiniteLandmark { index: 8 })
        ));

        points[idx::INDEX_TIP].x = 0.4;
        points[idx::WRIST].z = f64::INFINITY;
        assert!(matches!(
            PoseSnapshot::from_slice(&points),
            Err(HandsignError::NonFiniteLandmark { index: 0 })
        ));
    }

    #[test]
    fn test_mirrored_x() {
        let mut snapshot = PoseSnapshot::new([Landmark::default(); LANDMARK_COUNT]);
        snapshot.set(idx::THUMB_TIP, Landmark::new(0.3, 0.4, 0.1));
        let mirrored = snapshot.mirrored_x();
        assert!((mirrored[idx::THUMB_TIP].x - 0.7).abs() < 1e-12);
        assert_eq!(mirrored[idx::THUMB_TIP].y, 0.4);
        assert_eq!(mirrored[idx::THUMB_TIP].z, 0.1);
    }

    #[test]
    fn test_landmark_z_defaults() {
        let lm: Landmark = serde_json::from_str(r#"{"x":0.5,"y":0.25}"#).unwrap();
        assert_eq!(lm, Landmark::new(0.5, 0.25, 0.0));
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&HandRole::Left).unwrap(), "\"left\"");
        assert_eq!(HandRole::Right.to_string(), "right");
    }
}
