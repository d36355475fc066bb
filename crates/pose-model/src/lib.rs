//! Handsign Pose Model
//!
//! Defines the data contracts shared by the recognizer and its drivers:
//! - **Landmarks:** 21-point hand poses and left/right roles
//! - **Signals:** the per-frame shape a hand is showing
//! - **Frames:** recorded pose streams (JSONL)
//! - **Events:** discrete gestures handed to action sinks (JSONL)
//!
//! All landmark coordinates are normalized to `[0.0, 1.0]` relative to the
//! mirrored capture frame.

pub mod event;
pub mod frame;
pub mod landmark;
pub mod signal;

pub use event::*;
pub use frame::*;
pub use landmark::*;
pub use signal::*;
