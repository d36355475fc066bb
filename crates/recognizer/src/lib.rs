//! Handsign Recognizer
//!
//! Turns hand-landmark frames into discrete gesture events:
//! - **Classification:** letters A, B, C, I, L, W, Y and the Rock sign
//! - **Stabilization:** a letter must be held before it counts
//! - **Wake sequence:** B, A, B on the right hand
//! - **Command mode:** Rock on the right hand toggles acceptance
//! - **Swipes:** horizontal index-fingertip travel
//!
//! This crate is pure computation. Time comes from frame timestamps only.

pub mod classifier;
pub mod geometry;
pub mod mode;
pub mod resolver;
pub mod sequence;
pub mod session;
pub mod stability;
pub mod swipe;
pub mod testing;

pub use resolver::{resolve_frame, ResolveMode, ResolvedFrame};
pub use session::GestureSession;
