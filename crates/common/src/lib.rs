//! Handsign Common Utilities
//!
//! Shared infrastructure for all handsign crates:
//! - Error types and result aliases
//! - Session clock and nanosecond timestamp helpers
//! - Tracing/logging initialization
//! - Configuration loading and recognizer tunables

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
