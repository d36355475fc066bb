pub mod classify;
pub mod config;
pub mod replay;
pub mod synth;
pub mod validate;

use std::path::Path;

use handsign_pose_model::frame::{parse_frames, Frame};

/// Read and parse a frames JSONL file.
pub fn load_frames(path: &Path) -> anyhow::Result<Vec<Frame>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    parse_frames(&content).map_err(|e| anyhow::anyhow!("Failed to parse {}: {e}", path.display()))
}
