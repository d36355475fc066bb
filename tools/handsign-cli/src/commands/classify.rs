//! Stateless per-frame classification listing.

use std::collections::BTreeMap;
use std::path::PathBuf;

use handsign_pose_model::landmark::HandRole;
use handsign_pose_model::signal::Signal;
use handsign_recognizer::resolver::{resolve_frame, ResolveMode};

pub fn run(frames: PathBuf) -> anyhow::Result<()> {
    let frames = super::load_frames(&frames)?;

    let mut histogram: BTreeMap<String, usize> = BTreeMap::new();
    println!("{:>9}  {:<6} {:<6}", "t (s)", "left", "right");

    for frame in &frames {
        let resolved = resolve_frame(frame, ResolveMode::Full);
        let cell = |role: HandRole| {
            resolved
                .signal(role)
                .map(|s| s.to_string())
                .unwrap_or_else(|| " ".to_string())
        };
        println!(
            "{:>9.3}  {:<6} {:<6}",
            frame.timestamp_secs(),
            cell(HandRole::Left),
            cell(HandRole::Right)
        );

        for role in HandRole::ALL {
            if let Some(signal) = resolved.signal(role) {
                let key = match signal {
                    Signal::None => "unrecognized".to_string(),
                    other => other.to_string(),
                };
                *histogram.entry(key).or_default() += 1;
            }
        }
    }

    println!();
    println!("{} frame(s)", frames.len());
    for (signal, count) in &histogram {
        println!("  {signal:<13} {count}");
    }

    Ok(())
}
