//! Validate a recorded pose stream.

use std::path::PathBuf;

use handsign_pose_model::frame::{parse_header, Frame};
use handsign_pose_model::landmark::HandRole;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating recording at: {}", path.display());

    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read recording: {e}"))?;

    match parse_header(&content) {
        Some(header) => println!(
            "  Header: v{} {}x{} @ {}fps",
            header.schema_version, header.frame_width, header.frame_height, header.fps
        ),
        None => println!("  Header: none (defaults apply)"),
    }

    let mut issues = Vec::new();
    let mut frames = 0usize;
    let mut hands = 0usize;
    let mut last_t: Option<u64> = None;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = line_no + 1;

        let frame: Frame = match serde_json::from_str(line) {
            Ok(frame) => frame,
            Err(e) => {
                issues.push(format!("line {line_no}: unparseable frame: {e}"));
                continue;
            }
        };
        frames += 1;
        hands += frame.hands.len();

        if let Some(last) = last_t {
            if frame.timestamp_ns < last {
                issues.push(format!(
                    "line {line_no}: timestamp {} goes backwards (previous {last})",
                    frame.timestamp_ns
                ));
            }
        }
        last_t = Some(frame.timestamp_ns);

        for role in HandRole::ALL {
            let count = frame.hands.iter().filter(|h| h.role == role).count();
            if count > 1 {
                issues.push(format!(
                    "line {line_no}: {count} {role} hands, only the first is used"
                ));
            }
        }

        for hand in &frame.hands {
            if let Err(e) = hand.snapshot() {
                issues.push(format!("line {line_no}: {} hand: {e}", hand.role));
            }
        }
    }

    println!("  Frames: {frames}");
    println!("  Hands: {hands}");
    if let Some(last) = last_t {
        println!("  Duration: {:.2}s", last as f64 / 1_000_000_000.0);
    }

    if issues.is_empty() {
        println!("\nRecording is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!("\n{} issue(s) found.", issues.len());
    }

    Ok(())
}
