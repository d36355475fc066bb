//! Write a scripted demo recording from synthetic hands.
//!
//! The script wakes the recognizer, walks through the wake sequence, holds
//! a left-hand letter, swipes, shows the two-handed exit sign and finally
//! puts the recognizer back to sleep.

use std::path::PathBuf;

use handsign_pose_model::frame::{serialize_frames, Frame, RecordingHeader};
use handsign_pose_model::landmark::HandRole;
use handsign_pose_model::signal::Letter;
use handsign_recognizer::testing::HandBuilder;

/// One stretch of the script with fixed hands.
struct Step {
    secs: f64,
    left: Option<HandBuilder>,
    right: Option<HandBuilder>,
}

impl Step {
    fn idle(secs: f64) -> Self {
        Self {
            secs,
            left: None,
            right: None,
        }
    }

    fn right(secs: f64, hand: HandBuilder) -> Self {
        Self {
            secs,
            left: None,
            right: Some(hand),
        }
    }

    fn left(secs: f64, hand: HandBuilder) -> Self {
        Self {
            secs,
            left: Some(hand),
            right: None,
        }
    }

    fn both(secs: f64, hand: HandBuilder) -> Self {
        Self {
            secs,
            left: Some(hand),
            right: Some(hand),
        }
    }
}

fn script(fps: u32) -> Vec<Step> {
    let frame_secs = 1.0 / fps as f64;
    let b = HandBuilder::letter(Letter::B);

    let mut steps = vec![
        Step::idle(0.5),
        Step::right(0.3, HandBuilder::rock()),
        Step::idle(0.5),
        Step::right(1.2, b),
        Step::right(1.2, HandBuilder::letter(Letter::A)),
        Step::right(1.2, b),
        Step::idle(0.5),
        Step::left(1.2, HandBuilder::letter(Letter::Y)),
        Step::idle(0.5),
    ];

    // An open right hand sweeping leftward 0.1 of the frame per frame.
    for dx in [0.2, 0.1, 0.0, -0.1, -0.2] {
        steps.push(Step::right(frame_secs, b.shifted(dx)));
    }

    steps.extend([
        Step::idle(0.5),
        Step::both(1.2, HandBuilder::letter(Letter::L)),
        Step::idle(2.0),
        Step::right(0.3, HandBuilder::rock()),
        Step::idle(0.5),
    ]);
    steps
}

fn render(steps: &[Step], fps: u32) -> Vec<Frame> {
    let frame_ns = 1_000_000_000 / u64::from(fps);
    let mut frames = Vec::new();

    for step in steps {
        let count = (step.secs * fps as f64).round().max(1.0) as usize;
        let left = step.left.map(|h| h.build());
        let right = step.right.map(|h| h.build());

        for _ in 0..count {
            let mut frame = Frame::empty(frames.len() as u64 * frame_ns);
            if let Some(s) = &left {
                frame = frame.with_hand(HandRole::Left, s);
            }
            if let Some(s) = &right {
                frame = frame.with_hand(HandRole::Right, s);
            }
            frames.push(frame);
        }
    }
    frames
}

pub fn run(out: PathBuf, fps: u32) -> anyhow::Result<()> {
    if fps == 0 {
        anyhow::bail!("fps must be positive");
    }

    let header = RecordingHeader {
        fps,
        ..Default::default()
    };
    let frames = render(&script(fps), fps);
    let jsonl = serialize_frames(&header, &frames)?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out, jsonl)?;

    let duration = frames.last().map(Frame::timestamp_secs).unwrap_or(0.0);
    println!(
        "Wrote {} frames ({duration:.1}s @ {fps}fps) to {}",
        frames.len(),
        out.display()
    );
    Ok(())
}
