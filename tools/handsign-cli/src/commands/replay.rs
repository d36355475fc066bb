//! Run the recognizer over a recorded pose stream.

use std::path::PathBuf;
use std::sync::atomic::Ordering;

use handsign_common::clock::SessionClock;
use handsign_common::config::AppConfig;
use handsign_pipeline::{
    spawn_capture, GesturePipeline, JsonlEventSink, PoseSource, ReplaySource, TracingSink,
};
use handsign_pose_model::event::EventLogHeader;
use handsign_recognizer::GestureSession;

pub async fn run(
    frames: PathBuf,
    config: AppConfig,
    events_out: Option<PathBuf>,
    accepting: bool,
    threaded: bool,
) -> anyhow::Result<()> {
    let source = ReplaySource::from_path(&frames)
        .map_err(|e| anyhow::anyhow!("Failed to open recording: {e}"))?;

    let mut recognizer = config.recognizer;
    recognizer.accepting_on_start |= accepting;
    let width = source.header().frame_width;
    if width > 0 && width != recognizer.frame_width_px {
        tracing::info!(
            configured = recognizer.frame_width_px,
            recorded = width,
            "Using recorded frame width for swipe distances"
        );
        recognizer.frame_width_px = width;
    }

    let session = GestureSession::new(&recognizer)?;
    let mut pipeline = GesturePipeline::new(session).with_sink(TracingSink);

    if let Some(path) = &events_out {
        let clock = SessionClock::start();
        let header = EventLogHeader {
            schema_version: "1.0".to_string(),
            epoch_wall: clock.epoch_wall().to_string(),
            source: source.name().to_string(),
        };
        pipeline.add_sink(Box::new(JsonlEventSink::new(path.clone(), header)?));
    }

    let stop = pipeline.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.store(true, Ordering::SeqCst);
        }
    });

    println!("Replaying {} ({} frames)", frames.display(), source.remaining());

    let (stats, produced) = if threaded {
        let capture = spawn_capture(source.paced(true), pipeline.stop_flag());
        let stats = pipeline.run_latest(capture.frames).await?;
        let produced = capture.task.await?;
        (stats, produced)
    } else {
        let mut source = source;
        let stats = pipeline.run(&mut source).await?;
        (stats, stats.frames_processed)
    };

    println!();
    println!("Frames captured:   {produced}");
    println!("Frames recognized: {}", stats.frames_processed);
    if stats.frames_out_of_order > 0 {
        println!("Out-of-order:      {}", stats.frames_out_of_order);
    }
    println!("Events:            {}", stats.events_emitted);
    println!(
        "Final mode:        {}",
        if pipeline.session().is_accepting() {
            "accepting"
        } else {
            "sleeping"
        }
    );
    if let Some(path) = events_out {
        println!("Events written to: {}", path.display());
    }
    if stats.sink_errors > 0 {
        println!("Sink errors:       {}", stats.sink_errors);
    }

    Ok(())
}
