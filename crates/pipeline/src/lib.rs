//! Handsign Pipeline
//!
//! Drives a [`GestureSession`] from a pose source and hands the resulting
//! events to action sinks. Two loops are provided:
//!
//! - **Inline:** [`GesturePipeline::run`] polls the source and recognizes on
//!   the same task, one frame at a time.
//! - **Threaded:** [`spawn_capture`] polls the source on a blocking task and
//!   publishes into a single-slot handoff; [`GesturePipeline::run_latest`]
//!   always recognizes the newest frame and drops any it fell behind on.
//!
//! Sink failures are logged and never stop recognition.

pub mod replay;
pub mod sinks;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use handsign_common::clock::TimestampNs;
use handsign_common::error::HandsignResult;
use handsign_pose_model::event::RecognizedEvent;
use handsign_pose_model::frame::Frame;
use handsign_recognizer::GestureSession;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub use replay::ReplaySource;
pub use sinks::{JsonlEventSink, TracingSink};

const IDLE_BACKOFF: Duration = Duration::from_millis(1);
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of polling a pose source once.
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePoll {
    /// A newly captured frame.
    Frame(Frame),
    /// Nothing new yet; poll again later.
    Pending,
    /// The source is exhausted.
    Finished,
}

/// Trait for anything that produces hand-landmark frames.
pub trait PoseSource: Send {
    /// Poll for the next frame without blocking.
    fn poll(&mut self) -> HandsignResult<SourcePoll>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Trait for consumers of recognized gestures.
pub trait ActionSink: Send {
    fn dispatch(&mut self, event: &RecognizedEvent) -> HandsignResult<()>;

    /// Flush any buffered output. Called once when the pipeline stops.
    fn flush(&mut self) -> HandsignResult<()> {
        Ok(())
    }
}

/// Counters reported when a pipeline stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames_processed: u64,
    pub events_emitted: u64,
    /// Frames discarded because they were older than one already processed.
    pub frames_out_of_order: u64,
    pub source_errors: u64,
    pub sink_errors: u64,
}

/// A recognition session wired to its sinks.
pub struct GesturePipeline {
    session: GestureSession,
    sinks: Vec<Box<dyn ActionSink>>,
    stop_flag: Arc<AtomicBool>,
    last_timestamp: Option<TimestampNs>,
    stats: PipelineStats,
}

impl GesturePipeline {
    pub fn new(session: GestureSession) -> Self {
        Self {
            session,
            sinks: Vec::new(),
            stop_flag: Arc::new(AtomicBool::new(false)),
            last_timestamp: None,
            stats: PipelineStats::default(),
        }
    }

    /// Attach a sink. Events reach sinks in the order they were added.
    pub fn with_sink(mut self, sink: impl ActionSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn add_sink(&mut self, sink: Box<dyn ActionSink>) {
        self.sinks.push(sink);
    }

    /// Poll `source` and recognize inline until it finishes or the stop flag
    /// is set.
    pub async fn run(&mut self, source: &mut dyn PoseSource) -> HandsignResult<PipelineStats> {
        tracing::info!(source = %source.name(), "Gesture pipeline started");

        while !self.stop_flag.load(Ordering::Relaxed) {
            match source.poll() {
                Ok(SourcePoll::Frame(frame)) => self.accept(&frame),
                Ok(SourcePoll::Pending) => {
                    tokio::time::sleep(IDLE_BACKOFF).await;
                }
                Ok(SourcePoll::Finished) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Pose source error, treating as empty frame");
                    self.stats.source_errors += 1;
                    let t = self.last_timestamp.unwrap_or(0);
                    self.process(&Frame::empty(t));
                    tokio::time::sleep(IDLE_BACKOFF).await;
                }
            }
        }

        Ok(self.finish())
    }

    /// Recognize the latest frame published by a capture task until the
    /// capture side closes or the stop flag is set.
    pub async fn run_latest(
        &mut self,
        mut frames: watch::Receiver<Option<Frame>>,
    ) -> HandsignResult<PipelineStats> {
        tracing::info!("Gesture pipeline started (latest-frame handoff)");

        while !self.stop_flag.load(Ordering::Relaxed) {
            match tokio::time::timeout(STOP_POLL_INTERVAL, frames.changed()).await {
                Ok(Ok(())) => {
                    let latest = frames.borrow_and_update().clone();
                    if let Some(frame) = latest {
                        self.accept(&frame);
                    }
                }
                // Capture side is gone and its last frame was already seen.
                Ok(Err(_)) => break,
                Err(_) => continue,
            }
        }

        Ok(self.finish())
    }

    /// Recognize one frame unless it is older than the last processed one.
    pub fn accept(&mut self, frame: &Frame) {
        if let Some(last) = self.last_timestamp {
            if frame.timestamp_ns < last {
                tracing::debug!(
                    t = frame.timestamp_ns,
                    last,
                    "Discarding out-of-order frame"
                );
                self.stats.frames_out_of_order += 1;
                return;
            }
        }
        self.process(frame);
    }

    fn process(&mut self, frame: &Frame) {
        self.last_timestamp = Some(frame.timestamp_ns);
        self.stats.frames_processed += 1;

        for event in self.session.process_frame(frame) {
            self.stats.events_emitted += 1;
            for sink in &mut self.sinks {
                if let Err(e) = sink.dispatch(&event) {
                    tracing::warn!(error = %e, event = %event.kind, "Action sink failed");
                    self.stats.sink_errors += 1;
                }
            }
        }
    }

    fn finish(&mut self) -> PipelineStats {
        for sink in &mut self.sinks {
            if let Err(e) = sink.flush() {
                tracing::warn!(error = %e, "Failed to flush action sink");
                self.stats.sink_errors += 1;
            }
        }
        tracing::info!(
            frames = self.stats.frames_processed,
            events = self.stats.events_emitted,
            accepting = self.session.is_accepting(),
            "Gesture pipeline stopped"
        );
        self.stats
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Timestamp of the most recently processed frame.
    pub fn last_timestamp(&self) -> Option<TimestampNs> {
        self.last_timestamp
    }
}

/// A capture task publishing into a single-slot handoff.
pub struct CaptureHandle {
    /// Always holds the newest frame; unread frames are overwritten.
    pub frames: watch::Receiver<Option<Frame>>,
    /// Resolves to the number of frames the source produced.
    pub task: JoinHandle<u64>,
}

/// Poll `source` on a blocking task, publishing every frame into a watch
/// channel. Stops when the source finishes, the stop flag is set, or every
/// receiver is dropped.
pub fn spawn_capture<S>(mut source: S, stop_flag: Arc<AtomicBool>) -> CaptureHandle
where
    S: PoseSource + 'static,
{
    let (tx, rx) = watch::channel(None);

    let task = tokio::task::spawn_blocking(move || {
        tracing::info!(source = %source.name(), "Capture started");
        let mut produced = 0u64;
        let mut last_timestamp = 0;

        while !stop_flag.load(Ordering::Relaxed) {
            let frame = match source.poll() {
                Ok(SourcePoll::Frame(frame)) => frame,
                Ok(SourcePoll::Pending) => {
                    std::thread::sleep(IDLE_BACKOFF);
                    continue;
                }
                Ok(SourcePoll::Finished) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Pose source error, publishing empty frame");
                    std::thread::sleep(IDLE_BACKOFF);
                    Frame::empty(last_timestamp)
                }
            };

            last_timestamp = frame.timestamp_ns;
            if tx.send(Some(frame)).is_err() {
                tracing::debug!("Frame receiver dropped, stopping capture");
                break;
            }
            produced += 1;
        }

        tracing::info!(frames = produced, "Capture stopped");
        produced
    });

    CaptureHandle { frames: rx, task }
}

impl std::fmt::Debug for GesturePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GesturePipeline")
            .field("sinks", &self.sinks.len())
            .field("last_timestamp", &self.last_timestamp)
            .field("stats", &self.stats)
            .finish()
    }
}
