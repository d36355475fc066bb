//! Handsign CLI: drive the gesture recognizer from recorded pose streams.
//!
//! Usage:
//!   handsign replay <FRAMES>     Run recognition over a recording
//!   handsign classify <FRAMES>   Show the per-frame signal of every hand
//!   handsign validate <FRAMES>   Check a recording for malformed data
//!   handsign config              Show or write the configuration
//!   handsign synth <OUT>         Write a scripted demo recording

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use handsign_common::config::{config_file_path, AppConfig, LoggingConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "handsign",
    about = "Hand-sign gesture recognition over landmark streams",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the recognizer over a recorded pose stream
    Replay {
        /// Path to the frames JSONL file
        frames: PathBuf,

        /// Config file (defaults to the standard location)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write recognized events to this JSONL file
        #[arg(long)]
        events_out: Option<PathBuf>,

        /// Start awake instead of waiting for the Rock sign
        #[arg(long)]
        accepting: bool,

        /// Capture on a separate task in real time, recognizing only the
        /// latest frame
        #[arg(long)]
        threaded: bool,
    },

    /// Print the signal each hand shows, frame by frame
    Classify {
        /// Path to the frames JSONL file
        frames: PathBuf,
    },

    /// Check a recorded pose stream for malformed data
    Validate {
        /// Path to the frames JSONL file
        frames: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration to the standard location
        #[arg(long)]
        write: bool,
    },

    /// Write a scripted demo recording built from synthetic hands
    Synth {
        /// Output JSONL path
        out: PathBuf,

        /// Frames per second
        #[arg(long, default_value = "30")]
        fps: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = config_file_path();
    let (file_config, config_error) = AppConfig::load_or_default_from(&config_path);
    handsign_common::logging::init_logging(&LoggingConfig {
        level: if cli.verbose {
            "debug".to_string()
        } else {
            file_config.logging.level.clone()
        },
        json: cli.json_logs || file_config.logging.json,
    });
    if let Some(e) = config_error {
        tracing::warn!("Failed to load config at {:?}, using defaults: {}", config_path, e);
    }

    match cli.command {
        Commands::Replay {
            frames,
            config,
            events_out,
            accepting,
            threaded,
        } => {
            let app_config = match config {
                Some(path) => AppConfig::load_from(&path)
                    .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?,
                None => file_config,
            };
            commands::replay::run(frames, app_config, events_out, accepting, threaded).await
        }
        Commands::Classify { frames } => commands::classify::run(frames),
        Commands::Validate { frames } => commands::validate::run(frames),
        Commands::Config { write } => commands::config::run(write),
        Commands::Synth { out, fps } => commands::synth::run(out, fps),
    }
}
