//! Core library for converting MP4 files to WebM with ffmpeg.
//!
//! This crate probes the input duration with ffprobe, runs a VP9/Opus encode
//! through ffmpeg's machine-readable progress protocol, and renders the
//! progress as a single self-updating terminal line.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use webmify_core::{CommandFfprobeExecutor, ConversionConfig, SidecarSpawner, convert_video};
//! use console::Term;
//! use std::path::Path;
//!
//! let config = ConversionConfig::from_env();
//! config.validate().unwrap();
//!
//! let prober = CommandFfprobeExecutor::new(&config.ffprobe_path);
//! let mut term = Term::stdout();
//!
//! let outcome = convert_video(
//!     &SidecarSpawner,
//!     &prober,
//!     &config,
//!     &mut term,
//!     Path::new("/videos/holiday.mp4"),
//! );
//! println!("success: {}, output: {}", outcome.success, outcome.output_path.display());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod processing;
pub mod progress_reporting;
pub mod terminal_output;

// Re-exports for public API
pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use external::{
    CommandFfprobeExecutor, DurationField, EncoderProcess, EncoderSpawner, FfprobeExecutor,
    SidecarProcess, SidecarSpawner, check_dependency,
};
pub use processing::{
    ConversionOutcome, ConversionRequest, ConversionState, DurationEstimate, convert_video,
    probe_duration,
};
pub use progress_reporting::{ProgressEvent, ProgressRenderer, ProgressStream, TerminalSurface};
