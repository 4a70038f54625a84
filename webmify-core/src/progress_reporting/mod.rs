//! Progress reporting for a running encode.
//!
//! ffmpeg is started with `-progress pipe:1`, which makes it print blocks of
//! `key=value` lines on stdout. [`stream_parser`] turns that stream into
//! [`ProgressEvent`]s and [`renderer`] draws them as a single, self-overwriting
//! terminal line.

pub mod renderer;
pub mod stream_parser;

use std::time::Duration;

pub use renderer::{ProgressRenderer, RenderState, TerminalSurface, progress_text};
pub use stream_parser::{LineError, ProgressStream, parse_line};

/// One piece of progress information taken from a single protocol line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Number of frames encoded so far (`frame=`)
    FrameCount(u64),
    /// Amount of media time processed so far (`out_time_ms=`)
    ElapsedTime(Duration),
}
