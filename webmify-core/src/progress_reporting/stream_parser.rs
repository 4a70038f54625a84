// ============================================================================
// webmify-core/src/progress_reporting/stream_parser.rs
// ============================================================================
//
// PROGRESS STREAM PARSER: ffmpeg `-progress` protocol reader
//
// ffmpeg writes its progress as blocks of `key=value` lines:
//
//   frame=240
//   fps=48.00
//   out_time_ms=10010000
//   out_time=00:00:10.010000
//   progress=continue
//
// Only `frame` and `out_time_ms` are of interest. Every other key, blank
// line or garbage is skipped without ever reaching the caller.
//
// NOTE: despite its name, `out_time_ms` is reported in microseconds.

use super::ProgressEvent;
use crate::error::CoreResult;
use std::io::BufRead;
use std::time::Duration;
use thiserror::Error;

const FRAME_MARKER: &str = "frame=";
const OUT_TIME_MARKER: &str = "out_time_ms=";

/// Why a protocol line produced no event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("line carries no progress key")]
    Unrecognized,

    #[error("malformed {key} value: {value:?}")]
    Malformed { key: &'static str, value: String },
}

/// Parses one protocol line into a progress event.
///
/// Markers are matched by substring, so surrounding whitespace or a trailing
/// `\r` do not matter.
pub fn parse_line(line: &str) -> Result<ProgressEvent, LineError> {
    let mut result = Err(LineError::Unrecognized);

    if line.contains(FRAME_MARKER) {
        result = parse_frame(line);
        if result.is_ok() {
            return result;
        }
    }

    if line.contains(OUT_TIME_MARKER) {
        return parse_out_time(line);
    }

    result
}

fn parse_frame(line: &str) -> Result<ProgressEvent, LineError> {
    let value = line.split(FRAME_MARKER).nth(1).unwrap_or_default().trim();
    let malformed = || LineError::Malformed {
        key: "frame",
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    value
        .parse::<u64>()
        .map(ProgressEvent::FrameCount)
        .map_err(|_| malformed())
}

fn parse_out_time(line: &str) -> Result<ProgressEvent, LineError> {
    let value = line.split('=').nth(1).unwrap_or_default().trim();

    let micros = value.parse::<i64>().map_err(|_| LineError::Malformed {
        key: "out_time_ms",
        value: value.to_string(),
    })?;

    // ffmpeg reports small negative times before the first packet is muxed
    let micros = u64::try_from(micros).unwrap_or(0);
    Ok(ProgressEvent::ElapsedTime(Duration::from_micros(micros)))
}

/// Incremental reader over the progress channel.
///
/// Reads block until the writer produces a full line or closes the pipe, so
/// a momentarily idle encoder never looks like the end of the stream.
pub struct ProgressStream<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ProgressStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(128),
        }
    }

    /// Returns the next progress event, or `None` once the channel is closed.
    ///
    /// Lines without an event are consumed silently. Invalid UTF-8 is decoded
    /// lossily rather than treated as an error.
    pub fn next_event(&mut self) -> CoreResult<Option<ProgressEvent>> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }

            let line = String::from_utf8_lossy(&self.buf);
            match parse_line(&line) {
                Ok(event) => return Ok(Some(event)),
                Err(LineError::Unrecognized) => {}
                Err(err) => log::trace!(target: "ffmpeg_progress", "skipping line: {err}"),
            }
        }
    }
}
