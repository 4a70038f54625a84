//! FFprobe integration for duration queries.
//!
//! The prober asks ffprobe for a single field printed as bare text
//! (`-of default=noprint_wrappers=1:nokey=1`), so the answer is either a
//! number, the `N/A` marker, or nothing at all. Interpreting that answer is the
//! job of [`crate::processing::duration`]; this module only runs the query.

use crate::error::{CoreResult, command_failed_error, command_start_error};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Which duration field to ask ffprobe for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationField {
    /// `stream=duration` of the primary video stream (`v:0`)
    VideoStream,
    /// `format=duration` of the container
    Format,
}

impl DurationField {
    /// ffprobe arguments selecting this field, excluding the input path.
    #[must_use]
    pub fn ffprobe_args(self) -> &'static [&'static str] {
        match self {
            Self::VideoStream => &[
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ],
            Self::Format => &[
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ],
        }
    }
}

/// Trait for running ffprobe duration queries.
pub trait FfprobeExecutor {
    /// Runs the query for `field` and returns ffprobe's trimmed stdout.
    fn query_duration(&self, input_path: &Path, field: DurationField) -> CoreResult<String>;
}

/// Runs the real ffprobe binary through `std::process::Command`.
#[derive(Debug, Clone)]
pub struct CommandFfprobeExecutor {
    ffprobe_path: PathBuf,
}

impl CommandFfprobeExecutor {
    #[must_use]
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

impl Default for CommandFfprobeExecutor {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_FFPROBE_BINARY)
    }
}

impl FfprobeExecutor for CommandFfprobeExecutor {
    fn query_duration(&self, input_path: &Path, field: DurationField) -> CoreResult<String> {
        log::debug!(
            "Running ffprobe for {:?} duration on: {}",
            field,
            input_path.display()
        );

        let output = Command::new(&self.ffprobe_path)
            .args(field.ffprobe_args())
            .arg(input_path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| command_start_error(format!("ffprobe ({field:?} duration)"), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(command_failed_error(
                format!("ffprobe ({field:?} duration)"),
                output.status,
                stderr,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
