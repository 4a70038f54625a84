// ============================================================================
// webmify-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning the encoder and handing its
// two output channels to the conversion driver:
//
// - stdout carries the machine-readable `-progress pipe:1` stream
// - stderr carries free-text diagnostics
//
// KEY COMPONENTS:
// - EncoderProcess: Trait representing a running encoder that owns its pipes
// - EncoderSpawner: Trait for creating new encoder processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - build_encode_command: the fixed MP4 -> WebM argument set

use crate::config::ConversionConfig;
use crate::error::{CoreResult, command_start_error, command_wait_error};
use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use std::io::Read;
use std::path::Path;
use std::process::ExitStatus;

/// A readable output channel of a child process.
pub type ChannelReader = Box<dyn Read + Send>;

// --- Encoder Execution Abstraction ---

/// Trait representing an active encoder process instance.
///
/// Each channel can be taken exactly once; a second call returns `None`.
pub trait EncoderProcess {
    /// Takes the progress channel (the child's stdout).
    fn take_progress(&mut self) -> Option<ChannelReader>;

    /// Takes the diagnostics channel (the child's stderr).
    fn take_diagnostics(&mut self) -> Option<ChannelReader>;

    /// Waits for the process to exit and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an [`EncoderProcess`].
pub trait EncoderSpawner {
    type Process: EncoderProcess;

    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `EncoderProcess`.
pub struct SidecarProcess(FfmpegChild);

impl EncoderProcess for SidecarProcess {
    fn take_progress(&mut self) -> Option<ChannelReader> {
        self.0
            .take_stdout()
            .map(|stdout| Box::new(stdout) as ChannelReader)
    }

    fn take_diagnostics(&mut self) -> Option<ChannelReader> {
        self.0
            .take_stderr()
            .map(|stderr| Box::new(stderr) as ChannelReader)
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))
    }
}

/// Concrete implementation of `EncoderSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl EncoderSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))
    }
}

// --- Command Construction ---

/// Builds the encode command for one conversion.
///
/// `FfmpegCommand::new_with_path` starts the list with `-loglevel level+info`,
/// so captured diagnostic lines carry a `[level]` prefix. The rest follows in
/// this order: input, progress channel, video codec, CRF, video bitrate,
/// audio codec, overwrite flag, output. Paths are passed as `OsStr` so
/// non-UTF-8 file names survive untouched.
#[must_use]
pub fn build_encode_command(
    config: &ConversionConfig,
    input_path: &Path,
    output_path: &Path,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new_with_path(&config.ffmpeg_path);
    cmd.arg("-i").arg(input_path);
    cmd.args(["-progress", "pipe:1"]);
    cmd.arg("-c:v").arg(&config.video_codec);
    cmd.arg("-crf").arg(config.crf.to_string());
    cmd.arg("-b:v").arg(&config.video_bitrate);
    cmd.arg("-c:a").arg(&config.audio_codec);
    cmd.overwrite();
    cmd.arg(output_path);
    cmd
}
