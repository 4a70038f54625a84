// ============================================================================
// webmify-core/src/processing/conversion.rs
// ============================================================================
//
// CONVERSION: Single MP4 -> WebM encode, from validation to outcome
//
// This module drives one conversion end to end. It validates the request,
// probes the input duration, launches ffmpeg with the progress protocol on
// stdout, renders progress while a helper thread drains stderr, and finally
// reaps the child and decides whether the conversion succeeded.
//
// WORKFLOW:
// 1. Validating  - input must exist and must differ from the derived output
// 2. Probing     - total duration, or Unknown (frame-counter mode)
// 3. Launching   - build and spawn the encode command
// 4. Streaming   - progress events -> renderer, stderr -> drain thread
// 5. Finalizing  - wait for the child, join the drain, inspect the result
//
// Errors never escape `convert_video`: every `CoreError` is reported on the
// terminal surface and folded into a failed `ConversionOutcome`.

// ---- Internal crate imports ----
use crate::config::ConversionConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg_executor::{ChannelReader, build_encode_command};
use crate::external::{EncoderProcess, EncoderSpawner, FfprobeExecutor};
use crate::processing::duration::probe_duration;
use crate::progress_reporting::{ProgressRenderer, ProgressStream, TerminalSurface};
use crate::terminal_output;

// ---- Standard library imports ----
use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::thread::{self, JoinHandle};

// ============================================================================
// TYPES
// ============================================================================

/// Input and derived output path of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl ConversionRequest {
    /// Derives the output path by replacing the input's final extension with
    /// the configured target extension (`movie.mp4` -> `movie.webm`).
    #[must_use]
    pub fn new(input_path: impl Into<PathBuf>, config: &ConversionConfig) -> Self {
        let input_path = input_path.into();
        let output_path = input_path.with_extension(&config.target_extension);
        Self {
            input_path,
            output_path,
        }
    }

    /// Whether encoding would write over the input itself.
    #[must_use]
    pub fn overwrites_input(&self) -> bool {
        self.input_path == self.output_path
    }
}

/// Lifecycle of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionState {
    Idle,
    Validating,
    Probing,
    Launching,
    Streaming,
    Finalizing,
    Succeeded,
    Failed,
}

impl fmt::Display for ConversionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Probing => "probing",
            Self::Launching => "launching",
            Self::Streaming => "streaming",
            Self::Finalizing => "finalizing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Final result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub success: bool,
    pub output_path: PathBuf,
    /// Why the conversion failed; `None` on success.
    pub diagnostic: Option<String>,
}

impl ConversionOutcome {
    fn succeeded(output_path: PathBuf) -> Self {
        Self {
            success: true,
            output_path,
            diagnostic: None,
        }
    }

    fn failed(output_path: PathBuf, diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            output_path,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Tracks the current state and logs every transition.
#[derive(Debug)]
struct StateTracker {
    current: ConversionState,
}

impl StateTracker {
    fn new() -> Self {
        Self {
            current: ConversionState::Idle,
        }
    }

    fn advance(&mut self, next: ConversionState) {
        log::debug!("Conversion state: {} -> {next}", self.current);
        self.current = next;
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Converts `input_path` to WebM next to the input.
///
/// All user-facing messages, including the progress line, go to `surface`.
/// This function never returns an error: unexpected failures are printed as
/// `An unexpected error occurred: ...` and reported through the outcome.
pub fn convert_video<S, P, T>(
    spawner: &S,
    prober: &P,
    config: &ConversionConfig,
    surface: &mut T,
    input_path: &Path,
) -> ConversionOutcome
where
    S: EncoderSpawner,
    P: FfprobeExecutor + ?Sized,
    T: TerminalSurface + ?Sized,
{
    let request = ConversionRequest::new(input_path, config);
    let mut state = StateTracker::new();

    match run_conversion(spawner, prober, config, surface, &request, &mut state) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::debug!("Conversion aborted while {}: {e:?}", state.current);
            state.advance(ConversionState::Failed);

            let message = format!("An unexpected error occurred: {e}");
            if let Err(write_err) = surface.write_line(&terminal_output::error(&message)) {
                log::warn!("Could not report conversion error: {write_err}");
            }
            ConversionOutcome::failed(request.output_path, message)
        }
    }
}

fn run_conversion<S, P, T>(
    spawner: &S,
    prober: &P,
    config: &ConversionConfig,
    surface: &mut T,
    request: &ConversionRequest,
    state: &mut StateTracker,
) -> CoreResult<ConversionOutcome>
where
    S: EncoderSpawner,
    P: FfprobeExecutor + ?Sized,
    T: TerminalSurface + ?Sized,
{
    // --- Validating ---
    state.advance(ConversionState::Validating);
    config.validate()?;

    if !request.input_path.exists() {
        surface.write_line(&terminal_output::error("Input file not found!"))?;
        state.advance(ConversionState::Failed);
        return Ok(ConversionOutcome::failed(
            request.output_path.clone(),
            "input file not found",
        ));
    }
    if request.overwrites_input() {
        surface.write_line(&terminal_output::error(
            "Output path would overwrite the input file!",
        ))?;
        state.advance(ConversionState::Failed);
        return Ok(ConversionOutcome::failed(
            request.output_path.clone(),
            "output path would overwrite the input file",
        ));
    }

    surface.write_line(&terminal_output::status("Starting conversion process..."))?;
    surface.write_line(&terminal_output::status(&format!(
        "Input file: {}",
        terminal_output::highlight(&request.input_path.display().to_string())
    )))?;
    surface.write_line(&terminal_output::status(&format!(
        "Output will be saved as: {}",
        terminal_output::highlight(&request.output_path.display().to_string())
    )))?;

    // --- Probing ---
    state.advance(ConversionState::Probing);
    let duration = probe_duration(prober, &request.input_path);
    if !duration.is_known() {
        surface.write_line(&terminal_output::notice(
            "Could not determine video duration. Progress bar will show frames processed.",
        ))?;
    }

    // --- Launching ---
    state.advance(ConversionState::Launching);
    let cmd = build_encode_command(config, &request.input_path, &request.output_path);
    let args: Vec<String> = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    log::debug!(
        "Running ffmpeg command: {} {}",
        config.ffmpeg_path.display(),
        args.join(" ")
    );
    let mut child = spawner.spawn(cmd)?;

    // --- Streaming + Finalizing ---
    state.advance(ConversionState::Streaming);
    let mut renderer = ProgressRenderer::new(duration);
    let (status, diagnostics) = stream_to_completion(&mut child, &mut renderer, surface, state)?;

    finish_conversion(surface, request, status, &diagnostics, state)
}

// ============================================================================
// CHILD PROCESS HANDLING
// ============================================================================

/// Pumps progress until end of stream, then always reaps the child.
///
/// The diagnostics drain runs for the whole lifetime of the child so a chatty
/// encoder can never block on a full stderr pipe.
fn stream_to_completion<C, T>(
    child: &mut C,
    renderer: &mut ProgressRenderer,
    surface: &mut T,
    state: &mut StateTracker,
) -> CoreResult<(ExitStatus, String)>
where
    C: EncoderProcess,
    T: TerminalSurface + ?Sized,
{
    let drain = child.take_diagnostics().map(spawn_diagnostics_drain);

    let streamed = match child.take_progress() {
        Some(progress) => pump_progress(progress, renderer, surface),
        None => Err(CoreError::ProcessPipe(
            "ffmpeg progress channel (stdout)".to_string(),
        )),
    };

    state.advance(ConversionState::Finalizing);
    let waited = child.wait();
    let diagnostics = match drain {
        Some(handle) => join_drain(handle),
        None => Err(CoreError::ProcessPipe(
            "ffmpeg diagnostics channel (stderr)".to_string(),
        )),
    };
    let finished = renderer.finish(surface);

    streamed?;
    let status = waited?;
    let diagnostics = diagnostics?;
    finished?;
    Ok((status, diagnostics))
}

/// Feeds every progress event to the renderer. The reader is dropped on
/// return, which closes our end of the pipe.
fn pump_progress<T>(
    progress: ChannelReader,
    renderer: &mut ProgressRenderer,
    surface: &mut T,
) -> CoreResult<()>
where
    T: TerminalSurface + ?Sized,
{
    let mut stream = ProgressStream::new(BufReader::new(progress));
    while let Some(event) = stream.next_event()? {
        renderer.render(&event, surface)?;
    }
    Ok(())
}

/// Reads the diagnostics channel to completion on a separate thread.
fn spawn_diagnostics_drain(reader: ChannelReader) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut reader = BufReader::new(reader);
        let mut captured = String::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    log::trace!(target: "ffmpeg_log", "{}", line.trim_end());
                    captured.push_str(&line);
                }
                Err(e) => {
                    log::debug!("Stopped reading ffmpeg diagnostics: {e}");
                    break;
                }
            }
        }
        captured
    })
}

fn join_drain(handle: JoinHandle<String>) -> CoreResult<String> {
    handle.join().map_err(|_| {
        CoreError::OperationFailed("ffmpeg diagnostics reader panicked".to_string())
    })
}

// ============================================================================
// RESULT HANDLING
// ============================================================================

fn finish_conversion<T>(
    surface: &mut T,
    request: &ConversionRequest,
    status: ExitStatus,
    diagnostics: &str,
    state: &mut StateTracker,
) -> CoreResult<ConversionOutcome>
where
    T: TerminalSurface + ?Sized,
{
    let output_exists = request.output_path.exists();

    if status.success() && output_exists {
        state.advance(ConversionState::Succeeded);
        surface.write_line(&terminal_output::success("Conversion completed successfully!"))?;
        surface.write_line(&terminal_output::success(&format!(
            "Output saved to: {}",
            terminal_output::highlight(&request.output_path.display().to_string())
        )))?;
        return Ok(ConversionOutcome::succeeded(request.output_path.clone()));
    }

    let reason = if status.success() {
        "ffmpeg exited successfully but wrote no output file".to_string()
    } else {
        format!("ffmpeg exited with {status}")
    };
    let diagnostic = match diagnostics.trim_end() {
        "" => reason,
        text => format!("{reason}\n{text}"),
    };

    state.advance(ConversionState::Failed);
    surface.write_line(&terminal_output::error(&format!(
        "Conversion failed! FFmpeg error: {diagnostic}"
    )))?;
    Ok(ConversionOutcome::failed(request.output_path.clone(), diagnostic))
}
