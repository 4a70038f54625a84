// webmify-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for this crate's own tests and for downstream crates that enable
// the "test-mocks" feature.

use super::ffmpeg_executor::ChannelReader;
use super::*;
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Builds an `ExitStatus` carrying the given exit code.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

/// Builds an `ExitStatus` carrying the given exit code.
#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Mock implementation of EncoderProcess replaying canned channel contents.
#[derive(Clone)]
pub struct MockEncoderProcess {
    /// Bytes served on the progress channel.
    pub progress: Option<Vec<u8>>,
    /// Bytes served on the diagnostics channel.
    pub diagnostics: Option<Vec<u8>>,
    /// Exit status returned by wait.
    pub exit_status: ExitStatus,
}

impl MockEncoderProcess {
    pub fn new(progress: &str, diagnostics: &str, exit_code: i32) -> Self {
        Self {
            progress: Some(progress.as_bytes().to_vec()),
            diagnostics: Some(diagnostics.as_bytes().to_vec()),
            exit_status: exit_status(exit_code),
        }
    }
}

impl EncoderProcess for MockEncoderProcess {
    fn take_progress(&mut self) -> Option<ChannelReader> {
        self.progress
            .take()
            .map(|bytes| Box::new(Cursor::new(bytes)) as ChannelReader)
    }

    fn take_diagnostics(&mut self) -> Option<ChannelReader> {
        self.diagnostics
            .take()
            .map(|bytes| Box::new(Cursor::new(bytes)) as ChannelReader)
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockEncoderExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockEncoderProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of EncoderSpawner supporting multiple expectations.
///
/// Each expectation is consumed by the first spawn whose arguments contain
/// its pattern.
#[derive(Clone, Default)]
pub struct MockEncoderSpawner {
    expectations: Rc<RefCell<Vec<MockEncoderExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockEncoderSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockEncoderProcess>,
        create_dummy_output: bool,
    ) {
        self.expectations.borrow_mut().push(MockEncoderExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            create_dummy_output,
        });
    }

    /// Expects a run that exits 0 after emitting `progress`.
    pub fn add_success_expectation(
        &self,
        arg_pattern: &str,
        progress: &str,
        create_dummy_output: bool,
    ) {
        self.add_expectation(
            arg_pattern,
            Ok(MockEncoderProcess::new(progress, "", 0)),
            create_dummy_output,
        );
    }

    /// Expects a run that exits with `exit_code` after writing `diagnostics`.
    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        progress: &str,
        diagnostics: &str,
        exit_code: i32,
    ) {
        self.add_expectation(
            arg_pattern,
            Ok(MockEncoderProcess::new(progress, diagnostics, exit_code)),
            false,
        );
    }

    /// Expects the spawn itself to fail.
    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl EncoderSpawner for MockEncoderSpawner {
    type Process = MockEncoderProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();
        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        let Some(index) = found_index else {
            log::error!("MockEncoderSpawner: No expectation found for command args: {args:?}");
            panic!("MockEncoderSpawner: No expectation found for command args: {args:?}");
        };

        let expectation = expectations.remove(index);
        log::info!(
            "MockEncoderSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        if expectation.result.is_ok() && expectation.create_dummy_output {
            match args.last() {
                Some(output) => {
                    if let Err(e) = std::fs::write(output, b"webm") {
                        log::error!("MockEncoderSpawner failed to create dummy output {output}: {e}");
                    }
                }
                None => log::warn!("MockEncoderSpawner couldn't find output path in args."),
            }
        }
        expectation.result
    }
}

/// Canned answer for one ffprobe query.
#[derive(Debug, Clone)]
enum MockProbeAnswer {
    Output(String),
    Failure(String),
}

/// Mock implementation of FfprobeExecutor.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    answers: Rc<RefCell<HashMap<DurationField, MockProbeAnswer>>>,
    received_calls: Rc<RefCell<Vec<(PathBuf, DurationField)>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes `field` queries print `output`.
    pub fn expect_output(&self, field: DurationField, output: &str) {
        self.answers
            .borrow_mut()
            .insert(field, MockProbeAnswer::Output(output.to_string()));
    }

    /// Makes `field` queries fail as if ffprobe exited non-zero.
    pub fn expect_failure(&self, field: DurationField, stderr: &str) {
        self.answers
            .borrow_mut()
            .insert(field, MockProbeAnswer::Failure(stderr.to_string()));
    }

    pub fn get_received_calls(&self) -> Vec<(PathBuf, DurationField)> {
        self.received_calls.borrow().clone()
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn query_duration(&self, input_path: &Path, field: DurationField) -> CoreResult<String> {
        self.received_calls
            .borrow_mut()
            .push((input_path.to_path_buf(), field));

        match self.answers.borrow().get(&field) {
            Some(MockProbeAnswer::Output(text)) => Ok(text.clone()),
            Some(MockProbeAnswer::Failure(stderr)) => Err(crate::error::command_failed_error(
                format!("ffprobe ({field:?} duration)"),
                exit_status(1),
                stderr.clone(),
            )),
            None => Err(CoreError::OperationFailed(format!(
                "MockFfprobeExecutor: No expectation set for {field:?} on {}",
                input_path.display()
            ))),
        }
    }
}

/// Operation recorded by [`MockTerminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Line(String),
    MoveUpAndClear,
}

/// Terminal surface that records what would have been drawn.
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    width: usize,
    ops: Vec<SurfaceOp>,
}

impl MockTerminal {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.clone()
    }

    /// Written lines with ANSI styling removed.
    pub fn plain_lines(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Line(text) => Some(console::strip_ansi_codes(text).into_owned()),
                SurfaceOp::MoveUpAndClear => None,
            })
            .collect()
    }

    /// All written lines joined with newlines, ANSI styling removed.
    pub fn plain_text(&self) -> String {
        self.plain_lines().join("\n")
    }
}

impl crate::progress_reporting::TerminalSurface for MockTerminal {
    fn width(&self) -> usize {
        self.width
    }

    fn write_line(&mut self, text: &str) -> std::io::Result<()> {
        self.ops.push(SurfaceOp::Line(text.to_string()));
        Ok(())
    }

    fn move_up_and_clear(&mut self) -> std::io::Result<()> {
        self.ops.push(SurfaceOp::MoveUpAndClear);
        Ok(())
    }
}
