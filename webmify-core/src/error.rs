//! Error types for webmify-core.
//!
//! Every fallible operation in the core returns [`CoreResult`]. The
//! conversion orchestrator is the only place that turns a [`CoreError`] into a
//! user-facing outcome; nothing below it prints errors.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for webmify-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Process pipe unavailable: {0}")]
    ProcessPipe(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for webmify-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a command that could not be spawned.
pub fn command_start_error(cmd_name: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd_name.into(), err)
}

/// Builds a [`CoreError::CommandWait`] for a command whose exit could not be collected.
pub fn command_wait_error(cmd_name: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd_name.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] for a command that exited unsuccessfully.
pub fn command_failed_error(
    cmd_name: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd_name.into(), status, stderr.into())
}
