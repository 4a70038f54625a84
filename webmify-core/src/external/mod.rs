// ============================================================================
// webmify-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg and ffprobe binaries
//
// This module encapsulates every interaction with the external command-line
// tools. The conversion logic only talks to the traits defined here, so tests
// can substitute scripted processes for the real binaries.
//
// KEY COMPONENTS:
// - EncoderSpawner / EncoderProcess: launching ffmpeg and owning its pipes
// - FfprobeExecutor: bare-text duration queries
// - check_dependency: the `-version` presence check
// - mocks: scripted implementations for tests

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Traits and implementations for spawning ffmpeg processes
pub mod ffmpeg_executor;

/// Traits and implementations for executing ffprobe queries
pub mod ffprobe_executor;

/// Scripted executors for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{EncoderProcess, EncoderSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::{CommandFfprobeExecutor, DurationField, FfprobeExecutor};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started.
///
/// Runs `<cmd> -version` with its output discarded. Only the start of the
/// process matters; its exit status is ignored.
///
/// # Returns
///
/// * `Ok(())` - The command was found and started
/// * `Err(CoreError::DependencyNotFound)` - The binary does not exist
/// * `Err(CoreError::CommandStart)` - The binary exists but could not be started
pub fn check_dependency(cmd: &Path) -> CoreResult<()> {
    let cmd_name = cmd.display().to_string();

    let result = Command::new(cmd)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(status) => {
            log::debug!("Found dependency {cmd_name} ({status})");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("{cmd_name} is not installed or not on PATH");
            Err(CoreError::DependencyNotFound(cmd_name))
        }
        Err(e) => {
            log::error!("Could not run `{cmd_name} -version`: {e}");
            Err(CoreError::CommandStart(cmd_name, e))
        }
    }
}
