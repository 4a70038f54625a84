// webmify-cli/src/lib.rs
//
// Library portion of the webmify CLI application.
// Contains the argument definition, the interactive session and UI helpers.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::convert::{SessionEnd, run_session};
pub use error::CliResult;
