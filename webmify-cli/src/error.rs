// ============================================================================
// webmify-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias shared with webmify-core
//
// The CLI has no error cases of its own beyond terminal I/O, which converts
// into `CoreError::Io`, so it reuses the core error type directly.

use webmify_core::CoreResult;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;
