//! Command implementations for the CLI.

/// The interactive MP4 to WebM conversion session.
pub mod convert;
