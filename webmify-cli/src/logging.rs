// ============================================================================
// webmify-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the webmify binary
//
// Diagnostic logging goes to stderr so it never lands between the progress
// line and the cursor at the default level. The default filter is `warn`;
// RUST_LOG overrides it:
// - RUST_LOG=debug: state transitions, the ffmpeg command line, probe results
// - RUST_LOG=trace: every progress line skipped and every ffmpeg stderr line
//   (target `ffmpeg_log`)

use env_logger::{Builder, Env, Target};
use owo_colors::OwoColorize;
use std::io::Write;

/// Default filter when RUST_LOG is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Initializes the global logger. Safe to call more than once.
pub fn init_logging() {
    let use_color = webmify_core::terminal_output::should_use_color();

    let result = Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .target(Target::Stderr)
        .format(move |buf, record| {
            let label = match record.level() {
                log::Level::Error => "ERROR",
                log::Level::Warn => "WARN ",
                log::Level::Info => "INFO ",
                log::Level::Debug => "DEBUG",
                log::Level::Trace => "TRACE",
            };
            let level = if use_color {
                match record.level() {
                    log::Level::Error => label.bright_red().to_string(),
                    log::Level::Warn => label.yellow().to_string(),
                    log::Level::Info => label.green().to_string(),
                    log::Level::Debug => label.blue().to_string(),
                    log::Level::Trace => label.magenta().to_string(),
                }
            } else {
                label.to_string()
            };
            writeln!(buf, "{level} [{}] {}", record.target(), record.args())
        })
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized");
    }
}
