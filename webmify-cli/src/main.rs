// webmify-cli/src/main.rs
//
// Entry point for the webmify binary.
//
// Responsibilities:
// - Parsing the (help/version only) command line.
// - Setting up env_logger.
// - Building the conversion config from the environment.
// - Running one interactive session against the real terminal and stdin.
//
// The process always exits with status 0; outcomes are communicated only
// through what the session prints.

use clap::Parser;
use console::Term;
use owo_colors::OwoColorize;
use std::io;
use webmify_cli::logging::init_logging;
use webmify_cli::{Cli, SessionEnd, run_session};
use webmify_core::{CommandFfprobeExecutor, ConversionConfig, SidecarSpawner};

fn main() {
    // --help and --version come back as errors too; `print` routes them to
    // stdout and real usage errors to stderr.
    if let Err(e) = Cli::try_parse() {
        if let Err(print_err) = e.print() {
            eprintln!("{print_err}");
        }
        return;
    }
    init_logging();

    let config = ConversionConfig::from_env();
    log::debug!("Using configuration: {config:?}");

    let prober = CommandFfprobeExecutor::new(&config.ffprobe_path);
    let mut term = Term::stdout();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    match run_session(&mut input, &mut term, &SidecarSpawner, &prober, &config) {
        Ok(SessionEnd::MissingFfmpeg) => log::debug!("Session ended: ffmpeg missing"),
        Ok(SessionEnd::Converted(outcome)) => {
            log::debug!("Session ended: success={}", outcome.success);
        }
        Err(e) => {
            let message = format!("Error: {e}");
            if webmify_core::terminal_output::should_use_color() {
                eprintln!("{}", message.red().bold());
            } else {
                eprintln!("{message}");
            }
        }
    }
}
