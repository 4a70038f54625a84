// webmify-cli/src/cli.rs
//
// Defines the command-line argument structure using clap. The tool is fully
// interactive, so clap only contributes --help and --version.

use clap::Parser;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "webmify",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "webmify: interactive MP4 to WebM converter",
    long_about = "Asks for an MP4 file and converts it to VP9/Opus WebM next to the \
                  original using ffmpeg, showing live progress.\n\n\
                  Set WEBMIFY_FFMPEG / WEBMIFY_FFPROBE to use binaries outside PATH \
                  and RUST_LOG=debug for diagnostic logging."
)]
pub struct Cli {}
