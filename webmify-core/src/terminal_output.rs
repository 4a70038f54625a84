//! Terminal message formatting for webmify-core.
//!
//! Stateless helpers that turn a message into a styled line. Nothing here
//! prints; callers decide where the line goes. Colour is dropped when
//! `NO_COLOR` is set or stdout does not support it.

use owo_colors::OwoColorize;
use supports_color::Stream;

/// Check if color should be used (respects NO_COLOR environment variable)
#[must_use]
pub fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && supports_color::on(Stream::Stdout).is_some()
}

/// Informational step, `[*] message` in blue.
#[must_use]
pub fn status(message: &str) -> String {
    let line = format!("[*] {message}");
    if should_use_color() {
        line.bright_blue().to_string()
    } else {
        line
    }
}

/// Degraded-but-continuing notice, `[*] message` in yellow.
#[must_use]
pub fn notice(message: &str) -> String {
    let line = format!("[*] {message}");
    if should_use_color() {
        line.bright_yellow().to_string()
    } else {
        line
    }
}

/// Error line, `[!] Error: message` in red.
#[must_use]
pub fn error(message: &str) -> String {
    let line = format!("[!] Error: {message}");
    if should_use_color() {
        line.bright_red().to_string()
    } else {
        line
    }
}

/// Success line, `[+] message` in green.
#[must_use]
pub fn success(message: &str) -> String {
    let line = format!("[+] {message}");
    if should_use_color() {
        line.bright_green().to_string()
    } else {
        line
    }
}

/// Highlighted value inside another message (paths, mostly).
#[must_use]
pub fn highlight(value: &str) -> String {
    if should_use_color() {
        value.bright_yellow().to_string()
    } else {
        value.to_string()
    }
}

/// Progress bar colouring.
#[must_use]
pub fn progress(bar: &str) -> String {
    if should_use_color() {
        bar.bright_cyan().to_string()
    } else {
        bar.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_survive_styling() {
        assert_eq!(console::strip_ansi_codes(&status("Working")), "[*] Working");
        assert_eq!(console::strip_ansi_codes(&notice("Careful")), "[*] Careful");
        assert_eq!(
            console::strip_ansi_codes(&error("Input file not found!")),
            "[!] Error: Input file not found!"
        );
        assert_eq!(console::strip_ansi_codes(&success("Done")), "[+] Done");
        assert_eq!(console::strip_ansi_codes(&highlight("a.webm")), "a.webm");
        assert_eq!(console::strip_ansi_codes(&progress("[##] 1.0%")), "[##] 1.0%");
    }
}
