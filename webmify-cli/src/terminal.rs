// ============================================================================
// webmify-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL UI: Banner, prompts and screen handling for the interactive session
//
// The conversion itself writes through `webmify_core::TerminalSurface`. This
// module adds what only the interactive session needs on top of that: clearing
// the screen, an inline prompt without a trailing newline, the banner, and
// cleanup of the path the user typed or dragged into the terminal.

// ---- External crate imports ----
use console::Term;
use owo_colors::OwoColorize;
use webmify_core::TerminalSurface;
use webmify_core::terminal_output::should_use_color;

// ---- Standard library imports ----
use std::io::{self, BufRead};

// ============================================================================
// SCREEN ABSTRACTION
// ============================================================================

/// Terminal operations used by the interactive session.
pub trait SessionScreen: TerminalSurface {
    /// Clears the whole screen and homes the cursor.
    fn clear(&mut self) -> io::Result<()>;

    /// Prints `text` without a newline and flushes, leaving the cursor after it.
    fn prompt(&mut self, text: &str) -> io::Result<()>;
}

impl SessionScreen for Term {
    fn clear(&mut self) -> io::Result<()> {
        self.clear_screen()
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.write_str(text)?;
        self.flush()
    }
}

#[cfg(test)]
impl SessionScreen for webmify_core::external::mocks::MockTerminal {
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.write_line(text)
    }
}

// ============================================================================
// BANNER AND MESSAGES
// ============================================================================

const BANNER: [&str; 4] = [
    "╭──────────────────────────────────────────╮",
    "│                MP4 → WebM                │",
    "│       Interactive VP9/Opus converter     │",
    "╰──────────────────────────────────────────╯",
];

/// Prints the banner in cyan.
pub fn print_banner<T: SessionScreen + ?Sized>(screen: &mut T) -> io::Result<()> {
    for line in BANNER {
        if should_use_color() {
            screen.write_line(&line.cyan().to_string())?;
        } else {
            screen.write_line(line)?;
        }
    }
    Ok(())
}

/// Clears the screen and prints the banner.
pub fn reset_screen<T: SessionScreen + ?Sized>(screen: &mut T) -> io::Result<()> {
    screen.clear()?;
    print_banner(screen)
}

fn yellow(text: &str) -> String {
    if should_use_color() {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}

fn cyan(text: &str) -> String {
    if should_use_color() {
        text.cyan().to_string()
    } else {
        text.to_string()
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Reads one line from `input`. End of input reads as an empty line.
fn read_line<R: BufRead + ?Sized>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Asks for the input file and returns the cleaned path text.
pub fn prompt_for_path<R, T>(input: &mut R, screen: &mut T) -> io::Result<String>
where
    R: BufRead + ?Sized,
    T: SessionScreen + ?Sized,
{
    screen.write_line(&yellow("Enter the path to your MP4 file:"))?;
    screen.prompt(&cyan("> "))?;
    let raw = read_line(input)?;
    Ok(clean_input_path(&raw))
}

/// Prints the closing prompt and waits for one line.
pub fn wait_for_exit<R, T>(input: &mut R, screen: &mut T) -> io::Result<()>
where
    R: BufRead + ?Sized,
    T: SessionScreen + ?Sized,
{
    screen.write_line("")?;
    screen.write_line(&yellow("Press Enter to exit..."))?;
    read_line(input)?;
    Ok(())
}

/// Strips surrounding whitespace, then one quote character from each end.
///
/// Terminals that support drag-and-drop often wrap the dropped path in quotes.
/// Only a single layer is removed so names that really contain quotes survive.
#[must_use]
pub fn clean_input_path(raw: &str) -> String {
    const QUOTES: [char; 2] = ['"', '\''];

    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix(QUOTES).unwrap_or(trimmed);
    unquoted
        .strip_suffix(QUOTES)
        .unwrap_or(unquoted)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use webmify_core::external::mocks::MockTerminal;

    #[test]
    fn test_clean_input_path() {
        assert_eq!(clean_input_path("  /videos/a.mp4 \n"), "/videos/a.mp4");
        assert_eq!(clean_input_path("\"/videos/my clip.mp4\"\n"), "/videos/my clip.mp4");
        assert_eq!(clean_input_path("'/videos/a.mp4'"), "/videos/a.mp4");
        assert_eq!(clean_input_path("''/videos/a.mp4''"), "'/videos/a.mp4'");
        assert_eq!(clean_input_path("\"/videos/a.mp4"), "/videos/a.mp4");
        assert_eq!(clean_input_path(""), "");
        assert_eq!(clean_input_path("\"\""), "");
    }

    #[test]
    fn test_prompt_reads_one_line() {
        let mut input = Cursor::new("\"/videos/a.mp4\"\nsecond line\n");
        let mut screen = MockTerminal::new(80);

        let path = prompt_for_path(&mut input, &mut screen).unwrap();

        assert_eq!(path, "/videos/a.mp4");
        assert_eq!(
            screen.plain_lines(),
            vec!["Enter the path to your MP4 file:", "> "]
        );
        assert_eq!(read_line(&mut input).unwrap(), "second line\n");
    }

    #[test]
    fn test_eof_reads_as_empty_path() {
        let mut screen = MockTerminal::new(80);
        let path = prompt_for_path(&mut Cursor::new(""), &mut screen).unwrap();
        assert_eq!(path, "");
    }

    #[test]
    fn test_banner_names_the_conversion() {
        let mut screen = MockTerminal::new(80);
        reset_screen(&mut screen).unwrap();
        assert!(screen.plain_text().contains("MP4 → WebM"));
        assert_eq!(screen.plain_lines().len(), BANNER.len());
    }
}
