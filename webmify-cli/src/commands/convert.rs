//! The interactive conversion session.
//!
//! One session converts exactly one file: banner, ffmpeg presence check, path
//! prompt, conversion, closing prompt. Conversion failures are reported on
//! screen and still end with the closing prompt.

use crate::error::CliResult;
use crate::terminal::{self, SessionScreen};

use webmify_core::terminal_output;
use webmify_core::{
    ConversionConfig, ConversionOutcome, CoreError, EncoderSpawner, FfprobeExecutor,
    check_dependency, convert_video,
};

use log::{debug, warn};
use std::io::BufRead;
use std::path::Path;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// ffmpeg could not be found; nothing was asked or converted.
    MissingFfmpeg,
    /// A conversion was attempted; the outcome says whether it worked.
    Converted(ConversionOutcome),
}

/// Runs one interactive session reading answers from `input`.
pub fn run_session<R, T, S, P>(
    input: &mut R,
    screen: &mut T,
    spawner: &S,
    prober: &P,
    config: &ConversionConfig,
) -> CliResult<SessionEnd>
where
    R: BufRead + ?Sized,
    T: SessionScreen + ?Sized,
    S: EncoderSpawner,
    P: FfprobeExecutor + ?Sized,
{
    terminal::reset_screen(screen)?;

    match check_dependency(&config.ffmpeg_path) {
        Ok(()) => debug!("ffmpeg found at {}", config.ffmpeg_path.display()),
        Err(CoreError::DependencyNotFound(_)) => {
            screen.write_line(&terminal_output::error(
                "FFmpeg is not installed or not found in system PATH!",
            ))?;
            screen.write_line(&terminal_output::notice(
                "Please install FFmpeg to use this converter.",
            ))?;
            return Ok(SessionEnd::MissingFfmpeg);
        }
        Err(e) => warn!("Could not verify the ffmpeg installation: {e}"),
    }

    let input_path = terminal::prompt_for_path(input, screen)?;
    debug!("User entered input path: {input_path:?}");

    terminal::reset_screen(screen)?;
    let outcome = convert_video(spawner, prober, config, screen, Path::new(&input_path));
    debug!("Conversion outcome: {outcome:?}");

    terminal::wait_for_exit(input, screen)?;
    Ok(SessionEnd::Converted(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;
    use webmify_core::ConversionConfigBuilder;
    use webmify_core::external::mocks::{MockEncoderSpawner, MockFfprobeExecutor, MockTerminal};

    #[test]
    fn test_missing_ffmpeg_ends_before_prompting() {
        let config = ConversionConfigBuilder::new()
            .ffmpeg_path("/no/such/dir/ffmpeg-webmify")
            .build();
        let spawner = MockEncoderSpawner::new();
        let mut screen = MockTerminal::new(80);
        let mut input = Cursor::new("/videos/a.mp4\n\n");

        let end = run_session(
            &mut input,
            &mut screen,
            &spawner,
            &MockFfprobeExecutor::new(),
            &config,
        )
        .unwrap();

        assert_eq!(end, SessionEnd::MissingFfmpeg);
        let text = screen.plain_text();
        assert!(text.contains("FFmpeg is not installed or not found in system PATH!"));
        assert!(text.contains("Please install FFmpeg to use this converter."));
        assert!(!text.contains("Enter the path"));
        assert!(!text.contains("Press Enter to exit..."));
        assert!(spawner.get_received_calls().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_converts_quoted_path() {
        let dir = tempdir().unwrap();
        let input_file = dir.path().join("my clip.mp4");
        fs::write(&input_file, b"mp4").unwrap();

        let config = ConversionConfigBuilder::new().ffmpeg_path("true").build();
        let spawner = MockEncoderSpawner::new();
        spawner.add_success_expectation("my clip.webm", "out_time_ms=2000000\n", true);
        let prober = MockFfprobeExecutor::new();
        prober.expect_output(webmify_core::DurationField::VideoStream, "2.0");
        let mut screen = MockTerminal::new(80);
        let mut input = Cursor::new(format!("  \"{}\"  \n\n", input_file.display()));

        let end = run_session(&mut input, &mut screen, &spawner, &prober, &config).unwrap();

        let SessionEnd::Converted(outcome) = end else {
            panic!("expected a conversion, got {end:?}");
        };
        assert!(outcome.success, "{outcome:?}");
        assert_eq!(outcome.output_path, dir.path().join("my clip.webm"));
        let text = screen.plain_text();
        assert!(text.contains("100.0%"));
        assert!(text.ends_with("Press Enter to exit..."), "{text}");
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_input_still_reaches_closing_prompt() {
        let config = ConversionConfigBuilder::new().ffmpeg_path("true").build();
        let spawner = MockEncoderSpawner::new();
        let mut screen = MockTerminal::new(80);
        let mut input = Cursor::new("'/no/such/dir/clip.mp4'\n\n");

        let end = run_session(
            &mut input,
            &mut screen,
            &spawner,
            &MockFfprobeExecutor::new(),
            &config,
        )
        .unwrap();

        let SessionEnd::Converted(outcome) = end else {
            panic!("expected a conversion, got {end:?}");
        };
        assert_eq!(outcome.diagnostic.as_deref(), Some("input file not found"));
        let text = screen.plain_text();
        assert!(text.contains("Input file not found!"));
        assert!(text.contains("Press Enter to exit..."));
        assert!(spawner.get_received_calls().is_empty());
    }
}
