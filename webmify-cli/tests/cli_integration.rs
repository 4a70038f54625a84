use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;

// Helper function to get the path to the compiled binary
fn webmify_cmd() -> Command {
    let mut cmd = Command::cargo_bin("webmify").expect("Failed to find webmify binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version_flag() -> Result<(), Box<dyn Error>> {
    webmify_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("webmify"));
    Ok(())
}

#[test]
fn test_help_mentions_conversion() -> Result<(), Box<dyn Error>> {
    webmify_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("WEBMIFY_FFMPEG"));
    Ok(())
}

#[test]
fn test_unexpected_argument_still_exits_zero() -> Result<(), Box<dyn Error>> {
    webmify_cmd()
        .arg("--bogus")
        .write_stdin("")
        .assert()
        .success()
        .stderr(contains("unexpected argument"))
        .stdout(contains("Enter the path").not());
    Ok(())
}

#[test]
fn test_missing_ffmpeg_is_reported_and_exits_zero() -> Result<(), Box<dyn Error>> {
    webmify_cmd()
        .env("WEBMIFY_FFMPEG", "/surely/this/does/not/exist/ffmpeg")
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("FFmpeg is not installed or not found in system PATH!"))
        .stdout(contains("Please install FFmpeg to use this converter."))
        .stdout(contains("Enter the path").not())
        .stdout(contains("Press Enter to exit...").not());
    Ok(())
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn write_script(dir: &Path, name: &str, body: &str) -> Result<PathBuf, Box<dyn Error>> {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}"))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }

    /// Fake ffmpeg answering the `-version` probe and producing progress.
    fn fake_ffmpeg(dir: &Path, exit_code: i32) -> Result<PathBuf, Box<dyn Error>> {
        let body = format!(
            r#"if [ "$1" = "-version" ]; then echo "ffmpeg version fake"; exit 0; fi
for last; do :; done
printf 'frame=30\nout_time_ms=1000000\nprogress=continue\n'
printf 'frame=60\nout_time_ms=2000000\nprogress=end\n'
if [ {exit_code} -ne 0 ]; then
  echo "Error while opening encoder for output stream #0:0" >&2
  exit {exit_code}
fi
: > "$last"
"#
        );
        write_script(dir, "ffmpeg", &body)
    }

    fn fake_ffprobe(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
        write_script(dir, "ffprobe", "echo 2.0\n")
    }

    #[test]
    fn test_missing_input_reaches_closing_prompt() -> Result<(), Box<dyn Error>> {
        webmify_cmd()
            .env("WEBMIFY_FFMPEG", "true")
            .write_stdin("'/surely/this/does/not/exist/input.mp4'\n\n")
            .assert()
            .success()
            .stdout(contains("Enter the path to your MP4 file:"))
            .stdout(contains("Input file not found!"))
            .stdout(contains("Press Enter to exit..."));
        Ok(())
    }

    #[test]
    fn test_full_session_with_fake_ffmpeg() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let input = dir.path().join("holiday.mp4");
        fs::write(&input, b"dummy content")?;

        webmify_cmd()
            .current_dir(dir.path())
            .env("WEBMIFY_FFMPEG", fake_ffmpeg(dir.path(), 0)?)
            .env("WEBMIFY_FFPROBE", fake_ffprobe(dir.path())?)
            .write_stdin(format!("\"{}\"\n\n", input.display()))
            .assert()
            .success()
            .stdout(contains("Starting conversion process..."))
            .stdout(contains("100.0%"))
            .stdout(contains("Conversion completed successfully!"))
            .stdout(contains("holiday.webm"));

        assert!(dir.path().join("holiday.webm").exists());
        Ok(())
    }

    #[test]
    fn test_failed_encode_still_exits_zero() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let input = dir.path().join("broken.mp4");
        fs::write(&input, b"dummy content")?;

        webmify_cmd()
            .current_dir(dir.path())
            .env("WEBMIFY_FFMPEG", fake_ffmpeg(dir.path(), 1)?)
            .env("WEBMIFY_FFPROBE", fake_ffprobe(dir.path())?)
            .write_stdin(format!("{}\n\n", input.display()))
            .assert()
            .success()
            .stdout(contains("Conversion failed! FFmpeg error:"))
            .stdout(contains("Error while opening encoder"))
            .stdout(contains("Press Enter to exit..."));

        assert!(!dir.path().join("broken.webm").exists());
        Ok(())
    }
}
