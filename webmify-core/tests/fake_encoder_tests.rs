// webmify-core/tests/fake_encoder_tests.rs
//
// Runs the real process plumbing (ffmpeg-sidecar spawn, pipes, drain thread,
// wait) against small shell scripts standing in for ffmpeg and ffprobe.

#![cfg(unix)]

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use webmify_core::{
    CommandFfprobeExecutor, ConversionConfigBuilder, DurationEstimate, DurationField,
    FfprobeExecutor, SidecarSpawner, TerminalSurface, convert_video, probe_duration,
};

struct Recorder {
    lines: Vec<String>,
}

impl Recorder {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| console::strip_ansi_codes(line).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TerminalSurface for Recorder {
    fn width(&self) -> usize {
        80
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.lines.push(text.to_string());
        Ok(())
    }

    fn move_up_and_clear(&mut self) -> io::Result<()> {
        self.lines.pop();
        Ok(())
    }
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Fake ffmpeg: emits progress, optional stderr noise, creates the last
/// argument as the output file unless it fails.
fn fake_encoder(dir: &Path, stderr_lines: usize, exit_code: i32) -> PathBuf {
    let body = format!(
        r#"for last; do :; done
i=0
while [ "$i" -lt {stderr_lines} ]; do
  echo "[libvpx-vp9 @ 0x5581] diagnostic line $i with some padding to fill the pipe" >&2
  i=$((i + 1))
done
printf 'frame=12\nfps=0.0\nout_time_ms=500000\nprogress=continue\n'
printf 'frame=24\nout_time_ms=1000000\nprogress=end\n'
if [ {exit_code} -ne 0 ]; then
  echo "Unknown encoder 'libvpx-vp9'" >&2
  exit {exit_code}
fi
: > "$last"
"#
    );
    write_script(dir, "fake-ffmpeg", &body)
}

fn fake_prober(dir: &Path, stream: &str, format: &str) -> PathBuf {
    let body = format!(
        r#"case "$*" in
  *stream=duration*) echo "{stream}" ;;
  *format=duration*) echo "{format}" ;;
  *) exit 1 ;;
esac
"#
    );
    write_script(dir, "fake-ffprobe", &body)
}

fn setup() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    fs::write(&input, b"not really an mp4").unwrap();
    (dir, input)
}

#[test]
fn test_real_pipes_successful_encode() {
    let (dir, input) = setup();
    let config = ConversionConfigBuilder::new()
        .ffmpeg_path(fake_encoder(dir.path(), 3, 0))
        .ffprobe_path(fake_prober(dir.path(), "1.0", "1.0"))
        .build();
    let prober = CommandFfprobeExecutor::new(&config.ffprobe_path);
    let mut surface = Recorder::new();

    let outcome = convert_video(&SidecarSpawner, &prober, &config, &mut surface, &input);

    assert!(outcome.success, "{outcome:?}\n{}", surface.text());
    assert_eq!(outcome.output_path, dir.path().join("clip.webm"));
    assert!(outcome.output_path.exists());
    let text = surface.text();
    assert!(text.contains("100.0%"), "{text}");
    assert!(text.contains("Conversion completed successfully!"));
}

#[test]
fn test_real_pipes_failed_encode_reports_stderr() {
    let (dir, input) = setup();
    let config = ConversionConfigBuilder::new()
        .ffmpeg_path(fake_encoder(dir.path(), 0, 1))
        .ffprobe_path(fake_prober(dir.path(), "1.0", "1.0"))
        .build();
    let prober = CommandFfprobeExecutor::new(&config.ffprobe_path);
    let mut surface = Recorder::new();

    let outcome = convert_video(&SidecarSpawner, &prober, &config, &mut surface, &input);

    assert!(!outcome.success);
    assert!(!outcome.output_path.exists());
    let diagnostic = outcome.diagnostic.unwrap();
    assert!(diagnostic.contains("Unknown encoder 'libvpx-vp9'"), "{diagnostic}");
    assert!(surface.text().contains("Conversion failed! FFmpeg error:"));
}

#[test]
fn test_chatty_stderr_does_not_stall_progress() {
    let (dir, input) = setup();
    // Roughly 160 KiB of diagnostics, well past a default pipe buffer.
    let config = ConversionConfigBuilder::new()
        .ffmpeg_path(fake_encoder(dir.path(), 2000, 0))
        .ffprobe_path(fake_prober(dir.path(), "N/A", "N/A"))
        .build();
    let prober = CommandFfprobeExecutor::new(&config.ffprobe_path);
    let mut surface = Recorder::new();

    let outcome = convert_video(&SidecarSpawner, &prober, &config, &mut surface, &input);

    assert!(outcome.success, "{outcome:?}");
    let text = surface.text();
    assert!(text.contains("Could not determine video duration."));
    assert!(text.contains("Processed 24 frames"), "{text}");
}

#[test]
fn test_command_prober_falls_back_to_format() {
    let (dir, input) = setup();
    let prober = CommandFfprobeExecutor::new(fake_prober(dir.path(), "N/A", "8.5"));

    assert_eq!(
        prober
            .query_duration(&input, DurationField::VideoStream)
            .unwrap(),
        "N/A"
    );
    assert_eq!(probe_duration(&prober, &input), DurationEstimate::Known(8.5));
}

#[test]
fn test_command_prober_failure_is_unknown() {
    let (dir, input) = setup();
    let prober = CommandFfprobeExecutor::new(write_script(
        dir.path(),
        "broken-ffprobe",
        "echo 'clip.mp4: Invalid data found when processing input' >&2\nexit 1\n",
    ));

    assert!(
        prober
            .query_duration(&input, DurationField::Format)
            .is_err()
    );
    assert_eq!(probe_duration(&prober, &input), DurationEstimate::Unknown);
}
