//! Configuration structures and constants for the webmify-core library.
//!
//! This module holds the fixed encoding parameters of the conversion and the
//! locations of the external binaries. The defaults reproduce the converter's
//! documented invocation; the binary paths can be overridden from the
//! environment.

mod builder;

use std::env;
use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};

pub use builder::ConversionConfigBuilder;

// Default constants

/// Default ffmpeg binary, resolved through `PATH`.
pub const DEFAULT_FFMPEG_BINARY: &str = "ffmpeg";

/// Default ffprobe binary, resolved through `PATH`.
pub const DEFAULT_FFPROBE_BINARY: &str = "ffprobe";

/// Default video encoder (VP9 family).
pub const DEFAULT_VIDEO_CODEC: &str = "libvpx-vp9";

/// Default CRF (Constant Rate Factor) quality value.
/// Range: 0-63 for libvpx-vp9, lower is higher quality.
pub const DEFAULT_CRF: u8 = 30;

/// Default video bitrate target. "0" leaves the bitrate unconstrained so the
/// encoder is rate-controlled by CRF alone.
pub const DEFAULT_VIDEO_BITRATE: &str = "0";

/// Default audio encoder (Opus family).
pub const DEFAULT_AUDIO_CODEC: &str = "libopus";

/// Extension given to the output file.
pub const DEFAULT_TARGET_EXTENSION: &str = "webm";

/// Highest CRF value accepted by libvpx-vp9.
pub const MAX_CRF: u8 = 63;

/// Environment variable overriding the ffmpeg binary path.
pub const FFMPEG_ENV_VAR: &str = "WEBMIFY_FFMPEG";

/// Environment variable overriding the ffprobe binary path.
pub const FFPROBE_ENV_VAR: &str = "WEBMIFY_FFPROBE";

/// Main configuration structure for a conversion.
///
/// All fields have defaults, so `ConversionConfig::default()` is the exact
/// MP4 → WebM invocation. The builder provides a fluent way to change
/// individual values.
///
/// # Examples
///
/// ```rust
/// use webmify_core::config::ConversionConfigBuilder;
///
/// let config = ConversionConfigBuilder::new()
///     .crf(32)
///     .ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
///     .build();
/// assert_eq!(config.crf, 32);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Path or name of the ffmpeg binary
    pub ffmpeg_path: PathBuf,

    /// Path or name of the ffprobe binary
    pub ffprobe_path: PathBuf,

    /// Video encoder passed to `-c:v`
    pub video_codec: String,

    /// Quality passed to `-crf`
    pub crf: u8,

    /// Bitrate passed to `-b:v`
    pub video_bitrate: String,

    /// Audio encoder passed to `-c:a`
    pub audio_codec: String,

    /// Extension (without the dot) substituted into the output path
    pub target_extension: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_BINARY),
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE_BINARY),
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            crf: DEFAULT_CRF,
            video_bitrate: DEFAULT_VIDEO_BITRATE.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            target_extension: DEFAULT_TARGET_EXTENSION.to_string(),
        }
    }
}

impl ConversionConfig {
    /// Creates the default configuration with binary paths taken from
    /// `WEBMIFY_FFMPEG` / `WEBMIFY_FFPROBE` when they are set and non-empty.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ConversionConfigBuilder::new();
        if let Some(path) = lookup(FFMPEG_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            log::debug!("Using ffmpeg binary from {FFMPEG_ENV_VAR}: {path}");
            builder = builder.ffmpeg_path(path);
        }
        if let Some(path) = lookup(FFPROBE_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            log::debug!("Using ffprobe binary from {FFPROBE_ENV_VAR}: {path}");
            builder = builder.ffprobe_path(path);
        }
        builder.build()
    }

    /// Checks the configuration for values ffmpeg would reject.
    pub fn validate(&self) -> CoreResult<()> {
        if self.crf > MAX_CRF {
            return Err(CoreError::Config(format!(
                "CRF {} is out of range (0-{MAX_CRF})",
                self.crf
            )));
        }
        if self.video_codec.trim().is_empty() {
            return Err(CoreError::Config("video codec must not be empty".to_string()));
        }
        if self.audio_codec.trim().is_empty() {
            return Err(CoreError::Config("audio codec must not be empty".to_string()));
        }
        if self.video_bitrate.trim().is_empty() {
            return Err(CoreError::Config("video bitrate must not be empty".to_string()));
        }
        if self.target_extension.is_empty() || self.target_extension.contains('.') {
            return Err(CoreError::Config(format!(
                "target extension '{}' must be non-empty and contain no dot",
                self.target_extension
            )));
        }
        Ok(())
    }
}
