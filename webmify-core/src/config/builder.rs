// ============================================================================
// webmify-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ConversionConfig
//
// Fluent construction of ConversionConfig starting from the documented
// defaults. Validation is left to ConversionConfig::validate so that the
// builder itself never fails.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::ConversionConfig;

/// Builder for creating ConversionConfig instances.
#[derive(Debug, Clone, Default)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Creates a new builder holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ffmpeg binary path.
    #[must_use]
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffmpeg_path = path.into();
        self
    }

    /// Sets the ffprobe binary path.
    #[must_use]
    pub fn ffprobe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffprobe_path = path.into();
        self
    }

    /// Sets the video encoder.
    #[must_use]
    pub fn video_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.video_codec = codec.into();
        self
    }

    /// Sets the CRF quality value.
    #[must_use]
    pub fn crf(mut self, crf: u8) -> Self {
        self.config.crf = crf;
        self
    }

    /// Sets the video bitrate target.
    #[must_use]
    pub fn video_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.config.video_bitrate = bitrate.into();
        self
    }

    /// Sets the audio encoder.
    #[must_use]
    pub fn audio_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.audio_codec = codec.into();
        self
    }

    /// Sets the output extension (without the leading dot).
    #[must_use]
    pub fn target_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.target_extension = extension.into();
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}
