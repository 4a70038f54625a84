// ============================================================================
// webmify-core/src/processing/duration.rs
// ============================================================================
//
// DURATION PROBING: total media length used as the progress denominator
//
// The probe asks ffprobe for the first video stream's duration and falls back
// to the container duration when the stream does not carry one. Probing never
// fails: anything that cannot be turned into a positive number of seconds
// becomes `DurationEstimate::Unknown`, which switches the progress display to
// a frame counter.

use crate::external::{DurationField, FfprobeExecutor};
use std::path::Path;

/// Marker ffprobe prints when a field has no value.
const NOT_AVAILABLE: &str = "N/A";

/// Total duration of the input, as far as it could be determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationEstimate {
    /// Duration in seconds, always positive and finite.
    Known(f64),
    Unknown,
}

impl DurationEstimate {
    /// Wraps `secs`, rejecting zero, negative and non-finite values.
    #[must_use]
    pub fn from_secs(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Self::Known(secs)
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }
}

fn is_unavailable(text: &str) -> bool {
    text == NOT_AVAILABLE
}

/// Runs one query, mapping failures and the `N/A` marker to `None`. Any other
/// answer, including an empty one, is returned for parsing.
fn query_field<P>(prober: &P, input_path: &Path, field: DurationField) -> Option<String>
where
    P: FfprobeExecutor + ?Sized,
{
    match prober.query_duration(input_path, field) {
        Ok(text) => {
            let text = text.trim();
            if is_unavailable(text) {
                log::debug!("{field:?} duration unavailable for {}", input_path.display());
                None
            } else {
                Some(text.to_string())
            }
        }
        Err(e) => {
            log::debug!(
                "{field:?} duration query failed for {}: {e}",
                input_path.display()
            );
            None
        }
    }
}

/// Determines the total duration of `input_path`.
///
/// Tries the video stream duration first, then the container duration. A
/// value that is present but does not parse as seconds ends the probe with
/// `Unknown`; it does not trigger the container fallback.
pub fn probe_duration<P>(prober: &P, input_path: &Path) -> DurationEstimate
where
    P: FfprobeExecutor + ?Sized,
{
    let Some(text) = query_field(prober, input_path, DurationField::VideoStream)
        .or_else(|| query_field(prober, input_path, DurationField::Format))
    else {
        return DurationEstimate::Unknown;
    };

    match text.parse::<f64>() {
        Ok(secs) => {
            let estimate = DurationEstimate::from_secs(secs);
            log::debug!("Probed duration of {}: {estimate:?}", input_path.display());
            estimate
        }
        Err(e) => {
            log::debug!("Unparsable duration {text:?}: {e}");
            DurationEstimate::Unknown
        }
    }
}
