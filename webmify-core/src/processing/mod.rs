//! Core conversion logic.
//!
//! [`duration`] determines how long the input is, [`conversion`] drives a
//! single MP4 to WebM encode from validation to the final outcome.

/// Total-duration probing with stream/container fallback
pub mod duration;

/// Conversion orchestration
pub mod conversion;

pub use conversion::{ConversionOutcome, ConversionRequest, ConversionState, convert_video};
pub use duration::{DurationEstimate, probe_duration};
