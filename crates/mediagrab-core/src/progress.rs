//! Presentation mapping for status snapshots.
//!
//! Turns a raw [`JobStatus`] into the strings a front end shows: rounded
//! percent, stage label, speed, and time remaining. Consumers render this
//! verbatim; all fallbacks for missing server fields live here.

use crate::status::{JobState, JobStatus};

const STAGE_MERGING: &str = "Merging audio/video...";
const STAGE_DOWNLOADING: &str = "Downloading...";
const SPEED_UNKNOWN: &str = "-- MB/s";
const REMAINING_UNKNOWN: &str = "Calculating...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    /// Rounded percentage, clamped to 0–100.
    pub percent: u32,
    pub stage: &'static str,
    pub speed: String,
    pub remaining: String,
}

impl From<&JobStatus> for ProgressView {
    fn from(status: &JobStatus) -> Self {
        let percent = status.progress.round().clamp(0.0, 100.0) as u32;
        let stage = match status.state {
            JobState::Merging => STAGE_MERGING,
            _ => STAGE_DOWNLOADING,
        };
        let speed = match status.speed.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => s.to_string(),
            None => SPEED_UNKNOWN.to_string(),
        };
        let remaining = match status.eta.as_deref().filter(|s| !s.is_empty()) {
            Some(eta) => format!("ETA: {eta}"),
            None => REMAINING_UNKNOWN.to_string(),
        };
        Self {
            percent,
            stage,
            speed,
            remaining,
        }
    }
}
