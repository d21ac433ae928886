//! Job status snapshots reported by `GET /download/{id}/status`.

use serde::{Deserialize, Serialize};

/// State a remote job passes through.
///
/// `queued`, `downloading`, and `merging` keep the poll loop running;
/// `complete` and `error` stop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Downloading,
    Merging,
    Complete,
    Error,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Complete | JobState::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobState::Queued => "queued",
            JobState::Downloading => "downloading",
            JobState::Merging => "merging",
            JobState::Complete => "complete",
            JobState::Error => "error",
        }
    }
}

/// One status snapshot. Superseded by the next poll; never persisted.
///
/// `speed` and `eta` are preformatted by the server and may be empty
/// strings, which presentation treats the same as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    #[serde(rename = "status")]
    pub state: JobState,
    /// Percentage in 0–100; non-decreasing from a well-behaved backend.
    #[serde(default)]
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    /// Server-side output path, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Terminal error message; only meaningful when `state` is `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
