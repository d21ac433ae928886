//! Download jobs: the request that creates one and the server-assigned id.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque, server-assigned job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        JobId(s)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Requested quality tier, serialized as the height string the job runner
/// expects (`"best"`, `"2160"`, ... `"360"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    Best,
    P4320,
    P2160,
    P1440,
    #[default]
    P1080,
    P720,
    P480,
    P360,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Best => "best",
            Quality::P4320 => "4320",
            Quality::P2160 => "2160",
            Quality::P1440 => "1440",
            Quality::P1080 => "1080",
            Quality::P720 => "720",
            Quality::P480 => "480",
            Quality::P360 => "360",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown quality tier `{0}` (expected best, 4320, 2160, 1440, 1080, 720, 480 or 360)")]
pub struct QualityParseError(String);

impl FromStr for Quality {
    type Err = QualityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best" => Ok(Quality::Best),
            "4320" => Ok(Quality::P4320),
            "2160" => Ok(Quality::P2160),
            "1440" => Ok(Quality::P1440),
            "1080" => Ok(Quality::P1080),
            "720" => Ok(Quality::P720),
            "480" => Ok(Quality::P480),
            "360" => Ok(Quality::P360),
            other => Err(QualityParseError(other.to_string())),
        }
    }
}

impl Serialize for Quality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// What to ask the job runner for. This is the `POST /download` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub url: String,
    pub quality: Quality,
    pub include_audio: bool,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            quality: Quality::default(),
            include_audio: true,
        }
    }
}

/// A submitted job: the id the server assigned plus the request that created
/// it. Immutable; owned by the poller until a terminal state.
#[derive(Debug, Clone)]
pub struct Job {
    id: JobId,
    request: DownloadRequest,
}

impl Job {
    pub fn new(id: JobId, request: DownloadRequest) -> Self {
        Self { id, request }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn request(&self) -> &DownloadRequest {
        &self.request
    }
}
