//! JSON envelopes used by every job-runner endpoint.
//!
//! Success responses are `{success:true, data:...}` (or flat fields for
//! `/download` and `/health`); failures are `{success:false, error:"..."}`.
//! The server returns envelopes with 4xx/5xx status codes too, so decoding
//! always tries the body first and only falls back to the status code.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::transport::{RawResponse, TransportError};

/// Generic `{success, data, error}` wrapper. Some error responses carry
/// only `{error}`; a missing `success` means failure.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /download` response; the job id sits beside `success`, not in `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitBody {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "downloadId", default)]
    pub download_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /health` response (no envelope).
#[derive(Debug, Deserialize)]
pub(crate) struct HealthBody {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub ytdlp_available: bool,
}

/// Decodes a response body, falling back to the HTTP status when the body
/// is not parseable JSON of the expected shape.
pub(crate) fn decode<T: DeserializeOwned>(resp: &RawResponse) -> Result<T, TransportError> {
    match serde_json::from_slice::<T>(&resp.body) {
        Ok(v) => Ok(v),
        Err(e) => {
            if (200..300).contains(&resp.status) {
                Err(TransportError::Json(e))
            } else {
                Err(TransportError::Http { status: resp.status })
            }
        }
    }
}

impl<T> Envelope<T> {
    /// Unwraps `data`, turning a failure envelope into `Api` with the
    /// server's message (or `fallback` when the server supplied none).
    pub(crate) fn into_data(self, fallback: &str) -> Result<T, TransportError> {
        if self.success {
            self.data
                .ok_or_else(|| TransportError::Api(format!("{fallback} (empty response)")))
        } else {
            Err(TransportError::Api(
                self.error.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}
