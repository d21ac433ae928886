//! Artifact retrieval: the produced file, after (or instead of) polling.
//!
//! Two paths to the same bytes: `fetch_artifact` pulls the file of a
//! completed job, `stream_artifact` asks the runner to transcode straight
//! into the response (no job id, no polling). Both name the local file from
//! `Content-Disposition` and write via a temp file in the destination
//! directory.

use std::path::{Path, PathBuf};

use crate::client::{run_blocking, transport, ApiClient};
use crate::error::TransportError;
use crate::job::{DownloadRequest, JobId};

/// Downloads `GET /download/{id}/file` into `dest_dir`; returns the final
/// path. Only meaningful once the job's poll resolved with `complete`.
pub async fn fetch_artifact(
    client: &ApiClient,
    id: &JobId,
    dest_dir: &Path,
) -> Result<PathBuf, TransportError> {
    let url = client.file_url(id);
    let opts = client.http_options();
    let dest = dest_dir.to_path_buf();
    tracing::debug!(job = %id, "fetching artifact");
    run_blocking(move || transport::download_to_dir(&url, None, &opts, &dest)).await
}

/// `POST /stream`: the direct alternative to submit-poll-fetch. The runner
/// writes the artifact into the response body as it produces it.
pub async fn stream_artifact(
    client: &ApiClient,
    request: &DownloadRequest,
    dest_dir: &Path,
) -> Result<PathBuf, TransportError> {
    let url = client.stream_url();
    let opts = client.http_options();
    let body = serde_json::to_vec(request)?;
    let dest = dest_dir.to_path_buf();
    tracing::debug!(url = %request.url, "streaming artifact");
    run_blocking(move || transport::download_to_dir(&url, Some(&body), &opts, &dest)).await
}
