//! HTTP client for the job-runner API.
//!
//! One `ApiClient` per backend; it is cheap to clone and carries no
//! connection state. Individual jobs get their own session/poller on top.

pub(crate) mod envelope;
pub mod transport;

use crate::config::GrabConfig;
use crate::job::{DownloadRequest, JobId};
use crate::media_info::MediaInfo;
use crate::platform::Platform;
use crate::status::JobStatus;
use envelope::{decode, Envelope, HealthBody, SubmitBody};
use transport::{HttpOptions, TransportError};

/// Runs a blocking transport call on the tokio blocking pool. A panic in
/// the closure is a bug; it is re-raised on the calling task.
pub(crate) async fn run_blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .unwrap_or_else(|e| panic!("transport task failed: {e}"))
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    options: HttpOptions,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:5000/api`.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            options: HttpOptions::default(),
        }
    }

    pub fn from_config(cfg: &GrabConfig) -> Self {
        let mut client = Self::new(&cfg.server_url);
        client.options = cfg.http_options();
        client
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http_options(&self) -> HttpOptions {
        self.options
    }

    /// Raw `GET /health` body. Most callers want
    /// [`crate::health::check_health`], which never fails.
    pub(crate) async fn health(&self) -> Result<HealthBody, TransportError> {
        let url = self.endpoint("/health");
        let opts = self.options;
        let resp = run_blocking(move || transport::exchange(&url, None, &opts)).await?;
        decode(&resp)
    }

    /// `POST /info`: media metadata for an URL.
    pub async fn fetch_info(
        &self,
        url: &str,
        platform: Platform,
    ) -> Result<MediaInfo, TransportError> {
        let endpoint = self.endpoint("/info");
        let opts = self.options;
        let body = serde_json::to_vec(&serde_json::json!({
            "url": url,
            "platform": platform.as_str(),
        }))?;
        let resp = run_blocking(move || transport::exchange(&endpoint, Some(&body), &opts)).await?;
        let env: Envelope<MediaInfo> = decode(&resp)?;
        env.into_data("Failed to fetch video info")
    }

    /// `POST /download`: starts a remote job, returns its id.
    pub async fn submit(&self, request: &DownloadRequest) -> Result<JobId, TransportError> {
        let endpoint = self.endpoint("/download");
        let opts = self.options;
        let body = serde_json::to_vec(request)?;
        let resp = run_blocking(move || transport::exchange(&endpoint, Some(&body), &opts)).await?;
        let parsed: SubmitBody = decode(&resp)?;
        if !parsed.success {
            return Err(TransportError::Api(
                parsed
                    .error
                    .unwrap_or_else(|| "Failed to start download".to_string()),
            ));
        }
        parsed
            .download_id
            .map(JobId::from)
            .ok_or_else(|| TransportError::Api("Failed to start download (no id)".to_string()))
    }

    /// `GET /download/{id}/status`: one status snapshot.
    pub async fn job_status(&self, id: &JobId) -> Result<JobStatus, TransportError> {
        let endpoint = self.endpoint(&format!("/download/{id}/status"));
        let opts = self.options;
        let resp = run_blocking(move || transport::exchange(&endpoint, None, &opts)).await?;
        let env: Envelope<JobStatus> = decode(&resp)?;
        env.into_data("Failed to get status")
    }

    /// Direct URL of the finished artifact; handed to the caller on
    /// completion.
    pub fn file_url(&self, id: &JobId) -> String {
        self.endpoint(&format!("/download/{id}/file"))
    }

    /// URL of the direct-stream endpoint.
    pub(crate) fn stream_url(&self) -> String {
        self.endpoint("/stream")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let c = ApiClient::new("http://127.0.0.1:5000/api/");
        assert_eq!(c.endpoint("/health"), "http://127.0.0.1:5000/api/health");
    }

    #[test]
    fn file_url_embeds_job_id() {
        let c = ApiClient::new("http://127.0.0.1:5000/api");
        let id = JobId::from("ab12cd34".to_string());
        assert_eq!(
            c.file_url(&id),
            "http://127.0.0.1:5000/api/download/ab12cd34/file"
        );
    }
}
