//! Per-job download session.
//!
//! One session drives one job from health gate through submission to a
//! terminal poll result. Sessions share nothing with each other; a caller
//! running several jobs creates several sessions.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::client::ApiClient;
use crate::control::CancelHandle;
use crate::error::Error;
use crate::health::check_health;
use crate::job::{DownloadRequest, Job, JobId};
use crate::poller::{PollTimer, Poller, DEFAULT_POLL_INTERVAL};
use crate::status::JobStatus;
use crate::submit::submit;

/// Terminal result of a successful session.
#[derive(Debug, Clone)]
pub struct Finished {
    pub job: Job,
    /// The `complete` snapshot the poll resolved with.
    pub status: JobStatus,
    /// Direct URL of the produced artifact.
    pub file_url: String,
}

pub struct DownloadSession {
    client: ApiClient,
    request: DownloadRequest,
    interval: Duration,
    timer: Option<Arc<dyn PollTimer>>,
    cancel: CancelHandle,
}

impl DownloadSession {
    pub fn new(client: ApiClient, request: DownloadRequest) -> Self {
        Self {
            client,
            request,
            interval: DEFAULT_POLL_INTERVAL,
            timer: None,
            cancel: CancelHandle::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timer(mut self, timer: Arc<dyn PollTimer>) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Handle for cancelling this session's poll loop, e.g. from a Ctrl-C
    /// handler. Cancellation surfaces as [`Error::Cancelled`].
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Gate, submit, poll. Snapshots go to `updates` as they arrive; the
    /// call resolves with the terminal state.
    pub async fn run(&self, updates: Option<&mpsc::Sender<JobStatus>>) -> Result<Finished, Error> {
        check_health(&self.client).await.gate()?;

        let id: JobId = submit(&self.client, &self.request).await?;
        tracing::info!(job = %id, url = %self.request.url, "download job submitted");

        let mut poller = Poller::new(&self.client, self.cancel.clone()).with_interval(self.interval);
        if let Some(timer) = &self.timer {
            poller = poller.with_timer(Arc::clone(timer));
        }
        let status = poller.poll(&id, updates).await?;

        let file_url = self.client.file_url(&id);
        Ok(Finished {
            job: Job::new(id, self.request.clone()),
            status,
            file_url,
        })
    }
}
