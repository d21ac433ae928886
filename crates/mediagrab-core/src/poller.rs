//! Status poll loop.
//!
//! Drives a submitted job to a terminal state: one status request per
//! cycle, a snapshot delivered to the updates channel, then a timer sleep
//! and the next cycle. No per-request retry and no built-in deadline —
//! a transport failure fails the whole operation, and a hanging job polls
//! until the caller cancels.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::client::ApiClient;
use crate::control::CancelHandle;
use crate::error::Error;
use crate::job::JobId;
use crate::status::{JobState, JobStatus};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Shown when the server reports `error` without a message.
const FALLBACK_JOB_ERROR: &str = "Download failed";

/// Inter-poll delay source. Injected so tests can run the loop without
/// wall-clock sleeps.
#[async_trait]
pub trait PollTimer: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Production timer backed by the tokio clock.
#[derive(Debug, Default)]
pub struct TokioTimer;

#[async_trait]
impl PollTimer for TokioTimer {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Polls one job until `complete`, `error`, or cancellation. At most one
/// poller per job.
pub struct Poller<'a> {
    client: &'a ApiClient,
    interval: Duration,
    timer: Arc<dyn PollTimer>,
    cancel: CancelHandle,
}

impl<'a> Poller<'a> {
    pub fn new(client: &'a ApiClient, cancel: CancelHandle) -> Self {
        Self {
            client,
            interval: DEFAULT_POLL_INTERVAL,
            timer: Arc::new(TokioTimer),
            cancel,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timer(mut self, timer: Arc<dyn PollTimer>) -> Self {
        self.timer = timer;
        self
    }

    /// Runs the loop to a terminal snapshot.
    ///
    /// Every received snapshot — terminal ones included — is sent on
    /// `updates` before the loop decides what to do next, so a subscriber
    /// sees exactly one snapshot per status request. After cancellation
    /// nothing further is sent and no further requests are made; the
    /// result is `Error::Cancelled`, never a late success or job failure.
    pub async fn poll(
        &self,
        id: &JobId,
        updates: Option<&mpsc::Sender<JobStatus>>,
    ) -> Result<JobStatus, Error> {
        loop {
            if self.cancel.is_cancelled() {
                tracing::debug!(job = %id, "poll cancelled");
                return Err(Error::Cancelled);
            }

            let status = self
                .client
                .job_status(id)
                .await
                .map_err(Error::PollTransport)?;

            if self.cancel.is_cancelled() {
                tracing::debug!(job = %id, "poll cancelled");
                return Err(Error::Cancelled);
            }
            if let Some(tx) = updates {
                // A dropped receiver only means nobody is watching.
                let _ = tx.send(status.clone()).await;
            }

            match status.state {
                JobState::Complete => {
                    tracing::info!(job = %id, "download complete");
                    return Ok(status);
                }
                JobState::Error => {
                    let message = status
                        .error
                        .clone()
                        .unwrap_or_else(|| FALLBACK_JOB_ERROR.to_string());
                    tracing::warn!(job = %id, error = %message, "download failed");
                    return Err(Error::Job(message));
                }
                JobState::Queued | JobState::Downloading | JobState::Merging => {
                    self.timer.sleep(self.interval).await;
                }
            }
        }
    }
}
