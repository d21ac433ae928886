//! Job submission.
//!
//! One request, no retry: whether to try again is the caller's policy.
//! Run the health gate first (see [`crate::health`]); submission itself
//! assumes the backend is there.

use crate::client::ApiClient;
use crate::error::{Error, TransportError};
use crate::job::{DownloadRequest, JobId};

/// Asks the job runner to start a download. Any failure — server rejection
/// or the request itself — is a submission failure; server messages pass
/// through verbatim.
pub async fn submit(client: &ApiClient, request: &DownloadRequest) -> Result<JobId, Error> {
    client.submit(request).await.map_err(submission_error)
}

fn submission_error(e: TransportError) -> Error {
    match e {
        TransportError::Api(message) => Error::Submission {
            message,
            source: None,
        },
        other => Error::Submission {
            message: other.to_string(),
            source: Some(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_is_verbatim() {
        let e = submission_error(TransportError::Api("URL is required".to_string()));
        assert_eq!(e.to_string(), "URL is required");
        assert!(matches!(e, Error::Submission { source: None, .. }));
    }

    #[test]
    fn network_failure_keeps_the_source() {
        let e = submission_error(TransportError::Http { status: 500 });
        assert_eq!(e.to_string(), "HTTP 500");
        assert!(matches!(e, Error::Submission { source: Some(_), .. }));
    }
}
