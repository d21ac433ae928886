//! Error taxonomy for the download lifecycle.
//!
//! Every failure a caller can see is one of these variants; server-supplied
//! messages pass through unmodified. The health probe never produces an
//! error itself (see [`crate::health`]) — it only feeds `Unreachable` /
//! `MissingYtdlp` through the gate.

use thiserror::Error;

pub use crate::client::transport::TransportError;

/// Outcome of a download operation that did not complete.
///
/// `Cancelled` is a distinct third outcome, not a failure: the caller asked
/// the poll loop to stop and no further snapshots or requests follow.
#[derive(Debug, Error)]
pub enum Error {
    /// Health probe could not reach the backend.
    #[error("backend unreachable")]
    Unreachable,

    /// Backend answered the health probe but yt-dlp is not installed.
    #[error("backend is missing yt-dlp")]
    MissingYtdlp,

    /// The job could not be created (server rejection or the submission
    /// request itself failing). The message is shown to the user as-is.
    #[error("{message}")]
    Submission {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    /// A status request failed mid-poll. The whole operation fails; callers
    /// wanting resilience wrap the poll with their own retry policy.
    #[error(transparent)]
    PollTransport(TransportError),

    /// The job reached the terminal `error` state on the server.
    #[error("{0}")]
    Job(String),

    /// The caller cancelled the poll loop.
    #[error("download cancelled")]
    Cancelled,
}
