//! Backend health gate.
//!
//! Probed fresh before every submission, never cached. The probe itself
//! must never fail: any network or parse problem is downgraded to a
//! negative snapshot, and only the gate turns that into an error.

use crate::client::ApiClient;
use crate::error::Error;

/// Result of one health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSnapshot {
    /// Server answered `GET /health` with `status: "ok"`.
    pub reachable: bool,
    /// yt-dlp is installed on the server.
    pub capable: bool,
}

impl HealthSnapshot {
    pub const OFFLINE: HealthSnapshot = HealthSnapshot {
        reachable: false,
        capable: false,
    };

    /// Blocks submission on a negative snapshot. Both outcomes are
    /// user-visible and not retryable until the operator fixes the backend.
    pub fn gate(self) -> Result<(), Error> {
        if !self.reachable {
            Err(Error::Unreachable)
        } else if !self.capable {
            Err(Error::MissingYtdlp)
        } else {
            Ok(())
        }
    }
}

/// Probes `GET /health`. Fails soft: an unreachable or misbehaving server
/// yields `OFFLINE` rather than an error.
pub async fn check_health(client: &ApiClient) -> HealthSnapshot {
    match client.health().await {
        Ok(body) => HealthSnapshot {
            reachable: body.status == "ok",
            capable: body.ytdlp_available,
        },
        Err(e) => {
            tracing::debug!("health probe failed: {}", e);
            HealthSnapshot::OFFLINE
        }
    }
}
