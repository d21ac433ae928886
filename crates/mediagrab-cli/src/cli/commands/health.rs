//! `mediagrab health` – probe the backend.

use anyhow::Result;
use mediagrab_core::client::ApiClient;
use mediagrab_core::config::GrabConfig;
use mediagrab_core::health::check_health;

pub async fn run_health(cfg: &GrabConfig) -> Result<()> {
    let client = ApiClient::from_config(cfg);
    let snapshot = check_health(&client).await;

    println!("{:<10} {}", "backend", if snapshot.reachable { "ok" } else { "unreachable" });
    println!("{:<10} {}", "yt-dlp", if snapshot.capable { "available" } else { "missing" });

    // Non-zero exit when downloads would be blocked.
    snapshot.gate()?;
    Ok(())
}
