//! `mediagrab stream <url>` – direct download, no job to poll.

use anyhow::Result;
use std::path::PathBuf;

use mediagrab_core::artifact::stream_artifact;
use mediagrab_core::client::ApiClient;
use mediagrab_core::config::GrabConfig;
use mediagrab_core::health::check_health;
use mediagrab_core::job::{DownloadRequest, Quality};

use super::destination;

pub async fn run_stream(
    cfg: &GrabConfig,
    url: String,
    quality: Quality,
    include_audio: bool,
    dir: Option<PathBuf>,
) -> Result<()> {
    let client = ApiClient::from_config(cfg);
    check_health(&client).await.gate()?;

    let request = DownloadRequest {
        url,
        quality,
        include_audio,
    };
    let dest = destination(cfg, dir)?;
    println!("Streaming {} ...", request.url);
    let path = stream_artifact(&client, &request, &dest).await?;
    println!("Saved {}", path.display());
    Ok(())
}
