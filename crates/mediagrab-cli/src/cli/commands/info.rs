//! `mediagrab info <url>` – preview media metadata.

use anyhow::Result;
use mediagrab_core::client::ApiClient;
use mediagrab_core::config::GrabConfig;
use mediagrab_core::platform::Platform;

pub async fn run_info(cfg: &GrabConfig, url: &str, platform: Option<Platform>) -> Result<()> {
    let client = ApiClient::from_config(cfg);
    let platform = platform
        .or_else(|| Platform::detect(url))
        .unwrap_or_default();
    tracing::debug!(%platform, "fetching media info");

    let info = client.fetch_info(url, platform).await?;

    println!("{:<10} {}", "Title", info.title);
    println!("{:<10} {}", "Uploader", info.uploader);
    println!("{:<10} {}", "Duration", info.duration);
    println!("{:<10} {}", "Views", info.views);
    println!("{:<10} ~{}", "Size", info.estimated_size);
    println!("{:<10} {}", "Qualities", info.available_qualities.join(", "));
    if info.is_live {
        println!("{:<10} {}", "Live", "yes");
    }
    Ok(())
}
