use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::transport::HttpOptions;

/// Global configuration loaded from `~/.config/mediagrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrabConfig {
    /// Base URL of the job-runner API.
    pub server_url: String,
    /// Delay between status polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Connect timeout for every request, in seconds.
    pub connect_timeout_secs: u64,
    /// Overall timeout for JSON requests, in seconds (artifact transfers
    /// use a stall guard instead).
    pub request_timeout_secs: u64,
    /// Where artifacts land; the current directory when unset.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000/api".to_string(),
            poll_interval_ms: 500,
            connect_timeout_secs: 15,
            request_timeout_secs: 60,
            download_dir: None,
        }
    }
}

impl GrabConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mediagrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: GrabConfig = toml::from_str(&data)?;
    Ok(cfg)
}
