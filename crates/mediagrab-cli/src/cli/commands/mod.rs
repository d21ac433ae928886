//! CLI command handlers. Each command is in its own file.

mod completions;
mod download;
mod health;
mod info;
mod stream;

pub use completions::run_completions;
pub use download::run_download;
pub use health::run_health;
pub use info::run_info;
pub use stream::run_stream;

use mediagrab_core::config::GrabConfig;
use std::path::PathBuf;

/// Destination directory for artifacts: explicit flag, configured dir, or
/// the current directory.
pub(crate) fn destination(cfg: &GrabConfig, dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match dir.or_else(|| cfg.download_dir.clone()) {
        Some(d) => Ok(d),
        None => Ok(std::env::current_dir()?),
    }
}
