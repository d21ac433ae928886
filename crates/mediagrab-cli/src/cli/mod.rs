//! CLI for the MediaGrab download client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use mediagrab_core::config;
use mediagrab_core::job::Quality;
use mediagrab_core::platform::Platform;
use std::path::PathBuf;

use commands::{run_completions, run_download, run_health, run_info, run_stream};

/// Top-level CLI for the MediaGrab download client.
#[derive(Debug, Parser)]
#[command(name = "mediagrab")]
#[command(about = "MediaGrab: download media through a remote yt-dlp job runner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check that the backend is reachable and yt-dlp is installed.
    Health,

    /// Fetch media metadata for a URL without downloading anything.
    Info {
        /// Media URL (YouTube, Instagram, Facebook).
        url: String,

        /// Platform override; detected from the URL host when omitted.
        #[arg(long)]
        platform: Option<Platform>,
    },

    /// Submit a download job, follow its progress, and save the artifact.
    Download {
        /// Media URL to download.
        url: String,

        /// Quality tier: best, 4320, 2160, 1440, 1080, 720, 480 or 360.
        #[arg(long, default_value = "1080")]
        quality: Quality,

        /// Video only, without the audio track.
        #[arg(long)]
        no_audio: bool,

        /// Destination directory (default: configured download dir, else the
        /// current directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Print the SHA-256 of the saved artifact.
        #[arg(long)]
        checksum: bool,
    },

    /// Download through the direct streaming endpoint (no job, no progress).
    Stream {
        /// Media URL to download.
        url: String,

        /// Quality tier: best, 4320, 2160, 1440, 1080, 720, 480 or 360.
        #[arg(long, default_value = "1080")]
        quality: Quality,

        /// Video only, without the audio track.
        #[arg(long)]
        no_audio: bool,

        /// Destination directory (default: configured download dir, else the
        /// current directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Health => run_health(&cfg).await?,
            CliCommand::Info { url, platform } => run_info(&cfg, &url, platform).await?,
            CliCommand::Download {
                url,
                quality,
                no_audio,
                dir,
                checksum,
            } => run_download(&cfg, url, quality, !no_audio, dir, checksum).await?,
            CliCommand::Stream {
                url,
                quality,
                no_audio,
                dir,
            } => run_stream(&cfg, url, quality, !no_audio, dir).await?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}
