//! `mediagrab download <url>` – submit a job, follow it, save the artifact.

use anyhow::Result;
use std::io::{self, Write};
use std::path::PathBuf;

use mediagrab_core::artifact::fetch_artifact;
use mediagrab_core::checksum::sha256_file;
use mediagrab_core::client::ApiClient;
use mediagrab_core::config::GrabConfig;
use mediagrab_core::error::Error;
use mediagrab_core::job::{DownloadRequest, Quality};
use mediagrab_core::progress::ProgressView;
use mediagrab_core::session::DownloadSession;
use mediagrab_core::status::JobStatus;

use super::destination;

pub async fn run_download(
    cfg: &GrabConfig,
    url: String,
    quality: Quality,
    include_audio: bool,
    dir: Option<PathBuf>,
    checksum: bool,
) -> Result<()> {
    let client = ApiClient::from_config(cfg);
    let request = DownloadRequest {
        url,
        quality,
        include_audio,
    };
    let session =
        DownloadSession::new(client.clone(), request).with_interval(cfg.poll_interval());

    // Ctrl-C cancels the poll loop; the job keeps running server-side.
    let cancel = session.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!();
            eprintln!("cancelling...");
            cancel.cancel();
        }
    });

    let (tx, mut rx) = tokio::sync::mpsc::channel::<JobStatus>(16);
    let printer = tokio::spawn(async move {
        while let Some(status) = rx.recv().await {
            let view = ProgressView::from(&status);
            print!(
                "\r  {:>3}%  {}  {}  {}    ",
                view.percent, view.stage, view.speed, view.remaining
            );
            let _ = io::stdout().flush();
        }
        println!();
    });

    let result = session.run(Some(&tx)).await;
    drop(tx);
    let _ = printer.await;

    match result {
        Ok(finished) => {
            tracing::debug!(url = %finished.file_url, "retrieving artifact");
            let dest = destination(cfg, dir)?;
            let path = fetch_artifact(&client, finished.job.id(), &dest).await?;
            println!("Saved {}", path.display());
            if checksum {
                println!("sha256  {}", sha256_file(&path)?);
            }
            Ok(())
        }
        // A distinct outcome, not a failure: exit cleanly.
        Err(Error::Cancelled) => {
            println!("Cancelled.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
