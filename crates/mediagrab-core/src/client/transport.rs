//! Blocking HTTP transport over libcurl.
//!
//! All requests here run on the current thread; async callers go through
//! `spawn_blocking` (see [`crate::client::run_blocking`]). JSON bodies are
//! collected into memory; artifact downloads stream to a temp file and are
//! renamed into place once the transfer succeeds.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str;
use std::time::Duration;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::artifact_filename;

/// Failure of a single HTTP exchange with the job runner.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection refused, DNS, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Non-2xx response with no usable error envelope.
    #[error("HTTP {status}")]
    Http { status: u32 },
    /// Response body was not the JSON we expect.
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),
    /// The server answered with `{success:false, error}`; message verbatim.
    #[error("{0}")]
    Api(String),
    /// Writing the artifact to disk failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}

/// Connection and overall timeouts applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Raw response: status code plus the collected body bytes.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

fn configure(easy: &mut curl::easy::Easy, url: &str, opts: &HttpOptions) -> Result<(), TransportError> {
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    Ok(())
}

fn attach_json_body(easy: &mut curl::easy::Easy, body: &[u8]) -> Result<(), TransportError> {
    easy.post(true)?;
    easy.post_fields_copy(body)?;
    let mut list = curl::easy::List::new();
    list.append("Content-Type: application/json")?;
    easy.http_headers(list)?;
    Ok(())
}

/// Performs a request, collecting the body into memory. `body` of `Some`
/// turns the request into a JSON POST. Non-2xx responses are returned as-is;
/// the caller decides whether the body still carries a valid envelope.
pub(crate) fn exchange(
    url: &str,
    body: Option<&[u8]>,
    opts: &HttpOptions,
) -> Result<RawResponse, TransportError> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, opts)?;
    if let Some(b) = body {
        attach_json_body(&mut easy, b)?;
    }

    let mut out: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            out.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    Ok(RawResponse { status, body: out })
}

/// Streams a (possibly large) response body into `dest_dir`, naming the file
/// from the `Content-Disposition` header. The body is written to a temp file
/// first and renamed once the transfer completes, so a failed download never
/// leaves a half-written artifact under its final name.
pub(crate) fn download_to_dir(
    url: &str,
    json_body: Option<&[u8]>,
    opts: &HttpOptions,
    dest_dir: &Path,
) -> Result<PathBuf, TransportError> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, opts)?;
    // Artifacts can be large; replace the overall deadline with a stall guard.
    easy.timeout(Duration::from_secs(0))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    if let Some(b) = json_body {
        attach_json_body(&mut easy, b)?;
    }

    let mut temp = NamedTempFile::new_in(dest_dir)?;
    let mut headers: Vec<String> = Vec::new();
    {
        let file = temp.as_file_mut();
        let mut transfer = easy.transfer();
        transfer.header_function(|line| {
            if let Ok(s) = str::from_utf8(line) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                tracing::warn!("artifact write failed: {}", e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        // The temp file holds the error body at this point, not an artifact.
        let body = fs::read(temp.path()).unwrap_or_default();
        return Err(status_error(status, &body));
    }
    temp.as_file_mut().flush()?;

    let name = artifact_filename(find_header(&headers, "content-disposition"));
    let path = dest_dir.join(name);
    temp.persist(&path)
        .map_err(|e| TransportError::Storage(e.error))?;
    Ok(path)
}

/// Maps a non-2xx response to `Api` when the body is an error envelope,
/// otherwise to a bare HTTP status error.
pub(crate) fn status_error(status: u32, body: &[u8]) -> TransportError {
    #[derive(Deserialize)]
    struct ErrBody {
        error: Option<String>,
    }
    match serde_json::from_slice::<ErrBody>(body) {
        Ok(ErrBody { error: Some(msg) }) => TransportError::Api(msg),
        _ => TransportError::Http { status },
    }
}

/// Returns the value of the last occurrence of `name` among raw header
/// lines (redirect chains repeat header blocks; the final response wins).
pub(crate) fn find_header<'a>(lines: &'a [String], name: &str) -> Option<&'a str> {
    let mut found = None;
    for line in lines {
        if let Some((n, v)) = line.split_once(':') {
            if n.trim().eq_ignore_ascii_case(name) {
                found = Some(v.trim());
            }
        }
    }
    found
}
