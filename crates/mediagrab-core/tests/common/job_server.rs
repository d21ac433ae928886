//! Minimal HTTP/1.1 job-runner mock for integration tests.
//!
//! Serves the `/api` surface the client consumes: health, submit, a
//! scripted sequence of status snapshots, and artifact bytes for the file
//! and stream endpoints. Each status request consumes the next step of the
//! script; running past the end answers 500 so a poll that should have
//! stopped fails loudly.

// Not every test binary uses every scripted response.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// One scripted answer to a status request.
#[derive(Debug, Clone)]
pub enum StatusStep {
    /// Respond 200 with this raw JSON body.
    Body(String),
    /// Drop the connection without responding (transport failure).
    Hangup,
}

#[derive(Debug, Clone)]
pub struct JobScript {
    /// Body for `GET /api/health`.
    pub health_body: String,
    /// Body for `POST /api/download`.
    pub submit_body: String,
    /// Successive answers for `GET /api/download/{id}/status`.
    pub statuses: Vec<StatusStep>,
    /// Artifact bytes for `/file` and `/stream`.
    pub file_bytes: Vec<u8>,
    /// `Content-Disposition` header on artifact responses, if any.
    pub content_disposition: Option<String>,
}

impl Default for JobScript {
    fn default() -> Self {
        Self {
            health_body: health_ok(),
            submit_body: submit_ok("job123"),
            statuses: Vec::new(),
            file_bytes: b"FAKE MP4 DATA".to_vec(),
            content_disposition: None,
        }
    }
}

pub fn health_ok() -> String {
    r#"{"status":"ok","ytdlp_available":true,"ytdlp_path":"/usr/bin/yt-dlp"}"#.to_string()
}

pub fn health_no_ytdlp() -> String {
    r#"{"status":"ok","ytdlp_available":false,"ytdlp_path":null}"#.to_string()
}

pub fn health_not_ok() -> String {
    r#"{"status":"starting","ytdlp_available":true}"#.to_string()
}

pub fn submit_ok(id: &str) -> String {
    format!(r#"{{"success":true,"downloadId":"{id}"}}"#)
}

pub fn submit_rejected(msg: &str) -> String {
    format!(r#"{{"success":false,"error":"{msg}"}}"#)
}

/// Envelope-wrapped snapshot for a running state.
pub fn status_ok(state: &str, progress: f64) -> StatusStep {
    StatusStep::Body(format!(
        r#"{{"success":true,"data":{{"status":"{state}","progress":{progress},"speed":"","eta":"","filename":null}}}}"#
    ))
}

/// Envelope-wrapped terminal error snapshot.
pub fn status_error(msg: &str) -> StatusStep {
    StatusStep::Body(format!(
        r#"{{"success":true,"data":{{"status":"error","progress":0,"error":"{msg}"}}}}"#
    ))
}

/// Per-endpoint request counters.
#[derive(Debug, Default)]
pub struct Hits {
    pub health: AtomicUsize,
    pub submit: AtomicUsize,
    pub status: AtomicUsize,
    pub file: AtomicUsize,
    pub stream: AtomicUsize,
}

pub struct JobServer {
    /// API root, e.g. `http://127.0.0.1:34211/api`.
    pub base_url: String,
    pub hits: Arc<Hits>,
}

/// Starts the mock in a background thread. Runs until the process exits.
pub fn start(script: JobScript) -> JobServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let script = Arc::new(script);
    let hits = Arc::new(Hits::default());
    let cursor = Arc::new(AtomicUsize::new(0));

    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let script = Arc::clone(&script);
            let hits = Arc::clone(&hits_srv);
            let cursor = Arc::clone(&cursor);
            thread::spawn(move || handle(stream, &script, &hits, &cursor));
        }
    });

    JobServer {
        base_url: format!("http://127.0.0.1:{}/api", port),
        hits,
    }
}

/// An API root nothing listens on (connection refused).
pub fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}

fn handle(mut stream: TcpStream, script: &JobScript, hits: &Hits, cursor: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(5)));

    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");
    let path = path.split('?').next().unwrap_or(path);

    match (method, path) {
        ("GET", "/api/health") => {
            hits.health.fetch_add(1, Ordering::SeqCst);
            respond_json(&mut stream, 200, &script.health_body);
        }
        ("POST", "/api/download") => {
            hits.submit.fetch_add(1, Ordering::SeqCst);
            respond_json(&mut stream, 200, &script.submit_body);
        }
        ("GET", p) if p.starts_with("/api/download/") && p.ends_with("/status") => {
            hits.status.fetch_add(1, Ordering::SeqCst);
            let step = cursor.fetch_add(1, Ordering::SeqCst);
            match script.statuses.get(step) {
                Some(StatusStep::Body(body)) => respond_json(&mut stream, 200, body),
                Some(StatusStep::Hangup) => (), // drop without answering
                None => respond_json(
                    &mut stream,
                    500,
                    r#"{"success":false,"error":"status script exhausted"}"#,
                ),
            }
        }
        ("GET", p) if p.starts_with("/api/download/") && p.ends_with("/file") => {
            hits.file.fetch_add(1, Ordering::SeqCst);
            respond_file(&mut stream, script);
        }
        ("POST", "/api/stream") => {
            hits.stream.fetch_add(1, Ordering::SeqCst);
            respond_file(&mut stream, script);
        }
        _ => respond_json(&mut stream, 404, r#"{"success":false,"error":"Not found"}"#),
    }
}

/// Reads one request: headers plus a `Content-Length` body if present.
fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(header_end) = find_blank_line(&buf) {
            let headers = String::from_utf8_lossy(&buf[..header_end]).into_owned();
            let body_len = content_length(&headers).unwrap_or(0);
            let have = buf.len() - header_end;
            if have >= body_len {
                return Some(String::from_utf8_lossy(&buf).into_owned());
            }
        }
        if buf.len() > 1 << 20 {
            break;
        }
    }
    None
}

fn find_blank_line(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|p| p + 4)
}

fn content_length(headers: &str) -> Option<usize> {
    for line in headers.lines() {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                return value.trim().parse().ok();
            }
        }
    }
    None
}

fn respond_json(stream: &mut TcpStream, code: u32, body: &str) {
    let reason = match code {
        200 => "OK",
        404 => "Not Found",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {code} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
}

fn respond_file(stream: &mut TcpStream, script: &JobScript) {
    let disposition = script
        .content_disposition
        .as_deref()
        .map(|v| format!("Content-Disposition: {v}\r\n"))
        .unwrap_or_default();
    let header = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: video/mp4\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        script.file_bytes.len(),
        disposition
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&script.file_bytes);
}
