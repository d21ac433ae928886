//! Artifact filename derivation.
//!
//! The job runner names the artifact through `Content-Disposition`; a
//! missing or unusable header yields a fixed default. Results are
//! sanitized for Linux filesystems before touching disk.

mod content_disposition;
mod sanitize;

pub use content_disposition::filename_from_header;
pub use sanitize::sanitize_filename;

/// Used when the header is absent or yields nothing usable.
pub const DEFAULT_ARTIFACT_NAME: &str = "video.mp4";

/// Derives the local filename for a downloaded artifact.
pub fn artifact_filename(content_disposition: Option<&str>) -> String {
    let candidate = content_disposition
        .and_then(filename_from_header)
        .map(|name| sanitize_filename(&name));

    match candidate {
        Some(name) if !name.is_empty() && name != "." && name != ".." => name,
        _ => DEFAULT_ARTIFACT_NAME.to_string(),
    }
}
