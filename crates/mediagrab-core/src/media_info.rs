//! Media metadata returned by `POST /info`.
//!
//! The server preformats presentation strings (duration, views, estimated
//! size) next to the raw numbers, so the client never reformats anything.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `H:MM:SS` / `M:SS` text.
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub duration_seconds: f64,
    /// Abbreviated view count (`"1.2M"`), `"N/A"` when unknown.
    #[serde(default)]
    pub views: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub uploader: String,
    #[serde(default)]
    pub upload_date: String,
    /// Height strings, best first (`["1080", "720", ...]`).
    #[serde(default)]
    pub available_qualities: Vec<String>,
    #[serde(default)]
    pub max_quality: String,
    #[serde(default)]
    pub estimated_size: String,
    #[serde(default)]
    pub estimated_size_bytes: u64,
    /// Extractor name as yt-dlp reports it.
    #[serde(default)]
    pub platform: String,
    /// Canonical webpage URL; use this for submission, not the pasted one.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_live: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_payload() {
        let info: MediaInfo = serde_json::from_str(
            r#"{
                "id": "dQw4w9WgXcQ",
                "title": "Never Gonna Give You Up",
                "description": "Official video",
                "duration": "3:33",
                "durationSeconds": 213,
                "views": "1.4B",
                "viewCount": 1400000000,
                "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq.jpg",
                "uploader": "Rick Astley",
                "uploadDate": "20091025",
                "availableQualities": ["1080", "720", "360"],
                "maxQuality": "1080",
                "estimatedSize": "213.0 MB",
                "estimatedSizeBytes": 223346688,
                "platform": "youtube",
                "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                "isLive": false
            }"#,
        )
        .unwrap();
        assert_eq!(info.title, "Never Gonna Give You Up");
        assert_eq!(info.max_quality, "1080");
        assert_eq!(info.available_qualities.len(), 3);
        assert_eq!(info.view_count, 1_400_000_000);
        assert!(!info.is_live);
    }

    #[test]
    fn missing_fields_default() {
        let info: MediaInfo = serde_json::from_str(r#"{"title":"clip"}"#).unwrap();
        assert_eq!(info.title, "clip");
        assert_eq!(info.duration_seconds, 0.0);
        assert!(info.available_qualities.is_empty());
    }
}
