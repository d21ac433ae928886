//! Source platform identification.
//!
//! Only what the job runner needs to route an URL: a platform name for the
//! `/info` request, detected from the URL host. Content-type rules, username
//! lookups and the like stay on the server side.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    YouTube,
    Instagram,
    Facebook,
    WhatsApp,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::WhatsApp => "whatsapp",
        }
    }

    /// Detects the platform from an URL host. WhatsApp status media has no
    /// shareable URL form, so it is never detected here.
    pub fn detect(url: &str) -> Option<Platform> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_ascii_lowercase();
        let host = host
            .strip_prefix("www.")
            .or_else(|| host.strip_prefix("m."))
            .unwrap_or(&host);

        let matches_domain = |domain: &str| host == domain || host.ends_with(&format!(".{domain}"));

        if matches_domain("youtube.com") || host == "youtu.be" {
            Some(Platform::YouTube)
        } else if matches_domain("instagram.com") {
            Some(Platform::Instagram)
        } else if matches_domain("facebook.com") || host == "fb.watch" {
            Some(Platform::Facebook)
        } else {
            None
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown platform `{0}` (expected youtube, instagram, facebook or whatsapp)")]
pub struct PlatformParseError(String);

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "youtube" => Ok(Platform::YouTube),
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            "whatsapp" => Ok(Platform::WhatsApp),
            other => Err(PlatformParseError(other.to_string())),
        }
    }
}
