//! Invidious API Data Transfer Objects
//!
//! These types match what Invidious instances return. Instances run different
//! versions, so everything beyond the video id is optional and defaulted.
//! DO NOT use these types outside the invidious module - convert to model
//! types via the adapter.
//!
//! API Reference: https://docs.invidious.io/api/

use serde::Deserialize;

/// One item from `/api/v1/search?type=video`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub video_id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Channel name; the closest thing to an artist
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub length_seconds: Option<u32>,
    #[serde(default)]
    pub video_thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
}

/// Response from `/api/v1/videos/{id}?fields=adaptiveFormats`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    #[serde(default)]
    pub adaptive_formats: Vec<AdaptiveFormat>,
}

/// One stream format descriptor.
///
/// `bitrate` is a string on current instances but has been a number on older
/// ones; accept either and parse lazily.
#[derive(Debug, Clone, Deserialize)]
pub struct AdaptiveFormat {
    #[serde(rename = "type", default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub bitrate: Option<serde_json::Value>,
}

impl AdaptiveFormat {
    /// True for audio-typed formats (`audio/webm`, `audio/mp4`, ...)
    pub fn is_audio(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|t| t.starts_with("audio/"))
    }

    /// Bitrate in bits/sec, 0 when absent or unparseable
    pub fn bitrate_bps(&self) -> u64 {
        match &self.bitrate {
            Some(serde_json::Value::String(s)) => s.parse().unwrap_or(0),
            Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(0),
            _ => 0,
        }
    }
}
