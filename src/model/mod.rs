//! Canonical result types produced by the provider layer.
//!
//! These types are OUR types - they don't change when external APIs change.
//! Every provider response gets converted into them via adapters, and nothing
//! downstream needs to know which provider produced a record except to resolve
//! a lazy stream reference at playback time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel title for providers that omit one. Never surface an empty title.
pub const UNKNOWN_TITLE: &str = "Unknown title";

/// Sentinel artist for providers that omit one.
pub const UNKNOWN_ARTIST: &str = "Unknown artist";

/// Origin provider of a record.
///
/// Drives UI badges and stream-resolution routing. The string form is used in
/// config files (provider priority order) and in namespaced record ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    /// Video-hosting mirrors (Invidious instances), lazy streams
    Youtube,
    /// Free-music catalog (Jamendo), direct full-track streams
    Jamendo,
    /// Multi-engine aggregator workers, direct streams
    Workers,
    /// Metadata-only catalog (iTunes Search), 30s previews
    Itunes,
}

impl SourceTag {
    /// Stable name used in config files and CLI arguments
    pub fn name(self) -> &'static str {
        match self {
            SourceTag::Youtube => "youtube",
            SourceTag::Jamendo => "jamendo",
            SourceTag::Workers => "workers",
            SourceTag::Itunes => "itunes",
        }
    }

    /// Id prefix that namespaces native ids to prevent cross-provider collisions
    pub fn id_prefix(self) -> &'static str {
        match self {
            SourceTag::Youtube => "iv",
            SourceTag::Jamendo => "j",
            SourceTag::Workers => "w",
            SourceTag::Itunes => "i",
        }
    }

    /// Build a namespaced record id from a native provider id
    pub fn record_id(self, native_id: &str) -> String {
        format!("{}_{}", self.id_prefix(), native_id)
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" | "invidious" => Ok(SourceTag::Youtube),
            "jamendo" => Ok(SourceTag::Jamendo),
            "workers" | "aggregator" => Ok(SourceTag::Workers),
            "itunes" => Ok(SourceTag::Itunes),
            other => Err(format!("unknown provider tag '{other}'")),
        }
    }
}

/// Reference to a track's playable audio.
///
/// Exactly one shape is populated at normalization time: either the provider
/// embedded a concrete URL in its search response, or playback must resolve
/// the native id against the owning provider first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamRef {
    /// Immediately playable URL
    Direct(String),
    /// Opaque reference resolved only when playback starts
    Lazy {
        source: SourceTag,
        native_id: String,
        /// Mirror that served the search result; tried first at resolution
        preferred_mirror: Option<String>,
    },
}

impl StreamRef {
    pub fn is_lazy(&self) -> bool {
        matches!(self, StreamRef::Lazy { .. })
    }
}

/// One normalized, fully self-describing track.
///
/// Created by a provider adapter from one raw response item and immutable
/// thereafter; the aggregation layer never mutates records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Globally unique id, namespaced by provider prefix
    pub id: String,
    pub title: String,
    pub artist_name: String,
    /// Empty when the provider has no album concept
    pub album_name: String,
    pub album_id: String,
    pub artwork_url: String,
    pub artwork_thumb_url: String,
    pub stream: StreamRef,
    /// 0 means unknown
    pub duration_seconds: u32,
    pub genre: String,
    pub release_date: String,
    pub track_number: u32,
    /// Empty when the provider has no artist identity concept
    pub artist_id: String,
    pub source: SourceTag,
    pub explicit: bool,
}

/// Artist search result (catalog providers only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub artwork_url: String,
    pub joined: String,
    pub source: SourceTag,
}

/// Album search result (catalog providers only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRecord {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub artist_id: String,
    pub artwork_url: String,
    pub artwork_thumb_url: String,
    pub track_count: u32,
    pub release_date: String,
    pub genre: String,
    pub source: SourceTag,
}

/// Format a duration in seconds as `m:ss` for display.
pub fn format_duration(seconds: u32) -> String {
    if seconds == 0 {
        return "0:00".to_string();
    }
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
