//! Adapter layer: convert Invidious DTOs to model types.
//!
//! Search results carry no playable URL - streams live behind the per-video
//! metadata endpoint, so every record gets a lazy reference holding the
//! native video id and the mirror that served the search.

use crate::model::{SourceTag, StreamRef, TrackRecord, UNKNOWN_ARTIST, UNKNOWN_TITLE};

use super::dto;

/// Convert one search item into a track record.
///
/// `mirror` is the instance that served the search response; it becomes the
/// preferred mirror for later stream resolution.
pub fn to_track(item: dto::SearchItem, mirror: &str) -> TrackRecord {
    let video_id = item.video_id;

    // Standard YouTube thumbnail hosts work regardless of instance health
    let artwork_url = item
        .video_thumbnails
        .iter()
        .find_map(|t| t.url.clone().filter(|u| !u.is_empty()))
        .unwrap_or_else(|| format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg"));
    let artwork_thumb_url = format!("https://i.ytimg.com/vi/{video_id}/default.jpg");

    TrackRecord {
        id: SourceTag::Youtube.record_id(&video_id),
        title: non_empty_or(item.title, UNKNOWN_TITLE),
        artist_name: non_empty_or(item.author, UNKNOWN_ARTIST),
        album_name: String::new(),
        album_id: String::new(),
        artwork_url,
        artwork_thumb_url,
        stream: StreamRef::Lazy {
            source: SourceTag::Youtube,
            native_id: video_id,
            preferred_mirror: Some(mirror.to_string()),
        },
        duration_seconds: item.length_seconds.unwrap_or(0),
        genre: String::new(),
        release_date: String::new(),
        track_number: 1,
        artist_id: String::new(),
        source: SourceTag::Youtube,
        explicit: false,
    }
}

/// Pick the playable audio format for one mirror's response.
///
/// Formats whose URL already targets the mirror's own host are proxied by the
/// instance and avoid IP-bound/cross-host failures, so they are preferred over
/// higher-bitrate direct URLs. Within the chosen pool the highest bitrate
/// wins.
pub fn select_audio_format<'a>(
    formats: &'a [dto::AdaptiveFormat],
    mirror_host: &str,
) -> Option<&'a dto::AdaptiveFormat> {
    let audio: Vec<&dto::AdaptiveFormat> = formats
        .iter()
        .filter(|f| f.is_audio() && f.url.as_deref().is_some_and(|u| !u.is_empty()))
        .collect();

    let proxied: Vec<&dto::AdaptiveFormat> = audio
        .iter()
        .copied()
        .filter(|f| {
            !mirror_host.is_empty() && f.url.as_deref().is_some_and(|u| u.contains(mirror_host))
        })
        .collect();

    let pool = if proxied.is_empty() { audio } else { proxied };
    pool.into_iter().max_by_key(|f| f.bitrate_bps())
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}
