//! Adapter layer: convert iTunes DTOs to model types.
//!
//! The lowest-fidelity source in the pipeline: 30-second previews only, but
//! rich metadata. Items without a preview URL can never be played and are
//! discarded rather than surfaced.

use crate::model::{SourceTag, StreamRef, TrackRecord, UNKNOWN_ARTIST, UNKNOWN_TITLE};

use super::dto;

/// Preview clips are 30 seconds when the API omits a duration
const PREVIEW_SECONDS: u32 = 30;

pub fn to_track(t: dto::TrackResult) -> Option<TrackRecord> {
    let preview_url = t.preview_url.filter(|u| !u.is_empty())?;

    let native_id = match t.track_id {
        Some(id) => id.to_string(),
        // Rare catalog rows without a track id; the censored name is stable
        None => t.track_censored_name.clone().unwrap_or_default(),
    };
    if native_id.is_empty() {
        return None;
    }

    let artwork_small = t.artwork_url100.unwrap_or_default();
    // The 100px thumb URL doubles as the large slot by swapping the size spec
    let artwork_url = artwork_small.replace("100x100bb", "600x600bb");

    let title = t
        .track_name
        .or(t.track_censored_name)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    Some(TrackRecord {
        id: SourceTag::Itunes.record_id(&native_id),
        title,
        artist_name: t
            .artist_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        album_name: t.collection_name.unwrap_or_default(),
        album_id: t
            .collection_id
            .map(|id| SourceTag::Itunes.record_id(&id.to_string()))
            .unwrap_or_default(),
        artwork_url,
        artwork_thumb_url: artwork_small,
        stream: StreamRef::Direct(preview_url),
        duration_seconds: t
            .track_time_millis
            .map(|ms| ((ms as f64) / 1000.0).round() as u32)
            .unwrap_or(PREVIEW_SECONDS),
        genre: t.primary_genre_name.unwrap_or_default(),
        release_date: t.release_date.unwrap_or_default(),
        track_number: t.track_number.unwrap_or(1),
        artist_id: t
            .artist_id
            .map(|id| SourceTag::Itunes.record_id(&id.to_string()))
            .unwrap_or_default(),
        source: SourceTag::Itunes,
        explicit: t.track_explicitness.as_deref() == Some("explicit"),
    })
}
