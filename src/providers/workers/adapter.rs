//! Adapter layer: normalize untyped engine items into track records.

use serde_json::Value;

use crate::model::{SourceTag, StreamRef, TrackRecord, UNKNOWN_ARTIST, UNKNOWN_TITLE};

use super::dto;

/// Normalize one engine item, or discard it.
///
/// A record that can never be played is not surfaced: items without any
/// stream-typed field are dropped here. Ids are namespaced per engine since
/// independent engines assign unrelated native ids.
pub fn to_track(item: &Value, engine: &str) -> Option<TrackRecord> {
    let stream_url = dto::probe_str(item, dto::STREAM_FIELDS)?;

    let title = dto::probe_str(item, dto::TITLE_FIELDS);
    let artist = dto::probe_str(item, dto::ARTIST_FIELDS);

    // Engines without stable ids still get a deterministic one from the
    // (title, artist) pair they do carry
    let native = dto::probe_str(item, dto::ID_FIELDS).unwrap_or_else(|| {
        slug(&format!(
            "{}-{}",
            title.as_deref().unwrap_or("untitled"),
            artist.as_deref().unwrap_or("unknown")
        ))
    });

    Some(TrackRecord {
        id: SourceTag::Workers.record_id(&format!("{engine}_{native}")),
        title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        artist_name: artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        album_name: dto::probe_str(item, dto::ALBUM_FIELDS).unwrap_or_default(),
        album_id: String::new(),
        artwork_url: dto::probe_str(item, dto::ARTWORK_FIELDS).unwrap_or_default(),
        artwork_thumb_url: dto::probe_str(item, dto::THUMB_FIELDS).unwrap_or_default(),
        stream: StreamRef::Direct(stream_url),
        duration_seconds: dto::probe_duration(item),
        genre: String::new(),
        release_date: String::new(),
        track_number: 1,
        artist_id: String::new(),
        source: SourceTag::Workers,
        explicit: false,
    })
}

/// Merge key for cross-engine deduplication.
///
/// Engines assign unrelated ids to the same underlying track, so identity is
/// the case-insensitive (title, artist) pair.
pub fn dedup_key(track: &TrackRecord) -> (String, String) {
    (
        track.title.trim().to_lowercase(),
        track.artist_name.trim().to_lowercase(),
    )
}

fn slug(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_item_without_stream_is_discarded() {
        let item = json!({"title": "Sunrise", "artist": "Ana"});
        assert!(to_track(&item, "soundcloud").is_none());
    }

    #[test]
    fn test_engine_namespaced_id() {
        let item = json!({"id": "991", "title": "Sunrise", "artist": "Ana", "url": "https://cdn/a.mp3"});
        let track = to_track(&item, "soundcloud").unwrap();
        assert_eq!(track.id, "w_soundcloud_991");
        assert_eq!(track.stream, StreamRef::Direct("https://cdn/a.mp3".to_string()));
    }

    #[test]
    fn test_missing_id_derives_deterministic_slug() {
        let item = json!({"title": "Sunrise", "artist": "Ana", "streamUrl": "https://cdn/a.mp3"});
        let a = to_track(&item, "bandcamp").unwrap();
        let b = to_track(&item, "bandcamp").unwrap();
        assert_eq!(a.id, b.id);
        assert!(a.id.starts_with("w_bandcamp_"));
    }

    #[test]
    fn test_dedup_key_is_case_insensitive() {
        let a = to_track(
            &json!({"id": "1", "title": "Sunrise", "artist": "Ana", "url": "https://x/1"}),
            "soundcloud",
        )
        .unwrap();
        let b = to_track(
            &json!({"id": "2", "title": "SUNRISE", "artist": "ana", "url": "https://y/2"}),
            "mixcloud",
        )
        .unwrap();
        assert_eq!(dedup_key(&a), dedup_key(&b));
    }

    proptest! {
        /// The merge key never distinguishes records differing only in case
        /// or surrounding whitespace.
        #[test]
        fn prop_dedup_key_ignores_case_and_padding(title in "[a-zA-Z ]{1,24}", artist in "[a-zA-Z ]{1,16}") {
            let make = |t: &str, a: &str| TrackRecord {
                title: t.to_string(),
                artist_name: a.to_string(),
                ..to_track(
                    &json!({"id": "x", "title": "t", "artist": "a", "url": "https://x"}),
                    "e",
                )
                .unwrap()
            };
            let plain = make(&title, &artist);
            let shouted = make(&format!("  {}  ", title.to_uppercase()), &artist.to_lowercase());
            prop_assert_eq!(dedup_key(&plain), dedup_key(&shouted));
        }
    }
}
