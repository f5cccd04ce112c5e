//! Adapter layer: convert Jamendo DTOs to model types.
//!
//! Jamendo streams are concrete at normalization time: the full-track MP3 URL
//! is derived from the track id and the registered application key, so no
//! record from this provider ever needs lazy resolution.

use crate::model::{
    AlbumRecord, ArtistRecord, SourceTag, StreamRef, TrackRecord, UNKNOWN_ARTIST, UNKNOWN_TITLE,
};

use super::dto;

/// Album ids get a distinct `ja_` prefix so they never collide with track or
/// artist ids from the same provider.
pub const ALBUM_PREFIX: &str = "ja_";

/// Strip the namespacing prefix from an id handed back by a caller, leaving
/// the provider-native id for request URLs.
pub fn native_id(id: &str) -> &str {
    id.strip_prefix(ALBUM_PREFIX)
        .or_else(|| id.strip_prefix("j_"))
        .unwrap_or(id)
}

/// Full-length MP3 stream URL.
///
/// Built from the track id and the registered client id; the registered key
/// is required for full-length tracks rather than previews.
pub fn stream_url(track_id: &str, client_id: &str) -> String {
    format!("https://mp3l.jamendo.com/?trackid={track_id}&format=mp32&from=app-{client_id}")
}

pub fn to_track(t: dto::Track, client_id: &str) -> TrackRecord {
    let stream = StreamRef::Direct(stream_url(&t.id, client_id));

    let genre = t
        .musicinfo
        .and_then(|mi| mi.tags)
        .and_then(|tags| tags.genres.into_iter().next())
        .unwrap_or_default();

    // Prefer album art for the large slot, track art for the thumbnail
    let album_image = t.album_image.unwrap_or_default();
    let image = t.image.unwrap_or_default();
    let artwork_url = if album_image.is_empty() { image.clone() } else { album_image.clone() };
    let artwork_thumb_url = if image.is_empty() { album_image } else { image };

    TrackRecord {
        id: SourceTag::Jamendo.record_id(&t.id),
        title: non_empty_or(t.name, UNKNOWN_TITLE),
        artist_name: non_empty_or(t.artist_name, UNKNOWN_ARTIST),
        album_name: t.album_name.unwrap_or_default(),
        album_id: t
            .album_id
            .filter(|id| !id.is_empty())
            .map(|id| format!("{ALBUM_PREFIX}{id}"))
            .unwrap_or_default(),
        artwork_url,
        artwork_thumb_url,
        stream,
        duration_seconds: t.duration.unwrap_or(0),
        genre,
        release_date: t.releasedate.unwrap_or_default(),
        track_number: 1,
        artist_id: t
            .artist_id
            .filter(|id| !id.is_empty())
            .map(|id| SourceTag::Jamendo.record_id(&id))
            .unwrap_or_default(),
        source: SourceTag::Jamendo,
        explicit: false,
    }
}

pub fn to_artist(a: dto::Artist) -> ArtistRecord {
    let name = non_empty_or(a.name, UNKNOWN_ARTIST);

    // Jamendo artist images are frequently blank; fall back to a stable
    // placeholder seeded by the artist name
    let artwork_url = match a.image {
        Some(url) if !url.is_empty() => url,
        _ => format!(
            "https://picsum.photos/seed/{}/300/300",
            urlencoding::encode(&name)
        ),
    };

    ArtistRecord {
        id: SourceTag::Jamendo.record_id(&a.id),
        name,
        genre: a.genre.unwrap_or_default(),
        artwork_url,
        joined: a.joindate.unwrap_or_default(),
        source: SourceTag::Jamendo,
    }
}

pub fn to_album(a: dto::Album) -> AlbumRecord {
    let image = a.image.unwrap_or_default();

    AlbumRecord {
        id: format!("{ALBUM_PREFIX}{}", a.id),
        name: non_empty_or(a.name, UNKNOWN_TITLE),
        artist_name: a.artist_name.unwrap_or_default(),
        artist_id: a
            .artist_id
            .filter(|id| !id.is_empty())
            .map(|id| SourceTag::Jamendo.record_id(&id))
            .unwrap_or_default(),
        artwork_url: image.clone(),
        artwork_thumb_url: image,
        track_count: a.tracks_count.unwrap_or(0),
        release_date: a.releasedate.unwrap_or_default(),
        genre: a.genre.unwrap_or_default(),
        source: SourceTag::Jamendo,
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> dto::Track {
        dto::Track {
            id: id.to_string(),
            name: Some("Voyage".to_string()),
            artist_name: Some("Nuage".to_string()),
            artist_id: Some("7".to_string()),
            album_name: Some("Horizons".to_string()),
            album_id: Some("24".to_string()),
            album_image: Some("https://img/album.jpg".to_string()),
            image: Some("https://img/track.jpg".to_string()),
            duration: Some(221),
            releasedate: Some("2023-04-01".to_string()),
            musicinfo: None,
        }
    }

    #[test]
    fn test_stream_url_embeds_registered_key() {
        let url = stream_url("168", "b6747d04");
        assert_eq!(
            url,
            "https://mp3l.jamendo.com/?trackid=168&format=mp32&from=app-b6747d04"
        );
    }

    #[test]
    fn test_track_ids_are_prefixed() {
        let record = to_track(track("168"), "b6747d04");
        assert_eq!(record.id, "j_168");
        assert_eq!(record.album_id, "ja_24");
        assert_eq!(record.artist_id, "j_7");
        assert!(matches!(record.stream, StreamRef::Direct(ref u) if u.contains("trackid=168")));
    }

    #[test]
    fn test_native_id_strips_prefixes() {
        assert_eq!(native_id("j_168"), "168");
        assert_eq!(native_id("ja_24"), "24");
        assert_eq!(native_id("24"), "24");
    }

    #[test]
    fn test_artwork_preference() {
        let record = to_track(track("1"), "key");
        assert_eq!(record.artwork_url, "https://img/album.jpg");
        assert_eq!(record.artwork_thumb_url, "https://img/track.jpg");

        let mut no_album_art = track("1");
        no_album_art.album_image = None;
        let record = to_track(no_album_art, "key");
        assert_eq!(record.artwork_url, "https://img/track.jpg");
    }

    #[test]
    fn test_first_genre_tag_wins() {
        let mut raw = track("1");
        raw.musicinfo = Some(dto::MusicInfo {
            tags: Some(dto::TagBlock {
                genres: vec!["ambient".to_string(), "chillout".to_string()],
            }),
        });
        assert_eq!(to_track(raw, "key").genre, "ambient");
    }

    #[test]
    fn test_artist_placeholder_artwork_is_name_seeded() {
        let artist = to_artist(dto::Artist {
            id: "7".to_string(),
            name: Some("Nuage Rouge".to_string()),
            genre: None,
            image: Some(String::new()),
            joindate: None,
        });
        assert!(artist.artwork_url.contains("picsum.photos/seed/Nuage%20Rouge"));
    }
}
