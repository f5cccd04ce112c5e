//! Jamendo API v3 Data Transfer Objects
//!
//! These types match what the Jamendo API returns (ids arrive as strings).
//! DO NOT use these types outside the jamendo module - convert to model types
//! via the adapter.
//!
//! API Reference: https://developer.jamendo.com/v3.0

use serde::Deserialize;

/// Top-level response wrapper: `{"headers": ..., "results": [...]}`
///
/// `results` stays an `Option` so transports can tell "shape is wrong" apart
/// from "legitimately zero results".
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub results: Option<Vec<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub album_id: Option<String>,
    #[serde(default)]
    pub album_image: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub releasedate: Option<String>,
    #[serde(default)]
    pub musicinfo: Option<MusicInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MusicInfo {
    #[serde(default)]
    pub tags: Option<TagBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagBlock {
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub joindate: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tracks_count: Option<u32>,
    #[serde(default)]
    pub releasedate: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_track_with_musicinfo() {
        let json = r#"{
            "id": "168",
            "name": "Voyage",
            "artist_name": "Nuage",
            "artist_id": "7",
            "album_name": "Horizons",
            "album_id": "24",
            "album_image": "https://usercontent.jamendo.com/album/24/cover.jpg",
            "image": "https://usercontent.jamendo.com/track/168/cover.jpg",
            "duration": 221,
            "releasedate": "2023-04-01",
            "musicinfo": {"tags": {"genres": ["ambient", "chillout"]}}
        }"#;

        let track: Track = serde_json::from_str(json).expect("Should parse track");
        assert_eq!(track.id, "168");
        assert_eq!(track.duration, Some(221));
        let genres = track.musicinfo.unwrap().tags.unwrap().genres;
        assert_eq!(genres[0], "ambient");
    }

    #[test]
    fn test_parse_minimal_track() {
        let json = r#"{"id": "9"}"#;
        let track: Track = serde_json::from_str(json).expect("Should parse minimal track");
        assert_eq!(track.id, "9");
        assert!(track.name.is_none());
        assert!(track.musicinfo.is_none());
    }

    #[test]
    fn test_envelope_distinguishes_missing_results() {
        let with: Envelope<Track> =
            serde_json::from_str(r#"{"headers": {}, "results": []}"#).expect("Should parse");
        assert_eq!(with.results.as_deref().map(<[Track]>::len), Some(0));

        let without: Envelope<Track> =
            serde_json::from_str(r#"{"error": "rate limited"}"#).expect("Should parse");
        assert!(without.results.is_none());
    }

    #[test]
    fn test_parse_artist_and_album() {
        let artist: Artist = serde_json::from_str(
            r#"{"id": "7", "name": "Nuage", "joindate": "2019-02-12", "image": ""}"#,
        )
        .expect("Should parse artist");
        assert_eq!(artist.name.as_deref(), Some("Nuage"));

        let album: Album = serde_json::from_str(
            r#"{"id": "24", "name": "Horizons", "artist_name": "Nuage", "artist_id": "7", "tracks_count": 11}"#,
        )
        .expect("Should parse album");
        assert_eq!(album.tracks_count, Some(11));
    }
}
