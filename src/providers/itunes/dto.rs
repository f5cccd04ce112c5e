//! iTunes Search API Data Transfer Objects
//!
//! These types match what the iTunes Search API returns.
//! DO NOT use these types outside the itunes module - convert to model types
//! via the adapter.
//!
//! API Reference: https://developer.apple.com/library/archive/documentation/AudioVideo/Conceptual/iTuneSearchAPI/

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<TrackResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResult {
    #[serde(default)]
    pub track_id: Option<u64>,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub track_censored_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub artist_id: Option<u64>,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub collection_id: Option<u64>,
    #[serde(default)]
    pub artwork_url100: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub track_time_millis: Option<u64>,
    #[serde(default)]
    pub primary_genre_name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default)]
    pub track_explicitness: Option<String>,
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "resultCount": 1,
            "results": [{
                "trackId": 1440857781,
                "trackName": "Bohemian Rhapsody",
                "trackCensoredName": "Bohemian Rhapsody",
                "artistName": "Queen",
                "artistId": 3296287,
                "collectionName": "A Night at the Opera",
                "collectionId": 1440857681,
                "artworkUrl100": "https://is1-ssl.mzstatic.com/image/thumb/x/100x100bb.jpg",
                "previewUrl": "https://audio-ssl.itunes.apple.com/preview.m4a",
                "trackTimeMillis": 354320,
                "primaryGenreName": "Rock",
                "releaseDate": "1975-10-31T08:00:00Z",
                "trackNumber": 11,
                "trackExplicitness": "notExplicit"
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse response");
        assert_eq!(response.results.len(), 1);

        let track = &response.results[0];
        assert_eq!(track.track_id, Some(1440857781));
        assert_eq!(track.artist_name.as_deref(), Some("Queen"));
        assert_eq!(track.track_time_millis, Some(354320));
    }

    #[test]
    fn test_parse_result_without_preview() {
        let json = r#"{"trackId": 5, "trackName": "No Preview"}"#;
        let track: TrackResult = serde_json::from_str(json).expect("Should parse");
        assert!(track.preview_url.is_none());
    }

    #[test]
    fn test_parse_empty_response() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"resultCount": 0, "results": []}"#).expect("Should parse");
        assert!(response.results.is_empty());
    }
}
