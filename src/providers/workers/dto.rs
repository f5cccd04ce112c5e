//! Aggregator-workers response handling.
//!
//! The workers endpoint fronts several independent search engines behind one
//! URL. Engines disagree on everything: some wrap items in `{"results": []}`,
//! some return a bare array, and each names the same concept differently.
//! Items therefore stay untyped (`serde_json::Value`) and the adapter probes
//! ordered field-alias tables per concept - this is inherent to uncontrolled
//! third-party schemas, not something to normalize away upstream.

use serde_json::Value;

/// Ordered aliases probed for each concept; first present, non-empty wins.
pub const ID_FIELDS: &[&str] = &["id", "trackId", "track_id", "videoId"];
pub const TITLE_FIELDS: &[&str] = &["title", "trackName", "name"];
pub const ARTIST_FIELDS: &[&str] = &["artist", "artistName", "author", "uploader", "channel"];
pub const ALBUM_FIELDS: &[&str] = &["album", "albumName", "collectionName"];
pub const STREAM_FIELDS: &[&str] = &["streamUrl", "stream_url", "url", "audioUrl", "previewUrl"];
pub const ARTWORK_FIELDS: &[&str] = &["artworkUrl", "artwork", "thumbnail", "image"];
pub const THUMB_FIELDS: &[&str] = &["artworkSmall", "thumbnailSmall", "thumbnail", "image"];
pub const DURATION_FIELDS: &[&str] = &["duration", "durationSeconds", "lengthSeconds"];

/// Items from a response body that is either a bare array or an object with a
/// `results`/`items`/`tracks` array.
pub fn extract_items(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => ["results", "items", "tracks"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// First present, non-empty string among the aliased fields.
pub fn probe_str(item: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match item.get(*field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// First parseable duration among the aliased fields, in whole seconds.
pub fn probe_duration(item: &Value) -> u32 {
    DURATION_FIELDS
        .iter()
        .find_map(|field| match item.get(*field) {
            Some(Value::Number(n)) => n.as_u64().map(|v| v as u32),
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_items_bare_array_and_envelope() {
        assert_eq!(extract_items(json!([{"id": 1}])).len(), 1);
        assert_eq!(extract_items(json!({"results": [{"id": 1}, {"id": 2}]})).len(), 2);
        assert_eq!(extract_items(json!({"items": [{"id": 1}]})).len(), 1);
        assert!(extract_items(json!({"error": "nope"})).is_empty());
        assert!(extract_items(json!("scalar")).is_empty());
    }

    #[test]
    fn test_probe_takes_first_present_alias() {
        let item = json!({"trackName": "Sunrise", "name": "ignored"});
        assert_eq!(probe_str(&item, TITLE_FIELDS).as_deref(), Some("Sunrise"));
    }

    #[test]
    fn test_probe_skips_empty_values() {
        let item = json!({"title": "  ", "name": "Sunrise"});
        assert_eq!(probe_str(&item, TITLE_FIELDS).as_deref(), Some("Sunrise"));
    }

    #[test]
    fn test_probe_stringifies_numeric_ids() {
        let item = json!({"id": 4217});
        assert_eq!(probe_str(&item, ID_FIELDS).as_deref(), Some("4217"));
    }

    #[test]
    fn test_probe_duration_accepts_number_or_string() {
        assert_eq!(probe_duration(&json!({"duration": 245})), 245);
        assert_eq!(probe_duration(&json!({"lengthSeconds": "212"})), 212);
        assert_eq!(probe_duration(&json!({})), 0);
    }
}
