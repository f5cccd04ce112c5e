//! Session-scoped result cache.
//!
//! Memoizes (operation, normalized query, limit) to the result sequence for
//! the lifetime of the process. No eviction - the working set is small and
//! per-session - and confirmed-empty results are cached too, so a query a
//! session has already exhausted never re-contacts providers. Results are
//! shared via `Arc`, so a cache hit hands back the same allocation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::model::{AlbumRecord, ArtistRecord, TrackRecord};

/// Deterministic cache key: operation name plus normalized arguments.
pub fn cache_key(op: &str, term: &str, limit: usize) -> String {
    format!("{op}:{}:{limit}", term.trim().to_lowercase())
}

#[derive(Default)]
struct Inner {
    tracks: HashMap<String, Arc<Vec<TrackRecord>>>,
    artists: HashMap<String, Arc<Vec<ArtistRecord>>>,
    albums: HashMap<String, Arc<Vec<AlbumRecord>>>,
    /// `None` is the "confirmed absent" sentinel, distinct from an uncached key
    lyrics: HashMap<String, Option<String>>,
}

/// The only mutable shared state in the aggregation core.
#[derive(Default)]
pub struct ResultCache {
    inner: Mutex<Inner>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_tracks(&self, key: &str) -> Option<Arc<Vec<TrackRecord>>> {
        self.lock().tracks.get(key).cloned()
    }

    pub fn put_tracks(&self, key: String, value: Arc<Vec<TrackRecord>>) {
        self.lock().tracks.insert(key, value);
    }

    pub fn get_artists(&self, key: &str) -> Option<Arc<Vec<ArtistRecord>>> {
        self.lock().artists.get(key).cloned()
    }

    pub fn put_artists(&self, key: String, value: Arc<Vec<ArtistRecord>>) {
        self.lock().artists.insert(key, value);
    }

    pub fn get_albums(&self, key: &str) -> Option<Arc<Vec<AlbumRecord>>> {
        self.lock().albums.get(key).cloned()
    }

    pub fn put_albums(&self, key: String, value: Arc<Vec<AlbumRecord>>) {
        self.lock().albums.insert(key, value);
    }

    /// Outer `None` = never looked up; inner `None` = looked up, no lyrics
    pub fn get_lyrics(&self, key: &str) -> Option<Option<String>> {
        self.lock().lyrics.get(key).cloned()
    }

    pub fn put_lyrics(&self, key: String, value: Option<String>) {
        self.lock().lyrics.insert(key, value);
    }

    /// Full reset, exposed to configuration/debug surfaces.
    pub fn clear(&self) {
        *self.lock() = Inner::default();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Writes are idempotent; a poisoned lock can't leave torn state
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalizes_term() {
        assert_eq!(cache_key("search", "  LoFi Chill ", 8), "search:lofi chill:8");
        assert_eq!(
            cache_key("search", "lofi chill", 8),
            cache_key("search", "LOFI CHILL", 8)
        );
    }

    #[test]
    fn test_key_separates_operations_and_limits() {
        assert_ne!(cache_key("search", "jazz", 10), cache_key("tag", "jazz", 10));
        assert_ne!(cache_key("search", "jazz", 10), cache_key("search", "jazz", 25));
    }

    #[test]
    fn test_hit_returns_same_allocation() {
        let cache = ResultCache::new();
        let value = Arc::new(Vec::new());
        cache.put_tracks("search:jazz:10".to_string(), Arc::clone(&value));

        let hit = cache.get_tracks("search:jazz:10").unwrap();
        assert!(Arc::ptr_eq(&hit, &value));
    }

    #[test]
    fn test_lyrics_none_sentinel_is_a_hit() {
        let cache = ResultCache::new();
        assert!(cache.get_lyrics("lyrics:ana:sunrise:0").is_none());

        cache.put_lyrics("lyrics:ana:sunrise:0".to_string(), None);
        assert_eq!(cache.get_lyrics("lyrics:ana:sunrise:0"), Some(None));
    }

    #[test]
    fn test_clear_empties_every_map() {
        let cache = ResultCache::new();
        cache.put_tracks("a".to_string(), Arc::new(Vec::new()));
        cache.put_lyrics("b".to_string(), Some("la la".to_string()));

        cache.clear();
        assert!(cache.get_tracks("a").is_none());
        assert!(cache.get_lyrics("b").is_none());
    }
}
