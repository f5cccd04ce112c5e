//! Search aggregation - the public contract of the core.
//!
//! Orchestrates the configured providers in a fixed priority order: the first
//! provider returning a non-empty result wins and nobody later is consulted.
//! Provider attempts are strictly sequential so a keystroke-driven query never
//! hammers every provider at once. Every provider call is isolated - an error
//! in one provider is logged and treated as that provider returning empty.
//!
//! An exhausted search is an empty sequence, not an error; callers must treat
//! empty as "no results".

pub mod cache;
pub mod resolver;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::model::{AlbumRecord, ArtistRecord, SourceTag, StreamRef, TrackRecord};
use crate::providers::domain::ProviderError;
use crate::providers::traits::MusicProvider;
use crate::providers::{
    ITunesClient, InvidiousClient, JamendoClient, LyricsClient, WorkersClient,
};

use cache::{ResultCache, cache_key};
use resolver::StreamResolver;

pub struct SearchAggregator {
    providers: Vec<Arc<dyn MusicProvider>>,
    lyrics: LyricsClient,
    cache: ResultCache,
    resolver: StreamResolver,
}

impl SearchAggregator {
    /// Assemble from an explicit provider list (highest priority first).
    pub fn new(providers: Vec<Arc<dyn MusicProvider>>, lyrics: LyricsClient) -> Self {
        let resolver = StreamResolver::new(providers.clone());
        Self {
            providers,
            lyrics,
            cache: ResultCache::new(),
            resolver,
        }
    }

    /// Build the provider set in the priority order the config names.
    ///
    /// Provider order and the fallback set are configuration: an order that
    /// omits a provider simply leaves it out of the pipeline.
    pub fn from_config(config: &Config) -> Self {
        let providers: Vec<Arc<dyn MusicProvider>> = config
            .search
            .provider_tags()
            .into_iter()
            .map(|tag| -> Arc<dyn MusicProvider> {
                match tag {
                    SourceTag::Youtube => {
                        Arc::new(InvidiousClient::new(config.invidious.instances.clone()))
                    }
                    SourceTag::Jamendo => Arc::new(JamendoClient::new(
                        config.jamendo.api_base.clone(),
                        config.jamendo.client_id.clone(),
                        config.jamendo.relays.clone(),
                    )),
                    SourceTag::Workers => Arc::new(WorkersClient::new(
                        config.workers.endpoint.clone(),
                        config.workers.engines.clone(),
                    )),
                    SourceTag::Itunes => {
                        Arc::new(ITunesClient::new(config.itunes.endpoint.clone()))
                    }
                }
            })
            .collect();

        Self::new(providers, LyricsClient::new(config.lyrics.endpoint.clone()))
    }

    /// Free-text track search across all providers, first non-empty wins.
    pub async fn search(&self, term: &str, limit: usize) -> Arc<Vec<TrackRecord>> {
        let key = cache_key("search", term, limit);
        if let Some(hit) = self.cache.get_tracks(&key) {
            debug!(term, "search cache hit");
            return hit;
        }

        for provider in &self.providers {
            match provider.search(term, limit).await {
                Ok(mut tracks) if !tracks.is_empty() => {
                    tracks.truncate(limit);
                    info!(
                        provider = provider.source().name(),
                        count = tracks.len(),
                        term,
                        "search satisfied"
                    );
                    let value = Arc::new(tracks);
                    self.cache.put_tracks(key, Arc::clone(&value));
                    return value;
                }
                Ok(_) => {
                    debug!(provider = provider.source().name(), term, "provider empty");
                }
                Err(e) => {
                    warn!(provider = provider.source().name(), error = %e, term, "provider failed");
                }
            }
        }

        // All providers exhausted: cache the emptiness so this session never
        // re-queries the same dead end
        let empty = Arc::new(Vec::new());
        self.cache.put_tracks(key, Arc::clone(&empty));
        empty
    }

    /// Structured tag/genre search with a free-text degrade path: when no
    /// tag-capable provider yields anything, the tag text is retried as an
    /// ordinary search term so genre browsing never appears broken.
    pub async fn search_by_tag(&self, tag: &str, limit: usize) -> Arc<Vec<TrackRecord>> {
        let key = cache_key("tag", tag, limit);
        if let Some(hit) = self.cache.get_tracks(&key) {
            return hit;
        }

        for provider in &self.providers {
            match provider.search_by_tag(tag, limit).await {
                Ok(mut tracks) if !tracks.is_empty() => {
                    tracks.truncate(limit);
                    let value = Arc::new(tracks);
                    self.cache.put_tracks(key, Arc::clone(&value));
                    return value;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(provider = provider.source().name(), error = %e, tag, "tag search failed");
                }
            }
        }

        debug!(tag, "tag search empty, degrading to free-text search");
        self.search(tag, limit).await
    }

    /// Alias used by genre browsing surfaces.
    pub async fn get_genre_tracks(&self, genre: &str, limit: usize) -> Arc<Vec<TrackRecord>> {
        self.search_by_tag(genre, limit).await
    }

    pub async fn search_artists(&self, term: &str, limit: usize) -> Arc<Vec<ArtistRecord>> {
        let key = cache_key("artists", term, limit);
        if let Some(hit) = self.cache.get_artists(&key) {
            return hit;
        }

        let mut found = Vec::new();
        for provider in &self.providers {
            match provider.search_artists(term, limit).await {
                Ok(artists) if !artists.is_empty() => {
                    found = artists;
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(provider = provider.source().name(), error = %e, "artist search failed");
                }
            }
        }

        let value = Arc::new(found);
        self.cache.put_artists(key, Arc::clone(&value));
        value
    }

    pub async fn search_albums(&self, term: &str, limit: usize) -> Arc<Vec<AlbumRecord>> {
        let key = cache_key("albums", term, limit);
        if let Some(hit) = self.cache.get_albums(&key) {
            return hit;
        }

        let mut found = Vec::new();
        for provider in &self.providers {
            match provider.search_albums(term, limit).await {
                Ok(albums) if !albums.is_empty() => {
                    found = albums;
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(provider = provider.source().name(), error = %e, "album search failed");
                }
            }
        }

        let value = Arc::new(found);
        self.cache.put_albums(key, Arc::clone(&value));
        value
    }

    pub async fn artist_top_tracks(&self, artist_id: &str, limit: usize) -> Arc<Vec<TrackRecord>> {
        let key = cache_key("artist_tracks", artist_id, limit);
        if let Some(hit) = self.cache.get_tracks(&key) {
            return hit;
        }

        let mut found = Vec::new();
        for provider in &self.providers {
            match provider.artist_top_tracks(artist_id, limit).await {
                Ok(tracks) if !tracks.is_empty() => {
                    found = tracks;
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(provider = provider.source().name(), error = %e, "artist tracks failed");
                }
            }
        }

        let value = Arc::new(found);
        self.cache.put_tracks(key, Arc::clone(&value));
        value
    }

    pub async fn artist_albums(&self, artist_id: &str, limit: usize) -> Arc<Vec<AlbumRecord>> {
        let key = cache_key("artist_albums", artist_id, limit);
        if let Some(hit) = self.cache.get_albums(&key) {
            return hit;
        }

        let mut found = Vec::new();
        for provider in &self.providers {
            match provider.artist_albums(artist_id, limit).await {
                Ok(albums) if !albums.is_empty() => {
                    found = albums;
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(provider = provider.source().name(), error = %e, "artist albums failed");
                }
            }
        }

        let value = Arc::new(found);
        self.cache.put_albums(key, Arc::clone(&value));
        value
    }

    pub async fn album_tracks(&self, album_id: &str) -> Arc<Vec<TrackRecord>> {
        let key = cache_key("album_tracks", album_id, 0);
        if let Some(hit) = self.cache.get_tracks(&key) {
            return hit;
        }

        let mut found = Vec::new();
        for provider in &self.providers {
            match provider.album_tracks(album_id).await {
                Ok(tracks) if !tracks.is_empty() => {
                    found = tracks;
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(provider = provider.source().name(), error = %e, "album tracks failed");
                }
            }
        }

        let value = Arc::new(found);
        self.cache.put_tracks(key, Arc::clone(&value));
        value
    }

    /// Lyrics lookup; failures and misses both surface as `None`.
    pub async fn get_lyrics(&self, artist: &str, title: &str) -> Option<String> {
        let key = cache_key("lyrics", &format!("{artist}/{title}"), 0);
        if let Some(hit) = self.cache.get_lyrics(&key) {
            return hit;
        }

        let lyrics = match self.lyrics.get(artist, title).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, artist, title, "lyrics lookup failed");
                None
            }
        };

        self.cache.put_lyrics(key, lyrics.clone());
        lyrics
    }

    /// Resolve any stream reference into a playable URL.
    pub async fn resolve(&self, stream: &StreamRef) -> Result<String, ProviderError> {
        self.resolver.resolve(stream).await
    }

    /// Resolve a lazy reference by its parts (source tag, native id, mirror
    /// hint) - the shape the playback layer stores.
    pub async fn resolve_stream(
        &self,
        source: SourceTag,
        native_id: &str,
        preferred_mirror: Option<&str>,
    ) -> Result<String, ProviderError> {
        self.resolver
            .resolve_lazy(source, native_id, preferred_mirror)
            .await
    }

    /// Drop every cached result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::traits::mocks::{ScriptedProvider, make_track};

    fn lyrics_stub() -> LyricsClient {
        // Never contacted by these tests
        LyricsClient::new("http://127.0.0.1:1/v1".to_string())
    }

    fn aggregator(providers: Vec<Arc<dyn MusicProvider>>) -> SearchAggregator {
        SearchAggregator::new(providers, lyrics_stub())
    }

    #[tokio::test]
    async fn test_first_non_empty_provider_wins() {
        let first = Arc::new(ScriptedProvider::with_results(
            SourceTag::Youtube,
            vec![make_track(SourceTag::Youtube, 1)],
        ));
        let second = Arc::new(ScriptedProvider::with_results(
            SourceTag::Jamendo,
            vec![make_track(SourceTag::Jamendo, 1)],
        ));
        let agg = aggregator(vec![first.clone(), second.clone()]);

        let results = agg.search("lofi", 10).await;
        assert_eq!(results[0].source, SourceTag::Youtube);
        assert_eq!(first.searches(), 1);
        // Lower-priority provider is never consulted once one succeeds
        assert_eq!(second.searches(), 0);
    }

    #[tokio::test]
    async fn test_fallback_truncates_and_tags_uniformly() {
        let empty = Arc::new(ScriptedProvider::empty(SourceTag::Youtube));
        let full = Arc::new(ScriptedProvider::with_results(
            SourceTag::Jamendo,
            (0..12).map(|n| make_track(SourceTag::Jamendo, n)).collect(),
        ));
        let agg = aggregator(vec![empty, full]);

        let results = agg.search("lofi chill", 8).await;
        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|t| t.source == SourceTag::Jamendo));
    }

    #[tokio::test]
    async fn test_provider_error_is_isolated() {
        let failing = Arc::new(ScriptedProvider::with_error(
            SourceTag::Youtube,
            ProviderError::Unavailable("invidious"),
        ));
        let healthy = Arc::new(ScriptedProvider::with_results(
            SourceTag::Jamendo,
            vec![make_track(SourceTag::Jamendo, 1)],
        ));
        let agg = aggregator(vec![failing, healthy]);

        let results = agg.search("jazz", 5).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, SourceTag::Jamendo);
    }

    #[tokio::test]
    async fn test_repeat_search_is_cached_and_reference_equal() {
        let provider = Arc::new(ScriptedProvider::with_results(
            SourceTag::Jamendo,
            vec![make_track(SourceTag::Jamendo, 1)],
        ));
        let agg = aggregator(vec![provider.clone()]);

        let first = agg.search("jazz", 10).await;
        let second = agg.search("jazz", 10).await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.searches(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_empty_is_cached_too() {
        let provider = Arc::new(ScriptedProvider::empty(SourceTag::Jamendo));
        let agg = aggregator(vec![provider.clone()]);

        assert!(agg.search("nothing here", 10).await.is_empty());
        assert!(agg.search("nothing here", 10).await.is_empty());
        assert_eq!(provider.searches(), 1);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_requery() {
        let provider = Arc::new(ScriptedProvider::with_results(
            SourceTag::Jamendo,
            vec![make_track(SourceTag::Jamendo, 1)],
        ));
        let agg = aggregator(vec![provider.clone()]);

        let _ = agg.search("jazz", 10).await;
        agg.clear_cache();
        let _ = agg.search("jazz", 10).await;
        assert_eq!(provider.searches(), 2);
    }

    #[tokio::test]
    async fn test_tag_search_degrades_to_free_text() {
        // No tag_results scripted, so the structured path is empty and the
        // degrade path must produce exactly what a plain search produces
        let provider = Arc::new(ScriptedProvider::with_results(
            SourceTag::Jamendo,
            vec![make_track(SourceTag::Jamendo, 7)],
        ));
        let agg = aggregator(vec![provider]);

        let tagged = agg.search_by_tag("jazz", 10).await;
        let plain = agg.search("jazz", 10).await;
        assert!(Arc::ptr_eq(&tagged, &plain));
    }

    #[tokio::test]
    async fn test_tag_search_prefers_structured_results() {
        let mut provider = ScriptedProvider::empty(SourceTag::Jamendo);
        provider.tag_results = vec![make_track(SourceTag::Jamendo, 3)];
        let provider = Arc::new(provider);
        let agg = aggregator(vec![provider.clone()]);

        let results = agg.search_by_tag("jazz", 10).await;
        assert_eq!(results.len(), 1);
        // Free-text search never ran
        assert_eq!(provider.searches(), 0);
    }

    #[tokio::test]
    async fn test_resolve_dispatches_to_owning_provider() {
        let mut provider = ScriptedProvider::empty(SourceTag::Youtube);
        provider.stream_url = Some("https://yewtu.be/audio".to_string());
        let agg = aggregator(vec![Arc::new(provider)]);

        let url = agg
            .resolve_stream(SourceTag::Youtube, "abc", Some("https://yewtu.be"))
            .await
            .unwrap();
        assert_eq!(url, "https://yewtu.be/audio");
    }

    #[tokio::test]
    async fn test_from_config_honors_provider_order() {
        let mut config = Config::default();
        config.search.provider_order = vec!["itunes".to_string(), "jamendo".to_string()];

        let agg = SearchAggregator::from_config(&config);
        let order: Vec<SourceTag> = agg.providers.iter().map(|p| p.source()).collect();
        assert_eq!(order, vec![SourceTag::Itunes, SourceTag::Jamendo]);
    }
}
