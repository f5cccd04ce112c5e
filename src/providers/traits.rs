//! Provider capability trait.
//!
//! Not every provider implements every capability - the metadata-only catalog
//! cannot resolve streams and the video-hosting mirrors have no album concept.
//! Defaulted methods return empty so adapters only implement what their
//! provider actually supports. The trait also enables mock providers for
//! aggregator tests.

use async_trait::async_trait;

use crate::model::{AlbumRecord, ArtistRecord, SourceTag, TrackRecord};
use crate::providers::domain::ProviderError;

/// One external source of searchable/playable music.
///
/// A total search failure inside an adapter surfaces as `Ok(vec![])` where the
/// adapter can degrade internally, or as an error the aggregator swallows -
/// emptiness is the expected "try next provider" signal, not an exceptional
/// one.
#[async_trait]
pub trait MusicProvider: Send + Sync {
    /// Which provider this adapter fronts
    fn source(&self) -> SourceTag;

    /// Free-text track search
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<TrackRecord>, ProviderError>;

    /// Structured tag/genre search (catalog providers only)
    async fn search_by_tag(
        &self,
        _tag: &str,
        _limit: usize,
    ) -> Result<Vec<TrackRecord>, ProviderError> {
        Ok(Vec::new())
    }

    async fn search_artists(
        &self,
        _term: &str,
        _limit: usize,
    ) -> Result<Vec<ArtistRecord>, ProviderError> {
        Ok(Vec::new())
    }

    async fn search_albums(
        &self,
        _term: &str,
        _limit: usize,
    ) -> Result<Vec<AlbumRecord>, ProviderError> {
        Ok(Vec::new())
    }

    async fn artist_top_tracks(
        &self,
        _artist_id: &str,
        _limit: usize,
    ) -> Result<Vec<TrackRecord>, ProviderError> {
        Ok(Vec::new())
    }

    async fn artist_albums(
        &self,
        _artist_id: &str,
        _limit: usize,
    ) -> Result<Vec<AlbumRecord>, ProviderError> {
        Ok(Vec::new())
    }

    async fn album_tracks(&self, _album_id: &str) -> Result<Vec<TrackRecord>, ProviderError> {
        Ok(Vec::new())
    }

    /// Resolve a lazy stream reference into a playable URL.
    ///
    /// Only meaningful for providers whose search results carry lazy
    /// references; everyone else rejects with `StreamUnavailable`.
    async fn resolve_stream(
        &self,
        _native_id: &str,
        _preferred_mirror: Option<&str>,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::StreamUnavailable(self.source().name()))
    }
}
