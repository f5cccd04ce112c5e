//! Jamendo provider adapter.
//!
//! The broadest capability set in the pipeline: free-text and tag search,
//! artist/album browse, all returning full-length CC-licensed streams built
//! at normalization time from the registered application key (a public,
//! embedded-by-design credential).
//!
//! Transport strategy per request:
//! 1. Callback-wrapped mode (`format=jsonp`) - no third-party relay involved
//! 2. Public CORS relays, tried in configured order
//!
//! Both paths are timeout-bounded; callback handles are released exactly once
//! whatever the outcome (see `transport`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::model::{AlbumRecord, ArtistRecord, SourceTag, TrackRecord};
use crate::providers::domain::ProviderError;
use crate::providers::mirrors::USER_AGENT;
use crate::providers::traits::MusicProvider;

use super::transport::{self, CallbackRegistry};
use super::{adapter, dto};

const PROVIDER: &str = "jamendo";

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(3);
const RELAY_TIMEOUT: Duration = Duration::from_secs(8);

pub struct JamendoClient {
    http: reqwest::Client,
    api_base: String,
    client_id: String,
    relays: Vec<String>,
    callbacks: Arc<CallbackRegistry>,
}

impl JamendoClient {
    pub fn new(api_base: String, client_id: String, relays: Vec<String>) -> Self {
        let http = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            api_base,
            client_id,
            relays,
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Common query prefix: registered key plus the JSON format marker the
    /// callback transport rewrites.
    fn base_query(&self) -> String {
        format!("client_id={}&format=json", self.client_id)
    }

    /// Fetch `results` from a fully-built API URL, callback mode first, then
    /// each relay in order.
    async fn fetch_results<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Vec<T>, ProviderError> {
        match self.fetch_callback::<T>(url).await {
            Ok(results) => return Ok(results),
            Err(reason) => debug!(provider = PROVIDER, %reason, "callback transport failed"),
        }

        for relay in &self.relays {
            let relayed = format!("{relay}{}", urlencoding::encode(url));
            match self.fetch_relay::<T>(&relayed).await {
                Ok(results) => return Ok(results),
                Err(reason) => debug!(provider = PROVIDER, %reason, "relay attempt failed"),
            }
        }

        Err(ProviderError::Unavailable(PROVIDER))
    }

    /// Callback-wrapped attempt. The handle guard releases on every exit path.
    async fn fetch_callback<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, String> {
        let handle = self.callbacks.acquire();
        let wrapped_url = url.replace(
            "format=json",
            &format!("format=jsonp&jsonp={}", handle.name()),
        );

        let body = tokio::time::timeout(CALLBACK_TIMEOUT, async {
            let response = self
                .http
                .get(&wrapped_url)
                .send()
                .await
                .map_err(|e| e.to_string())?;
            if !response.status().is_success() {
                return Err(format!("HTTP {}", response.status()));
            }
            response.text().await.map_err(|e| e.to_string())
        })
        .await
        .map_err(|_| "callback timeout".to_string())??;

        let payload = transport::unwrap_payload(handle.name(), &body)
            .ok_or_else(|| "unexpected callback wrapper".to_string())?;

        let envelope: dto::Envelope<T> =
            serde_json::from_str(payload).map_err(|e| e.to_string())?;
        envelope
            .results
            .ok_or_else(|| "response without results".to_string())
    }

    /// One relay attempt: plain JSON through a public CORS relay.
    async fn fetch_relay<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, String> {
        let envelope = tokio::time::timeout(RELAY_TIMEOUT, async {
            let response = self.http.get(url).send().await.map_err(|e| e.to_string())?;
            if !response.status().is_success() {
                return Err(format!("HTTP {}", response.status()));
            }
            response
                .json::<dto::Envelope<T>>()
                .await
                .map_err(|e| e.to_string())
        })
        .await
        .map_err(|_| "relay timeout".to_string())??;

        envelope
            .results
            .ok_or_else(|| "response without results".to_string())
    }

    async fn fetch_tracks(&self, query: String) -> Result<Vec<TrackRecord>, ProviderError> {
        let url = format!("{}/tracks/?{}&{query}", self.api_base, self.base_query());
        let raw = self.fetch_results::<dto::Track>(&url).await?;
        Ok(raw
            .into_iter()
            .map(|t| adapter::to_track(t, &self.client_id))
            .collect())
    }
}

#[async_trait]
impl MusicProvider for JamendoClient {
    fn source(&self) -> SourceTag {
        SourceTag::Jamendo
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<TrackRecord>, ProviderError> {
        self.fetch_tracks(format!(
            "search={}&limit={limit}&audioformat=mp32&include=musicinfo&order=popularity_total",
            urlencoding::encode(term)
        ))
        .await
    }

    async fn search_by_tag(
        &self,
        tag: &str,
        limit: usize,
    ) -> Result<Vec<TrackRecord>, ProviderError> {
        self.fetch_tracks(format!(
            "tags={}&limit={limit}&audioformat=mp32&include=musicinfo&order=popularity_total",
            urlencoding::encode(tag)
        ))
        .await
    }

    async fn search_artists(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<ArtistRecord>, ProviderError> {
        let url = format!(
            "{}/artists/?{}&namesearch={}&limit={limit}&include=musicinfo",
            self.api_base,
            self.base_query(),
            urlencoding::encode(term)
        );
        let raw = self.fetch_results::<dto::Artist>(&url).await?;
        Ok(raw.into_iter().map(adapter::to_artist).collect())
    }

    async fn search_albums(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<AlbumRecord>, ProviderError> {
        let url = format!(
            "{}/albums/?{}&namesearch={}&limit={limit}",
            self.api_base,
            self.base_query(),
            urlencoding::encode(term)
        );
        let raw = self.fetch_results::<dto::Album>(&url).await?;
        Ok(raw.into_iter().map(adapter::to_album).collect())
    }

    async fn artist_top_tracks(
        &self,
        artist_id: &str,
        limit: usize,
    ) -> Result<Vec<TrackRecord>, ProviderError> {
        self.fetch_tracks(format!(
            "artist_id={}&limit={limit}&audioformat=mp32&include=musicinfo&order=popularity_total",
            urlencoding::encode(adapter::native_id(artist_id))
        ))
        .await
    }

    async fn artist_albums(
        &self,
        artist_id: &str,
        limit: usize,
    ) -> Result<Vec<AlbumRecord>, ProviderError> {
        let url = format!(
            "{}/albums/?{}&artist_id={}&limit={limit}",
            self.api_base,
            self.base_query(),
            urlencoding::encode(adapter::native_id(artist_id))
        );
        let raw = self.fetch_results::<dto::Album>(&url).await?;
        Ok(raw.into_iter().map(adapter::to_album).collect())
    }

    /// Album tracks come back in disc order; renumber sequentially so the
    /// track number is always meaningful to the caller.
    async fn album_tracks(&self, album_id: &str) -> Result<Vec<TrackRecord>, ProviderError> {
        let mut tracks = self
            .fetch_tracks(format!(
                "album_id={}&limit=50&audioformat=mp32&order=track_position",
                urlencoding::encode(adapter::native_id(album_id))
            ))
            .await?;

        for (i, track) in tracks.iter_mut().enumerate() {
            track.track_number = (i + 1) as u32;
        }
        Ok(tracks)
    }

    /// Stream URLs are a pure construction from the track id and the
    /// registered key; no network round trip is involved.
    async fn resolve_stream(
        &self,
        native_id: &str,
        _preferred_mirror: Option<&str>,
    ) -> Result<String, ProviderError> {
        Ok(adapter::stream_url(
            adapter::native_id(native_id),
            &self.client_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> JamendoClient {
        JamendoClient::new(
            "https://api.jamendo.com/v3.0".to_string(),
            "b6747d04".to_string(),
            vec![],
        )
    }

    #[test]
    fn test_base_query_carries_registered_key() {
        assert_eq!(client().base_query(), "client_id=b6747d04&format=json");
    }

    #[test]
    fn test_callback_url_rewrite() {
        // The transport rewrites the format marker in place; everything else
        // in the query survives untouched.
        let url = "https://api.jamendo.com/v3.0/tracks/?client_id=k&format=json&search=jazz";
        let rewritten = url.replace("format=json", "format=jsonp&jsonp=_ss_0_1");
        assert_eq!(
            rewritten,
            "https://api.jamendo.com/v3.0/tracks/?client_id=k&format=jsonp&jsonp=_ss_0_1&search=jazz"
        );
    }

    #[tokio::test]
    async fn test_resolve_stream_is_offline_construction() {
        let url = client().resolve_stream("j_168", None).await.unwrap();
        assert_eq!(
            url,
            "https://mp3l.jamendo.com/?trackid=168&format=mp32&from=app-b6747d04"
        );
    }

    #[tokio::test]
    async fn test_no_relays_and_dead_callback_is_unavailable() {
        // Unroutable base plus an empty relay list exhausts both strategies
        let client = JamendoClient::new(
            "http://127.0.0.1:1/v3.0".to_string(),
            "k".to_string(),
            vec![],
        );
        let result = client.search("jazz", 5).await;
        assert!(matches!(result, Err(ProviderError::Unavailable("jamendo"))));
    }

    #[tokio::test]
    async fn test_callback_handles_do_not_leak_on_failure() {
        let client = JamendoClient::new(
            "http://127.0.0.1:1/v3.0".to_string(),
            "k".to_string(),
            vec![],
        );
        let _ = client.search("jazz", 5).await;
        assert_eq!(client.callbacks.live_count(), 0);
    }
}
