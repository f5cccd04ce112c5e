//! iTunes Search provider adapter.
//!
//! Metadata-only fallback at the bottom of the priority order. No key, no
//! mirrors, a single well-behaved endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::model::{SourceTag, TrackRecord};
use crate::providers::domain::ProviderError;
use crate::providers::mirrors::USER_AGENT;
use crate::providers::traits::MusicProvider;

use super::{adapter, dto};

const PROVIDER: &str = "itunes";

const SEARCH_TIMEOUT: Duration = Duration::from_secs(8);

pub struct ITunesClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ITunesClient {
    pub fn new(endpoint: String) -> Self {
        let http = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { http, endpoint }
    }
}

#[async_trait]
impl MusicProvider for ITunesClient {
    fn source(&self) -> SourceTag {
        SourceTag::Itunes
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<TrackRecord>, ProviderError> {
        let url = format!(
            "{}?term={}&media=music&entity=song&limit={limit}",
            self.endpoint,
            urlencoding::encode(term)
        );

        let response = tokio::time::timeout(SEARCH_TIMEOUT, self.http.get(&url).send())
            .await
            .map_err(|_| ProviderError::Unavailable(PROVIDER))?
            .map_err(|_| ProviderError::Unavailable(PROVIDER))?;

        if !response.status().is_success() {
            return Err(ProviderError::Unavailable(PROVIDER));
        }

        let body = response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| ProviderError::Malformed(PROVIDER, e.to_string()))?;

        let tracks: Vec<TrackRecord> = body
            .results
            .into_iter()
            .filter_map(adapter::to_track)
            .take(limit)
            .collect();

        debug!(count = tracks.len(), "itunes search results");
        Ok(tracks)
    }
}
