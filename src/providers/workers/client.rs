//! Aggregator-workers provider adapter.
//!
//! One umbrella endpoint fans out to several independent search engines. All
//! engines are queried concurrently with a per-engine timeout and a fixed
//! join point: the merge waits for every sub-query to settle, so a slow or
//! dead engine can neither block faster ones from contributing nor abort the
//! merge. Settled successes are merged and deduplicated by case-insensitive
//! (title, artist).

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::debug;

use crate::model::{SourceTag, TrackRecord};
use crate::providers::domain::ProviderError;
use crate::providers::mirrors::USER_AGENT;
use crate::providers::traits::MusicProvider;

use super::{adapter, dto};

const PROVIDER: &str = "workers";

const ENGINE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct WorkersClient {
    http: reqwest::Client,
    endpoint: String,
    engines: Vec<String>,
}

impl WorkersClient {
    pub fn new(endpoint: String, engines: Vec<String>) -> Self {
        let http = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            endpoint,
            engines,
        }
    }

    /// One engine sub-query; failures collapse to an empty contribution.
    async fn query_engine(&self, engine: &str, term: &str, limit: usize) -> Vec<TrackRecord> {
        let url = format!(
            "{}/search?engine={}&q={}&limit={limit}&format=audio",
            self.endpoint,
            urlencoding::encode(engine),
            urlencoding::encode(term)
        );

        let body = tokio::time::timeout(ENGINE_TIMEOUT, async {
            let response = self.http.get(&url).send().await.ok()?;
            if !response.status().is_success() {
                return None;
            }
            response.json::<serde_json::Value>().await.ok()
        })
        .await
        .ok()
        .flatten();

        let Some(body) = body else {
            debug!(provider = PROVIDER, engine, "engine contributed nothing");
            return Vec::new();
        };

        dto::extract_items(body)
            .iter()
            .filter_map(|item| adapter::to_track(item, engine))
            .collect()
    }
}

/// Merge settled engine results, first occurrence of each (title, artist) wins.
pub fn merge_engine_results(batches: Vec<Vec<TrackRecord>>, limit: usize) -> Vec<TrackRecord> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for track in batches.into_iter().flatten() {
        if seen.insert(adapter::dedup_key(&track)) {
            merged.push(track);
            if merged.len() == limit {
                break;
            }
        }
    }

    merged
}

#[async_trait]
impl MusicProvider for WorkersClient {
    fn source(&self) -> SourceTag {
        SourceTag::Workers
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<TrackRecord>, ProviderError> {
        let batches = join_all(
            self.engines
                .iter()
                .map(|engine| self.query_engine(engine, term, limit)),
        )
        .await;

        Ok(merge_engine_results(batches, limit))
    }
}
