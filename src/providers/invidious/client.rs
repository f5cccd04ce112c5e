//! Invidious provider adapter.
//!
//! Searches YouTube through community-run Invidious instances. Search results
//! are normalized with lazy stream references; the actual audio URL is only
//! discoverable through the per-video metadata endpoint, which is queried at
//! playback time via `resolve_stream`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::model::{SourceTag, TrackRecord};
use crate::providers::domain::ProviderError;
use crate::providers::mirrors::MirrorPool;
use crate::providers::traits::MusicProvider;

use super::{adapter, dto};

const PROVIDER: &str = "invidious";

/// Fields requested from the search endpoint; keeps responses small
const SEARCH_FIELDS: &str = "videoId,title,author,lengthSeconds,videoThumbnails";

const SEARCH_TIMEOUT: Duration = Duration::from_secs(5);
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(8);

pub struct InvidiousClient {
    pool: MirrorPool,
}

impl InvidiousClient {
    pub fn new(instances: Vec<String>) -> Self {
        Self {
            pool: MirrorPool::new(PROVIDER, instances),
        }
    }

    /// Resolve one mirror's video response into a playable audio URL
    async fn resolve_on_mirror(&self, base: &str, video_id: &str) -> Option<String> {
        let path = format!(
            "/api/v1/videos/{}?fields=adaptiveFormats",
            urlencoding::encode(video_id)
        );

        // Single-mirror pool so the same-host preference is computed against
        // the mirror that actually answered.
        let single = MirrorPool::new(PROVIDER, vec![base.to_string()]);
        let (video, _) = single
            .get_json::<dto::VideoResponse, _>(&path, None, RESOLVE_TIMEOUT, |v| {
                !v.adaptive_formats.is_empty()
            })
            .await
            .ok()?;

        let host = mirror_host(base);
        let best = adapter::select_audio_format(&video.adaptive_formats, &host)?;
        debug!(
            mirror = base,
            bitrate = best.bitrate_bps(),
            "selected audio format"
        );
        best.url.clone()
    }
}

/// Hostname of a mirror base URL, empty when unparseable
fn mirror_host(base: &str) -> String {
    reqwest::Url::parse(base)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[async_trait]
impl MusicProvider for InvidiousClient {
    fn source(&self) -> SourceTag {
        SourceTag::Youtube
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<TrackRecord>, ProviderError> {
        let path = format!(
            "/api/v1/search?q={}&type=video&fields={}",
            urlencoding::encode(term),
            urlencoding::encode(SEARCH_FIELDS)
        );

        let (items, mirror) = self
            .pool
            .get_json::<Vec<dto::SearchItem>, _>(&path, None, SEARCH_TIMEOUT, |items| {
                !items.is_empty()
            })
            .await?;

        let tracks: Vec<TrackRecord> = items
            .into_iter()
            .take(limit)
            .map(|item| adapter::to_track(item, &mirror))
            .collect();

        info!(count = tracks.len(), %mirror, "invidious search results");
        Ok(tracks)
    }

    /// Fetch candidate formats mirror by mirror, preferred first, and stop at
    /// the first mirror that yields a usable audio format.
    async fn resolve_stream(
        &self,
        native_id: &str,
        preferred_mirror: Option<&str>,
    ) -> Result<String, ProviderError> {
        for base in self.pool.attempt_order(preferred_mirror) {
            if let Some(url) = self.resolve_on_mirror(base, native_id).await {
                return Ok(url);
            }
            debug!(mirror = base, video = native_id, "no usable stream on mirror");
        }

        Err(ProviderError::StreamUnavailable(PROVIDER))
    }
}
