//! Lyrics lookup client.
//!
//! Simple GET-by-(artist, title) path-parameter API returning
//! `{"lyrics": "..."}`. Metadata enrichment only - never part of the playback
//! path, and "no lyrics" is an ordinary `None`, not an error.

use std::time::Duration;

use serde::Deserialize;

use crate::providers::domain::ProviderError;
use crate::providers::mirrors::USER_AGENT;

const PROVIDER: &str = "lyrics";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Deserialize)]
struct LyricsResponse {
    #[serde(default)]
    lyrics: Option<String>,
}

pub struct LyricsClient {
    http: reqwest::Client,
    endpoint: String,
}

impl LyricsClient {
    pub fn new(endpoint: String) -> Self {
        let http = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { http, endpoint }
    }

    /// Fetch lyrics for a track. `Ok(None)` covers both "track unknown to the
    /// service" and "known but no lyrics on file".
    pub async fn get(&self, artist: &str, title: &str) -> Result<Option<String>, ProviderError> {
        let url = format!(
            "{}/{}/{}",
            self.endpoint,
            urlencoding::encode(artist),
            urlencoding::encode(title)
        );

        let response = tokio::time::timeout(LOOKUP_TIMEOUT, self.http.get(&url).send())
            .await
            .map_err(|_| ProviderError::Unavailable(PROVIDER))?
            .map_err(|_| ProviderError::Unavailable(PROVIDER))?;

        // The service answers 404 for unknown tracks
        if !response.status().is_success() {
            return Ok(None);
        }

        let body = response
            .json::<LyricsResponse>()
            .await
            .map_err(|e| ProviderError::Malformed(PROVIDER, e.to_string()))?;

        Ok(body.lyrics.filter(|l| !l.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lyrics_body() {
        let body: LyricsResponse =
            serde_json::from_str(r#"{"lyrics": "Is this the real life"}"#).unwrap();
        assert_eq!(body.lyrics.as_deref(), Some("Is this the real life"));

        let absent: LyricsResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(absent.lyrics.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let client = LyricsClient::new("http://127.0.0.1:1/v1".to_string());
        let result = client.get("Queen", "Bohemian Rhapsody").await;
        assert!(matches!(result, Err(ProviderError::Unavailable("lyrics"))));
    }
}
