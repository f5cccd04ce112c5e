//! Mirror-pool HTTP helper for providers served by community-run instances.
//!
//! Given an ordered list of candidate base endpoints and a path+query, each
//! mirror is attempted in turn with a bounded per-attempt timeout; the first
//! 2xx response whose body deserializes and satisfies the caller's validity
//! predicate wins. Mirrors are never contacted concurrently for one request.
//!
//! On total exhaustion the pool fails with `ProviderError::Unavailable` naming
//! the provider only - which mirror failed is not attributable to callers.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::providers::domain::ProviderError;

/// User agent sent on every outbound request
pub const USER_AGENT: &str = concat!("SoundSeek/", env!("CARGO_PKG_VERSION"));

/// Sequential-fallback client over a pool of equivalent mirror endpoints.
pub struct MirrorPool {
    provider: &'static str,
    http: reqwest::Client,
    mirrors: Vec<String>,
}

impl MirrorPool {
    pub fn new(provider: &'static str, mirrors: Vec<String>) -> Self {
        let http = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            provider,
            http,
            mirrors,
        }
    }

    pub fn mirrors(&self) -> &[String] {
        &self.mirrors
    }

    /// Candidate order for one request: the preferred endpoint first (if any),
    /// then the remaining mirrors in their default order without duplicating
    /// the preferred one.
    pub fn attempt_order<'a>(&'a self, preferred: Option<&'a str>) -> Vec<&'a str> {
        match preferred {
            Some(base) => std::iter::once(base)
                .chain(self.mirrors.iter().map(String::as_str).filter(|m| *m != base))
                .collect(),
            None => self.mirrors.iter().map(String::as_str).collect(),
        }
    }

    /// GET `{mirror}{path_and_query}` from each candidate until one yields a
    /// parseable body accepted by `valid`.
    ///
    /// Returns the parsed body together with the mirror that served it, so
    /// callers can record it as a preferred-mirror hint for later resolution.
    pub async fn get_json<T, F>(
        &self,
        path_and_query: &str,
        preferred: Option<&str>,
        attempt_timeout: Duration,
        valid: F,
    ) -> Result<(T, String), ProviderError>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        for base in self.attempt_order(preferred) {
            let url = format!("{base}{path_and_query}");
            match tokio::time::timeout(attempt_timeout, self.fetch_one::<T>(&url)).await {
                Ok(Ok(body)) if valid(&body) => {
                    return Ok((body, base.to_string()));
                }
                Ok(Ok(_)) => {
                    debug!(provider = self.provider, mirror = base, "mirror returned unusable body");
                }
                Ok(Err(reason)) => {
                    debug!(provider = self.provider, mirror = base, %reason, "mirror attempt failed");
                }
                Err(_) => {
                    debug!(provider = self.provider, mirror = base, "mirror attempt timed out");
                }
            }
        }

        Err(ProviderError::Unavailable(self.provider))
    }

    /// One GET attempt: 2xx and a deserializable body, or a reason string for
    /// the debug log.
    async fn fetch_one<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        let response = self.http.get(url).send().await.map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        response.json::<T>().await.map_err(|e| e.to_string())
    }
}
