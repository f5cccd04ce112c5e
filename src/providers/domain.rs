//! Provider-level error taxonomy.
//!
//! Providers are known-unreliable; these errors exist for logging and for
//! fallback routing, not for user-facing failure. Everything except
//! `StreamUnavailable` is swallowed at the aggregator boundary and treated as
//! an empty result.

/// Errors raised by provider adapters.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Every mirror/endpoint for this provider failed or timed out.
    ///
    /// Names the provider, never a particular mirror - instance identity is an
    /// implementation detail visible only for retry ordering.
    #[error("{0}: no reachable endpoint")]
    Unavailable(&'static str),

    /// Provider returned 2xx with a body failing shape validation.
    /// Callers treat this exactly like `Unavailable`.
    #[error("{0}: malformed response: {1}")]
    Malformed(&'static str, String),

    /// No usable audio format on any mirror for a lazy stream reference.
    /// The only provider error allowed to reach the playback layer.
    #[error("{0}: no playable audio stream found")]
    StreamUnavailable(&'static str),

    /// Stream resolution requested for a source with no configured adapter.
    #[error("no provider registered for source '{0}'")]
    UnknownProvider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_names_provider_not_mirror() {
        let err = ProviderError::Unavailable("invidious");
        let msg = err.to_string();
        assert!(msg.contains("invidious"));
        assert!(!msg.contains("http"));
    }

    #[test]
    fn test_stream_unavailable_display() {
        let err = ProviderError::StreamUnavailable("invidious");
        assert!(err.to_string().contains("no playable audio stream"));
    }
}
