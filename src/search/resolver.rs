//! Stream resolution - lazy references become playable URLs.
//!
//! Invoked only at the moment playback is requested; nothing in the search
//! path ever resolves a URL that might never be played. The only error that
//! escapes is `StreamUnavailable` (or an unknown source tag), which the
//! playback layer treats as "skip to the next queued track".

use std::sync::Arc;

use crate::model::{SourceTag, StreamRef};
use crate::providers::domain::ProviderError;
use crate::providers::traits::MusicProvider;

pub struct StreamResolver {
    providers: Vec<Arc<dyn MusicProvider>>,
}

impl StreamResolver {
    pub fn new(providers: Vec<Arc<dyn MusicProvider>>) -> Self {
        Self { providers }
    }

    /// Resolve any stream reference. Direct references return their URL
    /// without touching the network.
    pub async fn resolve(&self, stream: &StreamRef) -> Result<String, ProviderError> {
        match stream {
            StreamRef::Direct(url) => Ok(url.clone()),
            StreamRef::Lazy {
                source,
                native_id,
                preferred_mirror,
            } => {
                self.resolve_lazy(*source, native_id, preferred_mirror.as_deref())
                    .await
            }
        }
    }

    /// Dispatch a lazy reference to the owning provider.
    pub async fn resolve_lazy(
        &self,
        source: SourceTag,
        native_id: &str,
        preferred_mirror: Option<&str>,
    ) -> Result<String, ProviderError> {
        let provider = self
            .providers
            .iter()
            .find(|p| p.source() == source)
            .ok_or_else(|| ProviderError::UnknownProvider(source.name().to_string()))?;

        provider.resolve_stream(native_id, preferred_mirror).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::traits::mocks::ScriptedProvider;

    fn resolver_with(provider: ScriptedProvider) -> StreamResolver {
        StreamResolver::new(vec![Arc::new(provider)])
    }

    #[tokio::test]
    async fn test_direct_reference_needs_no_provider() {
        let resolver = StreamResolver::new(vec![]);
        let url = resolver
            .resolve(&StreamRef::Direct("https://cdn/a.mp3".to_string()))
            .await
            .unwrap();
        assert_eq!(url, "https://cdn/a.mp3");
    }

    #[tokio::test]
    async fn test_lazy_reference_dispatches_by_source_tag() {
        let mut provider = ScriptedProvider::empty(SourceTag::Youtube);
        provider.stream_url = Some("https://yewtu.be/audio".to_string());
        let resolver = resolver_with(provider);

        let url = resolver
            .resolve(&StreamRef::Lazy {
                source: SourceTag::Youtube,
                native_id: "abc".to_string(),
                preferred_mirror: None,
            })
            .await
            .unwrap();
        assert_eq!(url, "https://yewtu.be/audio");
    }

    #[tokio::test]
    async fn test_stream_unavailable_propagates() {
        let resolver = resolver_with(ScriptedProvider::empty(SourceTag::Youtube));

        let result = resolver.resolve_lazy(SourceTag::Youtube, "abc", None).await;
        assert!(matches!(result, Err(ProviderError::StreamUnavailable(_))));
    }

    #[tokio::test]
    async fn test_unknown_source_is_an_error() {
        let resolver = resolver_with(ScriptedProvider::empty(SourceTag::Youtube));

        let result = resolver.resolve_lazy(SourceTag::Jamendo, "9", None).await;
        assert!(matches!(result, Err(ProviderError::UnknownProvider(_))));
    }
}
