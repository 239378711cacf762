// Extractor Traits
//
// Core interface every host decoder implements

use async_trait::async_trait;
use url::Url;

use crate::error::ExtractorError;
use crate::types::{StreamingServer, VideoSources};

/// Video host extractor
///
/// Decodes one host page into direct media locations.
///
/// Contract:
/// - `url` is an absolute URL on the host; it may come from any provider.
/// - Sources are ordered by descending quality when the host exposes a ladder.
/// - A successful result is never empty; failures surface as [`ExtractorError`].
/// - No state survives between calls.
#[async_trait]
pub trait VideoExtractor: Send + Sync {
    /// Host this extractor decodes
    fn server(&self) -> StreamingServer;

    /// Decode `url` into sources (and subtitles when the host has them)
    async fn extract(&self, url: &Url) -> Result<VideoSources, ExtractorError>;
}

/// Fail with `NoSources` instead of returning an empty success.
pub fn ensure_sources(
    server: StreamingServer,
    sources: VideoSources,
) -> Result<VideoSources, ExtractorError> {
    if sources.is_empty() {
        return Err(ExtractorError::NoSources { server });
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;

    #[test]
    fn test_ensure_sources_rejects_empty() {
        let err = ensure_sources(StreamingServer::MixDrop, VideoSources::default()).unwrap_err();
        assert!(matches!(err, ExtractorError::NoSources { server: StreamingServer::MixDrop }));
    }

    #[test]
    fn test_ensure_sources_passes_through() {
        let sources = VideoSources::new(vec![Source::from_url("https://a/b.mp4")]);
        assert_eq!(ensure_sources(StreamingServer::MixDrop, sources.clone()).unwrap(), sources);
    }
}
