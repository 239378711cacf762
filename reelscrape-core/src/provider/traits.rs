// Provider Traits
//
// Core interface every site scraper implements

use async_trait::async_trait;

use super::ProviderError;
use crate::models::{EpisodeServer, MediaInfo, Search, SearchResult, StreamingServer, TvType, VideoSources};

/// Site scraper contract
///
/// # Flow
/// 1. `search(query)` returns ids
/// 2. `fetch_media_info(id)` returns normalized info and the episode list
/// 3. `fetch_episode_sources(episode.id, server)` resolves the host URL and
///    delegates to the extractor for `server`
#[async_trait]
pub trait MediaParser: Send + Sync {
    // ========== Basic Information ==========

    /// Display name (e.g., "DramaCool")
    fn name(&self) -> &'static str;

    /// Site root without trailing slash
    fn base_url(&self) -> &str;

    fn supported_types(&self) -> &'static [TvType];

    /// Servers this provider can resolve, default first
    fn supported_servers(&self) -> Vec<StreamingServer>;

    /// Server used when the caller does not pick one
    fn default_server(&self) -> StreamingServer;

    fn supports_server(&self, server: StreamingServer) -> bool {
        self.supported_servers().contains(&server)
    }

    // ========== Core Methods ==========

    /// Search the site; `page` starts at 1
    async fn search(&self, query: &str, page: u32) -> Result<Search<SearchResult>, ProviderError>;

    /// Media details for a search result id (or an absolute URL on the site)
    async fn fetch_media_info(&self, id: &str) -> Result<MediaInfo, ProviderError>;

    /// Playable sources for an episode id on one server
    async fn fetch_episode_sources(
        &self,
        episode_id: &str,
        server: StreamingServer,
    ) -> Result<VideoSources, ProviderError>;

    // ========== Optional ==========

    /// Server listing for an episode
    ///
    /// Sites without a separate server view keep this default.
    async fn fetch_episode_servers(&self, _episode_id: &str) -> Result<Vec<EpisodeServer>, ProviderError> {
        Err(ProviderError::NotImplemented(format!(
            "{} does not expose an episode server listing",
            self.name()
        )))
    }
}
