//! DramaCool provider
//!
//! Asian drama site. Search and info pages are plain HTML; every episode page
//! embeds one `data-video` link per mirror host.
//!
//! ```rust,no_run
//! use reelscrape_core::provider::{DramaCool, MediaParser, ProviderContext};
//! use reelscrape_core::{Config, StreamingServer};
//!
//! # async fn run() -> Result<(), reelscrape_core::ProviderError> {
//! let ctx = ProviderContext::new(Config::default())?;
//! let drama = DramaCool::new(&ctx)?;
//!
//! let search = drama.search("vincenzo", 1).await?;
//! let info = drama.fetch_media_info(&search.results[0].id).await?;
//! let sources = drama
//!     .fetch_episode_sources(&info.episodes[0].id, StreamingServer::AsianLoad)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod parser;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use url::Url;

use super::html::fetch_page;
use super::resolver::{EpisodeLocator, RouteSpec, ServerResolver};
use super::{LabelTable, MediaParser, ProviderContext, ProviderError};
use crate::models::{MediaInfo, Search, SearchResult, StreamingServer, TvType, VideoSources};
pub use parser::episode_number;
use parser::Selectors;

pub const DEFAULT_BASE_URL: &str = "https://www1.dramacool.cr";

/// Server used when the caller does not pick one
pub const DEFAULT_SERVER: StreamingServer = StreamingServer::AsianLoad;

/// Suffix of episode page paths
pub const PAGE_SUFFIX: &str = ".html";

/// Where each mirror's host URL sits on an episode page
pub const ROUTES: &[RouteSpec] = &[
    // "Standard Server" is AsianLoad
    RouteSpec {
        server: StreamingServer::AsianLoad,
        selector: ".Standard",
        attribute: "data-video",
        signature: "asian",
    },
    RouteSpec {
        server: StreamingServer::MixDrop,
        selector: ".mixdrop",
        attribute: "data-video",
        signature: "mixdrop",
    },
    RouteSpec {
        server: StreamingServer::StreamTape,
        selector: ".streamtape",
        attribute: "data-video",
        signature: "streamtape",
    },
    RouteSpec {
        server: StreamingServer::StreamSb,
        selector: ".streamsb",
        attribute: "data-video",
        signature: "stream",
    },
];

/// Labels prefixed to info page fields
pub const LABELS: LabelTable = LabelTable(&[("release_date", "Released")]);

const SUPPORTED_TYPES: &[TvType] = &[TvType::Movie, TvType::TvSeries];

static RE_QUERY_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\W_]+").expect("invalid query separator regex"));

/// Turn a free-text query into the site's hyphenated keyword form.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    RE_QUERY_SEPARATORS.replace_all(query, "-").into_owned()
}

pub struct DramaCool {
    client: Client,
    /// Site root without trailing slash
    base: String,
    base_url: Url,
    selectors: Selectors,
    resolver: ServerResolver,
}

impl DramaCool {
    /// Registry key
    pub const ID: &'static str = "dramacool";
    const NAME: &'static str = "DramaCool";

    /// Create a provider for the configured site root.
    pub fn new(ctx: &ProviderContext) -> Result<Self, ProviderError> {
        Self::with_base_url(ctx, &ctx.config.providers.dramacool.base_url)
    }

    /// Create a provider for a mirror or test server.
    pub fn with_base_url(ctx: &ProviderContext, base_url: &str) -> Result<Self, ProviderError> {
        let base = base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base)
            .map_err(|e| ProviderError::InvalidConfig(format!("dramacool base url {base:?}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ProviderError::InvalidConfig(format!("dramacool base url {base:?} cannot be a base")));
        }

        Ok(Self {
            client: ctx.client.clone(),
            base,
            base_url: parsed,
            selectors: Selectors::new()?,
            resolver: ServerResolver::new(DEFAULT_SERVER, ROUTES, &ctx.extractors)?,
        })
    }

    /// Info page URL for a relative id or an absolute URL on this site.
    fn media_url(&self, id: &str) -> Result<Url, ProviderError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ProviderError::InvalidId("empty media id".to_string()));
        }
        if id.starts_with("http://") || id.starts_with("https://") {
            let url = Url::parse(id).map_err(|e| ProviderError::InvalidId(format!("{id}: {e}")))?;
            if url.origin() != self.base_url.origin() {
                return Err(ProviderError::InvalidId(format!("{id} is not a {} url", Self::NAME)));
            }
            return Ok(url);
        }
        let page = format!("{}/{}", self.base, id.trim_start_matches('/'));
        Url::parse(&page).map_err(|e| ProviderError::InvalidId(format!("{id}: {e}")))
    }
}

#[async_trait]
impl MediaParser for DramaCool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn base_url(&self) -> &str {
        &self.base
    }

    fn supported_types(&self) -> &'static [TvType] {
        SUPPORTED_TYPES
    }

    fn supported_servers(&self) -> Vec<StreamingServer> {
        self.resolver.servers()
    }

    fn default_server(&self) -> StreamingServer {
        self.resolver.default_server()
    }

    async fn search(&self, query: &str, page: u32) -> Result<Search<SearchResult>, ProviderError> {
        let page = page.max(1);
        let keyword = normalize_query(query);
        let mut url = Url::parse(&format!("{}/search", self.base))
            .map_err(|e| ProviderError::InvalidConfig(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("keyword", &keyword)
            .append_pair("page", &page.to_string());

        tracing::debug!(provider = Self::NAME, keyword = %keyword, page, "searching");
        let body = fetch_page(&self.client, url).await?;
        Ok(parser::parse_search(&self.selectors, &body, &self.base, page))
    }

    async fn fetch_media_info(&self, id: &str) -> Result<MediaInfo, ProviderError> {
        let url = self.media_url(id)?;
        let page_url = url.to_string();
        let body = fetch_page(&self.client, url).await?;
        let info = parser::parse_media_info(&self.selectors, &body, id, &page_url, &self.base)?;
        tracing::debug!(
            provider = Self::NAME,
            id,
            episodes = info.episodes.len(),
            "media info parsed"
        );
        Ok(info)
    }

    async fn fetch_episode_sources(
        &self,
        episode_id: &str,
        server: StreamingServer,
    ) -> Result<VideoSources, ProviderError> {
        let route = self.resolver.route(server).ok_or(ProviderError::UnsupportedServer {
            provider: Self::NAME,
            server,
        })?;

        let host_url = match EpisodeLocator::classify(episode_id, &self.base_url, PAGE_SUFFIX)? {
            EpisodeLocator::Host(url) => url,
            EpisodeLocator::Page(page_url) => {
                let body = fetch_page(&self.client, page_url.clone()).await?;
                route.locate(&body, &page_url)?
            }
        };

        tracing::debug!(provider = Self::NAME, server = %server, host = %host_url, "dispatching to extractor");
        route.dispatch(&host_url).await
    }
}
