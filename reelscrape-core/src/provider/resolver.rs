//! Server resolution for episode pages
//!
//! A provider maps each streaming server to where its raw host URL sits on the
//! episode page (selector + attribute), the substring that URL must contain,
//! and the extractor that decodes it. Only that table varies per provider; the
//! fetch/locate/dispatch scaffolding is shared.

use std::sync::Arc;

use reelscrape_extractors::{ExtractorRegistry, VideoExtractor};
use scraper::{Html, Selector};
use url::Url;

use super::{html, ProviderError};
use crate::models::{StreamingServer, VideoSources};

/// Static description of one server's locator on an episode page
#[derive(Debug, Clone, Copy)]
pub struct RouteSpec {
    pub server: StreamingServer,
    pub selector: &'static str,
    pub attribute: &'static str,
    /// Substring the located URL must contain
    pub signature: &'static str,
}

/// A route bound to its extractor
pub struct ServerRoute {
    pub spec: RouteSpec,
    selector: Selector,
    extractor: Arc<dyn VideoExtractor>,
}

impl ServerRoute {
    /// Find this server's host URL on an episode page.
    ///
    /// Relative and protocol-relative links resolve against `page_url`.
    pub fn locate(&self, page_html: &str, page_url: &Url) -> Result<Url, ProviderError> {
        let mismatch = || ProviderError::ServerMismatch {
            server: self.spec.server,
            url: page_url.to_string(),
        };

        let document = Html::parse_document(page_html);
        let raw = document
            .select(&self.selector)
            .find_map(|el| el.value().attr(self.spec.attribute))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(mismatch)?;

        let resolved = page_url.join(raw).map_err(|_| mismatch())?;
        if !resolved.as_str().contains(self.spec.signature) {
            tracing::debug!(
                server = %self.spec.server,
                located = %resolved,
                signature = self.spec.signature,
                "located url does not match host signature"
            );
            return Err(mismatch());
        }
        Ok(resolved)
    }

    /// Hand a host URL to this route's extractor.
    pub async fn dispatch(&self, host_url: &Url) -> Result<VideoSources, ProviderError> {
        let server = self.spec.server;
        let sources = self
            .extractor
            .extract(host_url)
            .await
            .map_err(|source| ProviderError::Extraction { server, source })?;
        if sources.is_empty() {
            return Err(ProviderError::Extraction {
                server,
                source: reelscrape_extractors::ExtractorError::NoSources { server },
            });
        }
        Ok(sources)
    }
}

/// Per-provider table of server routes
pub struct ServerResolver {
    default: StreamingServer,
    routes: Vec<ServerRoute>,
}

impl ServerResolver {
    /// Bind `specs` to extractors from `registry`.
    ///
    /// Specs whose server has no registered extractor are left out, so the
    /// provider does not advertise them.
    pub fn new(
        default: StreamingServer,
        specs: &[RouteSpec],
        registry: &ExtractorRegistry,
    ) -> Result<Self, ProviderError> {
        let mut routes = Vec::with_capacity(specs.len());
        for spec in specs {
            let Some(extractor) = registry.get(spec.server) else {
                tracing::warn!(server = %spec.server, "no extractor registered; server disabled");
                continue;
            };
            routes.push(ServerRoute {
                spec: *spec,
                selector: html::selector(spec.selector)?,
                extractor,
            });
        }
        Ok(Self { default, routes })
    }

    #[must_use]
    pub const fn default_server(&self) -> StreamingServer {
        self.default
    }

    /// Supported servers, default first
    #[must_use]
    pub fn servers(&self) -> Vec<StreamingServer> {
        let mut servers: Vec<_> = self.routes.iter().map(|r| r.spec.server).collect();
        if let Some(pos) = servers.iter().position(|s| *s == self.default) {
            servers[..=pos].rotate_right(1);
        }
        servers
    }

    #[must_use]
    pub fn route(&self, server: StreamingServer) -> Option<&ServerRoute> {
        self.routes.iter().find(|r| r.spec.server == server)
    }
}

/// Where an episode id points.
///
/// `Page` is a provider episode page that still has to be resolved to a host
/// URL; `Host` is already a host URL and dispatches straight to an extractor.
/// `Page` moves to `Host` at most once per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeLocator {
    Page(Url),
    Host(Url),
}

impl EpisodeLocator {
    /// Classify an episode id against the provider's own site.
    ///
    /// Absolute URLs on another origin are host URLs. Anything else is an episode
    /// page and gets `page_suffix` appended when missing.
    pub fn classify(episode_id: &str, base_url: &Url, page_suffix: &str) -> Result<Self, ProviderError> {
        let id = episode_id.trim();
        if id.is_empty() {
            return Err(ProviderError::InvalidId("empty episode id".to_string()));
        }

        if id.starts_with("http://") || id.starts_with("https://") {
            let mut url = Url::parse(id).map_err(|e| ProviderError::InvalidId(format!("{id}: {e}")))?;
            if url.origin() == base_url.origin() {
                if !url.path().contains(page_suffix) {
                    let path = format!("{}{page_suffix}", url.path().trim_end_matches('/'));
                    url.set_path(&path);
                }
                return Ok(Self::Page(url));
            }
            return Ok(Self::Host(url));
        }

        let relative = id.trim_start_matches('/');
        let page = if relative.contains(page_suffix) {
            format!("{}/{relative}", base_url.as_str().trim_end_matches('/'))
        } else {
            format!("{}/{relative}{page_suffix}", base_url.as_str().trim_end_matches('/'))
        };
        Url::parse(&page)
            .map(Self::Page)
            .map_err(|e| ProviderError::InvalidId(format!("{id}: {e}")))
    }
}
