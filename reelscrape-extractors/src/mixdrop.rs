//! MixDrop extractor
//!
//! The embed page ships a packed script that assigns `MDCore.wurl`.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::HeaderMap;
use reqwest::Client;
use url::Url;

use crate::error::ExtractorError;
use crate::http::{get_text, shared_client};
use crate::packer;
use crate::traits::{ensure_sources, VideoExtractor};
use crate::types::{Source, StreamingServer, VideoSources};

static RE_WURL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"wurl\s*=\s*"([^"]+)""#).expect("invalid wurl regex"));

pub struct MixDrop {
    client: Client,
}

impl MixDrop {
    /// Create a MixDrop extractor (reuses shared connection pool)
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(shared_client())
    }

    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Pull the media URL out of an embed page.
    pub fn parse_page(html: &str) -> Result<String, ExtractorError> {
        let script = packer::unpack(html)?;
        let raw = RE_WURL
            .captures(&script)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| ExtractorError::Parse("wurl not found in unpacked player script".to_string()))?;
        Ok(absolutize(raw))
    }
}

impl Default for MixDrop {
    fn default() -> Self {
        Self::new()
    }
}

/// Protocol-relative links from hosts are always served over https.
pub(crate) fn absolutize(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else if let Some(rest) = raw.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        format!("https:{raw}")
    }
}

#[async_trait]
impl VideoExtractor for MixDrop {
    fn server(&self) -> StreamingServer {
        StreamingServer::MixDrop
    }

    async fn extract(&self, url: &Url) -> Result<VideoSources, ExtractorError> {
        let html = get_text(&self.client, url.as_str(), HeaderMap::new()).await?;
        let media = Self::parse_page(&html)?;
        tracing::debug!(host = "mixdrop", %url, "decoded media url");
        ensure_sources(self.server(), VideoSources::new(vec![Source::from_url(media)]))
    }
}
