//! StreamTape extractor
//!
//! The page builds the media link in script:
//! `document.getElementById('robotlink').innerHTML = '<head>' + ('<tail>').substring(1).substring(2);`
//! The link is `<head>` followed by `<tail>` with the substring offsets applied.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use url::Url;

use crate::error::ExtractorError;
use crate::http::{get_text_with_referer, shared_client};
use crate::mixdrop::absolutize;
use crate::traits::{ensure_sources, VideoExtractor};
use crate::types::{Source, StreamingServer, VideoSources};

static RE_ROBOTLINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"robotlink'\)\.innerHTML\s*=\s*'([^']*)'\s*\+\s*\(\s*'([^']*)'\s*\)((?:\.substring\(\d+\))*)"#,
    )
    .expect("invalid robotlink regex")
});
static RE_SUBSTRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.substring\((\d+)\)").expect("invalid substring regex"));

/// Characters dropped from the tail when the page applies no explicit offset.
const DEFAULT_TAIL_SKIP: usize = 3;

pub struct StreamTape {
    client: Client,
}

impl StreamTape {
    /// Create a StreamTape extractor (reuses shared connection pool)
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(shared_client())
    }

    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Decode the `robotlink` expression of a video page.
    pub fn parse_page(html: &str) -> Result<String, ExtractorError> {
        // The page carries the expression several times; the last one is the live link.
        let caps = RE_ROBOTLINK
            .captures_iter(html)
            .last()
            .ok_or_else(|| ExtractorError::Parse("robotlink expression not found".to_string()))?;

        let head = &caps[1];
        let tail = &caps[2];
        let chain = caps.get(3).map_or("", |m| m.as_str());

        let skip = if chain.is_empty() {
            DEFAULT_TAIL_SKIP
        } else {
            // Offsets past the tail length only empty it
            RE_SUBSTRING
                .captures_iter(chain)
                .map(|c| c[1].parse::<usize>().unwrap_or(usize::MAX))
                .fold(0usize, usize::saturating_add)
        };
        let tail: String = tail.chars().skip(skip).collect();

        Ok(absolutize(&format!("{head}{tail}")))
    }
}

impl Default for StreamTape {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoExtractor for StreamTape {
    fn server(&self) -> StreamingServer {
        StreamingServer::StreamTape
    }

    async fn extract(&self, url: &Url) -> Result<VideoSources, ExtractorError> {
        let html = get_text_with_referer(&self.client, url.as_str(), url.as_str()).await?;
        let media = Self::parse_page(&html)?;
        tracing::debug!(host = "streamtape", %url, "decoded media url");
        ensure_sources(self.server(), VideoSources::new(vec![Source::from_url(media)]))
    }
}
