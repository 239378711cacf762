//! Filemoon extractor
//!
//! Player setup is packed; the unpacked script declares `file:"<master.m3u8>"`.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use url::Url;

use crate::error::ExtractorError;
use crate::http::{get_text_with_referer, shared_client};
use crate::packer;
use crate::traits::{ensure_sources, VideoExtractor};
use crate::types::{Source, StreamingServer, VideoSources};

static RE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"file\s*:\s*"([^"]+)""#).expect("invalid file regex"));

pub struct Filemoon {
    client: Client,
}

impl Filemoon {
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(shared_client())
    }

    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn parse_page(html: &str) -> Result<String, ExtractorError> {
        let script = packer::unpack(html)?;
        RE_FILE
            .captures(&script)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ExtractorError::Parse("file entry not found in unpacked player script".to_string()))
    }
}

impl Default for Filemoon {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoExtractor for Filemoon {
    fn server(&self) -> StreamingServer {
        StreamingServer::Filemoon
    }

    async fn extract(&self, url: &Url) -> Result<VideoSources, ExtractorError> {
        let html = get_text_with_referer(&self.client, url.as_str(), url.as_str()).await?;
        let media = Self::parse_page(&html)?;
        let source = Source::from_url(media).with_quality("auto");
        ensure_sources(self.server(), VideoSources::new(vec![source]))
    }
}
