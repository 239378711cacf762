//! AsianLoad HTTP client

use std::sync::LazyLock;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::crypto;
use super::types::{AjaxData, AjaxEnvelope};
use crate::error::{check_response, json_with_limit, ExtractorError};
use crate::http::{get_text_with_referer, headers, shared_client};
use crate::traits::{ensure_sources, VideoExtractor};
use crate::types::{Source, StreamingServer, Subtitle, VideoSources};

static SEL_CRYPTO: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script[data-name='crypto']").expect("invalid crypto script selector")
});

pub struct AsianLoad {
    client: Client,
}

impl AsianLoad {
    /// Create an AsianLoad extractor (reuses shared connection pool)
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(shared_client())
    }

    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Encrypted alias token embedded in the streaming page.
    pub fn parse_crypto_value(html: &str) -> Result<String, ExtractorError> {
        let document = Html::parse_document(html);
        document
            .select(&SEL_CRYPTO)
            .find_map(|el| el.value().attr("data-value"))
            .map(str::to_string)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ExtractorError::Parse("crypto script data-value not found".to_string()))
    }

    /// Query parameters for `encrypt-ajax.php`.
    fn ajax_params(id: &str, crypto_value: &str) -> Result<[(&'static str, String); 2], ExtractorError> {
        let encrypted_id = crypto::encrypt(id)?;
        let alias = crypto::decrypt(crypto_value)?;
        Ok([("id", encrypted_id), ("alias", alias)])
    }

    fn to_sources(data: AjaxData) -> VideoSources {
        let sources = data
            .source
            .into_iter()
            .chain(data.source_bk)
            .filter(|f| !f.file.is_empty())
            .map(|f| match f.label {
                Some(label) if !label.trim().is_empty() && !label.contains("hls") => {
                    Source::from_url(f.file).with_quality(label)
                }
                _ => Source::from_url(f.file),
            })
            .collect();

        let subtitles = data
            .track
            .map(|t| t.tracks)
            .unwrap_or_default()
            .into_iter()
            .map(|t| Subtitle { lang: t.lang(), url: t.file })
            .collect();

        VideoSources { sources, subtitles }
    }
}

impl Default for AsianLoad {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoExtractor for AsianLoad {
    fn server(&self) -> StreamingServer {
        StreamingServer::AsianLoad
    }

    async fn extract(&self, url: &Url) -> Result<VideoSources, ExtractorError> {
        let id = url
            .query_pairs()
            .find(|(k, _)| k == "id")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();

        let html = get_text_with_referer(&self.client, url.as_str(), url.as_str()).await?;
        let crypto_value = Self::parse_crypto_value(&html)?;
        let params = Self::ajax_params(&id, &crypto_value)?;

        let mut ajax_url = url.clone();
        ajax_url.set_path("/encrypt-ajax.php");
        ajax_url.set_query(None);
        ajax_url.set_fragment(None);

        let req = self
            .client
            .get(ajax_url.as_str())
            .query(&params)
            .headers(headers([("X-Requested-With", "XMLHttpRequest"), ("Referer", url.as_str())])?);
        let resp = check_response(req.send().await?)?;
        let envelope: AjaxEnvelope = json_with_limit(resp).await?;

        let data: AjaxData = serde_json::from_str(&crypto::decrypt(&envelope.data)?)?;
        let result = Self::to_sources(data);
        tracing::debug!(
            host = "asianload",
            %url,
            sources = result.sources.len(),
            subtitles = result.subtitles.len(),
            "decrypted ajax payload"
        );
        ensure_sources(self.server(), result)
    }
}
