//! Shared HTTP client for host requests

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, REFERER};
use reqwest::Client;

use crate::error::{check_response, text_with_limit, ExtractorError};

/// Desktop browser user agent; several hosts reject hotlinking from unknown agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

/// Shared HTTP client for all host requests (connection pooling)
static SHARED_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    build_client(&ClientOptions::default()).expect("Failed to build shared extractor HTTP client")
});

/// Knobs for building a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            max_redirects: MAX_REDIRECTS,
        }
    }
}

/// Build a client that follows redirects and sends a browser user agent.
pub fn build_client(options: &ClientOptions) -> Result<Client, ExtractorError> {
    Client::builder()
        .user_agent(options.user_agent.as_str())
        .connect_timeout(options.connect_timeout)
        .timeout(options.timeout)
        .pool_max_idle_per_host(10)
        .redirect(reqwest::redirect::Policy::limited(options.max_redirects))
        .build()
        .map_err(Into::into)
}

/// Clone of the process-wide default client.
#[must_use]
pub fn shared_client() -> Client {
    SHARED_CLIENT.clone()
}

/// Build a header map from `(name, value)` pairs.
pub fn headers<'a>(
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<HeaderMap, ExtractorError> {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ExtractorError::InvalidHeader(e.to_string()))?;
        map.insert(name, HeaderValue::from_str(value)?);
    }
    Ok(map)
}

/// GET `url` with extra headers and return the body as text.
pub async fn get_text(client: &Client, url: &str, extra: HeaderMap) -> Result<String, ExtractorError> {
    tracing::debug!(url, "fetching host page");
    let resp = check_response(client.get(url).headers(extra).send().await?)?;
    text_with_limit(resp).await
}

/// GET `url` with a `Referer` header set to `referer`.
pub async fn get_text_with_referer(
    client: &Client,
    url: &str,
    referer: &str,
) -> Result<String, ExtractorError> {
    let mut extra = HeaderMap::new();
    extra.insert(REFERER, HeaderValue::from_str(referer)?);
    get_text(client, url, extra).await
}
