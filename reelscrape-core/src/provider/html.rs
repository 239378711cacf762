//! Small helpers over `scraper` documents
//!
//! `scraper::Html` is not `Send`; parse and drop documents inside synchronous
//! functions so they never live across an `.await`.

use reelscrape_extractors::error::text_with_limit;
use reelscrape_extractors::ExtractorError;
use reqwest::Client;
use scraper::{ElementRef, Selector};
use url::Url;

use super::{check_response, ProviderError};

/// GET a site page and return its body, capped at the shared response limit.
pub async fn fetch_page(client: &Client, url: Url) -> Result<String, ProviderError> {
    tracing::debug!(url = %url, "fetching site page");
    let resp = check_response(client.get(url).send().await?)?;
    text_with_limit(resp).await.map_err(|e| match e {
        ExtractorError::ResponseTooLarge { size } => ProviderError::ResponseTooLarge { size },
        other => ProviderError::Fetch(other.to_string()),
    })
}

/// Parse a CSS selector that is expected to be valid.
pub fn selector(css: &str) -> Result<Selector, ProviderError> {
    Selector::parse(css).map_err(|e| ProviderError::InvalidConfig(format!("invalid selector {css:?}: {e}")))
}

/// Concatenated text of an element with runs of whitespace collapsed.
#[must_use]
pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first match under `el`.
#[must_use]
pub fn first_text(el: ElementRef<'_>, sel: &Selector) -> Option<String> {
    el.select(sel).next().map(text).filter(|t| !t.is_empty())
}

/// Attribute of the first match under `el`.
#[must_use]
pub fn first_attr(el: ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    el.select(sel)
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
