//! Shared extractor error types
//!
//! Common error enum and response helpers used by every host extractor.

use thiserror::Error;

use crate::types::StreamingServer;

/// Maximum response body size for host HTTP calls (16 MB).
/// Prevents OOM from malicious or misconfigured upstream servers.
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

/// Common error type for all host extractors.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Decrypt error: {0}")]
    Decrypt(String),

    #[error("No sources found on {server}. Try a different server")]
    NoSources { server: StreamingServer },

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },
}

impl ExtractorError {
    /// Whether the failure came from the transport rather than from decoding.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http { .. } | Self::ResponseTooLarge { .. })
    }
}

/// Read a response body with size limit.
///
/// Checks `Content-Length` hint first (if available), then enforces the
/// limit on the actual body bytes.
pub async fn bytes_with_limit(response: reqwest::Response) -> Result<Vec<u8>, ExtractorError> {
    if let Some(cl) = response.content_length() {
        if cl as usize > MAX_RESPONSE_SIZE {
            return Err(ExtractorError::ResponseTooLarge { size: cl });
        }
    }
    let bytes = response.bytes().await?;
    if bytes.len() > MAX_RESPONSE_SIZE {
        return Err(ExtractorError::ResponseTooLarge { size: bytes.len() as u64 });
    }
    Ok(bytes.to_vec())
}

/// Read a response body with size limit as (lossy) UTF-8 text.
pub async fn text_with_limit(response: reqwest::Response) -> Result<String, ExtractorError> {
    let bytes = bytes_with_limit(response).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a response body with size limit and deserialize as JSON.
pub async fn json_with_limit<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ExtractorError> {
    let bytes = bytes_with_limit(response).await?;
    serde_json::from_slice(&bytes).map_err(Into::into)
}

/// Check HTTP response status before processing body.
pub fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ExtractorError> {
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ExtractorError::Http {
            status,
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

impl From<reqwest::Error> for ExtractorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ExtractorError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<url::ParseError> for ExtractorError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
