// Provider Error Types

use reelscrape_extractors::{ExtractorError, StreamingServer};

/// Provider-specific errors
///
/// Nothing here is recovered internally; callers decide whether to try
/// another server or another provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Parse error: missing {field} on {url}")]
    Parse { field: &'static str, url: String },

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Server not supported by {provider}: {server}")]
    UnsupportedServer { provider: &'static str, server: StreamingServer },

    #[error("Try another server: {server} locator on {url} did not point at the expected host")]
    ServerMismatch { server: StreamingServer, url: String },

    #[error("Extraction failed on {server}: {source}")]
    Extraction {
        server: StreamingServer,
        #[source]
        source: ExtractorError,
    },

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Response too large ({size} bytes)")]
    ResponseTooLarge { size: u64 },
}

impl ProviderError {
    /// Whether the same episode may still play on a different server.
    #[must_use]
    pub const fn is_retryable_elsewhere(&self) -> bool {
        matches!(self, Self::ServerMismatch { .. } | Self::Extraction { .. })
    }

    /// Whether the failure came from the network rather than from the page.
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Http { .. } | Self::ResponseTooLarge { .. })
    }
}

/// Check HTTP response status before processing body.
pub fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ProviderError::Http {
            status,
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(err.to_string())
    }
}
