// Provider Context
//
// Shared resources handed to provider factories

use std::sync::Arc;

use reelscrape_extractors::http::build_client;
use reelscrape_extractors::ExtractorRegistry;
use reqwest::Client;

use super::ProviderError;
use crate::config::Config;

/// Provider construction context
///
/// Cheap to clone: the client is a handle to one connection pool and the
/// extractor registry holds `Arc`s.
#[derive(Clone)]
pub struct ProviderContext {
    /// HTTP client for site pages and host requests
    pub client: Client,

    /// Extractors providers dispatch host URLs to
    pub extractors: ExtractorRegistry,

    pub config: Arc<Config>,
}

impl ProviderContext {
    /// Build a client from `config.http` and register the default extractors on it.
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        let client = build_client(&config.http.client_options())
            .map_err(|e| ProviderError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(config, client))
    }

    /// Use an existing client (e.g. one shared with other components).
    #[must_use]
    pub fn with_client(config: Config, client: Client) -> Self {
        let extractors = ExtractorRegistry::with_defaults(&client);
        Self {
            client,
            extractors,
            config: Arc::new(config),
        }
    }

    /// Replace the extractor registry
    #[must_use]
    pub fn with_extractors(mut self, extractors: ExtractorRegistry) -> Self {
        self.extractors = extractors;
        self
    }
}
