// Extractor Registry
//
// Maps each streaming server to the extractor instance that decodes it

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;

use crate::traits::VideoExtractor;
use crate::types::StreamingServer;
use crate::{AsianLoad, Filemoon, MixDrop, StreamSb, StreamTape};

/// Registry of extractor instances keyed by [`StreamingServer`].
///
/// Extractors are stateless apart from their HTTP client, so one instance per
/// server is shared by every provider and every call.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<StreamingServer, Arc<dyn VideoExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in extractor sharing `client`
    #[must_use]
    pub fn with_defaults(client: &Client) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(AsianLoad::with_client(client.clone())));
        registry.register(Arc::new(MixDrop::with_client(client.clone())));
        registry.register(Arc::new(StreamTape::with_client(client.clone())));
        registry.register(Arc::new(StreamSb::with_client(client.clone())));
        registry.register(Arc::new(Filemoon::with_client(client.clone())));
        registry
    }

    /// Register an extractor under the server it reports, replacing any previous one
    pub fn register(&mut self, extractor: Arc<dyn VideoExtractor>) {
        self.extractors.insert(extractor.server(), extractor);
    }

    /// Get the extractor for a server
    #[must_use]
    pub fn get(&self, server: StreamingServer) -> Option<Arc<dyn VideoExtractor>> {
        self.extractors.get(&server).cloned()
    }

    /// Servers with a registered extractor, in enum order
    #[must_use]
    pub fn servers(&self) -> Vec<StreamingServer> {
        StreamingServer::ALL
            .into_iter()
            .filter(|s| self.extractors.contains_key(s))
            .collect()
    }
}
