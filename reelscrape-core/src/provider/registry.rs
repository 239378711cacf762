// Provider Registry
//
// Factory-based registry for site providers

use std::collections::HashMap;
use std::sync::Arc;

use super::dramacool::DramaCool;
use super::{MediaParser, ProviderContext, ProviderError};

/// Provider factory function type
pub type ProviderFactory =
    Box<dyn Fn(&ProviderContext) -> Result<Arc<dyn MediaParser>, ProviderError> + Send + Sync>;

/// Registry of site providers
///
/// Each site id registers a factory. Instances are created on first use from
/// the registry's [`ProviderContext`] and reused afterwards.
pub struct ProviderRegistry {
    ctx: ProviderContext,

    /// Registered factories by site id
    factories: HashMap<String, ProviderFactory>,

    /// Created providers by site id
    instances: HashMap<String, Arc<dyn MediaParser>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new(ctx: ProviderContext) -> Self {
        Self {
            ctx,
            factories: HashMap::new(),
            instances: HashMap::new(),
        }
    }

    /// Registry with every built-in site registered
    #[must_use]
    pub fn with_defaults(ctx: ProviderContext) -> Self {
        let mut registry = Self::new(ctx);
        registry.register_factory(
            DramaCool::ID,
            Box::new(|ctx| Ok(Arc::new(DramaCool::new(ctx)?))),
        );
        registry
    }

    /// Register a provider factory, replacing any previous one for `site`.
    ///
    /// A cached instance for `site` is dropped so the next lookup uses the new factory.
    pub fn register_factory(&mut self, site: &str, factory: ProviderFactory) {
        let site = site.to_ascii_lowercase();
        self.instances.remove(&site);
        self.factories.insert(site, factory);
    }

    /// Get the provider for `site`, creating it on first use.
    pub fn create_instance(&mut self, site: &str) -> Result<Arc<dyn MediaParser>, ProviderError> {
        let site = site.to_ascii_lowercase();
        if let Some(instance) = self.instances.get(&site) {
            return Ok(Arc::clone(instance));
        }

        let factory = self
            .factories
            .get(&site)
            .ok_or_else(|| ProviderError::UnknownProvider(site.clone()))?;
        let instance = factory(&self.ctx)?;
        tracing::debug!(site = %site, provider = instance.name(), "provider created");
        self.instances.insert(site, Arc::clone(&instance));
        Ok(instance)
    }

    /// Get an already created provider
    #[must_use]
    pub fn get_instance(&self, site: &str) -> Option<Arc<dyn MediaParser>> {
        self.instances.get(&site.to_ascii_lowercase()).cloned()
    }

    /// Registered site ids, sorted
    #[must_use]
    pub fn sites(&self) -> Vec<String> {
        let mut sites: Vec<String> = self.factories.keys().cloned().collect();
        sites.sort();
        sites
    }

    /// Site ids with a created instance
    #[must_use]
    pub fn list_instances(&self) -> Vec<String> {
        self.instances.keys().cloned().collect()
    }

    /// Drop a created instance
    pub fn remove_instance(&mut self, site: &str) -> bool {
        self.instances.remove(&site.to_ascii_lowercase()).is_some()
    }

    #[must_use]
    pub const fn context(&self) -> &ProviderContext {
        &self.ctx
    }
}
