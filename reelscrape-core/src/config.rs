use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use reelscrape_extractors::http::ClientOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub connect_timeout_seconds: u64,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let defaults = ClientOptions::default();
        Self {
            user_agent: defaults.user_agent,
            connect_timeout_seconds: defaults.connect_timeout.as_secs(),
            timeout_seconds: defaults.timeout.as_secs(),
            max_redirects: defaults.max_redirects,
        }
    }
}

impl HttpConfig {
    /// Client options for the shared HTTP client
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_seconds),
            timeout: Duration::from_secs(self.timeout_seconds),
            max_redirects: self.max_redirects,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub dramacool: SiteConfig,
}

/// Per-site settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: crate::provider::dramacool::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Load config file if provided
        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // Override with environment variables (REELSCRAPE_HTTP__TIMEOUT_SECONDS, etc.)
        builder = builder.add_source(
            Environment::with_prefix("REELSCRAPE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Check the whole configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.http.user_agent.trim().is_empty() {
            errors.push("http.user_agent must not be empty".to_string());
        }
        if self.http.timeout_seconds == 0 {
            errors.push("http.timeout_seconds must be greater than 0".to_string());
        }
        if self.http.connect_timeout_seconds > self.http.timeout_seconds {
            errors.push("http.connect_timeout_seconds must not exceed http.timeout_seconds".to_string());
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!("logging.format must be \"json\" or \"pretty\", got {:?}", self.logging.format));
        }

        let base = &self.providers.dramacool.base_url;
        match url::Url::parse(base) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            Ok(u) => errors.push(format!("providers.dramacool.base_url has unsupported scheme {}", u.scheme())),
            Err(e) => errors.push(format!("providers.dramacool.base_url is invalid: {e}")),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
