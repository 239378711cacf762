use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initialize structured logging based on configuration
///
/// Supports both JSON and pretty formats with configurable log levels
/// and optional file output. Logs go to stderr so stdout stays clean for results.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    // RUST_LOG wins over the configured level
    let env_filter = match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level)) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(parse_log_level(&config.level)?.to_string()),
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.format.as_str() == "json" {
        let json_layer = fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_line_number(true)
            .with_file(true);

        if let Some(file_path) = &config.file_path {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)?;
            registry.with(json_layer.with_writer(std::sync::Arc::new(file))).try_init()?;
        } else {
            registry.with(json_layer.with_writer(std::io::stderr)).try_init()?;
        }
    } else {
        let pretty_layer = fmt::layer()
            .compact()
            .with_target(true)
            .with_line_number(false)
            .with_file(false);

        if let Some(file_path) = &config.file_path {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)?;
            registry
                .with(pretty_layer.with_ansi(false).with_writer(std::sync::Arc::new(file)))
                .try_init()?;
        } else {
            registry.with(pretty_layer.with_writer(std::io::stderr)).try_init()?;
        }
    }

    Ok(())
}

/// Parse log level string to tracing Level
fn parse_log_level(level: &str) -> anyhow::Result<Level> {
    // Directive strings like "reelscrape_core=debug,hyper=off" resolve to the last
    // directive that names a level; `off` directives silence a target and are skipped.
    for directive in level.rsplit(',') {
        let bare = directive.rsplit('=').next().unwrap_or(directive);
        match bare.trim().to_lowercase().as_str() {
            "trace" => return Ok(Level::TRACE),
            "debug" => return Ok(Level::DEBUG),
            "info" => return Ok(Level::INFO),
            "warn" | "warning" => return Ok(Level::WARN),
            "error" => return Ok(Level::ERROR),
            "off" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {level}")),
        }
    }
    Err(anyhow::anyhow!("Invalid log level: {level}"))
}
