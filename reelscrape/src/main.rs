mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use reelscrape_core::{
    logging, Config, MediaParser, ProviderContext, ProviderRegistry, StreamingServer, TvType,
};

use cli::{Args, Command};

/// Provider capabilities as printed by `describe`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Description<'a> {
    name: &'a str,
    base_url: &'a str,
    supported_types: &'a [TvType],
    supported_servers: Vec<StreamingServer>,
    default_server: StreamingServer,
}

fn load_config(path: Option<&str>) -> Result<Config> {
    if let Some(path) = path {
        if !std::path::Path::new(path).exists() {
            anyhow::bail!("config file not found: {path}");
        }
    }
    let config = Config::load(path).context("failed to load configuration")?;

    // Fail fast on misconfigurations
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s): {}",
            errors.len(),
            errors.join("; ")
        ));
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

async fn run(provider: &dyn MediaParser, command: Command, pretty: bool) -> Result<()> {
    match command {
        Command::Search { query, page } => {
            let search = provider.search(&query, page).await?;
            info!(results = search.results.len(), has_next_page = search.has_next_page, "search finished");
            print_json(&search, pretty)
        }
        Command::Info { id } => {
            let media = provider.fetch_media_info(&id).await?;
            info!(title = %media.title, episodes = media.episodes.len(), "media info fetched");
            print_json(&media, pretty)
        }
        Command::Sources { episode_id, server } => {
            let server = server.unwrap_or_else(|| provider.default_server());
            let sources = provider
                .fetch_episode_sources(&episode_id, server)
                .await
                .map_err(|e| {
                    if e.is_retryable_elsewhere() {
                        let others: Vec<String> = provider
                            .supported_servers()
                            .into_iter()
                            .filter(|s| *s != server)
                            .map(|s| s.to_string())
                            .collect();
                        anyhow::anyhow!("{e} (other servers: {})", others.join(", "))
                    } else {
                        e.into()
                    }
                })?;
            info!(server = %server, sources = sources.sources.len(), "sources resolved");
            print_json(&sources, pretty)
        }
        Command::Servers { episode_id } => {
            let servers = provider.fetch_episode_servers(&episode_id).await?;
            print_json(&servers, pretty)
        }
        Command::Describe => print_json(
            &Description {
                name: provider.name(),
                base_url: provider.base_url(),
                supported_types: provider.supported_types(),
                supported_servers: provider.supported_servers(),
                default_server: provider.default_server(),
            },
            pretty,
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load configuration
    let config = load_config(args.config.as_deref())?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    debug!(provider = %args.provider, "reelscrape starting");

    // 3. Build the provider
    let ctx = ProviderContext::new(config)?;
    let mut registry = ProviderRegistry::with_defaults(ctx);
    let provider = registry.create_instance(&args.provider).with_context(|| {
        format!(
            "cannot use provider {:?} (available: {})",
            args.provider,
            registry.sites().join(", ")
        )
    })?;

    // 4. Run the command
    run(provider.as_ref(), args.command, args.pretty).await
}
