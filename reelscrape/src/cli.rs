//! Command-line arguments

use clap::{Parser, Subcommand};
use reelscrape_core::StreamingServer;

#[derive(Parser, Debug)]
#[command(name = "reelscrape")]
#[command(about = "Search streaming sites and resolve playable episode sources", long_about = None)]
pub struct Args {
    /// Config file (TOML, YAML or JSON); REELSCRAPE_* environment variables override it
    #[arg(long, short, env = "REELSCRAPE_CONFIG_PATH", global = true)]
    pub config: Option<String>,

    /// Site provider to use
    #[arg(long, short, default_value = "dramacool", global = true)]
    pub provider: String,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Search the site
    Search {
        query: String,

        /// Result page, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show media details and the episode list
    Info {
        /// Id from a search result, or an absolute URL on the site
        id: String,
    },

    /// Resolve playable sources for an episode
    Sources {
        /// Episode id, episode page URL or host URL
        episode_id: String,

        /// Streaming server; the provider default when omitted
        #[arg(long, short)]
        server: Option<StreamingServer>,
    },

    /// List the servers an episode is available on
    Servers { episode_id: String },

    /// Show provider capabilities without touching the network
    Describe,
}
