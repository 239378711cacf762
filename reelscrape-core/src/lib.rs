// reelscrape core
//
// Shared model layer, the provider (site scraper) contract and its reference
// implementations, plus configuration and logging for front ends.

pub mod config;
pub mod logging;
pub mod models;
pub mod provider;

pub use config::Config;
pub use models::*;
pub use provider::{MediaParser, ProviderContext, ProviderError, ProviderRegistry};
