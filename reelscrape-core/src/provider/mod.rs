// Site Provider System
//
// Two-tier architecture:
//
// Tier 1: reelscrape-extractors (pure host decoders)
//   - AsianLoad, MixDrop, StreamTape, StreamSb, Filemoon
//   - Independent of any site; selected by StreamingServer
//
// Tier 2: reelscrape-core/provider (MediaParser implementations)
//   - DramaCool
//   - Scrape a site's search, info and episode pages, then hand the located
//     host URL to the extractor for the requested server

// Core traits and types
pub mod context;
pub mod error;
pub mod html;
pub mod labels;
pub mod registry;
pub mod resolver;
pub mod traits;

// MediaParser implementations
pub mod dramacool;

pub use context::*;
pub use error::*;
pub use labels::LabelTable;
pub use registry::*;
pub use resolver::{EpisodeLocator, RouteSpec, ServerResolver, ServerRoute};
pub use traits::*;

pub use dramacool::DramaCool;
