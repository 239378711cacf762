// reelscrape Host Extractors
//
// This crate contains the video-host decoders ("extractors"). Each one turns a host
// page URL into direct, usually time-limited media locations.
// Extractors are independent of any site scraper and can be used standalone.
//
// Architecture:
// - reelscrape-extractors: host decoders + shared HTTP helpers (this crate)
// - reelscrape-core/provider: site scrapers that resolve an episode to a host URL
//   and delegate to an extractor from the registry

// Shared error types and HTTP helpers
pub mod error;
pub mod http;

// Shared output types and the extractor contract
pub mod registry;
pub mod traits;
pub mod types;

// Decoding helpers shared by several hosts
pub mod hls;
pub mod packer;

// Host implementations
pub mod asianload;
pub mod filemoon;
pub mod mixdrop;
pub mod streamsb;
pub mod streamtape;

// Re-export for convenience
pub use asianload::AsianLoad;
pub use error::ExtractorError;
pub use filemoon::Filemoon;
pub use mixdrop::MixDrop;
pub use registry::ExtractorRegistry;
pub use streamsb::StreamSb;
pub use streamtape::StreamTape;
pub use traits::VideoExtractor;
pub use types::{Source, StreamingServer, Subtitle, VideoSources};
