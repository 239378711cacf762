//! AsianLoad extractor
//!
//! AsianLoad embeds (the "Standard" server on drama sites) talk to an
//! `encrypt-ajax.php` endpoint. Request parameters and the response body are
//! AES-256-CBC encrypted with a fixed key.
//!
//! # Example
//!
//! ```no_run
//! use reelscrape_extractors::{AsianLoad, VideoExtractor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let url = url::Url::parse("https://asianload.io/streaming.php?id=MzUwNTA1")?;
//! let media = AsianLoad::new().extract(&url).await?;
//! println!("{} sources", media.sources.len());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod crypto;
pub mod types;

pub use client::AsianLoad;
