//! Normalized result shapes every provider produces
//!
//! Callers never see site-specific fields; each provider maps its markup onto these types.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use reelscrape_extractors::{Source, StreamingServer, Subtitle, VideoSources};

/// Kind of media a provider carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TvType {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Series")]
    TvSeries,
    #[serde(rename = "Anime")]
    Anime,
}

impl fmt::Display for TvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Movie => "Movie",
            Self::TvSeries => "TV Series",
            Self::Anime => "Anime",
        })
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Search<T> {
    pub current_page: u32,
    pub has_next_page: bool,
    pub results: Vec<T>,
}

impl<T> Search<T> {
    #[must_use]
    pub const fn empty(page: u32) -> Self {
        Self { current_page: page, has_next_page: false, results: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Site-relative locator; replayable into `fetch_media_info`
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub other_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Oldest first, strictly increasing by `episode`
    #[serde(default)]
    pub episodes: Vec<EpisodeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRef {
    pub id: String,
    pub title: String,
    /// Fractional for specials, e.g. `5.5`
    pub episode: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub url: String,
}

/// A server entry as listed by a site's server-enumeration view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeServer {
    pub name: String,
    pub url: String,
}

/// Put episodes into canonical viewing order.
///
/// Newest-first lists are reversed, then the list is stably sorted and
/// duplicate numbers are dropped (first occurrence wins), so numbers strictly increase.
pub fn normalize_episode_order(episodes: &mut Vec<EpisodeRef>) {
    if let (Some(first), Some(last)) = (episodes.first(), episodes.last()) {
        if first.episode > last.episode {
            episodes.reverse();
        }
    }
    episodes.sort_by(|a, b| a.episode.total_cmp(&b.episode));
    episodes.dedup_by(|later, earlier| later.episode == earlier.episode);
}
