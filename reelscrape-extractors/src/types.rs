//! Extractor output types and the streaming server enum

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Video host backends.
///
/// This is the superset across all hosts; a provider only honors the subset it advertises
/// and only some values have an extractor in [`crate::ExtractorRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamingServer {
    AsianLoad,
    GogoCdn,
    MixDrop,
    StreamTape,
    StreamSb,
    Filemoon,
    VidCloud,
    UpCloud,
    VizCloud,
    MyCloud,
    VidStreaming,
    SmashyStream,
    StreamLare,
    Kwik,
}

impl StreamingServer {
    pub const ALL: [Self; 14] = [
        Self::AsianLoad,
        Self::GogoCdn,
        Self::MixDrop,
        Self::StreamTape,
        Self::StreamSb,
        Self::Filemoon,
        Self::VidCloud,
        Self::UpCloud,
        Self::VizCloud,
        Self::MyCloud,
        Self::VidStreaming,
        Self::SmashyStream,
        Self::StreamLare,
        Self::Kwik,
    ];

    /// Stable wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AsianLoad => "asianload",
            Self::GogoCdn => "gogocdn",
            Self::MixDrop => "mixdrop",
            Self::StreamTape => "streamtape",
            Self::StreamSb => "streamsb",
            Self::Filemoon => "filemoon",
            Self::VidCloud => "vidcloud",
            Self::UpCloud => "upcloud",
            Self::VizCloud => "vizcloud",
            Self::MyCloud => "mycloud",
            Self::VidStreaming => "vidstreaming",
            Self::SmashyStream => "smashystream",
            Self::StreamLare => "streamlare",
            Self::Kwik => "kwik",
        }
    }
}

impl fmt::Display for StreamingServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamingServer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|server| server.as_str() == wanted)
            .ok_or_else(|| format!("unknown streaming server: {s}"))
    }
}

/// One direct media location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(rename = "isM3U8")]
    pub is_m3u8: bool,
}

impl Source {
    /// Source whose HLS flag is derived from the URL.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let is_m3u8 = url.contains(".m3u8");
        Self { url, quality: None, is_m3u8 }
    }

    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }
}

/// Subtitle track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtitle {
    pub url: String,
    pub lang: String,
}

/// Result of one extraction: ordered sources plus optional subtitles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSources {
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtitles: Vec<Subtitle>,
}

impl VideoSources {
    #[must_use]
    pub const fn new(sources: Vec<Source>) -> Self {
        Self { sources, subtitles: Vec::new() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
