//! Minimal HLS master playlist reader

use url::Url;

/// One `#EXT-X-STREAM-INF` entry of a master playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub url: String,
    /// Vertical resolution, when the entry declares `RESOLUTION=WxH`
    pub height: Option<u32>,
    pub bandwidth: Option<u64>,
}

impl Variant {
    /// Quality label such as `720p`
    #[must_use]
    pub fn quality(&self) -> Option<String> {
        self.height.map(|h| format!("{h}p"))
    }
}

/// Parse the variant streams of a master playlist.
///
/// Relative variant URIs are resolved against `base`. The result is sorted by
/// descending height, then bandwidth.
#[must_use]
pub fn parse_master_playlist(body: &str, base: &Url) -> Vec<Variant> {
    let mut variants = Vec::new();
    let mut lines = body.lines().map(str::trim);

    while let Some(line) = lines.next() {
        let Some(attrs) = line.strip_prefix("#EXT-X-STREAM-INF:") else {
            continue;
        };
        let Some(uri) = lines.by_ref().find(|l| !l.is_empty() && !l.starts_with('#')) else {
            break;
        };
        let url = base.join(uri).map_or_else(|_| uri.to_string(), |u| u.to_string());
        variants.push(Variant {
            url,
            height: attribute(attrs, "RESOLUTION")
                .and_then(|r| r.split_once('x'))
                .and_then(|(_, h)| h.parse().ok()),
            bandwidth: attribute(attrs, "BANDWIDTH").and_then(|b| b.parse().ok()),
        });
    }

    variants.sort_by(|a, b| b.height.cmp(&a.height).then(b.bandwidth.cmp(&a.bandwidth)));
    variants
}

/// Read `NAME=value` from an attribute list; quoted values may contain commas.
fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = attrs;
    while !rest.is_empty() {
        let (key, after) = rest.split_once('=')?;
        let (value, next) = if let Some(quoted) = after.strip_prefix('"') {
            let end = quoted.find('"')?;
            (&quoted[..end], quoted[end + 1..].trim_start_matches(','))
        } else {
            after.split_once(',').unwrap_or((after, ""))
        };
        if key.trim() == name {
            return Some(value);
        }
        rest = next;
    }
    None
}
