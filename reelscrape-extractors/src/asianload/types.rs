//! Decrypted `encrypt-ajax.php` payload

use serde::{Deserialize, Serialize};

/// Encrypted envelope returned by the ajax endpoint
#[derive(Debug, Deserialize)]
pub struct AjaxEnvelope {
    pub data: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AjaxData {
    #[serde(default)]
    pub source: Vec<AjaxFile>,
    #[serde(default)]
    pub source_bk: Vec<AjaxFile>,
    #[serde(default)]
    pub track: Option<AjaxTracks>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AjaxFile {
    pub file: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AjaxTracks {
    #[serde(default)]
    pub tracks: Vec<AjaxTrack>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AjaxTrack {
    pub file: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl AjaxTrack {
    /// Thumbnail sprites carry no language; they are the player's default track.
    #[must_use]
    pub fn lang(&self) -> String {
        if self.kind == "thumbnails" {
            return "Default (maybe)".to_string();
        }
        self.label
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(&self.kind)
            .to_string()
    }
}
