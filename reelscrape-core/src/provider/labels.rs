//! Declarative label stripping for free-text info fields
//!
//! Sites render fields like `<p>Released: 2021</p>`. Each provider declares a
//! `field -> label` table and every field goes through the same [`LabelTable::strip`].

/// `(field, label)` pairs, e.g. `("release_date", "Released")`
#[derive(Debug, Clone, Copy)]
pub struct LabelTable(pub &'static [(&'static str, &'static str)]);

impl LabelTable {
    /// Label declared for `field`
    #[must_use]
    pub fn label(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, label)| *label)
    }

    /// Remove `<label>:` from the start of `text` (case-insensitive), drop line
    /// breaks, and trim. An empty result is `None`.
    #[must_use]
    pub fn strip(&self, field: &str, text: &str) -> Option<String> {
        let flat = text.replace(['\r', '\n'], "");
        let flat = flat.trim();
        let value = self
            .label(field)
            .and_then(|label| strip_label(flat, label))
            .unwrap_or(flat)
            .trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Whether `text` starts with the label declared for `field`.
    #[must_use]
    pub fn matches(&self, field: &str, text: &str) -> bool {
        self.label(field)
            .is_some_and(|label| strip_label(text.trim(), label).is_some())
    }
}

fn strip_label<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let head = text.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    text[label.len()..].trim_start().strip_prefix(':')
}
