//! Decoder for Dean Edwards' P.A.C.K.E.R. scripts
//!
//! Several hosts hide their player setup inside
//! `eval(function(p,a,c,k,e,d){...}('payload',base,count,'k0|k1|...'.split('|'),0,{}))`.
//! Every word token in the payload is a number in `base` indexing the keyword list.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ExtractorError;

static RE_PACKED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)\}\s*\(\s*'((?:[^'\\]|\\.)*)'\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*'((?:[^'\\]|\\.)*)'\.split\(\s*'\|'\s*\)"#,
    )
    .expect("invalid packer regex")
});
static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("invalid word regex"));

const ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Whether `source` contains a packed script.
#[must_use]
pub fn is_packed(source: &str) -> bool {
    source.contains("eval(function(p,a,c,k,e,") && RE_PACKED.is_match(source)
}

/// Unpack the first packed script found in `source`.
pub fn unpack(source: &str) -> Result<String, ExtractorError> {
    let caps = RE_PACKED
        .captures(source)
        .ok_or_else(|| ExtractorError::Parse("no packed script found".to_string()))?;

    let payload = unescape(&caps[1]);
    let base: u32 = caps[2]
        .parse()
        .map_err(|e| ExtractorError::Parse(format!("bad packer radix: {e}")))?;
    let count: usize = caps[3]
        .parse()
        .map_err(|e| ExtractorError::Parse(format!("bad packer count: {e}")))?;
    let keywords: Vec<String> = unescape(&caps[4]).split('|').map(str::to_string).collect();

    if !(2..=62).contains(&base) {
        return Err(ExtractorError::Parse(format!("unsupported packer radix {base}")));
    }
    if keywords.len() < count {
        tracing::debug!(count, found = keywords.len(), "packer keyword list shorter than declared");
    }

    let unpacked = RE_WORD.replace_all(&payload, |word: &Captures<'_>| {
        let token = &word[0];
        unbase(token, base)
            .and_then(|index| keywords.get(index))
            .filter(|keyword| !keyword.is_empty())
            .map_or_else(|| token.to_string(), Clone::clone)
    });

    Ok(unpacked.into_owned())
}

/// Parse `token` as a number in `base` using the packer alphabet.
fn unbase(token: &str, base: u32) -> Option<usize> {
    let mut value: usize = 0;
    for ch in token.chars() {
        let digit = ALPHABET.find(ch)?;
        if digit >= base as usize {
            return None;
        }
        value = value.checked_mul(base as usize)?.checked_add(digit)?;
    }
    Some(value)
}

fn unescape(s: &str) -> String {
    s.replace("\\'", "'").replace("\\\\", "\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKED: &str = r#"<script>
eval(function(p,a,c,k,e,d){e=function(c){return c.toString(36)};if(!''.replace(/^/,String)){while(c--){d[c.toString(a)]=k[c]||c.toString(a)}k=[function(e){return d[e]}];e=function(){return'\\w+'};c=1};while(c--){if(k[c]){p=p.replace(new RegExp('\\b'+e(c)+'\\b','g'),k[c])}}return p}('0.1="//2.3/4.5";0.6="//2.3/7.8"',36,9,'MDCore|wurl|delivery|net|v|mp4|poster|thumb|jpg'.split('|'),0,{}))
</script>"#;

    #[test]
    fn test_unpack_replaces_tokens() {
        assert!(is_packed(PACKED));
        let js = unpack(PACKED).unwrap();
        assert_eq!(js, r#"MDCore.wurl="//delivery.net/v.mp4";MDCore.poster="//delivery.net/thumb.jpg""#);
    }

    #[test]
    fn test_unpack_keeps_unknown_tokens() {
        let js = unpack("}('0 1 z',36,2,'a||'.split('|'),0,{}))").unwrap();
        // index 1 is an empty keyword, index 35 is out of range
        assert_eq!(js, "a 1 z");
    }

    #[test]
    fn test_unpack_escaped_quotes() {
        let js = unpack(r"}('0(\'1\')',10,2,'alert|hi'.split('|'),0,{}))").unwrap();
        assert_eq!(js, "alert('hi')");
    }

    #[test]
    fn test_unbase_high_radix() {
        assert_eq!(unbase("A", 62), Some(36));
        assert_eq!(unbase("10", 62), Some(62));
        assert_eq!(unbase("z", 10), None);
    }

    #[test]
    fn test_unpack_missing_script() {
        assert!(!is_packed("<html></html>"));
        assert!(matches!(unpack("<html></html>"), Err(ExtractorError::Parse(_))));
    }
}
