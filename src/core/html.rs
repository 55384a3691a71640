// src/core/html.rs
//! Anchor lookups on raw page text. Nothing here parses HTML; callers get
//! byte offsets and splice around them.
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// First `<script type="application/ld+json">` block. Group 1 is the JSON
/// object, stopping at the first `}` that is followed only by whitespace and
/// the closing tag.
static LD_JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<script\b[^>]*\btype\s*=\s*["']application/ld\+json["'][^>]*>\s*(\{[\s\S]*?\})\s*</script>"#,
    )
    .expect("static regex")
});

pub const LD_JSON_ANCHOR: &str = r#"<script type="application/ld+json">"#;

/// Byte offset of the first occurrence of `marker`.
pub fn find_anchor(s: &str, marker: &str) -> Option<usize> {
    if marker.is_empty() { return None; }
    s.find(marker)
}

/// Byte range of the JSON object inside the first structured-data block.
pub fn ld_json_span(s: &str) -> Option<Range<usize>> {
    LD_JSON_BLOCK
        .captures(s)
        .and_then(|c| c.get(1))
        .map(|m| m.range())
}

/// Start of the line containing byte `at`.
pub fn line_start(s: &str, at: usize) -> usize {
    s[..at].rfind('\n').map_or(0, |i| i + 1)
}

/// Whitespace between the start of the line and `at`, or `None` when
/// something else shares the line.
pub fn leading_indent(s: &str, at: usize) -> Option<&str> {
    let start = line_start(s, at);
    let lead = &s[start..at];
    lead.chars().all(|c| c == ' ' || c == '\t').then_some(lead)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_ld_json_object_only() {
        let doc = r#"<head>
<script type="application/ld+json">
{ "a": { "b": 1 } }
</script>
</head>"#;
        let span = ld_json_span(doc).unwrap();
        assert_eq!(&doc[span], r#"{ "a": { "b": 1 } }"#);
    }

    #[test]
    fn ld_json_tolerates_case_quotes_and_attrs() {
        let doc = "<SCRIPT id=x TYPE='application/ld+json' data-k>{\"k\":1}</SCRIPT>";
        let span = ld_json_span(doc).unwrap();
        assert_eq!(&doc[span], "{\"k\":1}");
    }

    #[test]
    fn ld_json_takes_first_block() {
        let doc = r#"<script type="application/ld+json">{"n":1}</script>
<script type="application/ld+json">{"n":2}</script>"#;
        let span = ld_json_span(doc).unwrap();
        assert_eq!(&doc[span], r#"{"n":1}"#);
    }

    #[test]
    fn other_script_types_are_ignored() {
        let doc = r#"<script type="text/javascript">var x = {a: 1};</script>"#;
        assert!(ld_json_span(doc).is_none());
    }

    #[test]
    fn indent_detection() {
        let s = "  {\n    // marker";
        let at = s.find("//").unwrap();
        assert_eq!(leading_indent(s, at), Some("    "));

        let s2 = "    }, // marker";
        let at2 = s2.find("//").unwrap();
        assert_eq!(leading_indent(s2, at2), None);

        assert_eq!(line_start("abc", 2), 0);
    }
}
