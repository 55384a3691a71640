// src/core/sanitize.rs
use crate::config::consts::SLUG_FALLBACK;

/// Filename-safe stem from a product title.
/// ASCII letters/digits survive (lowercased); every other run becomes one `-`.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() { out.push('-'); }
            out.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() { SLUG_FALLBACK.to_string() } else { out }
}

/// Make a value safe inside a single-quoted script literal.
/// Newlines collapse to spaces, then the result is trimmed. `</` becomes
/// `<\/` so a value can never close the surrounding `<script>`.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\r' => {
                if chars.peek() == Some(&'\n') { chars.next(); }
                out.push(' ');
            }
            '\n' => out.push(' '),
            '<' if chars.peek() == Some(&'/') => {
                chars.next();
                out.push_str("<\\/");
            }
            c => out.push(c),
        }
    }
    out.trim().to_string()
}

/// Inverse of [`escape_literal`] for everything but the newline collapse.
pub fn unescape_literal(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// First `max` chars, on a char boundary.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Printable rendering of a byte prefix for diagnostics: `b"\x89PNG..."`.
pub fn byte_head(bytes: &[u8], max: usize) -> String {
    let head = &bytes[..bytes.len().min(max)];
    let mut out = String::from("b\"");
    for &b in head {
        out.extend(std::ascii::escape_default(b).map(char::from));
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_tags_cannot_escape_the_literal() {
        let escaped = escape_literal("A} </script><b>");
        assert_eq!(escaped, "A} <\\/script><b>");
        assert!(!escaped.contains("</"));
        assert_eq!(unescape_literal(&escaped), "A} </script><b>");
    }

    #[test]
    fn slugify_collapses_runs_and_trims() {
        assert_eq!(slugify("Men's Running Shoes!!"), "men-s-running-shoes");
        assert_eq!(slugify("--Test   Mug--"), "test-mug");
        assert_eq!(slugify("Café Crème 2"), "caf-cr-me-2");
    }

    #[test]
    fn slugify_falls_back_when_nothing_survives() {
        assert_eq!(slugify("   "), "image");
        assert_eq!(slugify("!!!"), "image");
        assert_eq!(slugify(""), "image");
    }

    #[test]
    fn escape_handles_quotes_backslashes_newlines() {
        assert_eq!(escape_literal("It's"), "It\\'s");
        assert_eq!(escape_literal("C:\\path"), "C:\\\\path");
        assert_eq!(escape_literal("line one\nline two"), "line one line two");
        assert_eq!(escape_literal("crlf\r\nhere"), "crlf here");
        assert_eq!(escape_literal("  padded \n"), "padded");
    }

    #[test]
    fn unescape_reverses_escape() {
        let samples = [
            "plain",
            "It's a \\ slash",
            "\\'",
            "'''",
            "trailing backslash \\",
            "multi\nline\nvalue",
            "  spaced 'quote'  ",
        ];
        for raw in samples {
            let expected = raw.replace('\n', " ").trim().to_string();
            assert_eq!(unescape_literal(&escape_literal(raw)), expected, "input {raw:?}");
        }
    }

    #[test]
    fn escaped_value_never_closes_the_literal() {
        let esc = escape_literal("a'b\\'c");
        // every quote must be preceded by an odd run of backslashes
        let bytes = esc.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\'' {
                let run = bytes[..i].iter().rev().take_while(|&&c| c == b'\\').count();
                assert_eq!(run % 2, 1, "unescaped quote at {i} in {esc:?}");
            }
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 300), "hi");
    }

    #[test]
    fn byte_head_is_printable() {
        assert_eq!(byte_head(b"\x00\x00\x00\x1cftypavif", 80), "b\"\\x00\\x00\\x00\\x1cftypavif\"");
        assert_eq!(byte_head(b"abcdef", 3), "b\"abc\"");
    }
}
