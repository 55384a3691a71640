// src/patch.rs
//! Splicing new products into the catalog page.
//!
//! The page carries the product list twice:
//! - an inline JS array whose tail is marked by a comment
//!   (`// Add more products here over time`), and
//! - a `<script type="application/ld+json">` `ItemList` for search engines.
//!
//! The JS array is not JSON, so it is only ever touched as text around the
//! marker. The JSON-LD block is parsed, extended and re-serialized, because
//! `position` and `numberOfItems` have to be recomputed exactly.
//!
//! Both operations take the page text by reference and return a new string.
//! Only the first anchor is used. Bytes outside the touched region are
//! copied through unchanged.
use serde_json::{Map, Value};

use crate::config::consts::DEFAULT_INDENT;
use crate::core::html::{find_anchor, ld_json_span, leading_indent, line_start, LD_JSON_ANCHOR};
use crate::error::{Result, SyncError};
use crate::serialize::{ListItem, ScriptEntry};

const ITEMS_KEY: &str = "itemListElement";
const COUNT_KEY: &str = "numberOfItems";

/// Insert `entry` just above the first `marker` line.
///
/// The marker keeps its indentation and the entry is rendered at that
/// indentation. If the previous entry ends in a bare `}` (an earlier append
/// that lost its comma) the comma is restored, and a marker that shares its
/// line with a closing brace is moved onto its own line.
pub fn insert_script_entry(text: &str, marker: &str, entry: &ScriptEntry) -> Result<String> {
    let at = find_anchor(text, marker).ok_or_else(|| SyncError::anchor(marker))?;

    let (head, indent) = match leading_indent(text, at) {
        Some(indent) => (&text[..line_start(text, at)], indent),
        // `}  // marker` and friends: split the line at the marker
        None => (text[..at].trim_end_matches([' ', '\t']), DEFAULT_INDENT),
    };

    let block = entry.render(indent);
    let mut out = String::with_capacity(text.len() + block.len() + indent.len() + 2);

    let body = head.trim_end();
    if body.ends_with('}') {
        // previous object has no separator
        out.push_str(body);
        out.push(',');
        out.push_str(&head[body.len()..]);
    } else {
        out.push_str(head);
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }

    out.push_str(&block);
    out.push_str(indent);
    out.push_str(&text[at..]);
    Ok(out)
}

/// Number of entries currently in the first JSON-LD block's `itemListElement`.
pub fn structured_item_count(text: &str) -> Result<usize> {
    let span = ld_json_span(text).ok_or_else(|| SyncError::anchor(LD_JSON_ANCHOR))?;
    let data = parse_object(&text[span])?;
    Ok(data.get(ITEMS_KEY).and_then(Value::as_array).map_or(0, Vec::len))
}

/// Append `item` to the first JSON-LD block and recount.
///
/// `numberOfItems` always ends up equal to the array length. The block is
/// re-serialized with two-space indentation in its original key order; only
/// the matched object is replaced.
pub fn insert_structured_item(text: &str, item: &ListItem) -> Result<String> {
    let span = ld_json_span(text).ok_or_else(|| SyncError::anchor(LD_JSON_ANCHOR))?;
    let mut data = parse_object(&text[span.clone()])?;

    let entry = serde_json::to_value(item)?;
    let items = data.entry(ITEMS_KEY).or_insert_with(|| Value::Array(Vec::new()));
    let count = match items {
        Value::Array(list) => {
            list.push(entry);
            list.len()
        }
        other => {
            return Err(SyncError::MalformedData {
                line: 0,
                column: 0,
                message: format!("{ITEMS_KEY} is not an array (found {})", kind_of(other)),
            });
        }
    };
    data.insert(COUNT_KEY.to_string(), Value::from(count));

    // `</` only occurs inside strings; `<\/` is the same JSON string
    let rendered = serde_json::to_string_pretty(&Value::Object(data))?.replace("</", "<\\/");

    let mut out = String::with_capacity(text.len() + rendered.len());
    out.push_str(&text[..span.start]);
    out.push_str(&rendered);
    out.push_str(&text[span.end..]);
    Ok(out)
}

fn parse_object(json: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        other => Err(SyncError::MalformedData {
            line: 1,
            column: 1,
            message: format!("expected a JSON object, found {}", kind_of(&other)),
        }),
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
