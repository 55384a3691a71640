// src/serialize.rs
//! Renders a [`ProductRecord`] into the two shapes the catalog page embeds:
//! an object literal for the inline `products` array, and a schema.org
//! `ListItem` for the JSON-LD block.
use serde::Serialize;

use crate::core::sanitize::escape_literal;
use crate::error::{Result, SyncError};
use crate::product::{is_http_url, ProductRecord};

/// One `{ title: '…', … },` block, already escaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptEntry {
    fields: [(&'static str, String); 5],
}

impl ScriptEntry {
    pub fn from_record(rec: &ProductRecord) -> Self {
        Self {
            fields: [
                ("title", escape_literal(rec.title())),
                ("url", escape_literal(rec.url())),
                ("image", escape_literal(rec.image())),
                ("alt", escape_literal(rec.alt())),
                ("description", escape_literal(rec.description())),
            ],
        }
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// Text for the array, braces at `indent`, fields two spaces deeper.
    /// Ends with `},\n`.
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::with_capacity(256);
        out.push_str(indent);
        out.push_str("{\n");
        let last = self.fields.len() - 1;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            let sep = if i == last { "" } else { "," };
            out.push_str(&format!("{indent}  {key}: '{value}'{sep}\n"));
        }
        out.push_str(indent);
        out.push_str("},\n");
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: usize,
    pub url: String,
    pub name: String,
    pub image: String,
}

impl ListItem {
    /// `existing` is the number of items already in `itemListElement`.
    pub fn from_record(rec: &ProductRecord, existing: usize) -> Self {
        Self {
            kind: "ListItem",
            position: existing + 1,
            url: rec.url().to_string(),
            name: rec.title().to_string(),
            image: rec.image().to_string(),
        }
    }
}

/// Both forms for one product.
#[derive(Clone, Debug)]
pub struct Serialized {
    pub entry: ScriptEntry,
    pub item: ListItem,
}

/// Both forms for `rec`, positioned after `existing` items.
///
/// The record was validated on construction, but its image may have been
/// swapped for a local path since; re-check what must still hold.
pub fn serialize(rec: &ProductRecord, existing: usize) -> Result<Serialized> {
    let mut problems = Vec::new();
    for (key, value) in [
        ("title", rec.title()),
        ("url", rec.url()),
        ("image", rec.image()),
        ("alt", rec.alt()),
        ("description", rec.description()),
    ] {
        if value.trim().is_empty() {
            problems.push(format!("{key} is required."));
        }
    }
    if !rec.url().is_empty() && !is_http_url(rec.url()) {
        problems.push(s!("url must start with http:// or https://"));
    }
    if !problems.is_empty() {
        return Err(SyncError::Validation { problems });
    }
    Ok(Serialized { entry: ScriptEntry::from_record(rec), item: ListItem::from_record(rec, existing) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sanitize::unescape_literal;
    use crate::product::ProductInput;

    fn record(title: &str, description: &str) -> ProductRecord {
        ProductInput {
            title: title.into(),
            url: "https://example.com/p".into(),
            image: "https://example.com/i.jpg".into(),
            alt: "alt".into(),
            description: description.into(),
        }
        .validate()
        .unwrap()
        .with_image("images/x.webp")
    }

    #[test]
    fn renders_entry_in_page_layout() {
        let entry = ScriptEntry::from_record(&record("Test Mug", "Nice mug"));
        let expected = "    {\n      title: 'Test Mug',\n      url: 'https://example.com/p',\n      image: 'images/x.webp',\n      alt: 'alt',\n      description: 'Nice mug'\n    },\n";
        assert_eq!(entry.render("    "), expected);
    }

    #[test]
    fn entry_follows_given_indent() {
        let text = ScriptEntry::from_record(&record("A", "B")).render("\t");
        assert!(text.starts_with("\t{\n\t  title: 'A',"));
        assert!(text.ends_with("\t},\n"));
    }

    #[test]
    fn escaped_fields_round_trip() {
        let rec = record("Bob's \\ Mug", "two\nlines");
        let entry = ScriptEntry::from_record(&rec);
        let values: Vec<String> = entry.fields().iter().map(|(_, v)| unescape_literal(v)).collect();
        assert_eq!(values[0], "Bob's \\ Mug");
        assert_eq!(values[4], "two lines");
    }

    #[test]
    fn list_item_position_follows_count() {
        let item = ListItem::from_record(&record("Test Mug", "d"), 4);
        assert_eq!(item.position, 5);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["@type"], "ListItem");
        assert_eq!(json["name"], "Test Mug");
        assert_eq!(json["image"], "images/x.webp");
    }

    #[test]
    fn serialize_rejects_blanked_image() {
        let rec = record("T", "d").with_image("  ");
        match serialize(&rec, 0).unwrap_err() {
            SyncError::Validation { problems } => assert_eq!(problems, vec!["image is required."]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn serialize_builds_both_forms() {
        let both = serialize(&record("T", "d"), 2).unwrap();
        assert_eq!(both.item.position, 3);
        assert_eq!(both.entry.fields()[0], ("title", s!("T")));
    }

    #[test]
    fn list_item_key_order_is_stable() {
        let item = ListItem::from_record(&record("T", "d"), 0);
        let text = serde_json::to_string(&item).unwrap();
        assert_eq!(
            text,
            r#"{"@type":"ListItem","position":1,"url":"https://example.com/p","name":"T","image":"images/x.webp"}"#
        );
    }
}
