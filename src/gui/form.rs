// src/gui/form.rs
// Pure state behind the product form: what the editor starts with and what
// the live preview shows. No egui in here so it can be tested headless.
use crate::product::{ProductInput, FIELDS};

pub const TEMPLATE: &str = "{\n  \"title\": \"\",\n  \"url\": \"\",\n  \"image\": \"\",\n  \"alt\": \"\",\n  \"description\": \"\"\n}\n";

/// Labels in display order; `true` marks fields rendered as links.
pub const PREVIEW_ROWS: [(&str, &str, bool); 5] = [
    ("Title", FIELDS[0], false),
    ("URL", FIELDS[1], true),
    ("Image", FIELDS[2], true),
    ("Alt", FIELDS[3], false),
    ("Description", FIELDS[4], false),
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preview {
    pub product: Option<ProductInput>,
    pub message: String,
    pub ok: bool,
}

impl Preview {
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self { product: None, message: s!("Awaiting JSON..."), ok: false };
        }
        let product = match ProductInput::from_json(text) {
            Ok(p) => p,
            Err(e) => return Self { product: None, message: e.to_string(), ok: false },
        };
        let problems = product.problems();
        let ok = problems.is_empty();
        let message = if ok { s!("Valid") } else { problems.join(" | ") };
        Self { product: Some(product), message, ok }
    }

    /// Trimmed value for a preview row, empty when unknown.
    pub fn value(&self, key: &str) -> &str {
        self.product.as_ref().map_or("", |p| p.get(key).trim())
    }
}
