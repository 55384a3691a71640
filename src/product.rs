// src/product.rs
use serde::Deserialize;

use crate::error::{Result, SyncError};

pub const FIELDS: [&str; 5] = ["title", "url", "image", "alt", "description"];
const URL_FIELDS: [&str; 2] = ["url", "image"];

/// Raw form input. Missing keys default to empty so every problem can be
/// reported at once instead of failing on the first absent key.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ProductInput {
    pub title: String,
    pub url: String,
    pub image: String,
    pub alt: String,
    pub description: String,
}

impl ProductInput {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text.trim())
            .map_err(|e| SyncError::validation(format!("Invalid JSON: {e}")))
    }

    pub fn get(&self, key: &str) -> &str {
        match key {
            "title" => &self.title,
            "url" => &self.url,
            "image" => &self.image,
            "alt" => &self.alt,
            "description" => &self.description,
            _ => "",
        }
    }

    /// Every problem with this input, in field order. Empty means valid.
    pub fn problems(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for key in FIELDS {
            if self.get(key).trim().is_empty() {
                errors.push(format!("{key} is required."));
            }
        }
        for key in URL_FIELDS {
            let value = self.get(key).trim();
            if !value.is_empty() && !is_http_url(value) {
                errors.push(format!("{key} must start with http:// or https://"));
            }
        }
        errors
    }

    pub fn validate(self) -> Result<ProductRecord> {
        let problems = self.problems();
        if !problems.is_empty() {
            return Err(SyncError::Validation { problems });
        }
        Ok(ProductRecord {
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
            image: self.image.trim().to_string(),
            alt: self.alt.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// A product that passed validation. Fields are trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductRecord {
    title: String,
    url: String,
    image: String,
    alt: String,
    description: String,
}

impl ProductRecord {
    pub fn title(&self) -> &str { &self.title }
    pub fn url(&self) -> &str { &self.url }
    pub fn image(&self) -> &str { &self.image }
    pub fn alt(&self) -> &str { &self.alt }
    pub fn description(&self) -> &str { &self.description }

    /// Point `image` at the cached local asset.
    pub fn with_image<S: Into<String>>(mut self, image: S) -> Self {
        self.image = image.into();
        self
    }
}

/// Case-insensitive `http://` / `https://` prefix check.
pub fn is_http_url(value: &str) -> bool {
    let lc = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    lc.starts_with("http://") || lc.starts_with("https://")
}
