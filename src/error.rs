// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

/// Everything that can stop a product from landing in the catalog.
/// The pipeline never catches and continues: the first one of these wins.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{}", .problems.join(" | "))]
    Validation { problems: Vec<String> },

    /// The host document no longer has the shape this tool expects.
    #[error("anchor not found: {anchor}")]
    AnchorNotFound { anchor: String },

    #[error("structured data is not valid JSON (line {line}, column {column}): {message}")]
    MalformedData { line: usize, column: usize, message: String },

    #[error("HTTP {status} for {url}{}", body_suffix(.body))]
    Fetch { url: String, status: u16, body: String },

    #[error("request error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("unidentified image for {url} (content-type: {content_type}, {len} bytes, head: {head})")]
    Decode { url: String, content_type: String, len: usize, head: String },

    #[error("image encode failed: {message}")]
    Encode { message: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Primary document was written, mirror was not. The two now differ.
    #[error("wrote {} but failed to mirror to {}: {source}", .written.display(), .failed.display())]
    PartialPersist {
        written: PathBuf,
        failed: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub fn validation<S: Into<String>>(problem: S) -> Self {
        SyncError::Validation { problems: vec![problem.into()] }
    }

    pub fn anchor<S: Into<String>>(anchor: S) -> Self {
        SyncError::AnchorNotFound { anchor: anchor.into() }
    }

    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        SyncError::Io { path: path.into(), source }
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() { String::new() } else { format!(": {body}") }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::MalformedData { line: e.line(), column: e.column(), message: e.to_string() }
    }
}
