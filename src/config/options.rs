// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq)]
pub struct SyncOptions {
    pub documents: DocumentPaths,
    pub image: ImageOptions,
    pub marker: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            documents: DocumentPaths::default(),
            image: ImageOptions::default(),
            marker: PRODUCTS_MARKER.to_string(),
        }
    }
}

/// Where the catalog page lives, and where its byte-identical copy goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentPaths {
    pub primary: PathBuf,
    pub mirror: Option<PathBuf>,
}

impl Default for DocumentPaths {
    fn default() -> Self {
        Self {
            primary: PathBuf::from(INDEX_PATH),
            mirror: Some(PathBuf::from(MIRROR_PATH)),
        }
    }
}

impl DocumentPaths {
    /// Primary first, then the mirror if there is one.
    pub fn targets(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.primary.as_path()).chain(self.mirror.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageOptions {
    pub dir: PathBuf,
    pub max_width: u32,
    pub quality: f32,
    pub timeout: Duration,
    pub user_agent: String,
    pub referer: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(IMAGES_DIR),
            max_width: MAX_WIDTH,
            quality: WEBP_QUALITY,
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            referer: REFERER.to_string(),
        }
    }
}

impl ImageOptions {
    /// `<dir>/<stem>.webp`
    pub fn dest_for(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}.{IMAGE_EXT}"))
    }
}
