// src/config/consts.rs

// Documents
pub const INDEX_PATH: &str = "index.html";
pub const MIRROR_PATH: &str = "404.html"; // served for not-found routes, kept identical
pub const PRODUCTS_MARKER: &str = "// Add more products here over time";
pub const DEFAULT_INDENT: &str = "    ";

// Images
pub const IMAGES_DIR: &str = "images";
pub const IMAGE_EXT: &str = "webp";
pub const MAX_WIDTH: u32 = 350;
pub const WEBP_QUALITY: f32 = 85.0;
pub const WEBP_MAX_DIMENSION: u32 = 16383;
pub const SLUG_FALLBACK: &str = "image";

// Net config
pub const FETCH_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const REFERER: &str = "https://xpresszone.github.io/products/";
pub const ACCEPT_PRIMARY: &str = "image/webp,image/jpeg,image/png,image/*;q=0.8,*/*;q=0.5";
pub const ACCEPT_NO_AVIF: &str = "image/jpeg,image/png,*/*;q=0.5";
pub const ERROR_BODY_CHARS: usize = 300;
pub const DECODE_HEAD_BYTES: usize = 80;

// Local logs
pub const STORE_DIR: &str = ".store";
