// src/asset.rs
//! Remote image → `images/<slug>.webp`.
//!
//! ```text
//! Initial ──fetch──▶ (AVIF?) ──yes──▶ RetriedOnUndesiredFormat ──decode──▶ Decoded
//!                       │                                          │
//!                       └─no──────────────decode──────────────────┴──▶ Failed
//! ```
//! At most two requests are made per image. Everything after decoding
//! (RGB conversion, width clamp, WebP at fixed quality) is deterministic.
use std::path::Path;

use image::{imageops::FilterType, DynamicImage, RgbImage};

use crate::config::consts::{
    ACCEPT_NO_AVIF, ACCEPT_PRIMARY, DECODE_HEAD_BYTES, ERROR_BODY_CHARS, WEBP_MAX_DIMENSION,
};
use crate::config::ImageOptions;
use crate::core::net::{Fetch, FetchRequest, FetchResponse};
use crate::core::sanitize::{byte_head, slugify, truncate_chars};
use crate::error::{Result, SyncError};
use crate::file;

/// Container brands that mark an AVIF payload inside the first bytes.
const AVIF_BRANDS: [&[u8]; 2] = [b"ftypavif", b"ftypavis"];
const SNIFF_BYTES: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acquisition {
    Initial,
    RetriedOnUndesiredFormat,
    Decoded,
    Failed,
}

/// One image fetch-and-decode, tracking which Accept header got used.
pub struct ImageFetch<'a, F: Fetch> {
    fetcher: &'a F,
    opts: &'a ImageOptions,
    url: &'a str,
    state: Acquisition,
    attempts: u8,
}

impl<'a, F: Fetch> ImageFetch<'a, F> {
    pub fn new(fetcher: &'a F, opts: &'a ImageOptions, url: &'a str) -> Self {
        Self { fetcher, opts, url, state: Acquisition::Initial, attempts: 0 }
    }

    pub fn state(&self) -> Acquisition { self.state }
    pub fn attempts(&self) -> u8 { self.attempts }

    /// Run to `Decoded` or `Failed`.
    pub fn run(&mut self) -> Result<DynamicImage> {
        let result = self.drive();
        self.state = if result.is_ok() { Acquisition::Decoded } else { Acquisition::Failed };
        result
    }

    fn drive(&mut self) -> Result<DynamicImage> {
        debug_assert_eq!(self.state, Acquisition::Initial);
        let mut resp = self.get(ACCEPT_PRIMARY)?;

        if is_undesired_format(&resp) {
            logf!("[image-download] Received AVIF, retrying with jpeg/png preference for {}", self.url);
            self.state = Acquisition::RetriedOnUndesiredFormat;
            resp = self.get(ACCEPT_NO_AVIF)?;
        }

        decode(self.url, &resp)
    }

    fn get(&mut self, accept: &str) -> Result<FetchResponse> {
        self.attempts += 1;
        let req = FetchRequest {
            url: self.url.to_string(),
            headers: vec![
                ("User-Agent", self.opts.user_agent.clone()),
                ("Referer", self.opts.referer.clone()),
                ("Accept", accept.to_string()),
            ],
            timeout: self.opts.timeout,
        };
        logd!("[image-download] GET {} (attempt {}, accept={})", self.url, self.attempts, accept);

        let resp = self.fetcher.fetch(&req).inspect_err(|e| {
            loge!("[image-download] Request error for {}: {}", self.url, e);
        })?;

        if !resp.is_success() {
            let text = String::from_utf8_lossy(&resp.body);
            let body = truncate_chars(&text, ERROR_BODY_CHARS).to_string();
            loge!("[image-download] HTTP {} for {}", resp.status, self.url);
            if !body.is_empty() {
                loge!("[image-download] body: {}", body);
            }
            return Err(SyncError::Fetch { url: self.url.to_string(), status: resp.status, body });
        }

        logd!("[image-download] {} bytes, content-type {:?}", resp.body.len(), resp.content_type);
        Ok(resp)
    }
}

/// AVIF by declared type, or by container brand in the first bytes.
pub fn is_undesired_format(resp: &FetchResponse) -> bool {
    if resp.content_type.to_ascii_lowercase().contains("avif") {
        return true;
    }
    let head = &resp.body[..resp.body.len().min(SNIFF_BYTES)];
    AVIF_BRANDS.iter().any(|brand| head.windows(brand.len()).any(|w| w == *brand))
}

fn decode(url: &str, resp: &FetchResponse) -> Result<DynamicImage> {
    image::load_from_memory(&resp.body).map_err(|e| {
        let head = byte_head(&resp.body, DECODE_HEAD_BYTES);
        loge!("[image-download] Unidentified image for {}: {}", url, e);
        loge!("[image-download] Content-Type: {}", resp.content_type);
        loge!("[image-download] Bytes head (len={}): {}", resp.body.len(), head);
        SyncError::Decode {
            url: url.to_string(),
            content_type: resp.content_type.clone(),
            len: resp.body.len(),
            head,
        }
    })
}

/// Drop alpha/palette and clamp width, keeping aspect ratio.
pub fn normalize(img: DynamicImage, max_width: u32) -> RgbImage {
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();
    if w <= max_width {
        return rgb;
    }
    let (nw, nh) = scaled_size(w, h, max_width);
    logd!("[image] resize {}x{} -> {}x{}", w, h, nw, nh);
    image::imageops::resize(&rgb, nw, nh, FilterType::Lanczos3)
}

/// `(max_width, round(max_width * h / w))`, height at least 1.
pub fn scaled_size(w: u32, h: u32, max_width: u32) -> (u32, u32) {
    let nh = (f64::from(max_width) * f64::from(h) / f64::from(w)).round() as u32;
    (max_width, nh.max(1))
}

pub fn encode_webp(img: &RgbImage, quality: f32) -> Result<Vec<u8>> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(SyncError::Encode { message: format!("cannot encode empty {w}x{h} image") });
    }
    if w > WEBP_MAX_DIMENSION || h > WEBP_MAX_DIMENSION {
        return Err(SyncError::Encode {
            message: format!("{w}x{h} exceeds the WebP limit of {WEBP_MAX_DIMENSION} px per side"),
        });
    }
    let mem = webp::Encoder::from_rgb(img.as_raw(), w, h)
        .encode_simple(false, quality)
        .map_err(|e| SyncError::Encode { message: format!("{e:?}") })?;
    Ok(mem.to_vec())
}

/// Fetch `url`, normalize it, write `<dir>/<slug(title)>.webp`.
/// Returns the written path with forward slashes.
pub fn cache_image<F: Fetch>(fetcher: &F, opts: &ImageOptions, url: &str, title: &str) -> Result<String> {
    let dest = opts.dest_for(&slugify(title));

    let mut fetch = ImageFetch::new(fetcher, opts, url);
    let img = fetch.run()?;

    let rgb = normalize(img, opts.max_width);
    let bytes = encode_webp(&rgb, opts.quality)?;
    write_asset(&dest, &bytes)?;

    logf!("[image] cached {} -> {} ({}x{}, {} bytes)", url, dest.display(), rgb.width(), rgb.height(), bytes.len());
    Ok(file::to_forward_slashes(&dest))
}

fn write_asset(dest: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            file::ensure_directory(parent)?;
        }
    }
    std::fs::write(dest, bytes).map_err(|e| SyncError::io(dest, e))
}
