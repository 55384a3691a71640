// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Cursor;
use std::path::PathBuf;

use catalog_sync::core::net::{Fetch, FetchRequest, FetchResponse};
use catalog_sync::{ProductInput, ProductRecord, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

pub fn mug() -> ProductInput {
    ProductInput {
        title: "Test Mug".into(),
        url: "https://example.com/p".into(),
        image: "https://example.com/i.jpg".into(),
        alt: "A mug".into(),
        description: "Nice mug".into(),
    }
}

pub fn mug_record() -> ProductRecord {
    mug().validate().unwrap()
}

pub fn jpeg_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(w, h, Rgb([30, 120, 200]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img).write_to(&mut out, ImageFormat::Jpeg).unwrap();
    out.into_inner()
}

pub fn ok(content_type: &str, body: Vec<u8>) -> FetchResponse {
    FetchResponse { status: 200, content_type: content_type.to_string(), body }
}

pub fn avif() -> FetchResponse {
    let mut body = b"\x00\x00\x00\x20ftypavif\x00\x00\x00\x00mif1miaf".to_vec();
    body.resize(128, 0);
    ok("image/avif", body)
}

/// Replies in order; remembers every request.
pub struct ScriptedFetch {
    replies: RefCell<Vec<FetchResponse>>,
    pub seen: RefCell<Vec<FetchRequest>>,
}

impl ScriptedFetch {
    pub fn new(mut replies: Vec<FetchResponse>) -> Self {
        replies.reverse();
        Self { replies: RefCell::new(replies), seen: RefCell::new(Vec::new()) }
    }

    pub fn accepts(&self) -> Vec<String> {
        self.seen.borrow().iter().map(|r| r.header("Accept").unwrap_or_default().to_string()).collect()
    }
}

impl Fetch for ScriptedFetch {
    fn fetch(&self, req: &FetchRequest) -> Result<FetchResponse> {
        self.seen.borrow_mut().push(req.clone());
        Ok(self.replies.borrow_mut().pop().expect("no scripted reply left"))
    }
}
