// src/core/net.rs
// HTTP GET seam. Anything that can answer a FetchRequest can feed the image
// pipeline; the real one is reqwest's blocking client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::{Result, SyncError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Whatever came back, success or not. Only transport failures are errors.
#[derive(Clone, Debug, Default)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Fetch {
    fn fetch(&self, req: &FetchRequest) -> Result<FetchResponse>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, req: &FetchRequest) -> Result<FetchResponse> {
        (**self).fetch(req)
    }
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| SyncError::Transport { url: String::new(), message: e.to_string() })?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, req: &FetchRequest) -> Result<FetchResponse> {
        let transport = |e: reqwest::Error| SyncError::Transport { url: req.url.clone(), message: e.to_string() };

        let mut builder = self.client.get(&req.url).timeout(req.timeout);
        for (name, value) in &req.headers {
            builder = builder.header(*name, value.as_str());
        }

        let resp = builder.send().map_err(transport)?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = resp.bytes().map_err(transport)?.to_vec();

        Ok(FetchResponse { status, content_type, body })
    }
}
