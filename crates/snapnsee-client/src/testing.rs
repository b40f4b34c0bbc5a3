//! Scripted stand-ins for the network, shared with dependent crates' tests.

use async_trait::async_trait;
use reqwest::Url;
use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;
use crate::error::TransportError;
use crate::transport::{FilePart, HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub file: Option<FilePart>,
}

/// Replays queued responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_response(status, body.to_string());
    }

    pub fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::new(message)));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next(&self, method: &'static str, url: &Url, file: Option<FilePart>) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            file,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted response left")))
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        self.next("GET", url, None)
    }

    async fn post_file(&self, url: &Url, file: FilePart) -> Result<HttpResponse, TransportError> {
        self.next("POST", url, Some(file))
    }
}

/// A tiny PNG, enough for the JPEG re-encoder
pub fn sample_png() -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 40, 40, 255]));
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}
