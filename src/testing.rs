//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io::{Cursor, Write};

use serde_json::json;

use crate::error::GrayHarvestError;
use crate::transport::Transport;

/// Scripted transport that records every call it gets.
#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: RefCell<VecDeque<Result<String, GrayHarvestError>>>,
    live: HashSet<String>,
    bodies: HashMap<String, Vec<u8>>,
    pub(crate) posts: RefCell<Vec<(String, String)>>,
    pub(crate) heads: RefCell<Vec<String>>,
    pub(crate) fetches: RefCell<Vec<String>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues a well-formed Gemini reply carrying `text`.
    pub(crate) fn reply(self, text: &str) -> Self {
        self.reply_raw(&gemini_reply(text))
    }

    /// Queues a raw response body.
    pub(crate) fn reply_raw(self, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(body.to_string()));
        self
    }

    /// Queues a transport failure for the next POST.
    pub(crate) fn fail_next_post(self) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(GrayHarvestError::Transport("connection refused".to_string())));
        self
    }

    /// Makes `url` answer HEAD requests with 200.
    pub(crate) fn live(mut self, url: &str) -> Self {
        self.live.insert(url.to_string());
        self
    }

    /// Makes `url` downloadable with the given body.
    pub(crate) fn serve(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self
    }

    pub(crate) fn network_calls(&self) -> usize {
        self.posts.borrow().len() + self.heads.borrow().len() + self.fetches.borrow().len()
    }
}

impl Transport for FakeTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<String, GrayHarvestError> {
        self.posts
            .borrow_mut()
            .push((url.to_string(), body.to_string()));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(GrayHarvestError::Transport("no scripted reply".to_string())))
    }

    fn head(&self, url: &str) -> Result<u16, GrayHarvestError> {
        self.heads.borrow_mut().push(url.to_string());
        if url.contains("unreachable") {
            return Err(GrayHarvestError::Transport("timed out".to_string()));
        }
        Ok(if self.live.contains(url) { 200 } else { 404 })
    }

    fn fetch_to(&self, url: &str, sink: &mut dyn Write) -> Result<(u16, u64), GrayHarvestError> {
        self.fetches.borrow_mut().push(url.to_string());
        let body = self
            .bodies
            .get(url)
            .ok_or_else(|| GrayHarvestError::Transport("connection reset".to_string()))?;
        sink.write_all(body)?;
        Ok((200, body.len() as u64))
    }
}

/// A minimal `generateContent` response body.
pub(crate) fn gemini_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "index": 0
        }]
    })
    .to_string()
}

/// A small, colourful PNG.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 40) as u8, (y * 40) as u8, 200])
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}
