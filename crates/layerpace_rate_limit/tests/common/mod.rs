//! Shared helpers for throttled transport tests.

#![allow(dead_code)]

use async_trait::async_trait;
use layerpace_core::{HttpRequest, HttpResponse, Transport};
use layerpace_error::{HttpError, LayerpaceResult};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// A request as seen by the scripted transport.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub at: Instant,
    pub method: Method,
    pub path: String,
}

#[derive(Debug, Default)]
struct Script {
    queue: VecDeque<LayerpaceResult<HttpResponse>>,
    sent: Vec<SentRequest>,
}

/// In-memory transport replaying queued outcomes in order.
///
/// Once the queue is drained it answers `200 OK` with plenty of burst quota
/// left. Clones share the same script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: HttpResponse) -> &Self {
        self.script.lock().unwrap().queue.push_back(Ok(response));
        self
    }

    pub fn push_error(&self, message: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .queue
            .push_back(Err(HttpError::new(message).into()));
        self
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.script.lock().unwrap().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.script.lock().unwrap().sent.len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &HttpRequest) -> LayerpaceResult<HttpResponse> {
        let mut script = self.script.lock().unwrap();
        script.sent.push(SentRequest {
            at: Instant::now(),
            method: request.method().clone(),
            path: request.path().to_string(),
        });
        script
            .queue
            .pop_front()
            .unwrap_or_else(|| Ok(limited(StatusCode::OK, "50", "10")))
    }
}

/// Response carrying the rate-limit headers.
pub fn limited(status: StatusCode, remaining: &str, interval: &str) -> HttpResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-ratelimit-remaining",
        HeaderValue::from_str(remaining).unwrap(),
    );
    headers.insert(
        "x-ratelimit-interval",
        HeaderValue::from_str(interval).unwrap(),
    );
    HttpResponse::from_parts(status, headers, Vec::new())
}

/// Request against a commerce API path.
pub fn request(method: Method, path: &str) -> HttpRequest {
    let url = Url::parse("https://shop.example.test")
        .unwrap()
        .join(path)
        .unwrap();
    HttpRequest::new(method, url)
}
