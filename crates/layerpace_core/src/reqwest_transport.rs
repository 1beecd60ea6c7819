//! Base transport backed by `reqwest`.

use crate::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use layerpace_error::{HttpError, LayerpaceResult};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, error, instrument};

/// Transport that sends requests over the network with a shared
/// [`reqwest::Client`].
///
/// TLS, DNS and connection pooling are all the client's business. This type
/// only maps the envelope in and out.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
    bearer_token: Option<String>,
}

impl ReqwestTransport {
    /// Creates a transport with a default client.
    pub fn new() -> Self {
        debug!("Creating new reqwest transport");
        Self::default()
    }

    /// Creates a transport around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            bearer_token: None,
        }
    }

    /// Attach a bearer token to every request lacking an `Authorization` header.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    async fn execute(&self, request: &HttpRequest) -> LayerpaceResult<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());

        if let Some(token) = &self.bearer_token {
            if !request.headers().contains_key(AUTHORIZATION) {
                builder = builder.bearer_auth(token);
            }
        }

        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = ?e, "Failed to send request");
            HttpError::new(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            error!(error = ?e, status = %status, "Failed to read response body");
            HttpError::new(format!("Failed to read response body: {}", e))
        })?;

        debug!(status = %status, bytes = body.len(), "Received response");
        Ok(HttpResponse::from_parts(status, headers, body.to_vec()))
    }
}
