//! Request and response envelopes exchanged with a [`Transport`](crate::Transport).
//!
//! The envelopes carry exactly what the throttling layer needs to see:
//! method, URL, headers, status code. Bodies travel along untouched.

use derive_getters::Getters;
use layerpace_error::BuilderError;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

/// An outgoing HTTP request.
///
/// Requests are cheap to clone so a throttled transport can resend the same
/// request after a lockout.
///
/// # Examples
///
/// ```
/// use layerpace_core::HttpRequest;
/// use reqwest::{Method, Url};
///
/// let url = Url::parse("https://example.commercelayer.io/api/skus/abc").unwrap();
/// let request = HttpRequest::new(Method::GET, url);
/// assert_eq!(request.path(), "/api/skus/abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct HttpRequest {
    /// HTTP method, also the operation half of a routing key.
    method: Method,

    /// Target URL.
    url: Url,

    /// Request headers.
    #[builder(default)]
    headers: HeaderMap,

    /// Raw request body.
    #[builder(default, setter(into, strip_option))]
    body: Option<Vec<u8>>,
}

impl HttpRequestBuilder {
    /// Build the HttpRequest.
    ///
    /// # Errors
    ///
    /// Returns error if the method or URL is missing.
    pub fn build(&self) -> Result<HttpRequest, BuilderError> {
        self.build_internal().map_err(|e| match e {
            HttpRequestBuilderError::UninitializedField(field) => BuilderError::missing_field(field),
            HttpRequestBuilderError::ValidationError(msg) => BuilderError::validation_failed(msg),
        })
    }
}

impl HttpRequest {
    /// Create a request with no headers and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Start building a request.
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    /// Path component of the URL, without query string.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Mutable access to the headers, e.g. to attach credentials.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

/// A response returned by a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct HttpResponse {
    /// Status code.
    status: StatusCode,

    /// Response headers.
    #[builder(default)]
    headers: HeaderMap,

    /// Response body.
    #[builder(default)]
    body: Vec<u8>,
}

impl HttpResponseBuilder {
    /// Build the HttpResponse.
    ///
    /// # Errors
    ///
    /// Returns error if the status is missing.
    pub fn build(&self) -> Result<HttpResponse, BuilderError> {
        self.build_internal().map_err(|e| match e {
            HttpResponseBuilderError::UninitializedField(field) => BuilderError::missing_field(field),
            HttpResponseBuilderError::ValidationError(msg) => BuilderError::validation_failed(msg),
        })
    }
}

impl HttpResponse {
    /// Create a response with the given status, no headers and an empty body.
    pub fn new(status: StatusCode) -> Self {
        Self::from_parts(status, HeaderMap::new(), Vec::new())
    }

    /// Assemble a response from its parts.
    pub fn from_parts(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Start building a response.
    pub fn builder() -> HttpResponseBuilder {
        HttpResponseBuilder::default()
    }

    /// A header value as a string, if present and visible ASCII.
    ///
    /// Lookup is case-insensitive, as header names always are.
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// True when the server answered `429 Too Many Requests`.
    pub fn is_too_many_requests(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerpace_error::BuilderErrorKind;
    use reqwest::header::HeaderValue;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_path_excludes_query() {
        let request = HttpRequest::new(
            Method::GET,
            url("https://example.test/api/orders?include=line_items"),
        );
        assert_eq!(request.path(), "/api/orders");
    }

    #[test]
    fn test_builder_requires_url() {
        let err = HttpRequest::builder().method(Method::POST).build().unwrap_err();
        assert_eq!(
            err.kind(),
            &BuilderErrorKind::MissingField("url".to_string())
        );
    }

    #[test]
    fn test_builder_sets_body_and_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let request = HttpRequest::builder()
            .method(Method::POST)
            .url(url("https://example.test/api/skus"))
            .headers(headers)
            .body(b"{}".to_vec())
            .build()
            .unwrap();

        assert_eq!(request.body().as_deref(), Some(&b"{}"[..]));
        assert_eq!(request.headers()["content-type"], "application/json");
    }

    #[test]
    fn test_header_str_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("3"));
        let response = HttpResponse::from_parts(StatusCode::OK, headers, Vec::new());

        assert_eq!(response.header_str("X-Ratelimit-Remaining"), Some("3"));
        assert_eq!(response.header_str("X-Ratelimit-Interval"), None);
    }

    #[test]
    fn test_too_many_requests() {
        assert!(HttpResponse::new(StatusCode::TOO_MANY_REQUESTS).is_too_many_requests());
        assert!(!HttpResponse::new(StatusCode::OK).is_too_many_requests());
    }
}
