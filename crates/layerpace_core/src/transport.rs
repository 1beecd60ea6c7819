//! The request-execution seam shared by base and decorating transports.

use crate::{HttpRequest, HttpResponse};
use async_trait::async_trait;
use layerpace_error::LayerpaceResult;
use std::sync::Arc;

/// Send a request and return the response, or fail with a transport error.
///
/// Implementations must not treat HTTP error statuses as failures: a `429`
/// or `500` is still a response. Only a failure to obtain a response at all
/// (connection refused, timeout, broken body) is an `Err`.
///
/// Decorators such as the throttled transport implement this trait too, so
/// callers can swap one for the other without changing any code.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request.
    async fn execute(&self, request: &HttpRequest) -> LayerpaceResult<HttpResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: &HttpRequest) -> LayerpaceResult<HttpResponse> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn execute(&self, request: &HttpRequest) -> LayerpaceResult<HttpResponse> {
        (**self).execute(request).await
    }
}
