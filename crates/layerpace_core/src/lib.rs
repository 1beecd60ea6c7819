//! Core types for the layerpace throttling transport.
//!
//! This crate defines the request/response envelope, the [`Transport`]
//! trait every transport implements, and [`ReqwestTransport`], the base
//! transport that actually talks to the network.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod envelope;
mod reqwest_transport;
mod transport;

pub use envelope::{
    HttpRequest, HttpRequestBuilder, HttpRequestBuilderError, HttpResponse, HttpResponseBuilder,
    HttpResponseBuilderError,
};
pub use reqwest_transport::ReqwestTransport;
pub use transport::Transport;
