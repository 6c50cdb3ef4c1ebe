//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe upstream requests and responses as plain data. The
//! core builds `HttpRequest` values and translates `HttpResponse` values
//! without touching the network; a [`Transport`](crate::Transport)
//! implementation supplied by the host performs the actual I/O.
//!
//! Bodies are raw `Bytes` and never parsed or decoded, so whatever the
//! caller or the upstream sends is relayed byte for byte.

use std::fmt;

use bytes::Bytes;

/// HTTP method for an upstream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An upstream request described as plain data.
///
/// `url` is the fully composed target, base URL included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

/// An upstream response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
