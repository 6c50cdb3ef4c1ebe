//! Translation of upstream outcomes into outbound responses.
//!
//! # Design
//! The mapping is a case analysis over the upstream outcome:
//!
//! | Outcome | List | Other operations |
//! |---|---|---|
//! | no exchange (config, URL, id, transport) | 500, generic text | 500, generic text |
//! | upstream non-2xx | 502, fixed text | upstream status and body |
//! | upstream 2xx | 200, upstream body | upstream status and body |
//!
//! List normalizes upstream failures while every other operation relays
//! them. Both behaviors are relied on by existing callers.

use std::fmt;

use bytes::Bytes;

use crate::error::ForwardError;
use crate::http::HttpResponse;

/// Body of every response where no upstream exchange took place.
pub const INTERNAL_ERROR_BODY: &str = "An error occurred while processing the request";

/// Body of a list response when the upstream replied with a failure.
pub const LIST_FAILURE_BODY: &str = "Failed to fetch data from public API";

/// Content type attached to successful responses that carry a body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// A logical proxy operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Whether upstream failures are replaced by a fixed 502 response.
    pub fn normalizes_failures(self) -> bool {
        matches!(self, Operation::List)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound response produced by the core, independent of any web framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Bytes,
}

impl ProxyResponse {
    pub fn internal_error() -> Self {
        Self {
            status: 500,
            content_type: None,
            body: Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes()),
        }
    }
}

/// Map the outcome of one upstream call for `operation` to the response sent
/// back to the caller.
pub fn translate(operation: Operation, outcome: Result<HttpResponse, ForwardError>) -> ProxyResponse {
    let upstream = match outcome {
        Ok(upstream) => upstream,
        Err(_) => return ProxyResponse::internal_error(),
    };

    if !upstream.is_success() {
        if operation.normalizes_failures() {
            return ProxyResponse {
                status: 502,
                content_type: None,
                body: Bytes::from_static(LIST_FAILURE_BODY.as_bytes()),
            };
        }
        return ProxyResponse {
            status: upstream.status,
            content_type: None,
            body: upstream.body,
        };
    }

    let status = match operation {
        Operation::List => 200,
        _ => upstream.status,
    };
    let content_type = (!upstream.body.is_empty()).then_some(JSON_CONTENT_TYPE);
    ProxyResponse {
        status,
        content_type,
        body: upstream.body,
    }
}
