//! Request-forwarding core for the todo proxy.
//!
//! # Overview
//! Maps each inbound todo operation to exactly one upstream HTTP call and
//! translates the upstream outcome into the outbound response. The network
//! call itself goes through the [`Transport`] trait, which the host
//! implements (host-does-IO pattern), so everything here is deterministic
//! and testable with scripted transports.
//!
//! # Design
//! - [`TodoRequests`] composes target URLs and upstream requests.
//! - [`translate`] is a pure function from outcome to [`ProxyResponse`].
//! - [`Forwarder`] glues config resolution, request building, the transport
//!   call and translation together.
//! - Bodies are opaque bytes end to end; nothing is parsed or re-encoded.

pub mod config;
pub mod error;
pub mod forwarder;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;

pub use config::{BaseUrlSource, API_URL_VAR};
pub use error::ForwardError;
pub use forwarder::Forwarder;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use request::TodoRequests;
pub use response::{
    translate, Operation, ProxyResponse, INTERNAL_ERROR_BODY, JSON_CONTENT_TYPE, LIST_FAILURE_BODY,
};
pub use transport::Transport;
