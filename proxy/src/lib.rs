//! HTTP front end for the todo forwarding proxy.
//!
//! Hosts the core [`Forwarder`](todo_proxy_core::Forwarder) behind an axum
//! router and supplies the `reqwest` transport it calls upstream with.

pub mod config;
pub mod error;
pub mod routes;
pub mod transport;

use std::sync::Arc;

use axum::Router;
use todo_proxy_core::{Forwarder, Transport};

use crate::{config::Settings, error::ProxyError, routes::create_router, transport::ReqwestTransport};

/// Build the full application from `settings`.
///
/// # Errors
/// Returns [`ProxyError::Client`] if the upstream HTTP client cannot be built.
pub fn build_app(settings: &Settings) -> Result<Router, ProxyError> {
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(settings.upstream_timeout)?);
    let forwarder = Forwarder::new(settings.source.clone(), transport);
    Ok(create_router(Arc::new(forwarder)))
}
