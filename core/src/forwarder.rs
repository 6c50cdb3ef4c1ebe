//! Route forwarding: one inbound operation, one upstream call, one response.

use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::config::BaseUrlSource;
use crate::error::ForwardError;
use crate::http::HttpRequest;
use crate::request::TodoRequests;
use crate::response::{translate, Operation, ProxyResponse};
use crate::transport::Transport;

/// Forwards todo operations to the upstream API.
///
/// The base URL is resolved from `source` on every call, before anything is
/// sent. Holds no mutable state and can be shared across requests.
#[derive(Debug)]
pub struct Forwarder<T> {
    source: BaseUrlSource,
    transport: T,
}

impl<T: Transport> Forwarder<T> {
    pub fn new(source: BaseUrlSource, transport: T) -> Self {
        Self { source, transport }
    }

    /// `query` is the raw inbound query string, without the leading `?`.
    pub async fn list(&self, query: Option<&str>) -> ProxyResponse {
        self.forward(Operation::List, |r| r.build_list_todos(query)).await
    }

    pub async fn get(&self, id: &str) -> ProxyResponse {
        self.forward(Operation::Get, |r| r.build_get_todo(id)).await
    }

    pub async fn create(&self, body: Bytes) -> ProxyResponse {
        self.forward(Operation::Create, |r| Ok(r.build_create_todo(body))).await
    }

    pub async fn update(&self, id: &str, body: Bytes) -> ProxyResponse {
        self.forward(Operation::Update, |r| r.build_update_todo(id, body)).await
    }

    pub async fn delete(&self, id: &str) -> ProxyResponse {
        self.forward(Operation::Delete, |r| r.build_delete_todo(id)).await
    }

    async fn forward<F>(&self, operation: Operation, build: F) -> ProxyResponse
    where
        F: FnOnce(&TodoRequests) -> Result<HttpRequest, ForwardError>,
    {
        info!(%operation, "processing request");

        let outcome = match self.prepare(build) {
            Ok(request) => {
                debug!(%operation, method = %request.method, url = %request.url, "calling upstream");
                self.transport.send(request).await
            }
            Err(e) => Err(e),
        };

        match &outcome {
            Err(e) => error!(%operation, error = %e, "error processing request"),
            Ok(upstream) if !upstream.is_success() => {
                warn!(%operation, status = upstream.status, "upstream returned failure status");
            }
            Ok(upstream) => debug!(%operation, status = upstream.status, "upstream succeeded"),
        }

        translate(operation, outcome)
    }

    fn prepare<F>(&self, build: F) -> Result<HttpRequest, ForwardError>
    where
        F: FnOnce(&TodoRequests) -> Result<HttpRequest, ForwardError>,
    {
        let base_url = self.source.resolve()?;
        build(&TodoRequests::new(&base_url))
    }
}
