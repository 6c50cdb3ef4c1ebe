//! The I/O seam between the core and the host.

use async_trait::async_trait;

use crate::error::ForwardError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one upstream HTTP call.
///
/// Any reply, whatever its status, is `Ok`. `Err` is reserved for calls that
/// produced no HTTP exchange and should carry [`ForwardError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ForwardError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ForwardError> {
        (**self).send(request).await
    }
}
