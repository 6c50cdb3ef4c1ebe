//! Error types for the forwarding core.
//!
//! # Design
//! Only failures where no upstream HTTP exchange took place are errors.
//! An upstream reply with a non-2xx status is a successful transport
//! outcome and is handled by the response translator instead.

/// Reasons an upstream call could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForwardError {
    /// No base URL is configured, or it is empty.
    #[error("upstream base URL is not configured")]
    ConfigMissing,

    /// The configured base URL could not be parsed while composing a target.
    #[error("invalid upstream base URL: {0}")]
    InvalidBaseUrl(String),

    /// The inbound id cannot be expressed as a single path segment.
    #[error("invalid todo id: {0:?}")]
    InvalidId(String),

    /// The request never produced an HTTP response (DNS, connect, timeout,
    /// body read).
    #[error("upstream transport failure: {0}")]
    Transport(String),
}
