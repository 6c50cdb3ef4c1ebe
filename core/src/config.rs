//! Where the upstream base URL comes from.

use crate::error::ForwardError;

/// Environment variable holding the upstream base URL.
pub const API_URL_VAR: &str = "API_URL";

/// Source of the upstream base URL.
///
/// `Env` re-reads the variable on every request, so changing the process
/// environment takes effect without a restart. `Fixed` holds a value that was
/// resolved (and usually validated) once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUrlSource {
    Env(String),
    Fixed(String),
}

impl Default for BaseUrlSource {
    fn default() -> Self {
        BaseUrlSource::Env(API_URL_VAR.to_string())
    }
}

impl BaseUrlSource {
    /// Resolve the base URL against the process environment.
    pub fn resolve(&self) -> Result<String, ForwardError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve the base URL using `lookup` in place of the process environment.
    ///
    /// Blank values count as missing.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<String, ForwardError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let value = match self {
            BaseUrlSource::Env(name) => lookup(name),
            BaseUrlSource::Fixed(url) => Some(url.clone()),
        };
        match value {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(ForwardError::ConfigMissing),
        }
    }
}
