//! Startup errors for the proxy binary.
//!
//! Request handling never fails with these; per-request problems are turned
//! into responses by the core.

/// Invalid proxy settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid upstream timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("invalid value '{value}' for {var}: expected true or false")]
    InvalidFlag { var: &'static str, value: String },

    /// Strict mode is on and the base URL variable is unset or blank.
    #[error("{0} must be set when strict configuration is enabled")]
    MissingBaseUrl(&'static str),
}

/// Errors that stop the proxy from starting.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProxyError {
    #[error("configuration error: {0}")]
    Settings(#[from] SettingsError),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
