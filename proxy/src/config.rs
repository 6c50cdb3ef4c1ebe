//! Proxy settings read from the process environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `PROXY_LISTEN_ADDR` | `127.0.0.1:7071` |
//! | `PROXY_UPSTREAM_TIMEOUT_SECS` | `30` |
//! | `PROXY_STRICT_CONFIG` | `false` |
//!
//! The upstream base URL itself lives in `API_URL`. It is read per request
//! unless strict mode asks for it to be checked once at startup.

use std::time::Duration;

use todo_proxy_core::{BaseUrlSource, API_URL_VAR};

use crate::error::SettingsError;

pub const LISTEN_ADDR_VAR: &str = "PROXY_LISTEN_ADDR";
pub const UPSTREAM_TIMEOUT_VAR: &str = "PROXY_UPSTREAM_TIMEOUT_SECS";
pub const STRICT_CONFIG_VAR: &str = "PROXY_STRICT_CONFIG";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:7071";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub listen_addr: String,
    pub upstream_timeout: Duration,
    pub source: BaseUrlSource,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = lookup(LISTEN_ADDR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        let upstream_timeout = match lookup(UPSTREAM_TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let strict = match lookup(STRICT_CONFIG_VAR) {
            Some(raw) => parse_flag(STRICT_CONFIG_VAR, &raw)?,
            None => false,
        };

        let env_source = BaseUrlSource::Env(API_URL_VAR.to_string());
        let source = if strict {
            let url = env_source
                .resolve_with(&lookup)
                .map_err(|_| SettingsError::MissingBaseUrl(API_URL_VAR))?;
            BaseUrlSource::Fixed(url)
        } else {
            env_source
        };

        Ok(Self {
            listen_addr,
            upstream_timeout,
            source,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, SettingsError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(SettingsError::InvalidTimeout(raw.to_string())),
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, SettingsError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_read_api_url_per_request() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.listen_addr, "127.0.0.1:7071");
        assert_eq!(s.upstream_timeout, Duration::from_secs(30));
        assert_eq!(s.source, BaseUrlSource::Env("API_URL".to_string()));
    }

    #[test]
    fn overrides_are_applied() {
        let s = settings(&[
            ("PROXY_LISTEN_ADDR", "0.0.0.0:8080"),
            ("PROXY_UPSTREAM_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(s.listen_addr, "0.0.0.0:8080");
        assert_eq!(s.upstream_timeout, Duration::from_secs(5));
    }

    #[test]
    fn strict_mode_pins_base_url_at_startup() {
        let s = settings(&[
            ("PROXY_STRICT_CONFIG", "true"),
            ("API_URL", "http://localhost:3000/api/todos"),
        ])
        .unwrap();
        assert_eq!(
            s.source,
            BaseUrlSource::Fixed("http://localhost:3000/api/todos".to_string())
        );
    }

    #[test]
    fn strict_mode_without_base_url_fails() {
        let err = settings(&[("PROXY_STRICT_CONFIG", "1")]).unwrap_err();
        assert!(matches!(err, SettingsError::MissingBaseUrl("API_URL")));

        let err = settings(&[("PROXY_STRICT_CONFIG", "on"), ("API_URL", " ")]).unwrap_err();
        assert!(matches!(err, SettingsError::MissingBaseUrl(_)));
    }

    #[test]
    fn lenient_mode_tolerates_missing_base_url() {
        let s = settings(&[("PROXY_STRICT_CONFIG", "false")]).unwrap();
        assert_eq!(s.source, BaseUrlSource::Env("API_URL".to_string()));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = settings(&[("PROXY_UPSTREAM_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidTimeout(_)));

        let err = settings(&[("PROXY_UPSTREAM_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidTimeout(_)));

        let err = settings(&[("PROXY_STRICT_CONFIG", "maybe")]).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidFlag { var: "PROXY_STRICT_CONFIG", .. }
        ));
    }
}
