//! Upstream request builders for the todo routes.
//!
//! # Design
//! `TodoRequests` holds only the resolved base URL and carries no state
//! between calls. Each operation has a `build_*` method that produces the
//! `HttpRequest` to send upstream; executing it is the transport's job.
//!
//! The base URL addresses the todo collection itself, so list and create
//! target it directly and id-scoped operations append one path segment.
//! The id is percent-encoded into that segment, so it can never climb out of
//! the collection or start a query of its own.

use bytes::Bytes;
use url::{form_urlencoded, Url};

use crate::error::ForwardError;
use crate::http::{HttpMethod, HttpRequest};

const JSON: &str = "application/json";

/// Builds upstream requests against one base URL.
#[derive(Debug, Clone)]
pub struct TodoRequests {
    base_url: String,
}

impl TodoRequests {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    /// Build the list request, merging the inbound `query` over the base
    /// URL's own query.
    ///
    /// Without an inbound query the base URL is used verbatim.
    pub fn build_list_todos(&self, query: Option<&str>) -> Result<HttpRequest, ForwardError> {
        let url = match query.filter(|q| !q.is_empty()) {
            Some(query) => merge_query(&self.base_url, query)?,
            None => self.base_url.clone(),
        };
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_get_todo(&self, id: &str) -> Result<HttpRequest, ForwardError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.item_url(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    /// Build the create request. `body` is sent as-is, always labelled JSON.
    pub fn build_create_todo(&self, body: Bytes) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.base_url.clone(),
            headers: json_headers(),
            body: Some(body),
        }
    }

    pub fn build_update_todo(&self, id: &str, body: Bytes) -> Result<HttpRequest, ForwardError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.item_url(id)?,
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_todo(&self, id: &str) -> Result<HttpRequest, ForwardError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            url: self.item_url(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    /// `{base}/{id}` with `id` encoded as exactly one segment. Any `?query` or
    /// `#fragment` of the base stays after the new segment.
    ///
    /// `.` and `..` have no single-segment encoding (URL parsers resolve even
    /// their `%2E` forms), so they are rejected along with the empty id.
    fn item_url(&self, id: &str) -> Result<String, ForwardError> {
        if matches!(id, "" | "." | "..") {
            return Err(ForwardError::InvalidId(id.to_string()));
        }
        let mut url = parse_base(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| ForwardError::InvalidBaseUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url.into())
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), JSON.to_string())]
}

fn parse_base(base_url: &str) -> Result<Url, ForwardError> {
    Url::parse(base_url).map_err(|e| ForwardError::InvalidBaseUrl(e.to_string()))
}

/// Inbound pairs replace every base pair with the same key. Base pairs
/// without an override keep their position ahead of the inbound pairs.
fn merge_query(base_url: &str, inbound: &str) -> Result<String, ForwardError> {
    let mut url = parse_base(base_url)?;

    let overrides: Vec<(String, String)> = form_urlencoded::parse(inbound.as_bytes())
        .into_owned()
        .collect();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(key, _)| !overrides.iter().any(|(k, _)| k == key))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept.iter().chain(overrides.iter()));
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url.into())
}
