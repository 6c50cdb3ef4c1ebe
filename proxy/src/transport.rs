//! `reqwest`-backed upstream transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use todo_proxy_core::{ForwardError, HttpMethod, HttpRequest, HttpResponse, Transport};

/// Executes core-built requests with a pooled `reqwest::Client`.
///
/// The timeout covers the whole exchange; hitting it is a transport failure
/// like any other.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ForwardError> {
        let mut builder = self.client.request(method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ForwardError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| ForwardError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Bytes, routing::post, Router};

    async fn spawn_echo() -> String {
        let app = Router::new().route("/echo", post(|body: Bytes| async move { body }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });
        format!("http://{addr}/echo")
    }

    #[test]
    fn methods_map_one_to_one() {
        assert_eq!(method(HttpMethod::Get), Method::GET);
        assert_eq!(method(HttpMethod::Post), Method::POST);
        assert_eq!(method(HttpMethod::Put), Method::PUT);
        assert_eq!(method(HttpMethod::Delete), Method::DELETE);
    }

    #[tokio::test]
    async fn unparseable_url_is_transport_failure() {
        let transport = ReqwestTransport::new(Duration::from_secs(1)).unwrap();
        let err = transport
            .send(HttpRequest {
                method: HttpMethod::Get,
                url: "not a url".to_string(),
                headers: Vec::new(),
                body: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ForwardError::Transport(_)));
    }

    #[tokio::test]
    async fn non_utf8_bodies_cross_the_wire_unchanged() {
        let url = spawn_echo().await;
        let raw = Bytes::from_static(&[0xff, 0xfe, 0x00, 0x80, b'}']);
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

        let response = transport
            .send(HttpRequest {
                method: HttpMethod::Post,
                url,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: Some(raw.clone()),
            })
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, raw);
    }
}
