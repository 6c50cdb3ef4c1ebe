//! Forwarder behavior against a scripted transport.
//!
//! The transport returns a canned outcome and records every request it
//! receives, so each test can check both the response and what would have
//! gone over the wire.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use todo_proxy_core::{
    BaseUrlSource, ForwardError, Forwarder, HttpMethod, HttpRequest, HttpResponse, Transport,
    INTERNAL_ERROR_BODY, JSON_CONTENT_TYPE, LIST_FAILURE_BODY,
};

const BASE_URL: &str = "http://upstream.test/todos";

struct ScriptedTransport {
    outcome: Result<HttpResponse, ForwardError>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn replying(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: Bytes::copy_from_slice(body.as_bytes()),
            }),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            outcome: Err(ForwardError::Transport("connection refused".to_string())),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ForwardError> {
        self.sent.lock().unwrap().push(request);
        self.outcome.clone()
    }
}

fn forwarder(transport: ScriptedTransport) -> Forwarder<ScriptedTransport> {
    Forwarder::new(BaseUrlSource::Fixed(BASE_URL.to_string()), transport)
}

fn shared(
    base_url: &str,
    transport: ScriptedTransport,
) -> (Forwarder<Arc<ScriptedTransport>>, Arc<ScriptedTransport>) {
    let transport = Arc::new(transport);
    let f = Forwarder::new(BaseUrlSource::Fixed(base_url.to_string()), transport.clone());
    (f, transport)
}

// --- configuration ---

#[tokio::test]
async fn missing_base_url_fails_every_operation_without_calling_upstream() {
    let (f, transport) = shared("", ScriptedTransport::replying(200, "[]"));

    let responses = [
        f.list(None).await,
        f.get("1").await,
        f.create(Bytes::from_static(b"{}")).await,
        f.update("1", Bytes::from_static(b"{}")).await,
        f.delete("1").await,
    ];

    for resp in responses {
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body, INTERNAL_ERROR_BODY);
        assert!(resp.content_type.is_none());
    }
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn unset_env_var_is_config_missing() {
    let source = BaseUrlSource::Env("TODO_PROXY_TEST_SURELY_UNSET_VAR".to_string());
    let f = Forwarder::new(source, ScriptedTransport::replying(200, "[]"));

    let resp = f.list(None).await;
    assert_eq!(resp.status, 500);
    assert_eq!(resp.body, INTERNAL_ERROR_BODY);
}

// --- list ---

#[tokio::test]
async fn list_success_relays_upstream_body() {
    let f = forwarder(ScriptedTransport::replying(200, r#"{"id": 1, "title": "test"}"#));

    let resp = f.list(None).await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, r#"{"id": 1, "title": "test"}"#);
    assert_eq!(resp.content_type, Some(JSON_CONTENT_TYPE));
}

#[tokio::test]
async fn list_failure_is_bad_gateway() {
    let f = forwarder(ScriptedTransport::replying(500, "upstream exploded"));

    let resp = f.list(None).await;
    assert_eq!(resp.status, 502);
    assert_eq!(resp.body, LIST_FAILURE_BODY);
    assert!(resp.content_type.is_none());
}

#[tokio::test]
async fn list_forwards_merged_query() {
    let (f, transport) = shared(
        "http://upstream.test/todos?userId=1&_limit=3",
        ScriptedTransport::replying(200, "[]"),
    );

    f.list(Some("userId=2")).await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Get);
    assert_eq!(sent[0].url, "http://upstream.test/todos?_limit=3&userId=2");
    assert!(sent[0].body.is_none());
}

#[tokio::test]
async fn list_is_idempotent_against_unchanged_upstream() {
    let f = forwarder(ScriptedTransport::replying(200, r#"[{"id":1},{"id":2}]"#));

    let first = f.list(None).await;
    let second = f.list(None).await;
    assert_eq!(first.body, second.body);
    assert_eq!(first, second);
}

#[tokio::test]
async fn transport_failure_is_internal_error() {
    let f = forwarder(ScriptedTransport::failing());

    for resp in [f.list(None).await, f.get("3").await, f.delete("3").await] {
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body, INTERNAL_ERROR_BODY);
        assert!(resp.content_type.is_none());
    }
}

// --- id-scoped and mutations ---

#[tokio::test]
async fn id_scoped_failures_pass_through() {
    let f = forwarder(ScriptedTransport::replying(404, r#"{"error":"Todo not found"}"#));

    for resp in [
        f.get("99").await,
        f.update("99", Bytes::from_static(br#"{"title":"x"}"#)).await,
        f.delete("99").await,
    ] {
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body, r#"{"error":"Todo not found"}"#);
    }
}

#[tokio::test]
async fn create_failure_passes_through() {
    let f = forwarder(ScriptedTransport::replying(422, "missing field `title`"));

    let resp = f.create(Bytes::from_static(b"{}")).await;
    assert_eq!(resp.status, 422);
    assert_eq!(resp.body, "missing field `title`");
}

#[tokio::test]
async fn create_posts_inbound_body_verbatim() {
    let (f, transport) = shared(BASE_URL, ScriptedTransport::replying(201, r#"{"id":4}"#));

    let body = Bytes::from_static(br#"{ "title" : "spacing kept" }"#);
    let resp = f.create(body.clone()).await;
    assert_eq!(resp.status, 201);
    assert_eq!(resp.body, r#"{"id":4}"#);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].url, BASE_URL);
    assert_eq!(sent[0].body, Some(body));
    assert!(sent[0]
        .headers
        .contains(&("content-type".to_string(), "application/json".to_string())));
}

#[tokio::test]
async fn each_operation_issues_exactly_one_call_to_its_target() {
    let (f, transport) = shared(&format!("{BASE_URL}/"), ScriptedTransport::replying(200, "{}"));

    f.list(Some("completed=true")).await;
    f.get("1").await;
    f.update("2", Bytes::from_static(b"{}")).await;
    f.delete("3").await;

    let sent = transport.sent();
    let calls: Vec<(HttpMethod, &str)> = sent.iter().map(|r| (r.method, r.url.as_str())).collect();
    assert_eq!(
        calls,
        vec![
            (HttpMethod::Get, "http://upstream.test/todos/?completed=true"),
            (HttpMethod::Get, "http://upstream.test/todos/1"),
            (HttpMethod::Put, "http://upstream.test/todos/2"),
            (HttpMethod::Delete, "http://upstream.test/todos/3"),
        ]
    );
}

#[tokio::test]
async fn delete_success_relays_status_and_body() {
    let f = forwarder(ScriptedTransport::replying(200, r#"{"id":5}"#));

    let resp = f.delete("5").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, r#"{"id":5}"#);
    assert_eq!(resp.content_type, Some(JSON_CONTENT_TYPE));
}

#[tokio::test]
async fn id_that_is_not_one_segment_never_reaches_upstream() {
    let (f, transport) = shared(BASE_URL, ScriptedTransport::replying(200, "[]"));

    for resp in [f.get("..").await, f.delete(".").await] {
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body, INTERNAL_ERROR_BODY);
    }
    assert!(transport.sent().is_empty());

    f.get("../users").await;
    f.update("1?x=1#y", Bytes::from_static(b"{}")).await;
    let urls: Vec<String> = transport.sent().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "http://upstream.test/todos/..%2Fusers".to_string(),
            "http://upstream.test/todos/1%3Fx=1%23y".to_string(),
        ]
    );
}

#[tokio::test]
async fn non_utf8_create_body_is_forwarded_and_relayed_verbatim() {
    let raw = Bytes::from_static(&[0xff, 0xfe, b'{', 0x80]);
    let transport = Arc::new(ScriptedTransport {
        outcome: Ok(HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: raw.clone(),
        }),
        sent: Mutex::new(Vec::new()),
    });
    let f = Forwarder::new(BaseUrlSource::Fixed(BASE_URL.to_string()), transport.clone());

    let resp = f.create(raw.clone()).await;
    assert_eq!(resp.status, 201);
    assert_eq!(resp.body, raw);
    assert_eq!(transport.sent()[0].body, Some(raw));
}
