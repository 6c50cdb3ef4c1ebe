//! Axum route handlers for the todo proxy.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Path, RawQuery, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use todo_proxy_core::{Forwarder, ProxyResponse, Transport};
use tower_http::trace::TraceLayer;

// ── Shared state ─────────────────────────────────────────────────────────────

pub type SharedForwarder = Arc<Forwarder<Arc<dyn Transport>>>;

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the proxy router around `forwarder`.
pub fn create_router(forwarder: SharedForwarder) -> Router {
    Router::new()
        .route("/", get(legacy_list))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/health", get(health))
        .with_state(forwarder)
        .layer(TraceLayer::new_for_http())
}

/// Convert a core response into an HTTP response.
///
/// Only the content type chosen by the core is set; the body is sent as-is.
/// `status` is either a core constant or an upstream status that reqwest
/// already parsed, so `from_u16` only fails for a hand-built `ProxyResponse`.
/// Such a value is answered with 502 rather than panicking.
pub fn into_response(resp: ProxyResponse) -> Response {
    let mut response = Response::new(Body::from(resp.body));
    *response.status_mut() = StatusCode::from_u16(resp.status).unwrap_or(StatusCode::BAD_GATEWAY);
    if let Some(content_type) = resp.content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    response
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness, answered locally.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /todos`: list, with the inbound query merged into the upstream URL.
pub async fn list_todos(
    State(forwarder): State<SharedForwarder>,
    RawQuery(query): RawQuery,
) -> Response {
    into_response(forwarder.list(query.as_deref()).await)
}

/// `GET /`: older name for `GET /todos`.
pub async fn legacy_list(state: State<SharedForwarder>, query: RawQuery) -> Response {
    list_todos(state, query).await
}

/// `GET /todos/{id}`. The id arrives percent-decoded and is re-encoded as one
/// upstream segment by the core.
pub async fn get_todo(
    State(forwarder): State<SharedForwarder>,
    Path(id): Path<String>,
) -> Response {
    into_response(forwarder.get(&id).await)
}

/// `POST /todos`: the raw body bytes are forwarded untouched.
pub async fn create_todo(State(forwarder): State<SharedForwarder>, body: Bytes) -> Response {
    into_response(forwarder.create(body).await)
}

/// `PUT /todos/{id}`: the raw body bytes are forwarded untouched.
pub async fn update_todo(
    State(forwarder): State<SharedForwarder>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    into_response(forwarder.update(&id, body).await)
}

/// `DELETE /todos/{id}`
pub async fn delete_todo(
    State(forwarder): State<SharedForwarder>,
    Path(id): Path<String>,
) -> Response {
    into_response(forwarder.delete(&id).await)
}
