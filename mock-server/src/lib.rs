//! In-memory stand-in for the public todo API the proxy forwards to.
//!
//! Todos are a small mutable store seeded with fixtures; users, products and
//! orders are fixed or synthesized per request.

use std::{collections::BTreeMap, sync::Arc, time::Instant};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_user_id")]
    pub user_id: u64,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

fn default_user_id() -> u64 {
    1
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Body accepted by the user mutation routes. Anything unparseable counts as
/// an empty object.
#[derive(Debug, Default, Deserialize)]
pub struct UserInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserInput {
    fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    fn name_or(&self, fallback: String) -> String {
        non_empty(&self.name).unwrap_or(fallback)
    }

    fn email_or(&self, fallback: String) -> String {
        non_empty(&self.email).unwrap_or(fallback)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Todo collection keyed by id, so listings come back in id order.
#[derive(Debug)]
pub struct TodoStore {
    todos: BTreeMap<u64, Todo>,
    next_id: u64,
}

impl TodoStore {
    pub fn seeded() -> Self {
        let todos: BTreeMap<u64, Todo> = fixture_todos().into_iter().map(|t| (t.id, t)).collect();
        let next_id = todos.keys().max().map_or(1, |max| max + 1);
        Self { todos, next_id }
    }
}

pub type Db = Arc<RwLock<TodoStore>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    started: Instant,
}

pub fn fixture_todos() -> Vec<Todo> {
    [
        (1, "delectus aut autem"),
        (2, "quis ut nam facilis et officia qui"),
        (3, "fugiat veniam minus"),
    ]
    .into_iter()
    .map(|(id, title)| Todo {
        user_id: 1,
        id,
        title: title.to_string(),
        completed: false,
    })
    .collect()
}

pub fn fixture_users() -> Vec<User> {
    [
        (1, "John Doe", "john@example.com"),
        (2, "Jane Smith", "jane@example.com"),
        (3, "Bob Johnson", "bob@example.com"),
    ]
    .into_iter()
    .map(|(id, name, email)| User {
        id,
        name: name.to_string(),
        email: email.to_string(),
    })
    .collect()
}

pub fn app() -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(TodoStore::seeded())),
        started: Instant::now(),
    };
    Router::new()
        .route("/health", get(health))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/api/products", get(list_products))
        .route("/api/orders", get(list_orders))
        .route("/api/webhook", post(webhook))
        .fallback(endpoint_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type ErrorResponse = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> ErrorResponse {
    (status, Json(json!({ "error": message })))
}

fn todo_not_found() -> ErrorResponse {
    error(StatusCode::NOT_FOUND, "Todo not found")
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": now_iso(),
        "uptime": state.started.elapsed().as_secs_f64()
    }))
}

async fn endpoint_not_found() -> ErrorResponse {
    error(StatusCode::NOT_FOUND, "Endpoint not found")
}

// --- todos ---

async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    let store = state.db.read().await;
    Json(store.todos.values().cloned().collect())
}

async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut store = state.db.write().await;
    let todo = Todo {
        user_id: input.user_id,
        id: store.next_id,
        title: input.title,
        completed: input.completed,
    };
    store.next_id += 1;
    store.todos.insert(todo.id, todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, ErrorResponse> {
    let store = state.db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or_else(todo_not_found)
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, ErrorResponse> {
    let mut store = state.db.write().await;
    let todo = store.todos.get_mut(&id).ok_or_else(todo_not_found)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, ErrorResponse> {
    let mut store = state.db.write().await;
    store.todos.remove(&id).map(Json).ok_or_else(todo_not_found)
}

// --- users ---

async fn list_users() -> Json<Vec<User>> {
    Json(fixture_users())
}

async fn get_user(Path(id): Path<u64>) -> Json<User> {
    Json(User {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
    })
}

async fn create_user(body: Bytes) -> (StatusCode, Json<Value>) {
    let input = UserInput::from_body(&body);
    let user = json!({
        "id": fastrand::u32(..1000),
        "name": input.name_or("Anonymous".to_string()),
        "email": input.email_or("anonymous@example.com".to_string()),
        "createdAt": now_iso()
    });
    (StatusCode::CREATED, Json(user))
}

async fn update_user(Path(id): Path<u64>, body: Bytes) -> Json<Value> {
    let input = UserInput::from_body(&body);
    Json(json!({
        "id": id,
        "name": input.name_or(format!("User {id}")),
        "email": input.email_or(format!("user{id}@example.com")),
        "updatedAt": now_iso()
    }))
}

async fn delete_user(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({ "message": format!("User {id} deleted successfully") }))
}

// --- fixed collections ---

async fn list_products() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Laptop", "price": 999.99, "category": "Electronics" },
        { "id": 2, "name": "Book", "price": 19.99, "category": "Education" },
        { "id": 3, "name": "Coffee Mug", "price": 12.50, "category": "Home" }
    ]))
}

async fn list_orders() -> Json<Value> {
    Json(json!([
        { "id": 1, "userId": 1, "total": 999.99, "status": "completed" },
        { "id": 2, "userId": 2, "total": 32.49, "status": "pending" },
        { "id": 3, "userId": 1, "total": 12.50, "status": "shipped" }
    ]))
}

async fn webhook(body: Bytes) -> Json<Value> {
    let data: Value = serde_json::from_slice(&body).unwrap_or_else(|_| json!({}));
    tracing::info!(payload = %data, "webhook received");
    Json(json!({
        "message": "Webhook received successfully",
        "timestamp": now_iso(),
        "data": data
    }))
}
