use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone)]
pub struct AppState {
    todos: Arc<RwLock<HashMap<u64, Todo>>>,
    next_id: Arc<AtomicU64>,
}

/// Todos present when the server starts, so GET /todos and /todos/1 return
/// data out of the box.
pub fn seed_todos() -> Vec<Todo> {
    vec![
        Todo {
            id: 1,
            title: "Learn the client API".to_string(),
            completed: false,
        },
        Todo {
            id: 2,
            title: "Wire up the demo".to_string(),
            completed: true,
        },
    ]
}

pub fn seed_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            title: "First post".to_string(),
            body: "Hello from the mock backend".to_string(),
        },
        Post {
            id: 2,
            title: "Second post".to_string(),
            body: "Posts are read-only here".to_string(),
        },
    ]
}

pub fn app() -> Router {
    let todos: HashMap<u64, Todo> = seed_todos().into_iter().map(|t| (t.id, t)).collect();
    let next_id = todos.keys().max().copied().unwrap_or(0) + 1;
    let state = AppState {
        todos: Arc::new(RwLock::new(todos)),
        next_id: Arc::new(AtomicU64::new(next_id)),
    };
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .route("/posts", get(list_posts))
        .route("/slow", get(slow_todos))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    let todos = state.todos.read().await;
    let mut todos: Vec<Todo> = todos.values().cloned().collect();
    todos.sort_by_key(|t| t.id);
    Json(todos)
}

async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let todo = Todo {
        id: state.next_id.fetch_add(1, Ordering::SeqCst),
        title: input.title,
        completed: input.completed,
    };
    state.todos.write().await.insert(todo.id, todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, StatusCode> {
    let todos = state.todos.read().await;
    todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = state.todos.write().await;
    let todo = todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
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
) -> Result<StatusCode, StatusCode> {
    let mut todos = state.todos.write().await;
    todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_posts() -> Json<Vec<Post>> {
    Json(seed_posts())
}

/// Answers only after a long delay, for exercising cancellation.
async fn slow_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    list_todos(State(state)).await
}
