//! HTTP API over process-memory collections.
//!
//! The server is the system of record for its own lifetime only; every
//! collection resets on restart. Routes:
//!
//! | Method | Path       | Description                                  |
//! |--------|------------|----------------------------------------------|
//! | GET    | /api/tasks | Full collection, newest-first                |
//! | POST   | /api/tasks | Create from a draft, 201                     |
//! | PUT    | /api/tasks | Replace matching record by id, 404 if absent |
//! | DELETE | /api/tasks | Remove by id, idempotent                     |
//! | GET    | /api/user  | The singleton profile                        |
//! | PUT    | /api/user  | Shallow-merge a partial profile              |
//! | GET    | /health    | Status and version                           |
//!
//! The update path applies no status/completed_at rule of its own; it
//! stores whatever the client sends. Clients that skip the entity rules
//! can desynchronize the completion invariant server-side.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::model::{Status, Task, TaskDraft, User, UserPatch};

/// In-memory task collection, newest-first.
#[derive(Debug, Default)]
pub struct TaskRepo {
    tasks: Vec<Task>,
    last_id: u64,
}

impl TaskRepo {
    pub fn list(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Build a record from a draft and prepend it. The id is derived from
    /// the current time in milliseconds, bumped past the previous one so
    /// two creations in the same millisecond cannot collide.
    pub fn insert(&mut self, draft: TaskDraft) -> Task {
        let now = Utc::now();
        let millis = now.timestamp_millis().max(0) as u64;
        self.last_id = millis.max(self.last_id + 1);

        let task = Task {
            id: self.last_id.to_string(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: Status::Pending,
            due_date: draft.due_date,
            created_at: now,
            completed_at: None,
        };
        self.tasks.insert(0, task.clone());
        task
    }

    /// Replace the record matching `incoming.id`. Returns the stored
    /// record, or `None` when no record matches.
    pub fn merge(&mut self, incoming: Task) -> Option<Task> {
        let slot = self.tasks.iter_mut().find(|task| task.id == incoming.id)?;
        *slot = incoming;
        Some(slot.clone())
    }

    /// Remove the record with `id` if present. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        self.tasks.retain(|task| task.id != id);
    }
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    tasks: Arc<RwLock<TaskRepo>>,
    user: Arc<RwLock<User>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(TaskRepo::default())),
            user: Arc::new(RwLock::new(User::seed())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    error: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct DeleteRequest {
    id: String,
}

#[derive(Debug, Serialize)]
struct DeleteAck {
    success: bool,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.tasks.read().await.list())
}

async fn create_task(
    State(state): State<AppState>,
    Json(draft): Json<TaskDraft>,
) -> (StatusCode, Json<Task>) {
    let task = state.tasks.write().await.insert(draft);
    tracing::debug!(id = %task.id, "created task");
    (StatusCode::CREATED, Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    Json(incoming): Json<Task>,
) -> std::result::Result<Json<Task>, (StatusCode, Json<ApiMessage>)> {
    let id = incoming.id.clone();
    match state.tasks.write().await.merge(incoming) {
        Some(task) => Ok(Json(task)),
        None => {
            tracing::debug!(%id, "update for unknown task");
            Err((
                StatusCode::NOT_FOUND,
                Json(ApiMessage {
                    error: "Task not found".to_string(),
                }),
            ))
        }
    }
}

async fn delete_task(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Json<DeleteAck> {
    state.tasks.write().await.remove(&request.id);
    Json(DeleteAck { success: true })
}

async fn get_user(State(state): State<AppState>) -> Json<User> {
    Json(state.user.read().await.clone())
}

async fn update_user(
    State(state): State<AppState>,
    Json(patch): Json<UserPatch>,
) -> Json<User> {
    let mut user = state.user.write().await;
    user.merge(patch);
    Json(user.clone())
}

/// Build the router over fresh state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/tasks",
            get(list_tasks)
                .post(create_task)
                .put(update_task)
                .delete(delete_task),
        )
        .route("/api/user", get(get_user).put(update_user))
        .with_state(state)
}

/// Serve the API on an already-bound listener until the process exits.
pub async fn serve(listener: tokio::net::TcpListener) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "taskdeck server listening");
    axum::serve(listener, router(AppState::new()))
        .await
        .map_err(|err| crate::error::Error::OperationFailed(err.to_string()))
}
