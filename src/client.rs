//! HTTP client for the task API.
//!
//! Thin request/response wrapper; no retries, timeouts, or request
//! sequencing. A failed call surfaces as an error and leaves nothing
//! behind for the caller to clean up.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Task, TaskDraft, User, UserPatch};

#[derive(Debug, Deserialize)]
struct ApiMessage {
    error: String,
}

/// Client over the task and user endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET the full task collection, newest-first.
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let response = self.http.get(self.url("/api/tasks")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// POST a draft; the server assigns id and creation time and forces
    /// the status to pending. Returns the canonical record.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        let response = self
            .http
            .post(self.url("/api/tasks"))
            .json(draft)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// PUT a full record. A 404 maps to [`Error::TaskNotFound`].
    pub async fn update_task(&self, task: &Task) -> Result<Task> {
        let response = self
            .http
            .put(self.url("/api/tasks"))
            .json(task)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::TaskNotFound(task.id.clone()));
        }
        Ok(check(response).await?.json().await?)
    }

    /// DELETE by id. Absent ids are acknowledged like present ones.
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url("/api/tasks"))
            .json(&serde_json::json!({ "id": id }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// GET the singleton profile.
    pub async fn fetch_user(&self) -> Result<User> {
        let response = self.http.get(self.url("/api/user")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// PUT a partial profile; the server shallow-merges and returns the
    /// updated record.
    pub async fn update_user(&self, patch: &UserPatch) -> Result<User> {
        let response = self
            .http
            .put(self.url("/api/user"))
            .json(patch)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Treat any non-2xx response as a failed operation, carrying the server's
/// error message when one is present.
async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ApiMessage>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| status.to_string());
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}
