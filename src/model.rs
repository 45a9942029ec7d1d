//! Task and user records for taskdeck.
//!
//! Wire shapes use camelCase keys so the JSON matches what the HTTP API
//! serves and what the cache slots store. `completed_at` is owned by the
//! status transition rules on [`Task`] and must never be written directly
//! by callers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Task status. New tasks always start out `Pending`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pending => write!(f, "pending"),
            Status::Completed => write!(f, "completed"),
        }
    }
}

/// A single task record.
///
/// Invariant: `completed_at` is present iff `status == Completed` as of the
/// last status-changing write. The client layer enforces this through
/// [`Task::apply_edit`] / [`Task::transition`]; the server stores whatever
/// it is sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDate>,
}

impl Task {
    /// Reconcile an edited copy of this record against its previous state.
    ///
    /// `self` is the previously known record; `edit` is the caller's full
    /// replacement. The returned record carries the caller's fields with
    /// `completed_at` derived from the status transition:
    ///
    /// - completed -> pending clears it
    /// - pending -> completed sets it to `today`
    /// - completed -> completed preserves the previous value, ignoring
    ///   whatever the caller supplied
    /// - pending -> pending passes the edit through unmodified
    pub fn apply_edit(&self, mut edit: Task, today: NaiveDate) -> Task {
        match (self.status, edit.status) {
            (Status::Completed, Status::Pending) => edit.completed_at = None,
            (Status::Pending, Status::Completed) => edit.completed_at = Some(today),
            (Status::Completed, Status::Completed) => edit.completed_at = self.completed_at,
            (Status::Pending, Status::Pending) => {}
        }
        edit
    }

    /// Produce a copy of this record moved to `status`, with `completed_at`
    /// derived atomically by the same rules as [`Task::apply_edit`].
    pub fn transition(&self, status: Status, today: NaiveDate) -> Task {
        let mut next = self.clone();
        next.status = status;
        self.apply_edit(next, today)
    }
}

/// Payload for creating a task. The server assigns `id` and `created_at`
/// and forces the status to pending, so neither appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Color theme for the profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// The singleton profile record. One per deployment; updated in place via
/// shallow merges, never created or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub theme: Theme,
    pub age: u8,
    pub default_priority: Priority,
}

impl User {
    /// Profile record the server starts out with.
    pub fn seed() -> Self {
        Self {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            theme: Theme::Light,
            age: 30,
            default_priority: Priority::Medium,
        }
    }

    /// Shallow-merge a partial update onto this record. Fields absent from
    /// the patch keep their current value.
    pub fn merge(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(default_priority) = patch.default_priority {
            self.default_priority = default_priority;
        }
    }
}

/// Partial profile update for shallow merges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_priority: Option<Priority>,
}
