//! Stateful façades over the API client and the mirror cache.
//!
//! Each store owns the current in-memory view of one entity and keeps the
//! cache slot loosely synchronized with the server: reads prefer the cache,
//! writes go to the server first and rewrite the slot only after the round
//! trip succeeds. There is no overlapping-write protection; the last
//! response to land wins.

use chrono::NaiveDate;

use crate::cache::{MirrorCache, TASKS_SLOT, USER_SLOT};
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::{Status, Task, TaskDraft, User, UserPatch};
use crate::stats::{compute_stats, TaskStats};

/// Lifecycle of a store.
///
/// `Uninitialized -> Loading` happens once, on the first refresh.
/// `Loading -> Ready` happens when the cache slot is adopted or a fetch
/// resolves. A failed fetch leaves the store `Loading`; the caller decides
/// whether to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Uninitialized,
    Loading,
    Ready,
}

/// How a refresh treats the cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Adopt the cached collection when the slot exists; the server is
    /// only consulted when it does not.
    Prefer,
    /// Clear the slot first and always consult the server.
    Invalidate,
}

/// Store for the task collection.
#[derive(Debug)]
pub struct TaskStore {
    client: ApiClient,
    cache: MirrorCache,
    tasks: Vec<Task>,
    state: LoadState,
}

impl TaskStore {
    pub fn new(client: ApiClient, cache: MirrorCache) -> Self {
        Self {
            client,
            cache,
            tasks: Vec::new(),
            state: LoadState::Uninitialized,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Current in-memory collection, newest-first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Populate the store from the cache slot or, failing that, the server.
    pub async fn refresh(&mut self, policy: CachePolicy) -> Result<()> {
        self.state = LoadState::Loading;

        if policy == CachePolicy::Invalidate {
            self.cache.clear(TASKS_SLOT)?;
        }

        if let Some(tasks) = self.cache.read::<Vec<Task>>(TASKS_SLOT) {
            self.tasks = tasks;
            self.state = LoadState::Ready;
            return Ok(());
        }

        let tasks = self.client.fetch_tasks().await?;
        self.cache.write(TASKS_SLOT, &tasks)?;
        self.tasks = tasks;
        self.state = LoadState::Ready;
        Ok(())
    }

    /// Create a task on the server and prepend the canonical record.
    pub async fn add_task(&mut self, draft: TaskDraft) -> Result<Task> {
        let task = self.client.create_task(&draft).await?;
        self.tasks.insert(0, task.clone());
        self.cache.write(TASKS_SLOT, &self.tasks)?;
        Ok(task)
    }

    /// Push an edited record to the server.
    ///
    /// The edit is first reconciled against the previously known record so
    /// `completed_at` tracks the status transition; see [`Task::apply_edit`].
    /// A not-found from the server propagates and leaves the in-memory
    /// collection unchanged.
    pub async fn update_task(&mut self, edit: Task, today: NaiveDate) -> Result<Task> {
        let merged = match self.get(&edit.id) {
            Some(prev) => prev.apply_edit(edit, today),
            None => edit,
        };

        let stored = self.client.update_task(&merged).await?;
        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == stored.id) {
            *slot = stored.clone();
        }
        self.cache.write(TASKS_SLOT, &self.tasks)?;
        Ok(stored)
    }

    /// Delete by id. Absent ids are not an error, locally or remotely.
    pub async fn delete_task(&mut self, id: &str) -> Result<()> {
        self.client.delete_task(id).await?;
        self.tasks.retain(|task| task.id != id);
        self.cache.write(TASKS_SLOT, &self.tasks)?;
        Ok(())
    }

    /// Move a task to completed. Silently a no-op when `id` is not in the
    /// current collection.
    pub async fn mark_complete(&mut self, id: &str, today: NaiveDate) -> Result<()> {
        let Some(prev) = self.get(id) else {
            return Ok(());
        };
        let edit = prev.transition(Status::Completed, today);
        self.update_task(edit, today).await?;
        Ok(())
    }

    /// Move a task back to pending. Silently a no-op when `id` is not in
    /// the current collection.
    pub async fn mark_incomplete(&mut self, id: &str, today: NaiveDate) -> Result<()> {
        let Some(prev) = self.get(id) else {
            return Ok(());
        };
        let edit = prev.transition(Status::Pending, today);
        self.update_task(edit, today).await?;
        Ok(())
    }

    /// Summary counts over the in-memory collection as seen on `today`.
    pub fn stats(&self, today: NaiveDate) -> TaskStats {
        compute_stats(&self.tasks, today)
    }
}

/// Store for the singleton profile. Same mirror discipline as
/// [`TaskStore`], without create or delete.
#[derive(Debug)]
pub struct UserStore {
    client: ApiClient,
    cache: MirrorCache,
    user: Option<User>,
    state: LoadState,
}

impl UserStore {
    pub fn new(client: ApiClient, cache: MirrorCache) -> Self {
        Self {
            client,
            cache,
            user: None,
            state: LoadState::Uninitialized,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Populate the store from the cache slot or, failing that, the server.
    pub async fn refresh(&mut self, policy: CachePolicy) -> Result<()> {
        self.state = LoadState::Loading;

        if policy == CachePolicy::Invalidate {
            self.cache.clear(USER_SLOT)?;
        }

        if let Some(user) = self.cache.read::<User>(USER_SLOT) {
            self.user = Some(user);
            self.state = LoadState::Ready;
            return Ok(());
        }

        let user = self.client.fetch_user().await?;
        self.cache.write(USER_SLOT, &user)?;
        self.user = Some(user);
        self.state = LoadState::Ready;
        Ok(())
    }

    /// Shallow-merge a partial update through the server and adopt its
    /// response. A no-op while the record has not been loaded.
    pub async fn update(&mut self, patch: UserPatch) -> Result<()> {
        if self.user.is_none() {
            return Ok(());
        }
        let updated = self.client.update_user(&patch).await?;
        self.cache.write(USER_SLOT, &updated)?;
        self.user = Some(updated);
        Ok(())
    }
}
