//! Task operations, always scoped to the calling user.
//!
//! Every method takes the caller's [`Identity`] and passes it down to the
//! store next to the task id. A task owned by someone else is
//! indistinguishable from a task that does not exist: both are
//! [`TaskError::NotFound`].

use log::debug;
use std::sync::Arc;

use crate::auth::Identity;
use crate::models::{NewTask, Task, TaskUpdate};
use crate::store::{StoreError, TaskStore};

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner: Identity) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.tasks_for(owner.user_id()).await?)
    }

    pub async fn create(&self, owner: Identity, task: &NewTask) -> Result<Task, TaskError> {
        let task = self.store.insert_task(owner.user_id(), task).await?;
        debug!("user {} created task {}", owner.user_id(), task.id);
        Ok(task)
    }

    /// Replaces title, description and completed in one statement.
    pub async fn update(
        &self,
        owner: Identity,
        id: i32,
        update: &TaskUpdate,
    ) -> Result<Task, TaskError> {
        self.store
            .replace_task(owner.user_id(), id, update)
            .await?
            .ok_or(TaskError::NotFound)
    }

    /// Changes only the completed flag.
    ///
    /// The task is looked up first so a missing task is reported before any
    /// write is attempted.
    pub async fn set_completion(
        &self,
        owner: Identity,
        id: i32,
        completed: bool,
    ) -> Result<Task, TaskError> {
        if self.store.find_task(owner.user_id(), id).await?.is_none() {
            return Err(TaskError::NotFound);
        }

        // The row can still vanish between the two statements.
        self.store
            .set_completed(owner.user_id(), id, completed)
            .await?
            .ok_or(TaskError::NotFound)
    }

    pub async fn delete(&self, owner: Identity, id: i32) -> Result<(), TaskError> {
        if self.store.delete_task(owner.user_id(), id).await? {
            debug!("user {} deleted task {}", owner.user_id(), id);
            Ok(())
        } else {
            Err(TaskError::NotFound)
        }
    }
}
