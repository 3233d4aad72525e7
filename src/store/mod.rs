//! Persistence seam.
//!
//! Services talk to the store through the [`UserStore`] and [`TaskStore`]
//! traits. [`PgStore`] is the production implementation; [`MemoryStore`]
//! keeps everything in process and backs the test-suite.
//!
//! Every task operation takes the owner's id next to the task id and must
//! only ever touch rows owned by that user.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::models::{NewTask, Task, TaskUpdate, User, UserCredentials};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated")]
    Duplicate,
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Duplicate,
            _ => StoreError::Database(error),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new account. Fails with [`StoreError::Duplicate`] when the
    /// username is taken.
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_user(&self, username: &str) -> Result<Option<UserCredentials>, StoreError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn tasks_for(&self, owner: i32) -> Result<Vec<Task>, StoreError>;

    /// Inserts a task with `completed = false`.
    async fn insert_task(&self, owner: i32, task: &NewTask) -> Result<Task, StoreError>;

    async fn find_task(&self, owner: i32, id: i32) -> Result<Option<Task>, StoreError>;

    /// Replaces title, description and completed. `None` when no row matched.
    async fn replace_task(
        &self,
        owner: i32,
        id: i32,
        update: &TaskUpdate,
    ) -> Result<Option<Task>, StoreError>;

    /// Sets only the completed flag. `None` when no row matched.
    async fn set_completed(
        &self,
        owner: i32,
        id: i32,
        completed: bool,
    ) -> Result<Option<Task>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete_task(&self, owner: i32, id: i32) -> Result<bool, StoreError>;
}
