use async_trait::async_trait;
use log::info;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{StoreError, TaskStore, UserStore};
use crate::config::Config;
use crate::models::{NewTask, Task, TaskUpdate, User, UserCredentials};

/// Postgres-backed store. Each operation is a single statement on a pooled
/// connection.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;
        info!(
            "connected to postgres at {}:{}/{}",
            config.db_host, config.db_port, config.db_name
        );
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `users` and `tasks` tables when they do not exist yet.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("database schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id, username",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user(&self, username: &str) -> Result<Option<UserCredentials>, StoreError> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, password AS password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

// Older databases may hold NULL descriptions or completion flags; the
// COALESCEs keep those rows decodable.
#[async_trait]
impl TaskStore for PgStore {
    async fn tasks_for(&self, owner: i32) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, COALESCE(description, '') AS description, \
             COALESCE(completed, FALSE) AS completed \
             FROM tasks WHERE user_id = $1 ORDER BY id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn insert_task(&self, owner: i32, task: &NewTask) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (user_id, title, description, completed) VALUES ($1, $2, $3, FALSE) \
             RETURNING id, user_id, title, COALESCE(description, '') AS description, \
             COALESCE(completed, FALSE) AS completed",
        )
        .bind(owner)
        .bind(&task.title)
        .bind(&task.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn find_task(&self, owner: i32, id: i32) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, COALESCE(description, '') AS description, \
             COALESCE(completed, FALSE) AS completed \
             FROM tasks WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn replace_task(
        &self,
        owner: i32,
        id: i32,
        update: &TaskUpdate,
    ) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET title = $1, description = $2, completed = $3 \
             WHERE id = $4 AND user_id = $5 \
             RETURNING id, user_id, title, COALESCE(description, '') AS description, \
             COALESCE(completed, FALSE) AS completed",
        )
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.completed)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn set_completed(
        &self,
        owner: i32,
        id: i32,
        completed: bool,
    ) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET completed = $1 WHERE id = $2 AND user_id = $3 \
             RETURNING id, user_id, title, COALESCE(description, '') AS description, \
             COALESCE(completed, FALSE) AS completed",
        )
        .bind(completed)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete_task(&self, owner: i32, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
