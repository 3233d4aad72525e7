use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{StoreError, TaskStore, UserStore};
use crate::models::{NewTask, Task, TaskUpdate, User, UserCredentials};

/// In-process store with the same semantics as `PgStore`: serial ids starting
/// at 1, unique usernames, owner-scoped task access.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<UserCredentials>,
    tasks: BTreeMap<i32, Task>,
    last_user_id: i32,
    last_task_id: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn task_count(&self) -> usize {
        self.lock().tasks.len()
    }

    // A poisoned lock only means another test thread panicked mid-write;
    // the tables themselves are still consistent.
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn owned_mut(tables: &mut Tables, owner: i32, id: i32) -> Option<&mut Task> {
    tables.tasks.get_mut(&id).filter(|task| task.user_id == owner)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut tables = self.lock();
        if tables.users.iter().any(|user| user.username == username) {
            return Err(StoreError::Duplicate);
        }

        tables.last_user_id += 1;
        let credentials = UserCredentials {
            id: tables.last_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.push(credentials.clone());

        Ok(credentials.into())
    }

    async fn find_user(&self, username: &str) -> Result<Option<UserCredentials>, StoreError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn tasks_for(&self, owner: i32) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .lock()
            .tasks
            .values()
            .filter(|task| task.user_id == owner)
            .cloned()
            .collect())
    }

    async fn insert_task(&self, owner: i32, task: &NewTask) -> Result<Task, StoreError> {
        let mut tables = self.lock();
        tables.last_task_id += 1;
        let task = Task {
            id: tables.last_task_id,
            user_id: owner,
            title: task.title.clone(),
            description: task.description.clone(),
            completed: false,
        };
        tables.tasks.insert(task.id, task.clone());

        Ok(task)
    }

    async fn find_task(&self, owner: i32, id: i32) -> Result<Option<Task>, StoreError> {
        Ok(self
            .lock()
            .tasks
            .get(&id)
            .filter(|task| task.user_id == owner)
            .cloned())
    }

    async fn replace_task(
        &self,
        owner: i32,
        id: i32,
        update: &TaskUpdate,
    ) -> Result<Option<Task>, StoreError> {
        let mut tables = self.lock();
        Ok(owned_mut(&mut tables, owner, id).map(|task| {
            task.title = update.title.clone();
            task.description = update.description.clone();
            task.completed = update.completed;
            task.clone()
        }))
    }

    async fn set_completed(
        &self,
        owner: i32,
        id: i32,
        completed: bool,
    ) -> Result<Option<Task>, StoreError> {
        let mut tables = self.lock();
        Ok(owned_mut(&mut tables, owner, id).map(|task| {
            task.completed = completed;
            task.clone()
        }))
    }

    async fn delete_task(&self, owner: i32, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.lock();
        if owned_mut(&mut tables, owner, id).is_none() {
            return Ok(false);
        }
        Ok(tables.tasks.remove(&id).is_some())
    }
}
