//! The persistence collaborator behind the API handlers.
//!
//! Every handler issues exactly one store call; the store owns record
//! construction (`id`, timestamps) and the `updated_at` refresh on mutation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use shared::{CreateTaskRequest, Task, UpdateTaskRequest};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task {id} not found")]
    NotFound { id: Uuid },

    #[error("store connection failed: {source}")]
    Connection {
        #[from]
        source: redis::RedisError,
    },

    #[error("stored task could not be decoded: {source}")]
    Codec {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable CRUD over `Task` records, keyed by id.
///
/// `find_all` returns tasks ordered by `created_at` descending; `update_by_id`
/// and `delete_by_id` fail with `NotFound` when no record matches.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(&self, fields: CreateTaskRequest) -> Result<Task>;
    async fn find_all(&self) -> Result<Vec<Task>>;
    async fn update_by_id(&self, id: Uuid, patch: UpdateTaskRequest) -> Result<Task>;
    async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}

/// Production store: one JSON value per task under `task:{id}`.
pub struct RedisTaskStore {
    client: redis::Client,
}

impl RedisTaskStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    fn key(id: Uuid) -> String {
        format!("task:{id}")
    }
}

#[async_trait]
impl TaskStore for RedisTaskStore {
    async fn create(&self, fields: CreateTaskRequest) -> Result<Task> {
        let task = Task::new(fields.title, fields.description);

        let mut conn = self.client.get_async_connection().await?;
        let _: () = conn
            .set(Self::key(task.id), serde_json::to_string(&task)?)
            .await?;

        Ok(task)
    }

    async fn find_all(&self) -> Result<Vec<Task>> {
        let mut conn = self.client.get_async_connection().await?;

        let keys: Vec<String> = conn.keys("task:*").await?;
        let mut tasks = Vec::with_capacity(keys.len());
        for key in keys {
            let raw: String = conn.get(&key).await?;
            tasks.push(serde_json::from_str::<Task>(&raw)?);
        }

        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update_by_id(&self, id: Uuid, patch: UpdateTaskRequest) -> Result<Task> {
        let mut conn = self.client.get_async_connection().await?;

        let raw: Option<String> = conn.get(Self::key(id)).await?;
        let raw = raw.ok_or(StoreError::NotFound { id })?;

        let mut task: Task = serde_json::from_str(&raw)?;
        patch.apply_to(&mut task);
        task.updated_at = Utc::now();

        let _: () = conn
            .set(Self::key(id), serde_json::to_string(&task)?)
            .await?;

        Ok(task)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let mut conn = self.client.get_async_connection().await?;

        let deleted: usize = conn.del(Self::key(id)).await?;
        if deleted == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}

/// In-memory store for tests and dependency-free local runs.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, fields: CreateTaskRequest) -> Result<Task> {
        let task = Task::new(fields.title, fields.description);
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_all(&self) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update_by_id(&self, id: Uuid, patch: UpdateTaskRequest) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or(StoreError::NotFound { id })?;

        patch.apply_to(task);
        task.updated_at = Utc::now();

        Ok(task.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        self.tasks
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }
}
