//! The request/response boundary between a client and the authoritative task list.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::model::{NewTask, Task, TaskId};
use crate::services::TasksService;

/// Operations a client may issue against the task store. Every mutating call
/// answers with the full collection as stored after the change; a failed call
/// has not been applied.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    async fn list_all(&self) -> StoreResult<Vec<Task>>;

    async fn create(&self, task: NewTask) -> StoreResult<Vec<Task>>;

    async fn toggle_status(&self, id: TaskId) -> StoreResult<Vec<Task>>;

    async fn delete(&self, id: TaskId) -> StoreResult<Vec<Task>>;

    async fn delete_completed(&self) -> StoreResult<Vec<Task>>;

    async fn persist_order(&self, ordered: Vec<TaskId>) -> StoreResult<()>;
}

/// In-process store backed by the SQLite [`TasksService`].
#[derive(Debug, Clone)]
pub struct ServiceStore {
    service: Arc<TasksService>,
}

impl ServiceStore {
    pub fn new(service: TasksService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &TasksService {
        self.service.as_ref()
    }

    async fn with_service<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&TasksService) -> anyhow::Result<T> + Send + 'static,
    {
        let service = self.service.clone();
        tokio::task::spawn_blocking(move || f(service.as_ref()))
            .await
            .map_err(|err| StoreError::transport(format!("blocking task failed: {}", err)))?
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl TaskStore for ServiceStore {
    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        self.with_service(|service| service.list()).await
    }

    async fn create(&self, task: NewTask) -> StoreResult<Vec<Task>> {
        self.with_service(move |service| service.create(task)).await
    }

    async fn toggle_status(&self, id: TaskId) -> StoreResult<Vec<Task>> {
        self.with_service(move |service| service.toggle_status(id))
            .await
    }

    async fn delete(&self, id: TaskId) -> StoreResult<Vec<Task>> {
        self.with_service(move |service| service.delete(id)).await
    }

    async fn delete_completed(&self) -> StoreResult<Vec<Task>> {
        self.with_service(|service| service.delete_completed())
            .await
    }

    async fn persist_order(&self, ordered: Vec<TaskId>) -> StoreResult<()> {
        self.with_service(move |service| service.persist_order(&ordered))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use tempfile::TempDir;

    fn store() -> (ServiceStore, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        let service = TasksService::new(config).expect("service");
        (ServiceStore::new(service), dir)
    }

    #[tokio::test]
    async fn store_calls_return_authoritative_collection() {
        let (store, _dir) = store();
        let tasks = store.create(NewTask::new(1, "alpha")).await.unwrap();
        assert_eq!(tasks.len(), 1);

        let tasks = store.toggle_status(1).await.unwrap();
        assert!(tasks[0].completed);

        let tasks = store.delete_completed().await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn missing_id_maps_to_not_found() {
        let (store, _dir) = store();
        let err = store.delete(5).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(5));
    }
}
