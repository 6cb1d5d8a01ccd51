use anyhow::Result;

use crate::config::AppConfig;
use crate::database::Database;
use crate::error::StoreError;
use crate::model::{NewTask, Task, TaskId, ThemeMode, MAX_TEXT_LEN};

/// Authoritative task list. Every mutation answers with the full collection
/// as stored after the change.
#[derive(Debug, Clone)]
pub struct TasksService {
    config: AppConfig,
}

impl TasksService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Database::initialize(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn list(&self) -> Result<Vec<Task>> {
        let db = self.open_database()?;
        db.fetch_tasks()
    }

    pub fn create(&self, new_task: NewTask) -> Result<Vec<Task>> {
        let text = validate_text(&new_task.text)?;
        let db = self.open_database()?;
        let stored = db.insert_task(&NewTask {
            id: new_task.id,
            text,
        })?;
        tracing::debug!(id = stored.id, "task created");
        db.fetch_tasks()
    }

    pub fn toggle_status(&self, id: TaskId) -> Result<Vec<Task>> {
        let db = self.open_database()?;
        match db.toggle_status(id)? {
            Some(outcome) => {
                tracing::debug!(id, completed = outcome.completed, "task status toggled");
                db.fetch_tasks()
            }
            None => Err(StoreError::NotFound(id).into()),
        }
    }

    pub fn delete(&self, id: TaskId) -> Result<Vec<Task>> {
        let db = self.open_database()?;
        if !db.delete_task(id)? {
            return Err(StoreError::NotFound(id).into());
        }
        tracing::debug!(id, "task deleted");
        db.fetch_tasks()
    }

    pub fn delete_completed(&self) -> Result<Vec<Task>> {
        let db = self.open_database()?;
        let removed = db.delete_completed()?;
        tracing::debug!(removed, "completed tasks cleared");
        db.fetch_tasks()
    }

    pub fn persist_order(&self, ordered: &[TaskId]) -> Result<()> {
        let mut db = self.open_database()?;
        let ranked = db.update_sort_ranks(ordered)?;
        tracing::debug!(ranked, "task order persisted");
        Ok(())
    }

    pub fn total_created(&self) -> Result<TaskId> {
        let db = self.open_database()?;
        db.total_created()
    }

    pub fn theme(&self) -> Result<Option<ThemeMode>> {
        let db = self.open_database()?;
        db.theme()
    }

    pub fn set_theme(&self, theme: ThemeMode) -> Result<()> {
        let db = self.open_database()?;
        db.set_theme(theme)
    }

    pub fn seed_sample_tasks(&self) -> Result<bool> {
        let db = self.open_database()?;
        db.seed_sample_tasks()
    }

    fn open_database(&self) -> Result<Database> {
        Database::initialize(&self.config)
    }
}

/// Trimmed task text, or a validation error when it is empty or too long.
pub fn validate_text(raw: &str) -> Result<String, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation("Task text cannot be empty".into()));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(StoreError::Validation(format!(
            "Task text is limited to {} characters",
            MAX_TEXT_LEN
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn service_with_temp_dir() -> (TasksService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(temp_dir.path().to_path_buf()).unwrap();
        let service = TasksService::new(config).unwrap();
        (service, temp_dir)
    }

    fn store_error(err: anyhow::Error) -> StoreError {
        StoreError::from(err)
    }

    #[test]
    fn create_returns_full_collection() {
        let (service, _guard) = service_with_temp_dir();
        service.create(NewTask::new(1, "first")).unwrap();
        let tasks = service.create(NewTask::new(2, "  second  ")).unwrap();

        let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(service.total_created().unwrap(), 2);
    }

    #[test]
    fn create_rejects_blank_and_oversized_text() {
        let (service, _guard) = service_with_temp_dir();
        let err = service.create(NewTask::new(1, "   ")).unwrap_err();
        assert_eq!(store_error(err).kind(), "validation");

        let long = "x".repeat(MAX_TEXT_LEN + 1);
        let err = service.create(NewTask::new(1, long)).unwrap_err();
        assert_eq!(store_error(err).kind(), "validation");
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn toggle_and_delete_report_missing_ids() {
        let (service, _guard) = service_with_temp_dir();
        service.create(NewTask::new(1, "only")).unwrap();

        let err = service.toggle_status(42).unwrap_err();
        assert_eq!(store_error(err), StoreError::NotFound(42));
        let err = service.delete(42).unwrap_err();
        assert_eq!(store_error(err), StoreError::NotFound(42));

        let tasks = service.toggle_status(1).unwrap();
        assert!(tasks[0].completed);
        assert!(service.delete(1).unwrap().is_empty());
    }

    #[test]
    fn delete_completed_keeps_active_tasks() {
        let (service, _guard) = service_with_temp_dir();
        service.seed_sample_tasks().unwrap();
        let tasks = service.delete_completed().unwrap();
        assert_eq!(tasks.len(), 5);
        assert!(tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn persisted_order_is_returned_by_list() {
        let (service, _guard) = service_with_temp_dir();
        service.seed_sample_tasks().unwrap();
        service.persist_order(&[6, 5, 4, 3, 2, 1]).unwrap();
        let ids: Vec<TaskId> = service.list().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![6, 5, 4, 3, 2, 1]);
    }
}
