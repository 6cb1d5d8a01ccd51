use anyhow::Result;

use crate::config::AppConfig;
use crate::filter::{compute_display, DisplayView};
use crate::model::{ClearOutcome, FilterMode, NewTask, Task, TaskId, ToggleOutcome};
use crate::services::TasksService;

/// Load the stored list and apply `mode` to it.
pub fn list_tasks(config: &AppConfig, mode: FilterMode) -> Result<DisplayView> {
    let service = TasksService::new(config.clone())?;
    Ok(compute_display(&service.list()?, mode))
}

/// Add a task with the next unused id and return the stored row.
pub fn add_task(config: &AppConfig, text: &str) -> Result<Task> {
    let service = TasksService::new(config.clone())?;
    let proposed = service.total_created()? + 1;
    let tasks = service.create(NewTask::new(proposed, text))?;
    let created = tasks
        .into_iter()
        .max_by_key(|task| task.id)
        .ok_or_else(|| anyhow::anyhow!("Store returned no tasks after create"))?;
    Ok(created)
}

pub fn toggle_task(config: &AppConfig, id: TaskId) -> Result<ToggleOutcome> {
    let service = TasksService::new(config.clone())?;
    let tasks = service.toggle_status(id)?;
    let completed = tasks
        .iter()
        .find(|task| task.id == id)
        .map(|task| task.completed)
        .unwrap_or_default();
    Ok(ToggleOutcome { id, completed })
}

pub fn delete_task(config: &AppConfig, id: TaskId) -> Result<usize> {
    let service = TasksService::new(config.clone())?;
    Ok(service.delete(id)?.len())
}

pub fn clear_completed(config: &AppConfig) -> Result<ClearOutcome> {
    let service = TasksService::new(config.clone())?;
    let before = service.list()?.len();
    let remaining = service.delete_completed()?.len();
    Ok(ClearOutcome {
        removed: before.saturating_sub(remaining),
        remaining,
    })
}
