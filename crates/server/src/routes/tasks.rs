use serde::Deserialize;
use ticklist_core::model::{NewTask, TaskId};
use ticklist_core::TasksService;

use super::response::{ApiError, ApiReply, ApiResponse};
use super::util::parse_body;

#[derive(Debug, Deserialize)]
struct CreateTaskArgs {
    #[serde(default)]
    id: Option<TaskId>,
    text: String,
}

#[derive(Debug, Deserialize)]
struct PersistOrderArgs {
    ids: Vec<TaskId>,
}

pub fn list(service: &TasksService) -> Result<ApiReply, ApiError> {
    let tasks = service.list()?;
    Ok(ApiReply::json(200, &ApiResponse::success(tasks)))
}

pub fn create(service: &TasksService, body: &str) -> Result<ApiReply, ApiError> {
    let args: CreateTaskArgs = parse_body(body)?;
    let tasks = service.create(NewTask {
        id: args.id,
        text: args.text,
    })?;
    Ok(ApiReply::json(200, &ApiResponse::success(tasks)))
}

pub fn toggle_status(service: &TasksService, id: TaskId) -> Result<ApiReply, ApiError> {
    let tasks = service.toggle_status(id)?;
    Ok(ApiReply::json(200, &ApiResponse::success(tasks)))
}

pub fn delete(service: &TasksService, id: TaskId) -> Result<ApiReply, ApiError> {
    let tasks = service.delete(id)?;
    Ok(ApiReply::json(200, &ApiResponse::success(tasks)))
}

pub fn delete_completed(service: &TasksService) -> Result<ApiReply, ApiError> {
    let tasks = service.delete_completed()?;
    Ok(ApiReply::json(200, &ApiResponse::success(tasks)))
}

pub fn persist_order(service: &TasksService, body: &str) -> Result<ApiReply, ApiError> {
    let args: PersistOrderArgs = parse_body(body)?;
    service.persist_order(&args.ids)?;
    Ok(ApiReply::json(200, &ApiResponse::acknowledged()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use crate::routes::util::test_service;

    fn data_ids(reply: &ApiReply) -> Vec<u64> {
        let value: Value = serde_json::from_slice(&reply.body).expect("json body");
        value["data"]
            .as_array()
            .expect("data array")
            .iter()
            .filter_map(|task| task["id"].as_u64())
            .collect()
    }

    #[test]
    fn create_accepts_optional_id() {
        let (service, _dir) = test_service();
        let reply = create(&service, r#"{"id": 4, "text": "Water plants"}"#).unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(data_ids(&reply), vec![4]);

        let reply = create(&service, r#"{"text": "Feed cat"}"#).unwrap();
        assert_eq!(data_ids(&reply), vec![4, 5]);
    }

    #[test]
    fn create_rejects_blank_text_with_400() {
        let (service, _dir) = test_service();
        let err = create(&service, r#"{"text": "  "}"#).unwrap_err();
        assert_eq!(err.status(), 400);
        let err = create(&service, "not json").unwrap_err();
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn unknown_ids_are_404() {
        let (service, _dir) = test_service();
        assert_eq!(toggle_status(&service, 9).unwrap_err().status(), 404);
        assert_eq!(delete(&service, 9).unwrap_err().status(), 404);
    }

    #[test]
    fn order_is_acknowledged_and_applied() {
        let (service, _dir) = test_service();
        service.seed_sample_tasks().unwrap();
        let reply = persist_order(&service, r#"{"ids": [3, 2, 1]}"#).unwrap();
        assert_eq!(reply.body_str(), r#"{"ok":true}"#);
        assert_eq!(data_ids(&list(&service).unwrap()), vec![3, 2, 1, 4, 5, 6]);
    }

    #[test]
    fn delete_completed_without_completed_tasks_is_fine() {
        let (service, _dir) = test_service();
        create(&service, r#"{"text": "Only"}"#).unwrap();
        let reply = delete_completed(&service).unwrap();
        assert_eq!(data_ids(&reply), vec![1]);
    }
}
