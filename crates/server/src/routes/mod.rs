mod preferences;
pub mod response;
mod tasks;
mod util;

use tiny_http::Method;
use ticklist_core::model::TaskId;
use ticklist_core::TasksService;

use crate::static_files::StaticFiles;
use response::{ApiError, ApiReply};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ListTasks,
    CreateTask,
    ToggleStatus(TaskId),
    DeleteTask(TaskId),
    DeleteCompleted,
    PersistOrder,
    GetTheme,
    PutTheme,
    Static(String),
    Unknown,
}

impl Route {
    pub fn resolve(method: &Method, url: &str) -> Self {
        let path = url.split('?').next().unwrap_or("/");
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        match (method, segments.as_slice()) {
            (Method::Get, ["api", "tasks"]) => Route::ListTasks,
            (Method::Post, ["api", "tasks"]) => Route::CreateTask,
            (Method::Delete, ["api", "tasks", "completed"]) => Route::DeleteCompleted,
            (Method::Put, ["api", "tasks", "order"]) => Route::PersistOrder,
            (Method::Patch, ["api", "tasks", id, "status"]) => {
                parse_id(id).map(Route::ToggleStatus).unwrap_or(Route::Unknown)
            }
            (Method::Delete, ["api", "tasks", id]) => {
                parse_id(id).map(Route::DeleteTask).unwrap_or(Route::Unknown)
            }
            (Method::Get, ["api", "preferences", "theme"]) => Route::GetTheme,
            (Method::Put, ["api", "preferences", "theme"]) => Route::PutTheme,
            (Method::Get, ["api", ..]) => Route::Unknown,
            (Method::Get, _) => Route::Static(path.to_string()),
            _ => Route::Unknown,
        }
    }
}

fn parse_id(raw: &str) -> Option<TaskId> {
    raw.parse::<TaskId>().ok()
}

/// Shared state handed to every request.
pub struct Context {
    pub service: TasksService,
    pub static_files: Option<StaticFiles>,
}

pub fn handle(ctx: &Context, route: Route, body: &str) -> ApiReply {
    let result = match &route {
        Route::ListTasks => tasks::list(&ctx.service),
        Route::CreateTask => tasks::create(&ctx.service, body),
        Route::ToggleStatus(id) => tasks::toggle_status(&ctx.service, *id),
        Route::DeleteTask(id) => tasks::delete(&ctx.service, *id),
        Route::DeleteCompleted => tasks::delete_completed(&ctx.service),
        Route::PersistOrder => tasks::persist_order(&ctx.service, body),
        Route::GetTheme => preferences::get_theme(&ctx.service),
        Route::PutTheme => preferences::put_theme(&ctx.service, body),
        Route::Static(path) => match &ctx.static_files {
            Some(files) => files.serve(path),
            None => Err(ApiError::NoRoute(path.clone())),
        },
        Route::Unknown => Err(ApiError::NoRoute("this request".into())),
    };

    result.unwrap_or_else(|err| {
        if err.status() >= 500 {
            tracing::error!(?route, error = %err, "request failed");
        } else {
            tracing::debug!(?route, error = %err, "request rejected");
        }
        ApiReply::error(&err)
    })
}
