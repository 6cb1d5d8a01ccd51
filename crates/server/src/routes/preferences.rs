use serde::{Deserialize, Serialize};
use ticklist_core::model::ThemeMode;
use ticklist_core::TasksService;

use super::response::{ApiError, ApiReply, ApiResponse};
use super::util::parse_body;

#[derive(Debug, Serialize, Deserialize)]
struct ThemePreference {
    theme: Option<ThemeMode>,
}

pub fn get_theme(service: &TasksService) -> Result<ApiReply, ApiError> {
    let theme = service.theme()?;
    Ok(ApiReply::json(
        200,
        &ApiResponse::success(ThemePreference { theme }),
    ))
}

pub fn put_theme(service: &TasksService, body: &str) -> Result<ApiReply, ApiError> {
    let preference: ThemePreference = parse_body(body)?;
    let theme = preference
        .theme
        .ok_or_else(|| ApiError::BadRequest("theme must be \"light\" or \"dark\"".into()))?;
    service.set_theme(theme)?;
    Ok(ApiReply::json(
        200,
        &ApiResponse::success(ThemePreference { theme: Some(theme) }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::routes::util::test_service;

    #[test]
    fn theme_round_trips_through_meta() {
        let (service, _dir) = test_service();
        assert_eq!(
            get_theme(&service).unwrap().body_str(),
            r#"{"ok":true,"data":{"theme":null}}"#
        );
        put_theme(&service, r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(
            get_theme(&service).unwrap().body_str(),
            r#"{"ok":true,"data":{"theme":"dark"}}"#
        );
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let (service, _dir) = test_service();
        assert_eq!(
            put_theme(&service, r#"{"theme": "sepia"}"#)
                .unwrap_err()
                .status(),
            400
        );
        assert_eq!(put_theme(&service, "{}").unwrap_err().status(), 400);
    }
}
