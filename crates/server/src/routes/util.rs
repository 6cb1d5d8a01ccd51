use serde::de::DeserializeOwned;

use super::response::ApiError;

pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body)
        .map_err(|err| ApiError::BadRequest(format!("invalid request body: {}", err)))
}

#[cfg(test)]
pub(crate) fn test_service() -> (ticklist_core::TasksService, tempfile::TempDir) {
    use ticklist_core::config::AppConfig;

    let dir = tempfile::TempDir::new().expect("temp dir");
    let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
    let service = ticklist_core::TasksService::new(config).expect("service");
    (service, dir)
}
