use serde::Serialize;
use thiserror::Error;
use ticklist_core::StoreError;

/// Envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn acknowledged() -> Self {
        Self {
            ok: true,
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("No route for {0}")]
    NoRoute(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NoRoute(_) => 404,
            ApiError::Store(StoreError::Validation(_)) => 400,
            ApiError::Store(StoreError::NotFound(_)) => 404,
            ApiError::Store(StoreError::Transport(_)) => 500,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Store(StoreError::from(err))
    }
}

/// A fully rendered reply, independent of the socket it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ApiReply {
    pub fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_vec(payload) {
            Ok(body) => Self {
                status,
                content_type: "application/json",
                body,
            },
            Err(err) => {
                tracing::error!(error = %err, "failed to encode response");
                Self {
                    status: 500,
                    content_type: "application/json",
                    body: br#"{"ok":false,"error":"failed to encode response"}"#.to_vec(),
                }
            }
        }
    }

    pub fn error(err: &ApiError) -> Self {
        Self::json(err.status(), &ApiResponse::failure(err.to_string()))
    }

    pub fn bytes(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn failure_serializes_without_data() {
        let json = serde_json::to_string(&ApiResponse::failure("nope")).unwrap();
        assert_eq!(json, r#"{"ok":false,"error":"nope"}"#);
    }

    #[test]
    fn acknowledged_is_bare_ok() {
        let json = serde_json::to_string(&ApiResponse::acknowledged()).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn store_errors_map_to_status_codes() {
        assert_eq!(
            ApiError::from(StoreError::Validation("empty".into())).status(),
            400
        );
        assert_eq!(ApiError::from(StoreError::NotFound(3)).status(), 404);
        assert_eq!(ApiError::from(StoreError::transport("io")).status(), 500);
    }
}
