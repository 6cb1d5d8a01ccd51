use thiserror::Error;

use crate::model::TaskId;

/// Failures a task store can report back to a client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Task {0} not found")]
    NotFound(TaskId),

    #[error("Task store unavailable: {0}")]
    Transport(String),
}

impl StoreError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        StoreError::Transport(err.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Validation(_) => "validation",
            StoreError::NotFound(_) => "not_found",
            StoreError::Transport(_) => "transport",
        }
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StoreError>() {
            Ok(store) => store,
            Err(other) => StoreError::Transport(format!("{:#}", other)),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn anyhow_roundtrip_keeps_store_variant() {
        let err = anyhow::Error::new(StoreError::NotFound(4));
        assert_eq!(StoreError::from(err), StoreError::NotFound(4));
    }

    #[test]
    fn foreign_errors_become_transport() {
        let err: anyhow::Result<()> = Err(std::io::Error::other("disk gone")).context("open db");
        let mapped = StoreError::from(err.unwrap_err());
        assert_eq!(mapped.kind(), "transport");
        assert!(mapped.to_string().contains("open db"));
    }
}
