//! State shared between the controller and whatever front end renders it.

use std::time::{Duration, Instant};

use ticklist_core::model::{FilterMode, Task, TaskId, ThemeMode};

use crate::sync::intent::{MutationKind, Ticket};

pub(crate) const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct StatusNotice {
    pub message: String,
    pub kind: NoticeKind,
    pub created_at: Instant,
}

impl StatusNotice {
    pub(crate) fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
            created_at: Instant::now(),
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
            created_at: Instant::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Emitted by the controller once the display subset has been recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    DisplaySynced { mode: FilterMode, count: usize },
    ThemeApplied(ThemeMode),
}

/// Why a reorder gesture was refused without touching any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderRejected {
    FilterActive(FilterMode),
    NotAPermutation,
    UnknownTask(TaskId),
    OutOfBounds,
}

impl std::fmt::Display for ReorderRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReorderRejected::FilterActive(mode) => {
                write!(f, "Reordering is only available in the All view (showing {})", mode)
            }
            ReorderRejected::NotAPermutation => {
                f.write_str("New order must contain every task exactly once")
            }
            ReorderRejected::UnknownTask(id) => write!(f, "Task {} is not in the list", id),
            ReorderRejected::OutOfBounds => f.write_str("Task cannot move any further"),
        }
    }
}

impl std::error::Error for ReorderRejected {}

/// What a dispatched ticket was for, so its completion can be merged correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Pending {
    Load { initial: bool },
    Mutation(MutationKind),
    Order,
}

/// Collection as it was before an optimistic reorder.
#[derive(Debug, Clone)]
pub(crate) struct ReorderSnapshot {
    pub(crate) ticket: Option<Ticket>,
    pub(crate) target: Vec<TaskId>,
    pub(crate) previous: Vec<Task>,
}
