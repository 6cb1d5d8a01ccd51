//! One-shot intents and the store requests they turn into.

use std::collections::VecDeque;

use ticklist_core::model::{NewTask, TaskId};

/// Identifies one store round trip so its completion can be matched up.
pub type Ticket = u64;

/// A requested change that still has to be sent to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Intent {
    Load { initial: bool },
    Create { text: String },
    Toggle(TaskId),
    Delete(TaskId),
    DeleteCompleted,
    PersistOrder(Vec<TaskId>),
}

/// Intents are queued, taken exactly once, and dropped after dispatch.
#[derive(Debug, Default)]
pub(crate) struct IntentQueue {
    pending: VecDeque<Intent>,
}

impl IntentQueue {
    pub(crate) fn submit(&mut self, intent: Intent) {
        self.pending.push_back(intent);
    }

    pub(crate) fn take(&mut self) -> Option<Intent> {
        self.pending.pop_front()
    }

    pub(crate) fn has_load(&self) -> bool {
        self.pending
            .iter()
            .any(|intent| matches!(intent, Intent::Load { .. }))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Store-mutating operations whose response replaces the cached collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    Create { id: TaskId },
    Toggle(TaskId),
    Delete(TaskId),
    DeleteCompleted,
}

impl MutationKind {
    pub fn label(&self) -> &'static str {
        match self {
            MutationKind::Create { .. } => "add task",
            MutationKind::Toggle(_) => "update status",
            MutationKind::Delete(_) => "delete task",
            MutationKind::DeleteCompleted => "clear completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListAll,
    Create(NewTask),
    Toggle(TaskId),
    Delete(TaskId),
    DeleteCompleted,
    PersistOrder(Vec<TaskId>),
}

/// A request ready to be executed against a [`ticklist_core::TaskStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub request: Request,
}

impl Dispatch {
    pub fn label(&self) -> &'static str {
        match &self.request {
            Request::ListAll => "load tasks",
            Request::Create(_) => "add task",
            Request::Toggle(_) => "update status",
            Request::Delete(_) => "delete task",
            Request::DeleteCompleted => "clear completed",
            Request::PersistOrder(_) => "save order",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_hands_out_each_intent_once_in_order() {
        let mut queue = IntentQueue::default();
        queue.submit(Intent::Toggle(1));
        queue.submit(Intent::Delete(2));

        assert_eq!(queue.take(), Some(Intent::Toggle(1)));
        assert_eq!(queue.take(), Some(Intent::Delete(2)));
        assert_eq!(queue.take(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn has_load_spots_pending_reload() {
        let mut queue = IntentQueue::default();
        assert!(!queue.has_load());
        queue.submit(Intent::Load { initial: false });
        assert!(queue.has_load());
    }
}
