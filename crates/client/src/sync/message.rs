//! Completions passed from the dispatcher back into the controller.

use ticklist_core::model::Task;
use ticklist_core::StoreResult;

use crate::sync::intent::Ticket;

#[derive(Debug, Clone)]
pub enum Reply {
    Collection(StoreResult<Vec<Task>>),
    Persisted(StoreResult<()>),
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub ticket: Ticket,
    pub reply: Reply,
}

impl Completion {
    pub fn collection(ticket: Ticket, result: StoreResult<Vec<Task>>) -> Self {
        Self {
            ticket,
            reply: Reply::Collection(result),
        }
    }

    pub fn persisted(ticket: Ticket, result: StoreResult<()>) -> Self {
        Self {
            ticket,
            reply: Reply::Persisted(result),
        }
    }
}
