//! Runs store requests on a tokio runtime and routes completions back to the UI thread.

use std::sync::Arc;

use ticklist_core::TaskStore;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::sync::controller::ViewSync;
use crate::sync::intent::{Dispatch, Request};
use crate::sync::message::Completion;

/// Execute one request and wrap its outcome for [`ViewSync::apply`].
pub async fn perform<S>(store: &S, dispatch: Dispatch) -> Completion
where
    S: TaskStore + ?Sized,
{
    let Dispatch { ticket, request } = dispatch;
    match request {
        Request::ListAll => Completion::collection(ticket, store.list_all().await),
        Request::Create(task) => Completion::collection(ticket, store.create(task).await),
        Request::Toggle(id) => Completion::collection(ticket, store.toggle_status(id).await),
        Request::Delete(id) => Completion::collection(ticket, store.delete(id).await),
        Request::DeleteCompleted => {
            Completion::collection(ticket, store.delete_completed().await)
        }
        Request::PersistOrder(ids) => Completion::persisted(ticket, store.persist_order(ids).await),
    }
}

pub struct Dispatcher<S: TaskStore> {
    store: Arc<S>,
    runtime: Handle,
    sender: UnboundedSender<Completion>,
}

impl<S: TaskStore> Dispatcher<S> {
    pub fn new(store: Arc<S>, runtime: Handle) -> (Self, UnboundedReceiver<Completion>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                store,
                runtime,
                sender,
            },
            receiver,
        )
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn dispatch(&self, dispatch: Dispatch) {
        let store = Arc::clone(&self.store);
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let ticket = dispatch.ticket;
            let label = dispatch.label();
            let completion = perform(store.as_ref(), dispatch).await;
            if sender.send(completion).is_err() {
                tracing::debug!(ticket, request = label, "completion dropped, receiver closed");
            }
        });
    }

    /// Dispatch everything the controller has queued. Returns how many
    /// requests were started.
    pub fn flush(&self, view: &mut ViewSync) -> usize {
        let dispatches = view.drain_dispatches();
        let started = dispatches.len();
        for dispatch in dispatches {
            self.dispatch(dispatch);
        }
        started
    }
}

/// Apply every completion that has already arrived without blocking.
pub fn apply_ready(receiver: &mut UnboundedReceiver<Completion>, view: &mut ViewSync) -> usize {
    let mut applied = 0;
    loop {
        match receiver.try_recv() {
            Ok(completion) => {
                view.apply(completion);
                applied += 1;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
    applied
}
