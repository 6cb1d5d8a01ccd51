//! Awaitable driver over the controller for tests: each call runs its requests to completion.

use std::sync::Arc;

use ticklist_core::model::{FilterMode, TaskId, ThemeMode};
use ticklist_core::TaskStore;

use crate::sync::controller::ViewSync;
use crate::sync::dispatch::perform;
use crate::sync::state::{ReorderRejected, SyncEvent};

pub(crate) struct SyncSession<S: TaskStore + ?Sized> {
    store: Arc<S>,
    view: ViewSync,
}

impl<S: TaskStore + ?Sized> SyncSession<S> {
    pub fn new(store: Arc<S>, theme: ThemeMode) -> Self {
        Self {
            store,
            view: ViewSync::new(theme),
        }
    }

    pub fn view(&self) -> &ViewSync {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewSync {
        &mut self.view
    }

    pub fn take_events(&mut self) -> Vec<SyncEvent> {
        self.view.take_events()
    }

    pub async fn initialize(&mut self) -> bool {
        let started = self.view.initialize();
        self.settle().await;
        started
    }

    pub async fn reload(&mut self) {
        self.view.reload();
        self.settle().await;
    }

    pub async fn create_task(&mut self, text: &str) -> bool {
        let queued = self.view.create_task(text);
        self.settle().await;
        queued
    }

    pub async fn toggle_status(&mut self, id: TaskId) {
        self.view.toggle_status(id);
        self.settle().await;
    }

    pub async fn delete_task(&mut self, id: TaskId) {
        self.view.delete_task(id);
        self.settle().await;
    }

    pub async fn delete_completed(&mut self) {
        self.view.delete_completed();
        self.settle().await;
    }

    pub async fn reorder(&mut self, new_sequence: Vec<TaskId>) -> Result<(), ReorderRejected> {
        self.view.reorder(new_sequence)?;
        self.settle().await;
        Ok(())
    }

    pub async fn move_task(&mut self, id: TaskId, offset: isize) -> Result<(), ReorderRejected> {
        self.view.move_task(id, offset)?;
        self.settle().await;
        Ok(())
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.view.set_filter(mode);
    }

    /// Run queued requests one after another until nothing is left,
    /// including reloads scheduled by earlier completions.
    pub async fn settle(&mut self) {
        loop {
            let dispatches = self.view.drain_dispatches();
            if dispatches.is_empty() {
                break;
            }
            for dispatch in dispatches {
                let completion = perform(self.store.as_ref(), dispatch).await;
                self.view.apply(completion);
            }
        }
    }
}
