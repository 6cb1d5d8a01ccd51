//! Merges store completions into the controller state.

use ticklist_core::model::{FilterMode, Task, TaskId};
use ticklist_core::{StoreError, StoreResult};

use crate::sync::controller::ViewSync;
use crate::sync::intent::{MutationKind, Ticket};
use crate::sync::message::{Completion, Reply};
use crate::sync::state::{LoadState, Pending, StatusNotice, SyncEvent};
use crate::telemetry::Event as TelemetryEvent;

impl ViewSync {
    /// Merge one completion. Responses are applied in arrival order, so the
    /// most recent one determines the cached collection.
    pub fn apply(&mut self, completion: Completion) {
        self.prune_notice();
        let Completion { ticket, reply } = completion;
        let Some(pending) = self.in_flight.remove(&ticket) else {
            tracing::warn!(ticket, "ignoring completion for unknown ticket");
            return;
        };

        match (pending, reply) {
            (Pending::Load { initial }, Reply::Collection(result)) => {
                self.finish_load(initial, result)
            }
            (Pending::Mutation(kind), Reply::Collection(result)) => {
                self.finish_mutation(kind, result)
            }
            (Pending::Order, Reply::Persisted(result)) => self.finish_order(ticket, result),
            (pending, _) => {
                tracing::warn!(ticket, ?pending, "completion does not match its request");
            }
        }
    }

    fn finish_load(&mut self, initial: bool, result: StoreResult<Vec<Task>>) {
        if initial {
            self.initial_load_pending = false;
        }
        match result {
            Ok(tasks) => {
                let count = tasks.len();
                self.replace_collection(tasks);
                self.total_created = self.total_created.max(count as TaskId);
                if initial {
                    self.initialized = true;
                    self.filter = FilterMode::All;
                    self.events.push(SyncEvent::ThemeApplied(self.theme));
                }
                self.load_state = LoadState::Ready;
                self.telemetry
                    .record(TelemetryEvent::LoadCompleted { count });
                self.recompute();
            }
            Err(err) => {
                tracing::warn!(error = %err, initial, "task load failed");
                self.load_state = LoadState::Error(err.to_string());
                self.notice = Some(StatusNotice::error(format!(
                    "Could not load tasks: {}",
                    err
                )));
                self.telemetry.record(TelemetryEvent::LoadFailed {
                    error: err.to_string(),
                });
            }
        }
    }

    fn finish_mutation(&mut self, kind: MutationKind, result: StoreResult<Vec<Task>>) {
        match result {
            Ok(tasks) => {
                let before = self.total_created;
                self.replace_collection(tasks);
                if let MutationKind::Create { .. } = kind {
                    self.filter = FilterMode::All;
                    self.total_created = self.total_created.max(before + 1);
                }
                self.telemetry
                    .record(TelemetryEvent::MutationApplied(kind.label().into()));
                self.recompute();
            }
            Err(StoreError::NotFound(id)) => {
                self.notice = Some(StatusNotice::info(format!(
                    "Task {} no longer exists, reloading",
                    id
                )));
                self.telemetry.record(TelemetryEvent::MutationFailed {
                    action: kind.label().into(),
                    error: StoreError::NotFound(id).to_string(),
                });
                self.reload();
            }
            Err(err) => {
                tracing::warn!(action = kind.label(), error = %err, "store mutation failed");
                self.notice = Some(StatusNotice::error(format!(
                    "Could not {}: {}",
                    kind.label(),
                    err
                )));
                self.telemetry.record(TelemetryEvent::MutationFailed {
                    action: kind.label().into(),
                    error: err.to_string(),
                });
            }
        }
    }

    fn finish_order(&mut self, ticket: Ticket, result: StoreResult<()>) {
        let guarded = self
            .reorder_snapshot
            .as_ref()
            .map(|snapshot| snapshot.ticket == Some(ticket))
            .unwrap_or(false);

        match result {
            Ok(()) => {
                if guarded {
                    self.reorder_snapshot = None;
                }
                self.telemetry
                    .record(TelemetryEvent::MutationApplied("save order".into()));
            }
            Err(err) => {
                tracing::warn!(ticket, error = %err, "persisting task order failed");
                self.telemetry.record(TelemetryEvent::MutationFailed {
                    action: "save order".into(),
                    error: err.to_string(),
                });
                let snapshot = if guarded {
                    self.reorder_snapshot.take()
                } else {
                    None
                };
                match snapshot {
                    Some(snapshot) => {
                        let restored = snapshot.previous.len();
                        self.full = snapshot.previous;
                        self.telemetry
                            .record(TelemetryEvent::ReorderRolledBack { restored });
                        self.notice = Some(StatusNotice::error(format!(
                            "Could not save order: {}. Previous order restored",
                            err
                        )));
                        self.recompute();
                    }
                    None => {
                        self.notice =
                            Some(StatusNotice::error(format!("Could not save order: {}", err)));
                    }
                }
            }
        }
    }

    /// An authoritative response supersedes any optimistic order.
    fn replace_collection(&mut self, tasks: Vec<Task>) {
        self.full = tasks;
        self.reorder_snapshot = None;
        self.advance_total_created();
    }

    fn advance_total_created(&mut self) {
        let max_id = self.full.iter().map(|task| task.id).max().unwrap_or(0);
        self.total_created = self.total_created.max(max_id);
    }
}
