//! The view-sync controller: cached collection, filtered subset and the intents in flight.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use ticklist_core::filter::compute_display;
use ticklist_core::model::{FilterMode, NewTask, Task, TaskId, ThemeMode};

use crate::sync::intent::{Dispatch, Intent, IntentQueue, MutationKind, Request, Ticket};
use crate::sync::state::{
    LoadState, Pending, ReorderRejected, ReorderSnapshot, StatusNotice, SyncEvent, NOTICE_TTL,
};
use crate::telemetry::{Event as TelemetryEvent, Handle};

/// Owns everything a front end renders. Front ends call the intent methods,
/// hand [`ViewSync::drain_dispatches`] to a dispatcher and feed completions
/// back through [`ViewSync::apply`].
#[derive(Debug)]
pub struct ViewSync {
    pub(crate) full: Vec<Task>,
    pub(crate) display: Vec<Task>,
    pub(crate) filter: FilterMode,
    pub(crate) item_count: usize,
    pub(crate) total_created: TaskId,
    pub(crate) initialized: bool,
    pub(crate) initial_load_pending: bool,
    pub(crate) load_state: LoadState,
    pub(crate) queue: IntentQueue,
    pub(crate) in_flight: BTreeMap<Ticket, Pending>,
    pub(crate) next_ticket: Ticket,
    pub(crate) reorder_snapshot: Option<ReorderSnapshot>,
    pub(crate) theme: ThemeMode,
    pub(crate) notice: Option<StatusNotice>,
    pub(crate) events: Vec<SyncEvent>,
    pub(crate) telemetry: Handle,
}

impl Default for ViewSync {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

impl ViewSync {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            full: Vec::new(),
            display: Vec::new(),
            filter: FilterMode::All,
            item_count: 0,
            total_created: 0,
            initialized: false,
            initial_load_pending: false,
            load_state: LoadState::Idle,
            queue: IntentQueue::default(),
            in_flight: BTreeMap::new(),
            next_ticket: 1,
            reorder_snapshot: None,
            theme,
            notice: None,
            events: Vec::new(),
            telemetry: Handle::new(),
        }
    }

    pub fn full_collection(&self) -> &[Task] {
        &self.full
    }

    pub fn display_subset(&self) -> &[Task] {
        &self.display
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn total_created(&self) -> TaskId {
        self.total_created
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn notice(&self) -> Option<&StatusNotice> {
        self.notice.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Requests queued or awaiting a completion.
    pub fn pending_requests(&self) -> usize {
        self.in_flight.len() + usize::from(!self.queue.is_empty())
    }

    pub fn is_settled(&self) -> bool {
        self.queue.is_empty() && self.in_flight.is_empty()
    }

    pub fn telemetry(&self) -> &Handle {
        &self.telemetry
    }

    /// Queue the one initial load. Returns `false` when already initialized
    /// or while the initial load is outstanding.
    pub fn initialize(&mut self) -> bool {
        if self.initialized || self.initial_load_pending {
            return false;
        }
        self.initial_load_pending = true;
        self.load_state = LoadState::Loading;
        self.queue.submit(Intent::Load { initial: true });
        self.telemetry.record(TelemetryEvent::SessionStarted);
        true
    }

    /// Fetch the authoritative collection again, keeping the current filter.
    pub fn reload(&mut self) {
        if self.queue.has_load() {
            return;
        }
        self.load_state = LoadState::Loading;
        self.queue.submit(Intent::Load { initial: false });
    }

    /// Returns `false` (and changes nothing) for whitespace-only text.
    pub fn create_task(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.queue.submit(Intent::Create {
            text: trimmed.to_string(),
        });
        true
    }

    pub fn toggle_status(&mut self, id: TaskId) {
        self.queue.submit(Intent::Toggle(id));
    }

    pub fn delete_task(&mut self, id: TaskId) {
        self.queue.submit(Intent::Delete(id));
    }

    pub fn delete_completed(&mut self) {
        self.queue.submit(Intent::DeleteCompleted);
    }

    /// Apply `new_sequence` to the cached collection right away and queue
    /// persistence of the id order.
    pub fn reorder(&mut self, new_sequence: Vec<TaskId>) -> Result<(), ReorderRejected> {
        if !self.filter.allows_reorder() {
            return Err(ReorderRejected::FilterActive(self.filter));
        }
        if new_sequence.len() != self.full.len() {
            return Err(ReorderRejected::NotAPermutation);
        }

        let mut by_id: HashMap<TaskId, &Task> =
            self.full.iter().map(|task| (task.id, task)).collect();
        let mut reordered = Vec::with_capacity(new_sequence.len());
        for id in &new_sequence {
            match by_id.remove(id) {
                Some(task) => reordered.push(task.clone()),
                None => return Err(ReorderRejected::NotAPermutation),
            }
        }

        let previous = std::mem::replace(&mut self.full, reordered);
        self.reorder_snapshot = Some(ReorderSnapshot {
            ticket: None,
            target: new_sequence.clone(),
            previous,
        });
        self.queue.submit(Intent::PersistOrder(new_sequence));
        self.recompute();
        Ok(())
    }

    /// Move one task by `offset` positions within the full collection.
    pub fn move_task(&mut self, id: TaskId, offset: isize) -> Result<(), ReorderRejected> {
        if !self.filter.allows_reorder() {
            return Err(ReorderRejected::FilterActive(self.filter));
        }
        let index = self
            .full
            .iter()
            .position(|task| task.id == id)
            .ok_or(ReorderRejected::UnknownTask(id))?;
        let target = index as isize + offset;
        if offset == 0 || target < 0 || target >= self.full.len() as isize {
            return Err(ReorderRejected::OutOfBounds);
        }

        let mut ids: Vec<TaskId> = self.full.iter().map(|task| task.id).collect();
        let moved = ids.remove(index);
        ids.insert(target as usize, moved);
        self.reorder(ids)
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        if self.filter != mode {
            self.telemetry
                .record(TelemetryEvent::FilterChanged(mode.as_str().into()));
        }
        self.filter = mode;
        self.recompute();
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
        self.events.push(SyncEvent::ThemeApplied(theme));
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        let next = self.theme.toggled();
        self.set_theme(next);
        next
    }

    /// Turn every queued intent into a store request. Each intent is handed
    /// out exactly once.
    pub fn drain_dispatches(&mut self) -> Vec<Dispatch> {
        let mut dispatches = Vec::new();
        while let Some(intent) = self.queue.take() {
            let ticket = self.issue_ticket();
            let (pending, request) = match intent {
                Intent::Load { initial } => (Pending::Load { initial }, Request::ListAll),
                Intent::Create { text } => {
                    let id = self.propose_id();
                    (
                        Pending::Mutation(MutationKind::Create { id }),
                        Request::Create(NewTask::new(id, text)),
                    )
                }
                Intent::Toggle(id) => (
                    Pending::Mutation(MutationKind::Toggle(id)),
                    Request::Toggle(id),
                ),
                Intent::Delete(id) => (
                    Pending::Mutation(MutationKind::Delete(id)),
                    Request::Delete(id),
                ),
                Intent::DeleteCompleted => (
                    Pending::Mutation(MutationKind::DeleteCompleted),
                    Request::DeleteCompleted,
                ),
                Intent::PersistOrder(ids) => {
                    if let Some(snapshot) = self.reorder_snapshot.as_mut() {
                        if snapshot.ticket.is_none() && snapshot.target == ids {
                            snapshot.ticket = Some(ticket);
                        }
                    }
                    (Pending::Order, Request::PersistOrder(ids))
                }
            };
            let dispatch = Dispatch { ticket, request };
            tracing::debug!(ticket, request = dispatch.label(), "dispatching store request");
            self.in_flight.insert(ticket, pending);
            dispatches.push(dispatch);
        }
        dispatches
    }

    /// Events produced since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<SyncEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn prune_notice(&mut self) {
        self.prune_notice_at(Instant::now());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub(crate) fn prune_notice_at(&mut self, now: Instant) {
        if let Some(notice) = &self.notice {
            if now.duration_since(notice.created_at) > NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    pub(crate) fn recompute(&mut self) {
        let view = compute_display(&self.full, self.filter);
        self.display = view.subset;
        self.item_count = view.count;
        self.events.push(SyncEvent::DisplaySynced {
            mode: self.filter,
            count: self.item_count,
        });
    }

    fn issue_ticket(&mut self) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        ticket
    }

    /// Next id above both the confirmed counter and any create still in
    /// flight. A failed create leaves `in_flight`, releasing its id.
    fn propose_id(&self) -> TaskId {
        let in_flight = self
            .in_flight
            .values()
            .filter_map(|pending| match pending {
                Pending::Mutation(MutationKind::Create { id }) => Some(*id),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        self.total_created.max(in_flight) + 1
    }
}
