use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::style::Style;
use ratatui::widgets::ListState;
use ticklist_client::{apply_ready, Completion, Dispatcher, FocusTracker, ViewSync};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use super::buffer::TextBuffer;
use super::constants::STATUS_NOTHING_SELECTED;
use super::theme::Palette;
use crate::core::ServiceStore;
use crate::model::{FilterMode, Task, TaskId, ThemeMode};

mod input;
mod render;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self, palette: &Palette) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(palette.info),
            StatusKind::Error => Style::default().fg(palette.error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

/// Terminal front end state. The controller owns the task data; this owns
/// selection, the text input and local status lines.
pub(crate) struct App {
    view: ViewSync,
    focus: FocusTracker,
    dispatcher: Dispatcher<ServiceStore>,
    completions: UnboundedReceiver<Completion>,
    runtime: Handle,
    theme_save: Option<JoinHandle<()>>,
    input: TextBuffer,
    selected: usize,
    list_state: ListState,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(store: Arc<ServiceStore>, runtime: Handle, theme: ThemeMode) -> Self {
        let (dispatcher, completions) = Dispatcher::new(store, runtime.clone());
        Self {
            view: ViewSync::new(theme),
            focus: FocusTracker::new(),
            dispatcher,
            completions,
            runtime,
            theme_save: None,
            input: TextBuffer::new(),
            selected: 0,
            list_state: ListState::default(),
            status: None,
            should_quit: false,
        }
    }

    pub(crate) fn start(&mut self) {
        if self.view.initialize() {
            self.dispatcher.flush(&mut self.view);
        }
    }

    /// Merge arrived completions, follow the resulting events and send
    /// whatever the controller queued since the last call.
    pub(crate) fn sync(&mut self) {
        apply_ready(&mut self.completions, &mut self.view);
        for event in self.view.take_events() {
            self.focus.on_event(&event);
        }
        self.clamp_selection();
        self.dispatcher.flush(&mut self.view);
    }

    pub(crate) fn on_tick(&mut self) {
        self.view.prune_notice();
        if self
            .theme_save
            .as_ref()
            .is_some_and(|save| save.is_finished())
        {
            self.theme_save = None;
        }
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > Duration::from_secs(5) {
                self.status = None;
            }
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn palette(&self) -> Palette {
        Palette::for_mode(self.view.theme())
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, text: T) {
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, text: T) {
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }

    fn selected_task(&self) -> Option<&Task> {
        self.view.display_subset().get(self.selected)
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().map(|task| task.id)
    }

    fn clamp_selection(&mut self) {
        let len = self.view.display_subset().len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    fn select_next(&mut self) {
        let len = self.view.display_subset().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.list_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.view.display_subset().is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.list_state.select(Some(self.selected));
    }

    fn select_task_by_id(&mut self, id: TaskId) {
        if let Some(idx) = self
            .view
            .display_subset()
            .iter()
            .position(|task| task.id == id)
        {
            self.selected = idx;
            self.list_state.select(Some(idx));
        }
    }

    fn focus_input(&mut self) {
        self.focus.focus_input();
    }

    /// Leaving the input counts as a press outside it.
    fn leave_input(&mut self) {
        self.focus.pointer_outside_input();
    }

    fn submit_input(&mut self) {
        if self.input.is_blank() {
            return;
        }
        let text = self.input.take();
        if self.view.create_task(&text) {
            self.sync();
        }
    }

    fn toggle_selected(&mut self) {
        match self.selected_id() {
            Some(id) => {
                self.view.toggle_status(id);
                self.sync();
            }
            None => self.set_status_info(STATUS_NOTHING_SELECTED),
        }
    }

    fn delete_selected(&mut self) {
        match self.selected_id() {
            Some(id) => {
                self.view.delete_task(id);
                self.sync();
            }
            None => self.set_status_info(STATUS_NOTHING_SELECTED),
        }
    }

    fn clear_completed(&mut self) {
        self.view.delete_completed();
        self.sync();
    }

    fn set_filter(&mut self, mode: FilterMode) {
        self.view.set_filter(mode);
        self.selected = 0;
        self.sync();
    }

    fn move_selected(&mut self, offset: isize) {
        let Some(id) = self.selected_id() else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        match self.view.move_task(id, offset) {
            Ok(()) => {
                self.sync();
                self.select_task_by_id(id);
            }
            Err(err) => self.set_status_error(err.to_string()),
        }
    }

    fn reload(&mut self) {
        self.view.reload();
        self.set_status_info(super::constants::STATUS_RELOADING);
        self.sync();
    }

    /// Flip the theme and persist the choice off the UI thread.
    fn toggle_theme(&mut self) {
        let mode = self.view.toggle_theme();
        let service = self.dispatcher.store().service().clone();
        self.theme_save = Some(self.runtime.spawn_blocking(move || {
            if let Err(err) = service.set_theme(mode) {
                tracing::warn!(theme = mode.as_str(), error = %err, "failed to save theme");
            }
        }));
        self.sync();
    }

    /// Block until the controller has nothing queued or in flight.
    #[cfg(test)]
    pub(crate) fn settle(&mut self) {
        loop {
            self.sync();
            if self.view.is_settled() {
                break;
            }
            match self.completions.blocking_recv() {
                Some(completion) => self.view.apply(completion),
                None => break,
            }
        }
        if let Some(save) = self.theme_save.take() {
            let _ = self.runtime.block_on(save);
        }
        self.sync();
    }
}
