use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{FilterMode, MAX_TEXT_LEN};

use super::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListAction {
    Quit,
    FocusInput,
    DismissNotice,
    SelectNext,
    SelectPrev,
    Toggle,
    Delete,
    Filter(FilterMode),
    NextFilter,
    PrevFilter,
    MoveDown,
    MoveUp,
    ClearCompleted,
    ToggleTheme,
    Reload,
}

impl ListAction {
    pub(crate) fn from_event(key: &KeyEvent) -> Option<Self> {
        if is_ctrl_c(key) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Tab => Some(Self::FocusInput),
            KeyCode::Esc => Some(Self::DismissNotice),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Char(' ') => Some(Self::Toggle),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('1') => Some(Self::Filter(FilterMode::All)),
            KeyCode::Char('2') => Some(Self::Filter(FilterMode::Active)),
            KeyCode::Char('3') => Some(Self::Filter(FilterMode::Completed)),
            KeyCode::Right | KeyCode::Char('l') => Some(Self::NextFilter),
            KeyCode::Left | KeyCode::Char('h') => Some(Self::PrevFilter),
            KeyCode::Char('J') => Some(Self::MoveDown),
            KeyCode::Char('K') => Some(Self::MoveUp),
            KeyCode::Char('c') => Some(Self::ClearCompleted),
            KeyCode::Char('t') => Some(Self::ToggleTheme),
            KeyCode::Char('r') => Some(Self::Reload),
            _ => None,
        }
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL)
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        if self.focus.input_has_focus() {
            self.on_input_key(key);
        } else if let Some(action) = ListAction::from_event(&key) {
            self.run_list_action(action);
        }
    }

    fn on_input_key(&mut self, key: KeyEvent) {
        if is_ctrl_c(&key) {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Esc | KeyCode::Tab => self.leave_input(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !self.input.insert_char(ch) && !ch.is_control() {
                    self.set_status_error(format!(
                        "Task text is limited to {} characters",
                        MAX_TEXT_LEN
                    ));
                }
            }
            _ => {}
        }
    }

    pub(crate) fn run_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::Quit => self.should_quit = true,
            ListAction::FocusInput => self.focus_input(),
            ListAction::DismissNotice => {
                self.view.dismiss_notice();
                self.status = None;
            }
            ListAction::SelectNext => self.select_next(),
            ListAction::SelectPrev => self.select_prev(),
            ListAction::Toggle => self.toggle_selected(),
            ListAction::Delete => self.delete_selected(),
            ListAction::Filter(mode) => self.set_filter(mode),
            ListAction::NextFilter => self.set_filter(self.view.filter_mode().next()),
            ListAction::PrevFilter => self.set_filter(self.view.filter_mode().prev()),
            ListAction::MoveDown => self.move_selected(1),
            ListAction::MoveUp => self.move_selected(-1),
            ListAction::ClearCompleted => self.clear_completed(),
            ListAction::ToggleTheme => self.toggle_theme(),
            ListAction::Reload => self.reload(),
        }
    }
}
