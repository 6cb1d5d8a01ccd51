//! Keeps keyboard focus on the active filter control across list updates.

use ticklist_core::model::FilterMode;

use crate::sync::SyncEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    TaskInput,
    AllButton,
    ActiveButton,
    CompletedButton,
}

impl FocusTarget {
    pub fn for_filter(mode: FilterMode) -> Self {
        match mode {
            FilterMode::All => FocusTarget::AllButton,
            FilterMode::Active => FocusTarget::ActiveButton,
            FilterMode::Completed => FocusTarget::CompletedButton,
        }
    }

    pub fn filter(self) -> Option<FilterMode> {
        match self {
            FocusTarget::TaskInput => None,
            FocusTarget::AllButton => Some(FilterMode::All),
            FocusTarget::ActiveButton => Some(FilterMode::Active),
            FocusTarget::CompletedButton => Some(FilterMode::Completed),
        }
    }
}

/// Which control holds focus. The text input is never robbed of focus by a
/// list update; everything else snaps back to the active filter button.
#[derive(Debug, Clone)]
pub struct FocusTracker {
    current: FocusTarget,
    active_filter: FilterMode,
}

impl Default for FocusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTracker {
    pub fn new() -> Self {
        Self {
            current: FocusTarget::AllButton,
            active_filter: FilterMode::All,
        }
    }

    pub fn current(&self) -> FocusTarget {
        self.current
    }

    pub fn active_filter(&self) -> FilterMode {
        self.active_filter
    }

    pub fn input_has_focus(&self) -> bool {
        self.current == FocusTarget::TaskInput
    }

    pub fn focus_input(&mut self) {
        self.current = FocusTarget::TaskInput;
    }

    /// Move focus to the control for `mode`. Does nothing while the text
    /// input has focus.
    pub fn reapply_focus(&mut self, mode: FilterMode) -> Option<FocusTarget> {
        self.active_filter = mode;
        if self.input_has_focus() {
            return None;
        }
        self.current = FocusTarget::for_filter(mode);
        Some(self.current)
    }

    /// Follow-up for a controller event; only recomputed displays move focus.
    pub fn on_event(&mut self, event: &SyncEvent) -> Option<FocusTarget> {
        match event {
            SyncEvent::DisplaySynced { mode, .. } => self.reapply_focus(*mode),
            SyncEvent::ThemeApplied(_) => None,
        }
    }

    /// A press landed somewhere other than the text input, which loses focus.
    pub fn pointer_outside_input(&mut self) -> Option<FocusTarget> {
        if self.input_has_focus() {
            self.current = FocusTarget::for_filter(self.active_filter);
        }
        self.reapply_focus(self.active_filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reapply_moves_to_matching_filter_button() {
        let mut tracker = FocusTracker::new();
        assert_eq!(
            tracker.reapply_focus(FilterMode::Completed),
            Some(FocusTarget::CompletedButton)
        );
        assert_eq!(tracker.current(), FocusTarget::CompletedButton);
    }

    #[test]
    fn reapply_leaves_text_input_alone() {
        let mut tracker = FocusTracker::new();
        tracker.focus_input();
        assert_eq!(tracker.reapply_focus(FilterMode::Active), None);
        assert!(tracker.input_has_focus());
        assert_eq!(tracker.active_filter(), FilterMode::Active);
    }

    #[test]
    fn pointer_outside_input_restores_filter_focus() {
        let mut tracker = FocusTracker::new();
        tracker.reapply_focus(FilterMode::Active);
        tracker.focus_input();
        assert_eq!(
            tracker.pointer_outside_input(),
            Some(FocusTarget::ActiveButton)
        );
        assert!(!tracker.input_has_focus());
    }

    #[test]
    fn theme_events_do_not_move_focus() {
        let mut tracker = FocusTracker::new();
        let event = SyncEvent::ThemeApplied(ticklist_core::model::ThemeMode::Dark);
        assert_eq!(tracker.on_event(&event), None);
        assert_eq!(tracker.current(), FocusTarget::AllButton);
    }

    #[test]
    fn focus_target_round_trips_filter() {
        for mode in FilterMode::ALL {
            assert_eq!(FocusTarget::for_filter(*mode).filter(), Some(*mode));
        }
        assert_eq!(FocusTarget::TaskInput.filter(), None);
    }
}
