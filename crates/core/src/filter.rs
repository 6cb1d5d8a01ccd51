//! Derives the displayed subset and item counter from the full collection.

use crate::model::{FilterMode, Task};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayView {
    pub subset: Vec<Task>,
    pub count: usize,
}

/// Compute the rows shown for `mode` and the counter that goes with them.
///
/// Under `All` and `Active` the counter is the number of tasks left to do;
/// under `Completed` it is the number of completed tasks. Relative order of
/// `tasks` is always preserved.
pub fn compute_display(tasks: &[Task], mode: FilterMode) -> DisplayView {
    match mode {
        FilterMode::All => DisplayView {
            subset: tasks.to_vec(),
            count: remaining_count(tasks),
        },
        FilterMode::Active => {
            let subset: Vec<Task> = tasks.iter().filter(|t| t.is_active()).cloned().collect();
            let count = subset.len();
            DisplayView { subset, count }
        }
        FilterMode::Completed => {
            let subset: Vec<Task> = tasks.iter().filter(|t| t.completed).cloned().collect();
            let count = subset.len();
            DisplayView { subset, count }
        }
    }
}

pub fn remaining_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.is_active()).count()
}

pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::model::TaskId;

    fn task(id: TaskId, completed: bool) -> Task {
        Task {
            id,
            text: format!("Sample Task {id}"),
            completed,
            sort_rank: Some(id as i64),
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, true),
            task(2, false),
            task(3, false),
            task(4, false),
            task(5, true),
            task(6, false),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<TaskId> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn active_filter_keeps_open_tasks_in_order() {
        let view = compute_display(&sample(), FilterMode::Active);
        assert_eq!(ids(&view.subset), vec![2, 3, 4, 6]);
        assert_eq!(view.count, 4);
    }

    #[test]
    fn completed_filter_counts_completed_tasks() {
        let view = compute_display(&sample(), FilterMode::Completed);
        assert_eq!(ids(&view.subset), vec![1, 5]);
        assert_eq!(view.count, 2);
    }

    #[test]
    fn all_filter_shows_everything_but_counts_remaining() {
        let view = compute_display(&sample(), FilterMode::All);
        assert_eq!(ids(&view.subset), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(view.count, 4);
    }

    #[rstest]
    #[case(FilterMode::All)]
    #[case(FilterMode::Active)]
    #[case(FilterMode::Completed)]
    fn empty_collection_yields_empty_view(#[case] mode: FilterMode) {
        assert_eq!(compute_display(&[], mode), DisplayView::default());
    }

    #[rstest]
    #[case(FilterMode::All, 4)]
    #[case(FilterMode::Active, 4)]
    #[case(FilterMode::Completed, 2)]
    fn counter_matches_mode_semantics(#[case] mode: FilterMode, #[case] expected: usize) {
        let tasks = sample();
        let view = compute_display(&tasks, mode);
        assert_eq!(view.count, expected);
        let reference = match mode {
            FilterMode::Completed => completed_count(&tasks),
            _ => remaining_count(&tasks),
        };
        assert_eq!(view.count, reference);
    }

    #[test]
    fn subset_never_reorders_relative_to_source() {
        let mut tasks = sample();
        tasks.reverse();
        for mode in FilterMode::ALL {
            let view = compute_display(&tasks, *mode);
            let positions: Vec<usize> = view
                .subset
                .iter()
                .map(|t| tasks.iter().position(|s| s.id == t.id).unwrap())
                .collect();
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            assert_eq!(positions, sorted, "mode {mode}");
        }
    }

    #[test]
    fn source_is_left_untouched() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = compute_display(&tasks, FilterMode::Completed);
        assert_eq!(tasks, before);
    }
}
