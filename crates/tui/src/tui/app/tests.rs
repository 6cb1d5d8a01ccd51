use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use rstest::rstest;
use tempfile::TempDir;
use ticklist_client::FocusTarget;
use tokio::runtime::Runtime;

use super::App;
use crate::cli::ThemeChoice;
use crate::config::AppConfig;
use crate::core::{ServiceStore, TasksService};
use crate::model::{FilterMode, TaskId, ThemeMode};
use crate::tui::helpers::{centered_rect, resolve_theme};

struct Harness {
    app: App,
    service: TasksService,
    _runtime: Runtime,
    _dir: TempDir,
}

fn harness(seed: bool) -> Harness {
    let dir = TempDir::new().expect("temp dir");
    let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
    let service = TasksService::new(config).expect("service");
    if seed {
        service.seed_sample_tasks().expect("seed");
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("runtime");
    let store = Arc::new(ServiceStore::new(service.clone()));
    let mut app = App::new(store, runtime.handle().clone(), ThemeMode::Light);
    app.start();
    app.settle();
    Harness {
        app,
        service,
        _runtime: runtime,
        _dir: dir,
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, code: KeyCode) {
    app.on_key(key(code));
    app.settle();
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.on_key(key(KeyCode::Char(ch)));
    }
}

fn displayed_ids(app: &App) -> Vec<TaskId> {
    app.view.display_subset().iter().map(|task| task.id).collect()
}

fn rendered(app: &mut App) -> String {
    let backend = TestBackend::new(100, 20);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|f| app.draw(f)).expect("draw");
    let buffer = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer.get(x, y).symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn centered_rect_keeps_within_bounds() {
    let area = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };
    let rect = centered_rect(40, 10, area);
    assert!(rect.x >= area.x);
    assert!(rect.y >= area.y);
    assert_eq!(rect.width, 40);
    assert_eq!(rect.height, 10);
}

#[rstest]
#[case(Some(ThemeChoice::Dark), Some(ThemeMode::Light), ThemeMode::Dark)]
#[case(Some(ThemeChoice::Light), Some(ThemeMode::Dark), ThemeMode::Light)]
#[case(None, Some(ThemeMode::Dark), ThemeMode::Dark)]
#[case(None, None, ThemeMode::Light)]
fn resolve_theme_prefers_explicit_choice(
    #[case] choice: Option<ThemeChoice>,
    #[case] stored: Option<ThemeMode>,
    #[case] expected: ThemeMode,
) {
    assert_eq!(resolve_theme(choice, stored), expected);
}

#[test]
fn start_loads_collection_and_focuses_all_button() {
    let h = harness(true);
    assert!(h.app.view.is_initialized());
    assert_eq!(h.app.view.display_subset().len(), 6);
    assert_eq!(h.app.view.item_count(), 5);
    assert_eq!(h.app.focus.current(), FocusTarget::AllButton);
    assert_eq!(h.app.list_state.selected(), Some(0));
}

#[rstest]
#[case('1', FilterMode::All, 6, FocusTarget::AllButton)]
#[case('2', FilterMode::Active, 5, FocusTarget::ActiveButton)]
#[case('3', FilterMode::Completed, 1, FocusTarget::CompletedButton)]
fn number_keys_switch_filter_and_focus(
    #[case] pressed: char,
    #[case] mode: FilterMode,
    #[case] rows: usize,
    #[case] focus: FocusTarget,
) {
    let mut h = harness(true);
    press(&mut h.app, KeyCode::Char(pressed));
    assert_eq!(h.app.view.filter_mode(), mode);
    assert_eq!(h.app.view.display_subset().len(), rows);
    assert_eq!(h.app.focus.current(), focus);
}

#[test]
fn arrow_keys_cycle_filters() {
    let mut h = harness(true);
    press(&mut h.app, KeyCode::Right);
    assert_eq!(h.app.view.filter_mode(), FilterMode::Active);
    press(&mut h.app, KeyCode::Left);
    press(&mut h.app, KeyCode::Left);
    assert_eq!(h.app.view.filter_mode(), FilterMode::Completed);
}

#[test]
fn typing_and_enter_adds_task_and_keeps_input_focus() {
    let mut h = harness(true);
    press(&mut h.app, KeyCode::Char('3'));
    press(&mut h.app, KeyCode::Tab);
    assert!(h.app.focus.input_has_focus());

    type_text(&mut h.app, "  Water the plants ");
    press(&mut h.app, KeyCode::Enter);

    assert!(h.app.focus.input_has_focus());
    assert_eq!(h.app.input.as_str(), "");
    assert_eq!(h.app.view.filter_mode(), FilterMode::All);
    let last = h.app.view.display_subset().last().cloned().expect("new task");
    assert_eq!((last.id, last.text.as_str()), (7, "Water the plants"));
    assert_eq!(h.service.list().expect("list").len(), 7);

    press(&mut h.app, KeyCode::Esc);
    assert_eq!(h.app.focus.current(), FocusTarget::AllButton);
}

#[test]
fn blank_input_submits_nothing_and_stays_quiet() {
    let mut h = harness(false);
    press(&mut h.app, KeyCode::Tab);
    type_text(&mut h.app, "   ");
    press(&mut h.app, KeyCode::Enter);

    assert!(h.app.view.display_subset().is_empty());
    assert!(h.app.view.is_settled());
    assert!(h.app.status.is_none());
    assert!(h.app.view.notice().is_none());
    assert!(h.app.focus.input_has_focus());
    assert_eq!(h.app.input.as_str(), "   ");
}

#[test]
fn list_keys_are_typed_while_input_has_focus() {
    let mut h = harness(true);
    press(&mut h.app, KeyCode::Tab);
    type_text(&mut h.app, "qx3");
    assert!(!h.app.should_quit());
    assert_eq!(h.app.input.as_str(), "qx3");
    assert_eq!(h.app.view.filter_mode(), FilterMode::All);
}

#[test]
fn space_toggles_and_x_deletes_selected_task() {
    let mut h = harness(true);
    press(&mut h.app, KeyCode::Char('j'));
    let id = h.app.selected_id().expect("selection");

    press(&mut h.app, KeyCode::Char(' '));
    let toggled = h
        .app
        .view
        .full_collection()
        .iter()
        .find(|task| task.id == id)
        .expect("task");
    assert!(toggled.completed);
    assert_eq!(h.app.view.item_count(), 4);

    press(&mut h.app, KeyCode::Char('x'));
    assert!(!displayed_ids(&h.app).contains(&id));
    assert_eq!(h.service.list().expect("list").len(), 5);
}

#[test]
fn clear_completed_keeps_active_tasks() {
    let mut h = harness(true);
    press(&mut h.app, KeyCode::Char('c'));
    assert_eq!(displayed_ids(&h.app), vec![1, 2, 3, 4, 6]);
    assert_eq!(h.app.view.item_count(), 5);
}

#[test]
fn shift_j_moves_selection_and_persists_order() {
    let mut h = harness(true);
    press(&mut h.app, KeyCode::Char('J'));

    assert_eq!(displayed_ids(&h.app), vec![2, 1, 3, 4, 5, 6]);
    assert_eq!(h.app.selected_id(), Some(1));
    let stored: Vec<TaskId> = h
        .service
        .list()
        .expect("list")
        .iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(stored, vec![2, 1, 3, 4, 5, 6]);
}

#[test]
fn move_outside_all_view_reports_rejection() {
    let mut h = harness(true);
    press(&mut h.app, KeyCode::Char('2'));
    press(&mut h.app, KeyCode::Char('J'));

    assert_eq!(displayed_ids(&h.app), vec![1, 2, 3, 4, 6]);
    let status = h.app.status.as_ref().expect("status");
    assert!(status.text.contains("only available in the All view"));
}

#[test]
fn theme_toggle_is_persisted() {
    let mut h = harness(false);
    press(&mut h.app, KeyCode::Char('t'));
    assert_eq!(h.app.view.theme(), ThemeMode::Dark);
    assert_eq!(h.service.theme().expect("theme"), Some(ThemeMode::Dark));
}

#[test]
fn quit_keys_stop_the_loop() {
    let mut h = harness(false);
    h.app
        .on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(h.app.should_quit());

    let mut h = harness(false);
    h.app.on_key(key(KeyCode::Char('q')));
    assert!(h.app.should_quit());
}

#[test]
fn render_shows_placeholder_counter_and_controls() {
    let mut h = harness(true);
    let screen = rendered(&mut h.app);
    assert!(screen.contains("What needs to be done?"));
    assert!(screen.contains("5 items left"));
    assert!(screen.contains("[Completed]"));
    assert!(screen.contains("Clear completed"));
    assert!(screen.contains("[ ] "));
}

#[test]
fn render_of_empty_store_explains_how_to_add() {
    let mut h = harness(false);
    let screen = rendered(&mut h.app);
    assert!(screen.contains("No tasks yet"));
    assert!(screen.contains("0 items left"));
}
