use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);

pub(crate) const INPUT_PLACEHOLDER: &str = "What needs to be done?";
pub(crate) const CLEAR_COMPLETED_LABEL: &str = "Clear completed";

pub(crate) const HELP_LIST: &str =
    "Tab: type • j/k: select • Space: toggle • x: delete • 1/2/3 ←/→: filter • J/K: move • c: clear done • t: theme • r: reload • q: quit";
pub(crate) const HELP_INPUT: &str = "Enter: add task • Esc/Tab: back to list";

pub(crate) const STATUS_NOTHING_SELECTED: &str = "No task selected";
pub(crate) const STATUS_RELOADING: &str = "Reloading tasks";
