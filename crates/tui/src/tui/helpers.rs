use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::cli::ThemeChoice;
use crate::model::{Task, ThemeMode};

use super::theme::Palette;

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

/// Pick the starting theme: an explicit choice wins, `system` asks the OS,
/// otherwise the stored preference, falling back to light.
pub fn resolve_theme(choice: Option<ThemeChoice>, stored: Option<ThemeMode>) -> ThemeMode {
    match choice {
        Some(ThemeChoice::System) => detect_system_theme(),
        Some(fixed) => fixed.fixed().unwrap_or_default(),
        None => stored.unwrap_or_default(),
    }
}

pub fn detect_system_theme() -> ThemeMode {
    match dark_light::detect() {
        dark_light::Mode::Dark => ThemeMode::Dark,
        dark_light::Mode::Light | dark_light::Mode::Default => ThemeMode::Light,
    }
}

pub fn checkbox(task: &Task) -> &'static str {
    if task.completed {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn accent_title(text: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}
