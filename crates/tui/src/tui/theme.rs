use ratatui::style::Color;

use crate::model::ThemeMode;

/// Colours for one [`ThemeMode`]. The renderer takes this as a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Color,
    pub panel: Color,
    pub highlight: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub done: Color,
    pub info: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                base: Color::Rgb(14, 17, 23),
                panel: Color::Rgb(22, 26, 34),
                highlight: Color::Rgb(32, 37, 47),
                text: Color::Rgb(220, 223, 228),
                muted: Color::DarkGray,
                accent: Color::Rgb(120, 161, 255),
                done: Color::Rgb(110, 190, 130),
                info: Color::Cyan,
                error: Color::Red,
            },
            ThemeMode::Light => Self {
                base: Color::Rgb(250, 250, 250),
                panel: Color::Rgb(240, 241, 244),
                highlight: Color::Rgb(220, 226, 240),
                text: Color::Rgb(30, 34, 42),
                muted: Color::Gray,
                accent: Color::Rgb(40, 90, 200),
                done: Color::Rgb(40, 130, 70),
                info: Color::Blue,
                error: Color::Rgb(190, 30, 40),
            },
        }
    }
}
