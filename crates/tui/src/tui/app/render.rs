use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use ticklist_client::sync::LoadState;
use ticklist_client::{FocusTarget, NoticeKind};

use crate::model::FilterMode;
use crate::tui::constants::{
    APP_VERSION, CLEAR_COMPLETED_LABEL, HELP_INPUT, HELP_LIST, INPUT_PLACEHOLDER,
};
use crate::tui::helpers::{accent_title, centered_rect, checkbox};
use crate::tui::theme::Palette;

use super::App;

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let palette = self.palette();
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(
            Block::default().style(Style::default().bg(palette.base).fg(palette.text)),
            size,
        );
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(4),
            ])
            .split(size);

        self.draw_header(f, chunks[0], &palette);
        self.draw_input(f, chunks[1], &palette);
        self.draw_list(f, chunks[2], &palette);
        self.draw_footer(f, chunks[3], &palette);
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let left = Line::from(vec![
            Span::styled(
                format!(" ticklist v{} ", APP_VERSION),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} created", self.view.total_created()),
                Style::default().fg(palette.muted),
            ),
        ]);
        f.render_widget(
            Paragraph::new(left).style(Style::default().bg(palette.base)),
            cols[0],
        );

        let right = Line::from(vec![Span::styled(
            format!("theme: {} ", self.view.theme()),
            Style::default().fg(palette.muted),
        )]);
        f.render_widget(
            Paragraph::new(right)
                .alignment(Alignment::Right)
                .style(Style::default().bg(palette.base)),
            cols[1],
        );
    }

    fn draw_input(&self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let focused = self.focus.input_has_focus();
        let border = if focused {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.muted)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("New task", palette))
            .border_style(border)
            .style(Style::default().bg(palette.panel));

        let content = if self.input.as_str().is_empty() {
            Line::from(Span::styled(
                INPUT_PLACEHOLDER,
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(
                self.input.as_str().to_string(),
                Style::default().fg(palette.text),
            ))
        };
        f.render_widget(Paragraph::new(content).block(block), area);

        if focused {
            let column = self.input.cursor_column() as u16;
            let max_x = area.x + area.width.saturating_sub(2);
            f.set_cursor((area.x + 1 + column).min(max_x), area.y + 1);
        }
    }

    fn draw_list(&mut self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(
                &format!("Tasks · {}", self.view.filter_mode().title()),
                palette,
            ))
            .border_style(Style::default().fg(palette.muted))
            .style(Style::default().bg(palette.panel));

        let tasks = self.view.display_subset();
        if tasks.is_empty() {
            let inner = block.inner(area);
            f.render_widget(block, area);
            let message = self.empty_message();
            let rect = centered_rect(inner.width, 1, inner);
            f.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(palette.muted)),
                rect,
            );
            return;
        }

        let items: Vec<ListItem> = tasks
            .iter()
            .map(|task| {
                let text_style = if task.completed {
                    Style::default()
                        .fg(palette.done)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(palette.text)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", checkbox(task)),
                        Style::default().fg(palette.accent),
                    ),
                    Span::styled(task.text.clone(), text_style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(palette.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("› ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn empty_message(&self) -> String {
        match self.view.load_state() {
            LoadState::Idle | LoadState::Loading if !self.view.is_initialized() => {
                "Loading tasks…".to_string()
            }
            LoadState::Error(err) if !self.view.is_initialized() => {
                format!("Could not load tasks: {}", err)
            }
            _ => match self.view.filter_mode() {
                FilterMode::All => "No tasks yet. Press Tab to add one".to_string(),
                FilterMode::Active => "Nothing left to do".to_string(),
                FilterMode::Completed => "Nothing completed yet".to_string(),
            },
        }
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(self.controls_line(palette)).style(Style::default().bg(palette.base)),
            rows[0],
        );

        let status = self.status_line(palette);
        f.render_widget(
            Paragraph::new(status)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(palette.base)),
            rows[1],
        );

        let help = if self.focus.input_has_focus() {
            HELP_INPUT
        } else {
            HELP_LIST
        };
        f.render_widget(
            Paragraph::new(Span::styled(help, Style::default().fg(palette.muted)))
                .style(Style::default().bg(palette.base)),
            rows[2],
        );
    }

    /// Counter, filter buttons and the clear-completed control.
    fn controls_line(&self, palette: &Palette) -> Line<'static> {
        let mode = self.view.filter_mode();
        let mut spans = vec![
            Span::styled(
                format!(" {} ", mode.count_label(self.view.item_count())),
                Style::default().fg(palette.text),
            ),
            Span::raw("  "),
        ];

        let focused = self.focus.current();
        for filter in FilterMode::ALL {
            let mut style = Style::default().fg(palette.muted);
            if *filter == mode {
                style = style.fg(palette.accent).add_modifier(Modifier::BOLD);
            }
            if focused != FocusTarget::TaskInput && focused.filter() == Some(*filter) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("[{}]", filter.title()), style));
            spans.push(Span::raw(" "));
        }

        let has_completed = self.view.full_collection().iter().any(|task| task.completed);
        let clear_style = if has_completed {
            Style::default().fg(palette.text)
        } else {
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::DIM)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(CLEAR_COMPLETED_LABEL, clear_style));
        Line::from(spans)
    }

    /// Controller notices take precedence over local status messages.
    fn status_line(&self, palette: &Palette) -> Line<'static> {
        if let Some(notice) = self.view.notice() {
            let color = match notice.kind {
                NoticeKind::Info => palette.info,
                NoticeKind::Error => palette.error,
            };
            return Line::from(Span::styled(
                notice.message.clone(),
                Style::default().fg(color),
            ));
        }
        match &self.status {
            Some(status) => Line::from(Span::styled(status.text.clone(), status.style(palette))),
            None => Line::default(),
        }
    }
}
