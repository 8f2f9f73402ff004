use crate::ui::theme::{
    GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_LOADING, STATUS_OK,
};
use crate::view::ViewStatus;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const TITLE: &str = "Employee Data";

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, status: ViewStatus, version: &str) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let status_color = match status {
            ViewStatus::Ready => STATUS_OK,
            ViewStatus::Error => STATUS_ERROR,
            ViewStatus::Loading | ViewStatus::Idle => STATUS_LOADING,
        };
        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(TITLE, text_style.add_modifier(Modifier::BOLD)),
            Span::styled("  │  ", separator_style),
            Span::styled(status.label(), Style::default().fg(status_color)),
            Span::styled("  │  ", separator_style),
            Span::styled(version.to_string(), separator_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
