use crate::service::ViewSnapshot;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const BROWSE_HINTS: &str =
    " ←/→: Column │ s: Sort │ f: Filter │ n/p: Page │ g/G: First/Last │ +/-: Rows │ r: Refresh │ q: Quit";
const EDIT_HINTS: &str = " Type to filter │ Backspace: Delete │ Ctrl+U: Clear │ Enter/Esc: Done";

/// Paginator and key hints. An error replaces the hints, never the table.
pub struct Footer<'a> {
    snapshot: &'a ViewSnapshot,
    page_sizes: &'a [usize],
    editing: bool,
    error: Option<String>,
}

impl<'a> Footer<'a> {
    pub fn new(snapshot: &'a ViewSnapshot, page_sizes: &'a [usize]) -> Self {
        Self {
            snapshot,
            page_sizes,
            editing: false,
            error: None,
        }
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let params = &self.snapshot.params.params;

        let mut paginator = vec![
            Span::styled(format!(" {}", range_label(self.snapshot)), text_style),
            Span::styled("  │  ", text_style.add_modifier(Modifier::DIM)),
            Span::styled(
                format!(
                    "Page {}/{}",
                    params.page_index() + 1,
                    self.snapshot.page_count()
                ),
                text_style,
            ),
            Span::styled("  │  Rows:", text_style.add_modifier(Modifier::DIM)),
        ];
        for &size in self.page_sizes {
            let style = if size == params.page_size {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                text_style.add_modifier(Modifier::DIM)
            };
            paginator.push(Span::styled(format!(" {}", size), style));
        }

        let second = match &self.error {
            Some(error) => Line::from(Span::styled(
                format!(" {}", error),
                Style::default().fg(STATUS_ERROR),
            )),
            None => {
                let hints = if self.editing { EDIT_HINTS } else { BROWSE_HINTS };
                Line::from(Span::styled(hints, text_style.add_modifier(Modifier::DIM)))
            }
        };

        Paragraph::new(vec![Line::from(paginator), second]).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

/// `"x–y of total"` for the current page; `"0 of 0"` when empty.
pub fn range_label(snapshot: &ViewSnapshot) -> String {
    let total = snapshot.result.total_count;
    let rows = snapshot.result.rows.len() as u64;
    if total == 0 || rows == 0 {
        return format!("0 of {}", total);
    }
    let first = snapshot.params.params.offset as u64 + 1;
    let last = (first + rows - 1).min(total);
    format!("{}–{} of {}", first, last, total)
}
