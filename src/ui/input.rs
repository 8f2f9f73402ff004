use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::App;

/// What a key press asks the table to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Quit,
    PrevColumn,
    NextColumn,
    ToggleSort,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    LargerPageSize,
    SmallerPageSize,
    /// Open the text editor, or cycle an option filter.
    EditFilter,
    Refresh,
    FilterInsert(char),
    FilterBackspace,
    FilterClear,
    FilterClose,
}

/// Maps a key press to an action. `editing` selects the filter editor keymap.
pub fn map_key(key: KeyEvent, editing: bool) -> Option<UiAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_char(key, 'c') {
        return Some(UiAction::Quit);
    }

    if editing {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiAction::FilterClose),
            KeyCode::Backspace => Some(UiAction::FilterBackspace),
            KeyCode::Char(_) if is_ctrl_char(key, 'u') => Some(UiAction::FilterClear),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UiAction::FilterInsert(ch))
            }
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => UiAction::Quit,
        KeyCode::Left | KeyCode::Char('h') => UiAction::PrevColumn,
        KeyCode::Right | KeyCode::Char('l') => UiAction::NextColumn,
        KeyCode::Char('s') => UiAction::ToggleSort,
        KeyCode::Char('n') | KeyCode::PageDown => UiAction::NextPage,
        KeyCode::Char('p') | KeyCode::PageUp => UiAction::PrevPage,
        KeyCode::Char('g') | KeyCode::Home => UiAction::FirstPage,
        KeyCode::Char('G') | KeyCode::End => UiAction::LastPage,
        KeyCode::Char('+') | KeyCode::Char('=') => UiAction::LargerPageSize,
        KeyCode::Char('-') => UiAction::SmallerPageSize,
        KeyCode::Char('f') | KeyCode::Char('/') => UiAction::EditFilter,
        KeyCode::Char('r') => UiAction::Refresh,
        _ => return None,
    };
    Some(action)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if let Some(action) = map_key(key, app.filter_editor().is_editing()) {
        app.on_action(action);
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
