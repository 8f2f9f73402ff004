//! Intents for the filter editor.

use crate::mvi::Intent;
use crate::view::MatchMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEditorIntent {
    /// Start editing `column`, seeded with its current value.
    Open {
        column: String,
        match_mode: MatchMode,
        current: Option<String>,
    },

    Insert(char),

    Backspace,

    /// Drop the whole text (Ctrl+U).
    Clear,

    /// Stop editing. The filter keeps its last value.
    Close,
}

impl Intent for FilterEditorIntent {}
