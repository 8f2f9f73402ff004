//! Intents that change the table's query parameters.

use crate::mvi::Intent;
use crate::view::params::{MatchMode, SortDirection};

/// One user interaction with the table.
///
/// Filter changes arrive per column; there is no table-wide filter event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewIntent {
    /// Paginator moved or rows-per-page changed.
    SetPage { offset: usize, page_size: usize },

    /// A sortable column header was clicked.
    SetSort {
        field: String,
        direction: SortDirection,
    },

    /// A column filter changed. `None` or an empty string clears it.
    SetFilter {
        column: String,
        value: Option<String>,
        match_mode: MatchMode,
    },

    /// Re-issue the current parameters (caller-driven retry).
    Refresh,
}

impl ViewIntent {
    pub fn is_filter(&self) -> bool {
        matches!(self, ViewIntent::SetFilter { .. })
    }
}

impl Intent for ViewIntent {}
