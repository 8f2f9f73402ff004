use crate::mvi::UiState;
use crate::view::MatchMode;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterEditorState {
    #[default]
    Closed,
    Editing {
        column: String,
        match_mode: MatchMode,
        text: String,
    },
}

impl UiState for FilterEditorState {}

impl FilterEditorState {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Column being edited, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Editing { column, .. } => Some(column),
            Self::Closed => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Editing { text, .. } => Some(text),
            Self::Closed => None,
        }
    }
}
