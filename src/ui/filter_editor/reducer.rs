//! Reducer for the filter editor.

use crate::mvi::Reducer;

use super::intent::FilterEditorIntent;
use super::state::FilterEditorState;

/// Pure text-editing transitions. Edits while closed are no-ops.
pub struct FilterEditorReducer;

impl Reducer for FilterEditorReducer {
    type State = FilterEditorState;
    type Intent = FilterEditorIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FilterEditorIntent::Open {
                column,
                match_mode,
                current,
            } => FilterEditorState::Editing {
                column,
                match_mode,
                text: current.unwrap_or_default(),
            },

            FilterEditorIntent::Insert(ch) => match state {
                FilterEditorState::Editing {
                    column,
                    match_mode,
                    mut text,
                } => {
                    text.push(ch);
                    FilterEditorState::Editing {
                        column,
                        match_mode,
                        text,
                    }
                }
                closed => closed,
            },

            FilterEditorIntent::Backspace => match state {
                FilterEditorState::Editing {
                    column,
                    match_mode,
                    mut text,
                } => {
                    text.pop();
                    FilterEditorState::Editing {
                        column,
                        match_mode,
                        text,
                    }
                }
                closed => closed,
            },

            FilterEditorIntent::Clear => match state {
                FilterEditorState::Editing {
                    column, match_mode, ..
                } => FilterEditorState::Editing {
                    column,
                    match_mode,
                    text: String::new(),
                },
                closed => closed,
            },

            FilterEditorIntent::Close => FilterEditorState::Closed,
        }
    }
}
