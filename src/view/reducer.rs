//! Reducer for the table's query parameters.

use crate::mvi::Reducer;

use super::intent::ViewIntent;
use super::params::{FilterSpec, SortSpec, ViewParameters};

/// Pure parameter transitions. Validation happens before dispatch, in
/// [`ViewState`](super::ViewState).
pub struct ViewReducer;

impl Reducer for ViewReducer {
    type State = ViewParameters;
    type Intent = ViewIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ViewIntent::SetPage { offset, page_size } => ViewParameters {
                offset,
                page_size,
                ..state
            },

            ViewIntent::SetSort { field, direction } => ViewParameters {
                sort: SortSpec { field, direction },
                ..state
            },

            // A new filter can shrink the result set below the current
            // offset, so the filter's own request starts from the first page.
            ViewIntent::SetFilter {
                column,
                value,
                match_mode,
            } => {
                let mut filters = state.filters;
                let value = value.filter(|v| !v.is_empty());
                filters.insert(column, FilterSpec { value, match_mode });
                ViewParameters {
                    offset: 0,
                    filters,
                    ..state
                }
            }

            ViewIntent::Refresh => state,
        }
    }
}
