use tokio::runtime::Handle as RuntimeHandle;

use crate::mvi::Reducer;
use crate::service::{ViewHandle, ViewSnapshot};
use crate::ui::filter_editor::{FilterEditorIntent, FilterEditorReducer, FilterEditorState};
use crate::ui::input::UiAction;
use crate::view::{ColumnSpec, MatchMode, SortDirection, ViewIntent, ViewSchema};

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Terminal-side state of the table: cursor, filter editor and the latest
/// snapshot from the view service.
///
/// Runs on the synchronous UI thread; intents are handed to the service
/// through the runtime handle and answered before the next frame.
pub struct App {
    should_quit: bool,
    handle: ViewHandle,
    runtime: RuntimeHandle,
    snapshot: ViewSnapshot,
    selected_column: usize,
    filter_editor: FilterEditorState,
    /// Rejected intent or lost service, shown in the footer.
    last_error: Option<String>,
}

impl App {
    pub fn new(handle: ViewHandle, runtime: RuntimeHandle) -> Self {
        let snapshot = handle.snapshot();
        Self {
            should_quit: false,
            handle,
            runtime,
            snapshot,
            selected_column: 0,
            filter_editor: FilterEditorState::default(),
            last_error: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn schema(&self) -> &ViewSchema {
        self.handle.schema()
    }

    pub fn snapshot(&self) -> &ViewSnapshot {
        &self.snapshot
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn filter_editor(&self) -> &FilterEditorState {
        &self.filter_editor
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Picks up whatever the service published since the last frame.
    pub fn on_tick(&mut self) {
        self.snapshot = self.handle.snapshot();
    }

    pub fn on_action(&mut self, action: UiAction) {
        match action {
            UiAction::Quit => self.request_quit(),
            UiAction::PrevColumn => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            UiAction::NextColumn => {
                let last = self.schema().columns.len().saturating_sub(1);
                self.selected_column = (self.selected_column + 1).min(last);
            }
            UiAction::ToggleSort => self.toggle_sort(),
            UiAction::NextPage => {
                let params = &self.snapshot.params.params;
                let next = params.offset + params.page_size;
                if (next as u64) < self.snapshot.result.total_count {
                    self.go_to(next);
                }
            }
            UiAction::PrevPage => {
                let params = &self.snapshot.params.params;
                let previous = params.offset.saturating_sub(params.page_size);
                self.go_to(previous);
            }
            UiAction::FirstPage => self.go_to(0),
            UiAction::LastPage => {
                let last = (self.snapshot.page_count() - 1) * self.snapshot.params.params.page_size;
                self.go_to(last);
            }
            UiAction::LargerPageSize => self.step_page_size(1),
            UiAction::SmallerPageSize => self.step_page_size(-1),
            UiAction::EditFilter => self.edit_filter(),
            UiAction::Refresh => self.apply(ViewIntent::Refresh),
            UiAction::FilterInsert(ch) => self.edit_text(FilterEditorIntent::Insert(ch)),
            UiAction::FilterBackspace => self.edit_text(FilterEditorIntent::Backspace),
            UiAction::FilterClear => self.edit_text(FilterEditorIntent::Clear),
            UiAction::FilterClose => {
                dispatch_mvi!(
                    self,
                    filter_editor,
                    FilterEditorReducer,
                    FilterEditorIntent::Close
                );
            }
        }
    }

    fn selected(&self) -> Option<ColumnSpec> {
        self.schema().columns.get(self.selected_column).cloned()
    }

    fn toggle_sort(&mut self) {
        let Some(column) = self.selected() else {
            return;
        };
        let sort = &self.snapshot.params.params.sort;
        let direction = if sort.field == column.field {
            sort.direction.reversed()
        } else {
            SortDirection::Asc
        };
        self.apply(ViewIntent::SetSort {
            field: column.field,
            direction,
        });
    }

    fn go_to(&mut self, offset: usize) {
        let params = &self.snapshot.params.params;
        if params.offset == offset {
            return;
        }
        let page_size = params.page_size;
        self.apply(ViewIntent::SetPage { offset, page_size });
    }

    /// Moves through the paginator's page sizes, keeping the first visible
    /// row on screen.
    fn step_page_size(&mut self, step: isize) {
        let sizes = &self.schema().page_sizes;
        let params = &self.snapshot.params.params;
        let Some(index) = sizes.iter().position(|&s| s == params.page_size) else {
            return;
        };
        let Some(&page_size) = index.checked_add_signed(step).and_then(|i| sizes.get(i)) else {
            return;
        };
        let offset = (params.offset / page_size) * page_size;
        self.apply(ViewIntent::SetPage { offset, page_size });
    }

    /// Option columns cycle through their choices and then clear; text
    /// columns open the editor.
    fn edit_filter(&mut self) {
        let Some(column) = self.selected() else {
            return;
        };
        let current = self
            .snapshot
            .params
            .params
            .filters
            .get(&column.field)
            .and_then(|f| f.active_value())
            .map(str::to_string);

        let Some(filter) = column.filter else {
            // Let the service reject it so the footer explains why.
            self.apply(ViewIntent::SetFilter {
                column: column.field,
                value: None,
                match_mode: MatchMode::Contains,
            });
            return;
        };

        match &filter.options {
            Some(options) => {
                let next = match current.and_then(|v| options.iter().position(|o| *o == v)) {
                    None => options.first(),
                    Some(i) => options.get(i + 1),
                };
                self.apply(ViewIntent::SetFilter {
                    column: column.field,
                    value: next.cloned(),
                    match_mode: filter.match_mode,
                });
            }
            None => {
                dispatch_mvi!(
                    self,
                    filter_editor,
                    FilterEditorReducer,
                    FilterEditorIntent::Open {
                        column: column.field,
                        match_mode: filter.match_mode,
                        current,
                    }
                );
            }
        }
    }

    /// Every change of the editor text becomes a filter intent.
    fn edit_text(&mut self, intent: FilterEditorIntent) {
        let before = self.filter_editor.text().map(str::to_string);
        dispatch_mvi!(self, filter_editor, FilterEditorReducer, intent);

        let FilterEditorState::Editing {
            column,
            match_mode,
            text,
        } = &self.filter_editor
        else {
            return;
        };
        if before.as_deref() == Some(text.as_str()) {
            return;
        }
        let intent = ViewIntent::SetFilter {
            column: column.clone(),
            value: Some(text.clone()),
            match_mode: *match_mode,
        };
        self.apply(intent);
    }

    fn apply(&mut self, intent: ViewIntent) {
        match self.runtime.block_on(self.handle.apply(intent)) {
            Ok(_) => {
                self.last_error = None;
                self.snapshot = self.handle.snapshot();
            }
            Err(err) => {
                tracing::warn!(error = %err, "View intent failed");
                self.last_error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryRequest, RemoteSource, TransportError};
    use crate::service::{ServiceOptions, ViewLayer};
    use crate::view::{RemotePage, Version};
    use std::sync::Arc;
    use tokio::runtime::Runtime;

    /// Answers every request at once with an empty page of `total` rows.
    struct FixedTotal(u64);

    impl RemoteSource for FixedTotal {
        async fn fetch(&self, _request: QueryRequest) -> Result<RemotePage, TransportError> {
            Ok(RemotePage {
                users: Vec::new(),
                total: self.0,
            })
        }
    }

    fn make_app(total: u64) -> (Runtime, App) {
        let rt = Runtime::new().unwrap();
        let schema = Arc::new(ViewSchema::default());
        let (handle, server) = ViewLayer::new(schema, FixedTotal(total), ServiceOptions::default());
        rt.spawn(server.run());
        rt.block_on(handle.wait_settled()).unwrap();
        let app = App::new(handle, rt.handle().clone());
        (rt, app)
    }

    fn settle(rt: &Runtime, app: &mut App) {
        rt.block_on(app.handle.wait_settled()).unwrap();
        app.on_tick();
    }

    fn select(app: &mut App, field: &str) {
        let index = app
            .schema()
            .columns
            .iter()
            .position(|c| c.field == field)
            .unwrap();
        app.selected_column = index;
    }

    #[test]
    fn sort_toggles_on_same_column_and_resets_on_another() {
        let (_rt, mut app) = make_app(57);

        app.on_action(UiAction::ToggleSort);
        let sort = &app.snapshot().params.params.sort;
        assert_eq!((sort.field.as_str(), sort.direction), ("id", SortDirection::Desc));

        app.on_action(UiAction::NextColumn);
        app.on_action(UiAction::ToggleSort);
        let sort = &app.snapshot().params.params.sort;
        assert_eq!((sort.field.as_str(), sort.direction), ("firstName", SortDirection::Asc));
    }

    #[test]
    fn paging_stops_at_the_last_page() {
        let (rt, mut app) = make_app(25);

        app.on_action(UiAction::NextPage);
        settle(&rt, &mut app);
        app.on_action(UiAction::NextPage);
        settle(&rt, &mut app);
        assert_eq!(app.snapshot().params.params.offset, 20);

        let version = app.snapshot().params.version;
        app.on_action(UiAction::NextPage);
        assert_eq!(app.snapshot().params.version, version);

        app.on_action(UiAction::FirstPage);
        assert_eq!(app.snapshot().params.params.offset, 0);
    }

    #[test]
    fn last_page_jumps_by_page_count() {
        let (_rt, mut app) = make_app(57);
        app.on_action(UiAction::LastPage);
        assert_eq!(app.snapshot().params.params.offset, 50);
    }

    #[test]
    fn page_size_steps_through_choices() {
        let (_rt, mut app) = make_app(57);
        app.on_action(UiAction::LargerPageSize);
        assert_eq!(app.snapshot().params.params.page_size, 20);
        app.on_action(UiAction::LargerPageSize);
        app.on_action(UiAction::LargerPageSize);
        assert_eq!(app.snapshot().params.params.page_size, 30);
        app.on_action(UiAction::SmallerPageSize);
        assert_eq!(app.snapshot().params.params.page_size, 20);
    }

    #[test]
    fn option_filter_cycles_then_clears() {
        let (_rt, mut app) = make_app(57);
        select(&mut app, "gender");

        let gender = |app: &App| app.snapshot().params.params.filters["gender"].value.clone();

        app.on_action(UiAction::EditFilter);
        assert_eq!(gender(&app).as_deref(), Some("male"));
        app.on_action(UiAction::EditFilter);
        assert_eq!(gender(&app).as_deref(), Some("female"));
        app.on_action(UiAction::EditFilter);
        assert_eq!(gender(&app), None);
        assert!(!app.filter_editor().is_editing());
    }

    #[test]
    fn every_keystroke_issues_a_new_version() {
        let (_rt, mut app) = make_app(57);
        select(&mut app, "firstName");
        app.on_action(UiAction::EditFilter);
        assert!(app.filter_editor().is_editing());

        let start = app.snapshot().params.version;
        app.on_action(UiAction::FilterInsert('J'));
        app.on_action(UiAction::FilterInsert('o'));
        let params = &app.snapshot().params;
        assert_eq!(params.version, Version::new(start.get() + 2));
        assert_eq!(params.params.filters["firstName"].value.as_deref(), Some("Jo"));

        app.on_action(UiAction::FilterClear);
        assert_eq!(app.snapshot().params.params.filters["firstName"].value, None);

        app.on_action(UiAction::FilterClose);
        assert!(!app.filter_editor().is_editing());
    }

    #[test]
    fn unfilterable_column_reports_error_without_new_version() {
        let (_rt, mut app) = make_app(57);
        select(&mut app, "email");
        let version = app.snapshot().params.version;

        app.on_action(UiAction::EditFilter);
        assert_eq!(app.last_error(), Some("Column 'email' is not filterable"));
        assert_eq!(app.snapshot().params.version, version);
    }

    #[test]
    fn column_cursor_is_clamped() {
        let (_rt, mut app) = make_app(0);
        app.on_action(UiAction::PrevColumn);
        assert_eq!(app.selected_column(), 0);
        for _ in 0..20 {
            app.on_action(UiAction::NextColumn);
        }
        assert_eq!(app.selected_column(), app.schema().columns.len() - 1);
    }
}
