use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::table::{empty_widget, is_empty, table_widget};
use ratatui::widgets::Clear;
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let snapshot = app.snapshot();

    let header_widget = Header::new();
    frame.render_widget(
        header_widget.widget(snapshot.result.status, &snapshot.params.version.to_string()),
        header,
    );

    frame.render_widget(Clear, body);
    if is_empty(app) {
        frame.render_widget(empty_widget(), body);
    } else {
        frame.render_widget(table_widget(app), body);
    }

    let error = app.last_error().map(str::to_string).or_else(|| {
        snapshot
            .result
            .error
            .as_ref()
            .map(|err| format!("{}: {}", err.user_message(), err))
    });
    let footer_widget = Footer::new(snapshot, &app.schema().page_sizes)
        .editing(app.filter_editor().is_editing())
        .error(error);
    frame.render_widget(footer_widget.widget(), footer);
}
