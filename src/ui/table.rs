use ratatui::layout::{Alignment, Constraint};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::ui::app::App;
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, TAG_FEMALE, TAG_MALE,
    TAG_TEXT,
};
use crate::view::{ColumnSpec, Record, SortDirection, ViewStatus};

const EMPTY_MESSAGE: &str = "No users found.";

fn block() -> Block<'static> {
    Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(GLOBAL_BORDER))
}

/// Shown instead of the table when a settled query matched nothing.
pub fn is_empty(app: &App) -> bool {
    let result = &app.snapshot().result;
    result.rows.is_empty() && matches!(result.status, ViewStatus::Ready | ViewStatus::Error)
}

pub fn empty_widget() -> Paragraph<'static> {
    Paragraph::new(EMPTY_MESSAGE)
        .style(Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM))
        .alignment(Alignment::Center)
        .block(block())
}

pub fn table_widget(app: &App) -> Table<'static> {
    let schema = app.schema();
    let snapshot = app.snapshot();

    let header = Row::new(
        schema
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| header_cell(app, column, index == app.selected_column())),
    )
    .height(2)
    .bottom_margin(1);

    let row_style = if snapshot.result.is_loading() {
        Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(HEADER_TEXT)
    };

    let rows: Vec<Row> = snapshot
        .result
        .rows
        .iter()
        .map(|record| {
            Row::new(schema.columns.iter().map(|column| body_cell(record, column)))
                .style(row_style)
        })
        .collect();

    let widths: Vec<Constraint> = schema.columns.iter().map(column_width).collect();

    Table::new(rows, widths).header(header).block(block())
}

fn header_cell(app: &App, column: &ColumnSpec, selected: bool) -> Cell<'static> {
    let params = &app.snapshot().params.params;

    let indicator = match &params.sort {
        sort if sort.field == column.field => match sort.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        },
        _ if column.sortable => " ·",
        _ => "",
    };

    let title_style = if selected {
        Style::default()
            .fg(ACCENT)
            .bg(ACTIVE_HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD)
    };
    let title = Line::from(Span::styled(
        format!("{}{}", column.header, indicator),
        title_style,
    ));

    let editor = app.filter_editor();
    let filter = match &column.filter {
        None => Line::default(),
        Some(_) if editor.column() == Some(column.field.as_str()) => Line::from(Span::styled(
            format!("{}▏", editor.text().unwrap_or_default()),
            Style::default().fg(ACCENT),
        )),
        Some(filter) => match params.filters.get(&column.field).and_then(|f| f.active_value()) {
            Some(value) => Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(HEADER_TEXT),
            )),
            None => {
                let placeholder = if filter.options.is_some() { "any" } else { "filter…" };
                Line::from(Span::styled(
                    placeholder,
                    Style::default().fg(HEADER_SEPARATOR),
                ))
            }
        },
    };

    Cell::from(Text::from(vec![title, filter]))
}

fn body_cell(record: &Record, column: &ColumnSpec) -> Cell<'static> {
    let value = record.field(&column.field).unwrap_or_default();
    if column.field == "gender" {
        return Cell::from(gender_tag(value));
    }
    Cell::from(value)
}

/// Gender as a coloured tag.
fn gender_tag(value: String) -> Line<'static> {
    let background = match value.as_str() {
        "male" => TAG_MALE,
        "female" => TAG_FEMALE,
        _ => HEADER_SEPARATOR,
    };
    Line::from(Span::styled(
        format!(" {} ", value),
        Style::default().fg(TAG_TEXT).bg(background),
    ))
}

fn column_width(column: &ColumnSpec) -> Constraint {
    match column.field.as_str() {
        "id" | "age" => Constraint::Length(6),
        "gender" => Constraint::Length(10),
        "email" | "address" | "companyName" => Constraint::Fill(2),
        _ => Constraint::Fill(1),
    }
}
