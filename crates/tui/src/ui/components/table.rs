use api_types::Record;
use chrono_tz::Tz;
use engine::format;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table, TableState, Wrap},
};
use store::ApiError;

use crate::ui::{components::card::Panel, theme::Theme};

/// One collection on screen: a selectable table, or the request error in its place.
pub struct Collection<'a> {
    title: String,
    header: &'a [&'a str],
    widths: &'a [Constraint],
    rows: Vec<Row<'static>>,
    selected: usize,
    loading: bool,
    error: Option<&'a ApiError>,
    footer: Option<String>,
    empty: &'a str,
}

impl<'a> Collection<'a> {
    pub fn new(
        title: impl Into<String>,
        header: &'a [&'a str],
        widths: &'a [Constraint],
        rows: Vec<Row<'static>>,
    ) -> Self {
        Self {
            title: title.into(),
            header,
            widths,
            rows,
            selected: 0,
            loading: false,
            error: None,
            footer: None,
            empty: "Nothing here yet. Press a to add one.",
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn error(mut self, error: Option<&'a ApiError>) -> Self {
        self.error = error;
        self
    }

    pub fn footer(mut self, footer: Option<String>) -> Self {
        self.footer = footer;
        self
    }

    pub fn empty(mut self, empty: &'a str) -> Self {
        self.empty = empty;
        self
    }

    pub fn render(self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let title = if self.loading {
            format!("{} (loading...)", self.title)
        } else {
            format!("{} ({})", self.title, self.rows.len())
        };
        let panel = Panel::new(title, theme);
        let inner = panel.inner(area);
        frame.render_widget(panel.block(), area);

        if let Some(error) = self.error {
            let lines = vec![
                Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(theme.error),
                )),
                Line::from(Span::styled(
                    "Press r to retry.",
                    Style::default().fg(theme.dim),
                )),
            ];
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
            return;
        }

        if self.rows.is_empty() {
            let message = if self.loading { "Loading..." } else { self.empty };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    message,
                    Style::default().fg(theme.dim),
                )))
                .alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let [table_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        let header = Row::new(self.header.iter().copied())
            .style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD))
            .bottom_margin(1);
        let table = Table::new(self.rows, self.widths.iter().copied())
            .header(header)
            .row_highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("» ");

        let mut table_state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, table_area, &mut table_state);

        if let Some(footer) = self.footer {
            frame.render_widget(
                Paragraph::new(Span::styled(footer, Style::default().fg(theme.dim))),
                footer_area,
            );
        }
    }
}

/// `Created 01.02.2024  Updated 03.02.2024` for the record, as far as the server sent them.
pub fn record_footer<F>(record: Option<&Record<F>>, tz: Tz) -> Option<String> {
    let record = record?;
    let mut parts = Vec::new();
    if let Some(created) = record.created_at {
        parts.push(format!("Created {}", format::timestamp_date(created, tz)));
    }
    if let Some(updated) = record.updated_at {
        parts.push(format!("Updated {}", format::timestamp_date(updated, tz)));
    }
    (!parts.is_empty()).then(|| parts.join("  "))
}
