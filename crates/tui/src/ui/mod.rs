pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::format;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{AppState, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::for_mode(state.store.preferences.dark_mode);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    let [info, tabs, content, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_info_bar(frame, info, state, &theme);
    components::tabs::render_tabs(frame, tabs, state.section, &theme);

    match state.section {
        Section::Dashboard => screens::dashboard::render(frame, content, state, &theme),
        Section::Bills => screens::bills::render(frame, content, state, &theme),
        Section::Expenses => screens::expenses::render(frame, content, state, &theme),
        Section::Incomes => screens::incomes::render(frame, content, state, &theme),
        Section::Cards => screens::cards::render(frame, content, state, &theme),
        Section::Installments => screens::installments::render(frame, content, state, &theme),
        Section::Settings => screens::settings::render(frame, content, state, &theme),
    }

    render_bottom_bar(frame, hints, state, &theme);
    components::form::render(frame, area, state.form.as_ref(), &theme);
    components::confirm::render(frame, area, state.confirm.as_ref(), &theme);
    if state.store.preferences.notifications {
        components::toast::render(frame, area, state.toast.as_ref(), &theme);
    }
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![
        Span::styled(" API", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Today", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", format::date(state.today))),
    ];
    if state.store.is_loading() {
        spans.push(Span::styled("loading...", Style::default().fg(theme.warning)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let separator = || Span::styled("  │  ", Style::default().fg(theme.border));
    let key = |label: &'static str| Span::styled(label, Style::default().fg(theme.accent));

    let mut parts = components::tabs::tab_shortcuts(theme);
    let context = context_hints(state, &key);
    if !context.is_empty() {
        parts.push(separator());
        parts.extend(context);
    }
    parts.push(separator());
    parts.push(key("q"));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(
    state: &AppState,
    key: &dyn Fn(&'static str) -> Span<'static>,
) -> Vec<Span<'static>> {
    let crud = || {
        vec![
            key("a"),
            Span::raw(" add  "),
            key("e"),
            Span::raw(" edit  "),
            key("d"),
            Span::raw(" delete  "),
            key("r"),
            Span::raw(" refresh"),
        ]
    };
    match state.section {
        Section::Dashboard => vec![key("r"), Span::raw(" refresh")],
        Section::Bills => {
            let mut hints = crud();
            hints.extend([key("  u"), Span::raw(" unpaid")]);
            hints
        }
        Section::Incomes => {
            let mut hints = crud();
            hints.extend([key("  u"), Span::raw(" recurring")]);
            hints
        }
        Section::Installments => {
            let mut hints = crud();
            hints.extend([key("  c"), Span::raw(" card")]);
            hints
        }
        Section::Expenses | Section::Cards => crud(),
        Section::Settings => vec![key("Enter"), Span::raw("/"), key("space"), Span::raw(" toggle")],
    }
}
