use engine::Currency;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use store::Toggle;

use crate::{
    app::{AppState, Section},
    ui::{components::card::Panel, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let [toggles, about] =
        Layout::vertical([Constraint::Length(Toggle::ALL.len() as u16 * 2 + 2), Constraint::Min(0)])
            .areas(area);
    render_toggles(frame, toggles, state, theme);
    render_about(frame, about, state, theme);
}

fn render_toggles(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let preferences = &state.store.preferences;
    let items: Vec<ListItem> = Toggle::ALL
        .iter()
        .map(|toggle| {
            let (mark, color) = if preferences.get(*toggle) {
                ("[x]", theme.positive)
            } else {
                ("[ ]", theme.dim)
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(mark, Style::default().fg(color)),
                    Span::raw(" "),
                    Span::raw(toggle.label()),
                ]),
                Line::from(Span::styled(
                    format!("    {}", toggle.hint()),
                    Style::default().fg(theme.dim),
                )),
            ])
        })
        .collect();

    let panel = Panel::new("Preferences", theme);
    let inner = panel.inner(area);
    frame.render_widget(panel.block(), area);

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    let mut list_state = ListState::default().with_selected(Some(state.selected(Section::Settings)));
    frame.render_stateful_widget(list, inner, &mut list_state);
}

fn render_about(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let currency = Currency::default();
    let entry = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<18}"), Style::default().fg(theme.dim)),
            Span::styled(value, Style::default().fg(theme.text)),
        ])
    };
    let lines = vec![
        entry(
            "Currency",
            format!("{} ({})", currency.code(), currency.symbol()),
        ),
        entry("Display timezone", state.timezone.name().to_string()),
        entry("Reminder horizon", format!("{} days", state.reminder_days)),
        entry("API", state.base_url.clone()),
    ];
    Panel::new("About", theme).render_with(frame, area, Paragraph::new(lines));
}
