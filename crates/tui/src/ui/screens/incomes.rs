use api_types::income::Income;
use engine::format;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    widgets::Row,
};

use crate::{
    app::{AppState, Section},
    ui::{
        components::table::{Collection, record_footer},
        theme::Theme,
    },
};

const HEADER: [&str; 5] = ["Date", "Category", "Amount", "Recurring", "Description"];
const WIDTHS: [Constraint; 5] = [
    Constraint::Length(12),
    Constraint::Length(12),
    Constraint::Length(16),
    Constraint::Length(10),
    Constraint::Fill(1),
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let [filter, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    let value = if state.recurring_only { "Recurring" } else { "All" };
    super::render_filter(frame, filter, "Showing", value.to_string(), "u", theme);

    let incomes = state.visible_incomes();
    let selected = state.selected(Section::Incomes);
    let rows = incomes
        .iter()
        .map(|income| {
            Row::new(vec![
                format::date(income.date),
                income.category.clone(),
                format::currency(income.amount),
                recurrence(income).to_string(),
                income.description.clone(),
            ])
        })
        .collect();

    Collection::new("Incomes", &HEADER, &WIDTHS, rows)
        .selected(selected)
        .loading(state.store.incomes.is_loading())
        .error(state.store.incomes.error())
        .footer(record_footer(incomes.get(selected), state.timezone))
        .render(frame, body, theme);
}

fn recurrence(income: &Income) -> &'static str {
    match (income.is_recurring, income.recurring_period) {
        (true, Some(period)) => period.as_str(),
        (true, None) => "Yes",
        (false, _) => "-",
    }
}
