use engine::format;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::Row,
};

use crate::{
    app::{AppState, Section},
    ui::{
        components::table::{Collection, record_footer},
        theme::Theme,
    },
};

const HEADER: [&str; 4] = ["Date", "Category", "Amount", "Description"];
const WIDTHS: [Constraint; 4] = [
    Constraint::Length(12),
    Constraint::Length(16),
    Constraint::Length(16),
    Constraint::Fill(1),
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let expenses = state.visible_expenses();
    let selected = state.selected(Section::Expenses);
    let rows = expenses
        .iter()
        .map(|expense| {
            Row::new(vec![
                format::date(expense.date),
                expense.category.clone(),
                format::currency(expense.amount),
                expense.description.clone(),
            ])
        })
        .collect();

    Collection::new("Expenses", &HEADER, &WIDTHS, rows)
        .selected(selected)
        .loading(state.store.expenses.is_loading())
        .error(state.store.expenses.error())
        .footer(record_footer(expenses.get(selected), state.timezone))
        .render(frame, area, theme);
}
