use api_types::bill::{Bill, BillStatus};
use chrono::NaiveDate;
use engine::format;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Cell, Row},
};

use crate::{
    app::{AppState, Section},
    ui::{
        components::table::{Collection, record_footer},
        theme::Theme,
    },
};

const HEADER: [&str; 5] = ["Name", "Amount", "Due Date", "Category", "Status"];
const WIDTHS: [Constraint; 5] = [
    Constraint::Fill(2),
    Constraint::Length(16),
    Constraint::Length(12),
    Constraint::Fill(1),
    Constraint::Length(9),
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let [filter, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    let value = if state.unpaid_only { "Unpaid" } else { "All" };
    super::render_filter(frame, filter, "Showing", value.to_string(), "u", theme);

    let bills = state.visible_bills();
    let selected = state.selected(Section::Bills);
    let rows = bills
        .iter()
        .map(|bill| row(bill, state.today, theme))
        .collect();

    Collection::new("Bills", &HEADER, &WIDTHS, rows)
        .selected(selected)
        .loading(state.store.bills.is_loading())
        .error(state.store.bills.error())
        .footer(record_footer(bills.get(selected), state.timezone))
        .render(frame, body, theme);
}

fn row(bill: &Bill, today: NaiveDate, theme: &Theme) -> Row<'static> {
    let (status, color) = if bill.is_overdue(today) {
        (BillStatus::Overdue.as_str(), theme.negative)
    } else if bill.is_paid() {
        (bill.status.as_str(), theme.positive)
    } else {
        (bill.status.as_str(), theme.warning)
    };
    Row::new(vec![
        Cell::from(bill.name.clone()),
        Cell::from(format::currency(bill.amount)),
        Cell::from(format::date(bill.due_date)),
        Cell::from(bill.category.clone()),
        Cell::from(Span::styled(status, Style::default().fg(color))),
    ])
}
