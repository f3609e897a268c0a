use api_types::card::Card;
use engine::format;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Cell, Row},
};

use crate::{
    app::{AppState, Section},
    ui::{
        components::{
            money::styled_amount,
            table::{Collection, record_footer},
        },
        theme::Theme,
    },
};

const HEADER: [&str; 8] = [
    "Name", "Type", "Number", "Expires", "Limit", "Balance", "Available", "Status",
];
const WIDTHS: [Constraint; 8] = [
    Constraint::Fill(1),
    Constraint::Length(8),
    Constraint::Length(10),
    Constraint::Length(11),
    Constraint::Length(15),
    Constraint::Length(15),
    Constraint::Length(15),
    Constraint::Length(9),
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cards = state.visible_cards();
    let selected = state.selected(Section::Cards);
    let rows = cards.iter().map(|card| row(card, theme)).collect();

    Collection::new("Cards", &HEADER, &WIDTHS, rows)
        .selected(selected)
        .loading(state.store.cards.is_loading())
        .error(state.store.cards.error())
        .footer(record_footer(cards.get(selected), state.timezone))
        .render(frame, area, theme);
}

fn row(card: &Card, theme: &Theme) -> Row<'static> {
    let status = if card.is_active {
        Span::styled("Active", Style::default().fg(theme.positive))
    } else {
        Span::styled("Inactive", Style::default().fg(theme.dim))
    };
    Row::new(vec![
        Cell::from(card.name.clone()),
        Cell::from(card.kind.as_str()),
        Cell::from(format::masked_card_number(&card.number)),
        Cell::from(format::date(card.expiry_date)),
        Cell::from(format::currency(card.limit)),
        Cell::from(format::currency(card.balance)),
        Cell::from(styled_amount(card.available(), theme)),
        Cell::from(status),
    ])
}
