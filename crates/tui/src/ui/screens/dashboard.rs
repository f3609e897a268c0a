use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use engine::format;
use store::Dashboard;

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Panel, StatCard},
            money::{colored_amount, styled_amount, usage_bar},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let dashboard = state.dashboard();

    let [stats, lists] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(area);
    render_totals(frame, stats, &dashboard, theme);

    let [cards, reminders] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(lists);
    render_cards(frame, cards, &dashboard, theme);
    render_reminders(frame, reminders, state, &dashboard, theme);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let totals = dashboard.totals;
    let [balance, incomes, expenses, bills] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(area);

    StatCard::new("Balance", styled_amount(totals.balance, theme), theme)
        .subtitle("incomes - expenses - bills")
        .render(frame, balance);
    StatCard::new("Incomes", colored_amount(totals.incomes, theme.positive), theme)
        .render(frame, incomes);
    StatCard::new("Expenses", colored_amount(totals.expenses, theme.negative), theme)
        .render(frame, expenses);
    StatCard::new("Bills", colored_amount(totals.bills, theme.warning), theme)
        .render(frame, bills);
}

fn render_cards(frame: &mut Frame<'_>, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let panel = Panel::new(format!("Cards ({})", dashboard.cards.len()), theme);
    if dashboard.cards.is_empty() {
        panel.render_with(
            frame,
            area,
            Paragraph::new(Span::styled("No cards yet.", Style::default().fg(theme.dim))),
        );
        return;
    }

    let items: Vec<ListItem> = dashboard
        .cards
        .iter()
        .map(|card| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(card.name.clone(), Style::default().fg(theme.text)),
                    Span::raw("  "),
                    Span::styled(card.masked_number.clone(), Style::default().fg(theme.dim)),
                ]),
                Line::from(vec![
                    Span::raw("  "),
                    usage_bar(card.balance, card.limit, 10, theme),
                    Span::styled("  available ", Style::default().fg(theme.dim)),
                    styled_amount(card.available, theme),
                ]),
            ])
        })
        .collect();
    panel.render_with(frame, area, List::new(items));
}

fn render_reminders(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    dashboard: &Dashboard,
    theme: &Theme,
) {
    let panel = Panel::new("Upcoming Bills", theme);
    if !state.store.preferences.bill_reminders {
        panel.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "Bill reminders are off (Settings).",
                Style::default().fg(theme.dim),
            )),
        );
        return;
    }
    if dashboard.reminders.is_empty() {
        panel.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                format!("Nothing due in the next {} days.", state.reminder_days),
                Style::default().fg(theme.dim),
            )),
        );
        return;
    }

    let items: Vec<ListItem> = dashboard
        .reminders
        .iter()
        .map(|reminder| {
            let date_style = if reminder.overdue {
                Style::default().fg(theme.negative)
            } else {
                Style::default().fg(theme.warning)
            };
            let mut spans = vec![
                Span::styled(format::date(reminder.due_date), date_style),
                Span::raw("  "),
                Span::styled(reminder.name.clone(), Style::default().fg(theme.text)),
                Span::raw("  "),
                colored_amount(reminder.amount, theme.text),
            ];
            if reminder.overdue {
                spans.push(Span::styled("  overdue", Style::default().fg(theme.negative)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    panel.render_with(frame, area, List::new(items));
}
