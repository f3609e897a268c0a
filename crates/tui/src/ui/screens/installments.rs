use api_types::installment::Installment;
use chrono::NaiveDate;
use engine::format;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, List, ListItem, Paragraph, Row},
};

use crate::{
    app::{AppState, Section},
    ui::{
        components::{
            card::Panel,
            table::{Collection, record_footer},
        },
        theme::Theme,
    },
};

const HEADER: [&str; 7] = [
    "Card", "Description", "Total", "Monthly", "Count", "Start", "Status",
];
const WIDTHS: [Constraint; 7] = [
    Constraint::Fill(1),
    Constraint::Fill(1),
    Constraint::Length(15),
    Constraint::Length(14),
    Constraint::Length(5),
    Constraint::Length(11),
    Constraint::Length(7),
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let [filter, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    let card = state
        .card_filter
        .as_ref()
        .map_or_else(|| "All cards".to_string(), |id| state.store.card_label(id));
    super::render_filter(frame, filter, "Card", card, "c", theme);

    let [table, schedule] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(34)]).areas(body);

    let plans = state.visible_installments();
    let selected = state.selected(Section::Installments);
    let rows = plans.iter().map(|plan| row(plan, state, theme)).collect();

    Collection::new("Installments", &HEADER, &WIDTHS, rows)
        .selected(selected)
        .loading(state.store.installments.is_loading())
        .error(state.store.installments.error())
        .footer(record_footer(plans.get(selected), state.timezone))
        .render(frame, table, theme);

    render_schedule(frame, schedule, plans.get(selected), state.today, theme);
}

fn row(plan: &Installment, state: &AppState, theme: &Theme) -> Row<'static> {
    let monthly = plan
        .monthly_payment()
        .map_or_else(|_| "-".to_string(), format::currency);
    let status_color = if plan.is_paid { theme.positive } else { theme.warning };
    Row::new(vec![
        Cell::from(state.store.card_label(&plan.card_id)),
        Cell::from(plan.description.clone()),
        Cell::from(format::currency(plan.total_amount)),
        Cell::from(monthly),
        Cell::from(plan.number_of_installments.to_string()),
        Cell::from(format::date(plan.start_date)),
        Cell::from(Span::styled(
            plan.status_label(),
            Style::default().fg(status_color),
        )),
    ])
}

/// Due dates of the selected plan; past dues are dimmed.
fn render_schedule(
    frame: &mut Frame<'_>,
    area: Rect,
    plan: Option<&Installment>,
    today: NaiveDate,
    theme: &Theme,
) {
    let panel = Panel::new("Schedule", theme);
    let Some(plan) = plan else {
        panel.render_with(frame, area, Paragraph::new(""));
        return;
    };

    match plan.schedule() {
        Ok(dues) => {
            let items: Vec<ListItem> = dues
                .iter()
                .map(|due| {
                    let past = plan.is_paid || due.date < today;
                    let style = if past {
                        Style::default().fg(theme.dim)
                    } else {
                        Style::default().fg(theme.text)
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{:>2}. ", due.number), Style::default().fg(theme.dim)),
                        Span::styled(format::date(due.date), style),
                        Span::raw("  "),
                        Span::styled(format::currency(due.amount), style),
                    ]))
                })
                .collect();
            panel.render_with(frame, area, List::new(items));
        }
        Err(err) => panel.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(err.to_string(), Style::default().fg(theme.error))),
        ),
    }
}
