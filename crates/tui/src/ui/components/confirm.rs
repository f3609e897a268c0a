use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::{
    app::Confirm,
    ui::{
        components::{card::Panel, centered},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, confirm: Option<&Confirm>, theme: &Theme) {
    let Some(confirm) = confirm else {
        return;
    };
    let rect = centered(area, 50, 6);
    let lines = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(
                confirm.label.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("?"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.negative)),
            Span::raw(" delete  "),
            Span::styled("any key", Style::default().fg(theme.accent)),
            Span::raw(" cancel"),
        ]),
    ];

    frame.render_widget(Clear, rect);
    Panel::new(format!("Delete from {}", confirm.section.label()), theme)
        .focused(true)
        .render_with(
            frame,
            rect,
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
        );
}
