use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::{
    forms::{Form, Input},
    ui::{
        components::{card::Panel, centered},
        theme::Theme,
    },
};

const LABEL_WIDTH: usize = 14;

/// Modal editor for a [`Form`].
pub fn render(frame: &mut Frame<'_>, area: Rect, form: Option<&Form>, theme: &Theme) {
    let Some(form) = form else {
        return;
    };

    let mut lines: Vec<Line<'static>> = form
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == form.focus;
            let marker = if focused { "› " } else { "  " };
            let label_style = if focused {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dim)
            };
            let mut value = field.display();
            if focused && matches!(field.input, Input::Text(_)) {
                value.push('▏');
            }
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(format!("{:<LABEL_WIDTH$}", field.label), label_style),
                Span::styled(value, Style::default().fg(theme.text)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    } else if form.awaiting.is_some() {
        lines.push(Line::from(Span::styled(
            "Saving...",
            Style::default().fg(theme.warning),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::raw(" save  "),
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" next  "),
        Span::styled("←/→ space", Style::default().fg(theme.accent)),
        Span::raw(" choose  "),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" cancel"),
    ]));

    let height = lines.len() as u16 + 2;
    let rect = centered(area, 64, height);
    frame.render_widget(Clear, rect);
    Panel::new(form.title(), theme)
        .focused(true)
        .render_with(frame, rect, Paragraph::new(lines).wrap(Wrap { trim: false }));
}
