pub mod bills;
pub mod cards;
pub mod dashboard;
pub mod expenses;
pub mod incomes;
pub mod installments;
pub mod settings;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

/// One-line filter header: `label: value   (key) hint`.
fn render_filter(frame: &mut Frame<'_>, area: Rect, label: &str, value: String, key: &str, theme: &Theme) {
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("{label}: "), Style::default().fg(theme.dim)),
        Span::styled(value, Style::default().fg(theme.accent)),
        Span::styled(format!("   {key} to change"), Style::default().fg(theme.dim)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
