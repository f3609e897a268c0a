use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// Rounded container used by every screen.
pub struct Panel<'a> {
    title: String,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Panel<'a> {
    pub fn new(title: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            title: title.into(),
            theme,
            focused: false,
        }
    }

    /// Accent border.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(&self) -> Block<'static> {
        let border_color = if self.focused {
            self.theme.accent
        } else {
            self.theme.border
        };

        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.theme.surface).fg(self.theme.text))
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let inner = self.inner(area);
        frame.render_widget(self.block(), area);
        frame.render_widget(content, inner);
    }
}

/// A label over a big value, as on the dashboard totals.
pub struct StatCard<'a> {
    title: &'a str,
    value: Span<'static>,
    subtitle: Option<String>,
    theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: Span<'static>, theme: &'a Theme) -> Self {
        Self {
            title,
            value,
            subtitle: None,
            theme,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn render(self, frame: &mut Frame<'_>, area: Rect) {
        let mut lines = vec![Line::from(
            self.value.patch_style(Style::default().add_modifier(Modifier::BOLD)),
        )];
        if let Some(subtitle) = self.subtitle {
            lines.push(Line::from(Span::styled(
                subtitle,
                Style::default().fg(self.theme.dim),
            )));
        }

        Panel::new(self.title, self.theme).render_with(frame, area, Paragraph::new(lines));
    }
}
