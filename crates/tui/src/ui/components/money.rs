use engine::{MoneyCents, format};
use ratatui::{
    style::{Color, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// An amount coloured by sign: positive green, negative red, zero neutral.
#[must_use]
pub fn styled_amount(amount: MoneyCents, theme: &Theme) -> Span<'static> {
    let color = if amount.is_positive() {
        theme.positive
    } else if amount.is_negative() {
        theme.negative
    } else {
        theme.text
    };
    colored_amount(amount, color)
}

#[must_use]
pub fn colored_amount(amount: MoneyCents, color: Color) -> Span<'static> {
    Span::styled(format::currency(amount), Style::default().fg(color))
}

/// Share of a card limit in use, `0.0..=1.0`. A card without a limit counts as unused.
#[must_use]
pub fn usage_ratio(balance: MoneyCents, limit: MoneyCents) -> f64 {
    if !limit.is_positive() {
        return 0.0;
    }
    (balance.to_major_f64() / limit.to_major_f64()).clamp(0.0, 1.0)
}

/// Text bar like `████░░░░░░ 40%`.
#[must_use]
pub fn inline_progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);
    let percentage = (ratio * 100.0).round() as u16;
    format!("{}{} {percentage}%", "█".repeat(filled), "░".repeat(empty))
}

/// Usage bar for a card: green below 70%, amber below 90%, red above.
#[must_use]
pub fn usage_bar(balance: MoneyCents, limit: MoneyCents, width: usize, theme: &Theme) -> Span<'static> {
    let ratio = usage_ratio(balance, limit);
    let color = if ratio < 0.7 {
        theme.positive
    } else if ratio < 0.9 {
        theme.warning
    } else {
        theme.negative
    };
    Span::styled(inline_progress_bar(ratio, width), Style::default().fg(color))
}
