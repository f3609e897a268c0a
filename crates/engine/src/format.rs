//! Locale-fixed rendering helpers.
//!
//! Output never depends on the user's locale: dates are `DD.MM.YYYY` as in `tr-TR`, amounts go
//! through [`Currency::format`](crate::Currency::format).

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::{Currency, EngineError, MoneyCents, ResultEngine};

/// Default timezone used to turn timestamps into calendar dates.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Istanbul;

#[must_use]
pub fn currency(amount: MoneyCents) -> String {
    Currency::default().format(amount)
}

/// Formats a calendar date as `tr-TR` does (`01.02.2024`).
#[must_use]
pub fn date(value: NaiveDate) -> String {
    value.format("%d.%m.%Y").to_string()
}

/// Formats the calendar date of a timestamp as seen in `tz`.
#[must_use]
pub fn timestamp_date(value: DateTime<Utc>, tz: Tz) -> String {
    date(value.with_timezone(&tz).date_naive())
}

/// Keeps the last four characters of a card number (`**** 4242`).
#[must_use]
pub fn masked_card_number(number: &str) -> String {
    let chars: Vec<char> = number.trim().chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("**** {tail}")
}

/// Label used wherever an installment names its card.
#[must_use]
pub fn card_label(name: &str, number: &str) -> String {
    format!("{name} ({})", masked_card_number(number))
}

/// Parses a date typed by the user: `DD.MM.YYYY` or `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|_| EngineError::InvalidDate(format!("'{trimmed}' is not DD.MM.YYYY")))
}

/// Editable form of an amount (`1234,50`): no symbol, no grouping.
#[must_use]
pub fn amount_input(amount: MoneyCents) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{},{:02}", abs / 100, abs % 100)
}
