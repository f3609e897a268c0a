use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents};

/// Currency used to render money values.
///
/// The client renders every amount as Turkish Lira with Turkish grouping, whatever currency the
/// server stores, so there is a single variant.
///
/// ## Minor units
///
/// Amounts are held as an `i64` number of **minor units** (see [`MoneyCents`]).
/// `minor_units()` returns how many decimal digits separate major from minor units.
///
/// Example: TRY has 2 minor units, so `10,50 ₺` ⇄ `1050`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Try,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Try => "TRY",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Try => "₺",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Try => 2,
        }
    }

    /// Formats an amount with `tr-TR` conventions: `.` groups thousands, `,` separates the
    /// fraction and the symbol comes first (`₺1.234,50`, `-₺0,05`).
    #[must_use]
    pub fn format(self, amount: MoneyCents) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let abs = amount.cents().unsigned_abs();
        let major = abs / 100;
        let minor = abs % 100;
        format!(
            "{sign}{}{},{minor:02}",
            self.symbol(),
            group_thousands(major)
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRY" | "TL" => Ok(Currency::Try),
            other => Err(EngineError::InvalidAmount(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_turkish_grouping() {
        let fmt = |cents| Currency::Try.format(MoneyCents::new(cents));
        assert_eq!(fmt(0), "₺0,00");
        assert_eq!(fmt(5), "₺0,05");
        assert_eq!(fmt(-5), "-₺0,05");
        assert_eq!(fmt(99_999), "₺999,99");
        assert_eq!(fmt(123_450), "₺1.234,50");
        assert_eq!(fmt(123_456_789), "₺1.234.567,89");
        assert_eq!(fmt(-100_000_000), "-₺1.000.000,00");
    }

    #[test]
    fn parses_known_codes() {
        assert_eq!(Currency::try_from(" try "), Ok(Currency::Try));
        assert!(Currency::try_from("EUR").is_err());
    }
}
