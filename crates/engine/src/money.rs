use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::{Currency, EngineError};

/// Signed money amount represented as **integer cents** (kuruş).
///
/// Use this type for **all** monetary values (bill amounts, card limits, installment totals)
/// to avoid floating-point drift in sums and divisions.
///
/// On the wire amounts are plain JSON numbers in major units (`12.5`); decoding rounds to the
/// nearest cent, half away from zero.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(1_234_50);
/// assert_eq!(amount.cents(), 123450);
/// assert_eq!(amount.to_string(), "₺1.234,50");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator, `.` thousands grouping
/// before a `,` decimal; rejects > 2 decimals):
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert_eq!("1.234,50".parse::<MoneyCents>().unwrap().cents(), 123450);
/// assert!("12.345".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from whole major units (lira).
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Addition clamped to the representable range.
    #[must_use]
    pub const fn saturating_add(self, rhs: MoneyCents) -> MoneyCents {
        MoneyCents(self.0.saturating_add(rhs.0))
    }

    /// Subtraction clamped to the representable range.
    #[must_use]
    pub const fn saturating_sub(self, rhs: MoneyCents) -> MoneyCents {
        MoneyCents(self.0.saturating_sub(rhs.0))
    }

    /// Divides the amount into `parts`, rounding the quotient to the nearest cent, half away
    /// from zero (`100.00 / 3 = 33.33`, `0.05 / 2 = 0.03`).
    ///
    /// Returns `None` when `parts` is zero.
    #[must_use]
    pub fn div_rounded(self, parts: u32) -> Option<MoneyCents> {
        if parts == 0 {
            return None;
        }
        let numerator = i128::from(self.0).unsigned_abs() * 2 + u128::from(parts);
        let quotient = numerator / (u128::from(parts) * 2);
        let quotient = i64::try_from(quotient).ok()?;
        Some(MoneyCents(if self.0 < 0 { -quotient } else { quotient }))
    }

    /// Converts a floating major-unit value (as found in JSON payloads) into cents.
    pub fn from_major_f64(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount("amount is not finite".to_string()));
        }
        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Ok(MoneyCents(cents as i64))
    }

    /// Returns the amount in major units as a float, for wire encoding only.
    #[must_use]
    pub fn to_major_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Currency::default().format(*self))
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 -= rhs.0;
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MoneyCents> for MoneyCents {
    fn sum<I: Iterator<Item = &'a MoneyCents>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator, an optional leading `+`/`-` and an optional
    /// `₺` prefix. When the decimal separator is `,` the whole part may be grouped by `.` in
    /// threes, as the amounts are displayed (`1.234,50`).
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - groups after the first have exactly 3 digits (rejects `1.23,50`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        let rest = rest.strip_prefix(Currency::default().symbol()).unwrap_or(rest).trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let (major_str, minor_str) = match rest.split_once(',') {
            Some((whole, frac)) => (ungroup(whole).ok_or_else(invalid)?, Some(frac)),
            None => match rest.split_once('.') {
                Some((whole, frac)) => (whole.to_string(), Some(frac)),
                None => (rest.to_string(), None),
            },
        };
        let major_str = major_str.as_str();

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: i64 = major_str.parse().map_err(|_| overflow())?;

        let minor: i64 = match minor_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = major
            .checked_mul(100)
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(MoneyCents(signed))
    }
}

/// Strips `.` thousands separators from the whole part of an amount (`1.234.567` -> `1234567`).
///
/// Returns `None` when the grouping is malformed.
fn ungroup(whole: &str) -> Option<String> {
    let mut groups = whole.split('.');
    let first = groups.next()?;
    if first.is_empty() || (first.len() > 3 && whole.contains('.')) {
        return None;
    }
    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

impl Serialize for MoneyCents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.to_major_f64())
        }
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = MoneyCents;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount as a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        value
            .checked_mul(100)
            .map(MoneyCents)
            .ok_or_else(|| E::custom("amount too large"))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        let value = i64::try_from(value).map_err(|_| E::custom("amount too large"))?;
        self.visit_i64(value)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        MoneyCents::from_major_f64(value).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for MoneyCents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_try() {
        assert_eq!(MoneyCents::new(0).to_string(), "₺0,00");
        assert_eq!(MoneyCents::new(1).to_string(), "₺0,01");
        assert_eq!(MoneyCents::new(1050).to_string(), "₺10,50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-₺10,50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<MoneyCents>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<MoneyCents>().unwrap().cents(), 230);
        assert_eq!("₺15".parse::<MoneyCents>().unwrap().cents(), 1500);
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert!("12.345".parse::<MoneyCents>().is_err());
        assert!("0.001".parse::<MoneyCents>().is_err());
        assert!("".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn parse_accepts_grouping_before_comma_decimal() {
        assert_eq!("1.234,50".parse::<MoneyCents>().unwrap().cents(), 123_450);
        assert_eq!("₺1.234,5".parse::<MoneyCents>().unwrap().cents(), 123_450);
        assert_eq!("-12.345.678,00".parse::<MoneyCents>().unwrap().cents(), -1_234_567_800);
        assert_eq!("999,99".parse::<MoneyCents>().unwrap().cents(), 99_999);
        assert_eq!("1234,50".parse::<MoneyCents>().unwrap().cents(), 123_450);

        assert!("1.23,50".parse::<MoneyCents>().is_err());
        assert!("1234.567,00".parse::<MoneyCents>().is_err());
        assert!(".234,50".parse::<MoneyCents>().is_err());
        assert!("1,234.50".parse::<MoneyCents>().is_err());
        assert!("1.234,567".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn div_rounded_is_half_away_from_zero() {
        let div = |cents: i64, parts| MoneyCents::new(cents).div_rounded(parts).unwrap().cents();
        assert_eq!(div(120_000, 12), 10_000);
        assert_eq!(div(10_000, 3), 3_333);
        assert_eq!(div(20_000, 3), 6_667);
        assert_eq!(div(5, 2), 3);
        assert_eq!(div(-5, 2), -3);
        assert!(MoneyCents::new(100).div_rounded(0).is_none());
    }

    #[test]
    fn sums_iterators() {
        let total: MoneyCents = [MoneyCents::new(150), MoneyCents::new(-50)].iter().sum();
        assert_eq!(total, MoneyCents::new(100));
        let empty: MoneyCents = std::iter::empty::<MoneyCents>().sum();
        assert_eq!(empty, MoneyCents::ZERO);
    }

    #[test]
    fn json_numbers_round_to_cents() {
        let parse = |raw: &str| serde_json::from_str::<MoneyCents>(raw).unwrap().cents();
        assert_eq!(parse("12"), 1200);
        assert_eq!(parse("12.5"), 1250);
        assert_eq!(parse("0.29"), 29);
        assert_eq!(parse("0.125"), 13);
        assert_eq!(parse("\"7,25\""), 725);
        assert!(serde_json::from_str::<MoneyCents>("true").is_err());
    }

    #[test]
    fn json_encodes_major_units() {
        assert_eq!(serde_json::to_string(&MoneyCents::new(1200)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&MoneyCents::new(1250)).unwrap(), "12.5");
        assert_eq!(serde_json::to_string(&MoneyCents::new(-1)).unwrap(), "-0.01");
    }
}
