//! Installment plan arithmetic.

use chrono::{Months, NaiveDate};

use crate::{EngineError, MoneyCents, ResultEngine};

pub const MIN_INSTALLMENTS: u8 = 1;
pub const MAX_INSTALLMENTS: u8 = 48;

/// Checks that an installment count lies in `MIN_INSTALLMENTS..=MAX_INSTALLMENTS`.
pub fn ensure_count(count: u8) -> ResultEngine<()> {
    if (MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&count) {
        Ok(())
    } else {
        Err(EngineError::InvalidInstallments(format!(
            "count must be between {MIN_INSTALLMENTS} and {MAX_INSTALLMENTS}, got {count}"
        )))
    }
}

/// Monthly share of `total`, rounded to the cent half away from zero.
///
/// Only a zero count is rejected: records coming from the server are displayed even when they
/// fall outside the range the forms accept.
pub fn monthly_payment(total: MoneyCents, count: u8) -> ResultEngine<MoneyCents> {
    total
        .div_rounded(u32::from(count))
        .ok_or_else(|| EngineError::InvalidInstallments("count must be > 0".to_string()))
}

/// One due payment of a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Due {
    /// 1-based position in the plan.
    pub number: u8,
    pub date: NaiveDate,
    pub amount: MoneyCents,
}

/// Expands a plan into its monthly dues.
///
/// Every due is [`monthly_payment`] except the last, which takes whatever is left so the dues
/// add up to `total` exactly. Dates fall on the start day of each following month, clamped to
/// the month's last day.
pub fn schedule(total: MoneyCents, count: u8, start: NaiveDate) -> ResultEngine<Vec<Due>> {
    let monthly = monthly_payment(total, count)?;
    let mut remaining = total;
    let mut dues = Vec::with_capacity(usize::from(count));

    for number in 1..=count {
        let date = start
            .checked_add_months(Months::new(u32::from(number - 1)))
            .ok_or_else(|| EngineError::InvalidDate(format!("{start} + {} months", number - 1)))?;
        let amount = if number == count { remaining } else { monthly };
        remaining -= amount;
        dues.push(Due {
            number,
            date,
            amount,
        });
    }

    Ok(dues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn even_division() {
        let monthly = monthly_payment(MoneyCents::from_major(1200), 12).unwrap();
        assert_eq!(monthly, MoneyCents::from_major(100));
    }

    #[test]
    fn uneven_division_rounds_to_cent() {
        let monthly = monthly_payment(MoneyCents::from_major(100), 3).unwrap();
        assert_eq!(monthly.cents(), 3333);
        assert_eq!(monthly.to_string(), "₺33,33");
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(monthly_payment(MoneyCents::from_major(100), 0).is_err());
    }

    #[test]
    fn count_range() {
        assert!(ensure_count(0).is_err());
        assert!(ensure_count(1).is_ok());
        assert!(ensure_count(48).is_ok());
        assert!(ensure_count(49).is_err());
    }

    #[test]
    fn schedule_absorbs_remainder_in_last_due() {
        let dues = schedule(MoneyCents::from_major(100), 3, day(2024, 1, 31)).unwrap();
        let amounts: Vec<i64> = dues.iter().map(|due| due.amount.cents()).collect();
        assert_eq!(amounts, vec![3333, 3333, 3334]);
        let dates: Vec<NaiveDate> = dues.iter().map(|due| due.date).collect();
        assert_eq!(dates, vec![day(2024, 1, 31), day(2024, 2, 29), day(2024, 3, 31)]);
        let total: MoneyCents = dues.iter().map(|due| due.amount).sum();
        assert_eq!(total, MoneyCents::from_major(100));
    }

    #[test]
    fn schedule_with_rounding_up() {
        let dues = schedule(MoneyCents::from_major(200), 3, day(2024, 5, 1)).unwrap();
        let amounts: Vec<i64> = dues.iter().map(|due| due.amount.cents()).collect();
        assert_eq!(amounts, vec![6667, 6667, 6666]);
    }
}
