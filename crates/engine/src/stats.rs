use crate::MoneyCents;

/// Dashboard totals.
///
/// `balance = incomes - expenses - bills`, where bills count regardless of their status.
/// Sums clamp at the bounds of [`MoneyCents`] instead of overflowing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub incomes: MoneyCents,
    pub expenses: MoneyCents,
    pub bills: MoneyCents,
    pub balance: MoneyCents,
}

impl Totals {
    pub fn compute<I, E, B>(incomes: I, expenses: E, bills: B) -> Self
    where
        I: IntoIterator<Item = MoneyCents>,
        E: IntoIterator<Item = MoneyCents>,
        B: IntoIterator<Item = MoneyCents>,
    {
        let incomes = total(incomes);
        let expenses = total(expenses);
        let bills = total(bills);
        Self {
            incomes,
            expenses,
            bills,
            balance: incomes.saturating_sub(expenses).saturating_sub(bills),
        }
    }
}

fn total(amounts: impl IntoIterator<Item = MoneyCents>) -> MoneyCents {
    amounts
        .into_iter()
        .fold(MoneyCents::ZERO, MoneyCents::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lira(values: &[i64]) -> Vec<MoneyCents> {
        values.iter().copied().map(MoneyCents::from_major).collect()
    }

    #[test]
    fn balance_subtracts_expenses_and_bills() {
        let totals = Totals::compute(lira(&[100, 50]), lira(&[30]), lira(&[20]));
        assert_eq!(totals.incomes, MoneyCents::from_major(150));
        assert_eq!(totals.expenses, MoneyCents::from_major(30));
        assert_eq!(totals.bills, MoneyCents::from_major(20));
        assert_eq!(totals.balance, MoneyCents::from_major(100));
    }

    #[test]
    fn empty_inputs_are_zero() {
        let totals = Totals::compute(lira(&[]), lira(&[]), lira(&[]));
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn balance_can_go_negative() {
        let totals = Totals::compute(lira(&[10]), lira(&[25]), lira(&[]));
        assert_eq!(totals.balance, MoneyCents::from_major(-15));
    }

    #[test]
    fn huge_amounts_clamp_instead_of_overflowing() {
        let max = MoneyCents::new(i64::MAX);
        let totals = Totals::compute([max, max], [MoneyCents::new(1)], []);
        assert_eq!(totals.incomes, max);
        assert_eq!(totals.balance, MoneyCents::new(i64::MAX - 1));

        let totals = Totals::compute([], [max], [max]);
        assert_eq!(totals.expenses, max);
        assert_eq!(totals.balance, MoneyCents::new(i64::MIN));
    }
}
