//! Read-only aggregation shown on the dashboard.

use api_types::{EntityId, bill::Bill, card::Card};
use chrono::{Days, NaiveDate};
use engine::{MoneyCents, Totals, format};

use crate::app_store::AppStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardSummary {
    pub id: EntityId,
    pub name: String,
    pub masked_number: String,
    pub balance: MoneyCents,
    pub limit: MoneyCents,
    pub available: MoneyCents,
}

impl From<&Card> for CardSummary {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            masked_number: format::masked_card_number(&card.number),
            balance: card.balance,
            limit: card.limit,
            available: card.available(),
        }
    }
}

/// A bill that is due soon or already late.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reminder {
    pub id: EntityId,
    pub name: String,
    pub amount: MoneyCents,
    pub due_date: NaiveDate,
    pub overdue: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dashboard {
    pub totals: Totals,
    pub cards: Vec<CardSummary>,
    /// Empty when bill reminders are switched off.
    pub reminders: Vec<Reminder>,
}

impl Dashboard {
    pub fn build(app: &AppStore, today: NaiveDate, reminder_days: u32) -> Self {
        let totals = Totals::compute(
            app.incomes.items().iter().map(|income| income.amount),
            app.expenses.items().iter().map(|expense| expense.amount),
            app.bills.items().iter().map(|bill| bill.amount),
        );
        let reminders = if app.preferences.bill_reminders {
            reminders(app.bills.items(), today, reminder_days)
        } else {
            Vec::new()
        };

        Self {
            totals,
            cards: app.cards.items().iter().map(CardSummary::from).collect(),
            reminders,
        }
    }
}

/// Unpaid bills due on or before `today + days`, earliest first.
pub fn reminders(bills: &[Bill], today: NaiveDate, days: u32) -> Vec<Reminder> {
    let horizon = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);

    let mut due: Vec<Reminder> = bills
        .iter()
        .filter(|bill| !bill.is_paid() && bill.due_date <= horizon)
        .map(|bill| Reminder {
            id: bill.id.clone(),
            name: bill.name.clone(),
            amount: bill.amount,
            due_date: bill.due_date,
            overdue: bill.is_overdue(today),
        })
        .collect();
    due.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.name.cmp(&b.name)));
    due
}
