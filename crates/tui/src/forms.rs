//! Add/edit forms for the five collections.
//!
//! A form is a list of labelled inputs. Submitting parses every input into the entity's wire
//! fields and runs the client-side validation; nothing is sent while either step fails.

use api_types::{
    EntityId, Validate,
    bill::{self, Bill, BillFields, BillStatus},
    card::{Card, CardFields, CardType},
    expense::{self, Expense, ExpenseFields},
    income::{self, Income, IncomeFields, RecurringPeriod},
    installment::{Installment, InstallmentFields},
};
use chrono::{Months, NaiveDate};
use engine::{MoneyCents, format};
use store::{Ticket, UNKNOWN_CARD};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    /// `(value, label)` pairs.
    Choice {
        options: Vec<(String, String)>,
        selected: usize,
    },
    Toggle(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub input: Input,
}

impl Field {
    fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            input: Input::Text(value.into()),
        }
    }

    fn choice(label: &'static str, options: Vec<(String, String)>, current: &str) -> Self {
        let mut options = options;
        let selected = match options.iter().position(|(value, _)| value == current) {
            Some(index) => index,
            None if current.is_empty() => 0,
            None => {
                options.push((current.to_string(), current.to_string()));
                options.len() - 1
            }
        };
        Self {
            label,
            input: Input::Choice { options, selected },
        }
    }

    fn toggle(label: &'static str, value: bool) -> Self {
        Self {
            label,
            input: Input::Toggle(value),
        }
    }

    /// Text shown next to the label.
    pub fn display(&self) -> String {
        match &self.input {
            Input::Text(value) => value.clone(),
            Input::Choice { options, selected } => options
                .get(*selected)
                .map(|(_, label)| format!("‹ {label} ›"))
                .unwrap_or_default(),
            Input::Toggle(true) => "[x]".to_string(),
            Input::Toggle(false) => "[ ]".to_string(),
        }
    }
}

fn labelled(values: &[&str]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|value| (value.to_string(), value.to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Bill,
    Expense,
    Income,
    Card,
    Installment,
}

impl FormKind {
    fn noun(self) -> &'static str {
        match self {
            Self::Bill => "Bill",
            Self::Expense => "Expense",
            Self::Income => "Income",
            Self::Card => "Card",
            Self::Installment => "Installment",
        }
    }
}

/// Parsed form content, ready to become a create (`None` target) or update request.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Bill(Option<EntityId>, BillFields),
    Expense(Option<EntityId>, ExpenseFields),
    Income(Option<EntityId>, IncomeFields),
    Card(Option<EntityId>, CardFields),
    Installment(Option<EntityId>, InstallmentFields),
}

#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    /// Record being edited; `None` when adding.
    pub target: Option<EntityId>,
    pub fields: Vec<Field>,
    pub focus: usize,
    pub error: Option<String>,
    /// Request sent for this form, until it settles.
    pub awaiting: Option<Ticket>,
}

impl Form {
    fn new(kind: FormKind, target: Option<EntityId>, fields: Vec<Field>) -> Self {
        Self {
            kind,
            target,
            fields,
            focus: 0,
            error: None,
            awaiting: None,
        }
    }

    pub fn title(&self) -> String {
        let verb = if self.target.is_some() { "Edit" } else { "Add" };
        format!("{verb} {}", self.kind.noun())
    }

    pub fn bill(existing: Option<&Bill>, today: NaiveDate) -> Self {
        let statuses: Vec<(String, String)> = BillStatus::ALL
            .iter()
            .map(|status| (status.as_str().to_string(), status.as_str().to_string()))
            .collect();
        let fields = match existing {
            Some(bill) => vec![
                Field::text("Name", bill.name.clone()),
                Field::text("Amount", format::amount_input(bill.amount)),
                Field::text("Due date", format::date(bill.due_date)),
                Field::choice("Category", labelled(&bill::CATEGORIES), &bill.category),
                Field::text("Description", bill.description.clone()),
                Field::choice("Status", statuses, bill.status.as_str()),
            ],
            None => vec![
                Field::text("Name", ""),
                Field::text("Amount", ""),
                Field::text("Due date", format::date(today)),
                Field::choice("Category", labelled(&bill::CATEGORIES), ""),
                Field::text("Description", ""),
                Field::choice("Status", statuses, BillStatus::Pending.as_str()),
            ],
        };
        Self::new(FormKind::Bill, existing.map(|bill| bill.id.clone()), fields)
    }

    pub fn expense(existing: Option<&Expense>, today: NaiveDate) -> Self {
        let categories = labelled(&expense::CATEGORIES);
        let fields = match existing {
            Some(expense) => vec![
                Field::text("Date", format::date(expense.date)),
                Field::choice("Category", categories, &expense.category),
                Field::text("Amount", format::amount_input(expense.amount)),
                Field::text("Description", expense.description.clone()),
            ],
            None => vec![
                Field::text("Date", format::date(today)),
                Field::choice("Category", categories, ""),
                Field::text("Amount", ""),
                Field::text("Description", ""),
            ],
        };
        Self::new(FormKind::Expense, existing.map(|e| e.id.clone()), fields)
    }

    pub fn income(existing: Option<&Income>, today: NaiveDate) -> Self {
        let categories = labelled(&income::CATEGORIES);
        let periods: Vec<(String, String)> = RecurringPeriod::ALL
            .iter()
            .map(|period| (period.as_str().to_string(), period.as_str().to_string()))
            .collect();
        let fields = match existing {
            Some(income) => vec![
                Field::text("Date", format::date(income.date)),
                Field::choice("Category", categories, &income.category),
                Field::text("Amount", format::amount_input(income.amount)),
                Field::text("Description", income.description.clone()),
                Field::toggle("Recurring", income.is_recurring),
                Field::choice(
                    "Period",
                    periods,
                    income.recurring_period.map_or("", RecurringPeriod::as_str),
                ),
            ],
            None => vec![
                Field::text("Date", format::date(today)),
                Field::choice("Category", categories, ""),
                Field::text("Amount", ""),
                Field::text("Description", ""),
                Field::toggle("Recurring", false),
                Field::choice("Period", periods, RecurringPeriod::Monthly.as_str()),
            ],
        };
        Self::new(FormKind::Income, existing.map(|i| i.id.clone()), fields)
    }

    pub fn card(existing: Option<&Card>, today: NaiveDate) -> Self {
        let kinds: Vec<(String, String)> = CardType::ALL
            .iter()
            .map(|kind| (kind.as_str().to_string(), kind.as_str().to_string()))
            .collect();
        let fields = match existing {
            Some(card) => vec![
                Field::text("Name", card.name.clone()),
                Field::choice("Type", kinds, card.kind.as_str()),
                Field::text("Number", card.number.clone()),
                Field::text("Expiry date", format::date(card.expiry_date)),
                Field::text("Limit", format::amount_input(card.limit)),
                Field::text("Balance", format::amount_input(card.balance)),
                Field::toggle("Active", card.is_active),
            ],
            None => vec![
                Field::text("Name", ""),
                Field::choice("Type", kinds, CardType::Credit.as_str()),
                Field::text("Number", ""),
                Field::text(
                    "Expiry date",
                    format::date(today.checked_add_months(Months::new(36)).unwrap_or(today)),
                ),
                Field::text("Limit", ""),
                Field::text("Balance", "0"),
                Field::toggle("Active", true),
            ],
        };
        Self::new(FormKind::Card, existing.map(|c| c.id.clone()), fields)
    }

    /// `cards` feeds the card picker; a referenced card that is not loaded shows as unknown.
    pub fn installment(existing: Option<&Installment>, cards: &[Card], today: NaiveDate) -> Self {
        let mut options: Vec<(String, String)> = cards
            .iter()
            .map(|card| {
                (
                    card.id.to_string(),
                    format::card_label(&card.name, &card.number),
                )
            })
            .collect();
        let fields = match existing {
            Some(installment) => {
                let card_id = installment.card_id.to_string();
                if !options.iter().any(|(value, _)| *value == card_id) {
                    options.push((card_id.clone(), UNKNOWN_CARD.to_string()));
                }
                vec![
                    Field::choice("Card", options, &card_id),
                    Field::text("Description", installment.description.clone()),
                    Field::text("Total amount", format::amount_input(installment.total_amount)),
                    Field::text(
                        "Installments",
                        installment.number_of_installments.to_string(),
                    ),
                    Field::text("Start date", format::date(installment.start_date)),
                    Field::toggle("Paid", installment.is_paid),
                ]
            }
            None => vec![
                Field::choice("Card", options, ""),
                Field::text("Description", ""),
                Field::text("Total amount", ""),
                Field::text("Installments", "1"),
                Field::text("Start date", format::date(today)),
                Field::toggle("Paid", false),
            ],
        };
        Self::new(FormKind::Installment, existing.map(|i| i.id.clone()), fields)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Typed character: appended to text, space flips toggles and advances choices.
    pub fn input(&mut self, ch: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        if let Input::Text(value) = &mut field.input {
            value.push(ch);
        } else if ch == ' ' {
            self.cycle(1);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(Field {
            input: Input::Text(value),
            ..
        }) = self.fields.get_mut(self.focus)
        {
            value.pop();
        }
    }

    /// Left/right on a choice or toggle.
    pub fn cycle(&mut self, step: isize) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        match &mut field.input {
            Input::Choice { options, selected } if !options.is_empty() => {
                let len = options.len() as isize;
                *selected = (*selected as isize + step).rem_euclid(len) as usize;
            }
            Input::Toggle(value) => *value = !*value,
            _ => {}
        }
    }

    fn field(&self, label: &str) -> Result<&Input, String> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| &field.input)
            .ok_or_else(|| format!("{label}: missing field"))
    }

    fn text(&self, label: &str) -> Result<String, String> {
        match self.field(label)? {
            Input::Text(value) => Ok(value.trim().to_string()),
            _ => Err(format!("{label}: not a text field")),
        }
    }

    fn choice(&self, label: &str) -> Result<String, String> {
        match self.field(label)? {
            Input::Choice { options, selected } => options
                .get(*selected)
                .map(|(value, _)| value.clone())
                .ok_or_else(|| format!("{label}: nothing to choose")),
            _ => Err(format!("{label}: not a choice")),
        }
    }

    fn toggle(&self, label: &str) -> Result<bool, String> {
        match self.field(label)? {
            Input::Toggle(value) => Ok(*value),
            _ => Err(format!("{label}: not a toggle")),
        }
    }

    fn amount(&self, label: &str) -> Result<MoneyCents, String> {
        self.text(label)?
            .parse::<MoneyCents>()
            .map_err(|err| format!("{label}: {err}"))
    }

    fn date(&self, label: &str) -> Result<NaiveDate, String> {
        format::parse_date(&self.text(label)?).map_err(|err| format!("{label}: {err}"))
    }

    /// Parses and validates the inputs.
    pub fn submission(&self) -> Result<Submission, String> {
        let target = self.target.clone();
        let submission = match self.kind {
            FormKind::Bill => {
                let status = BillStatus::try_from(self.choice("Status")?.as_str())
                    .map_err(|err| err.to_string())?;
                let fields = BillFields {
                    name: self.text("Name")?,
                    amount: self.amount("Amount")?,
                    due_date: self.date("Due date")?,
                    category: self.choice("Category")?,
                    description: self.text("Description")?,
                    status,
                };
                checked(&fields)?;
                Submission::Bill(target, fields)
            }
            FormKind::Expense => {
                let fields = ExpenseFields {
                    date: self.date("Date")?,
                    category: self.choice("Category")?,
                    amount: self.amount("Amount")?,
                    description: self.text("Description")?,
                };
                checked(&fields)?;
                Submission::Expense(target, fields)
            }
            FormKind::Income => {
                let is_recurring = self.toggle("Recurring")?;
                let recurring_period = if is_recurring {
                    let period = RecurringPeriod::try_from(self.choice("Period")?.as_str())
                        .map_err(|err| err.to_string())?;
                    Some(period)
                } else {
                    None
                };
                let fields = IncomeFields {
                    date: self.date("Date")?,
                    category: self.choice("Category")?,
                    amount: self.amount("Amount")?,
                    description: self.text("Description")?,
                    is_recurring,
                    recurring_period,
                };
                checked(&fields)?;
                Submission::Income(target, fields)
            }
            FormKind::Card => {
                let kind = CardType::try_from(self.choice("Type")?.as_str())
                    .map_err(|err| err.to_string())?;
                let fields = CardFields {
                    name: self.text("Name")?,
                    kind,
                    number: self.text("Number")?,
                    expiry_date: self.date("Expiry date")?,
                    limit: self.amount("Limit")?,
                    is_active: self.toggle("Active")?,
                    balance: self.amount("Balance")?,
                };
                checked(&fields)?;
                Submission::Card(target, fields)
            }
            FormKind::Installment => {
                let card_id = self
                    .choice("Card")
                    .map_err(|_| "Card: add a card first".to_string())?;
                let number_of_installments = self
                    .text("Installments")?
                    .parse::<u8>()
                    .map_err(|_| "Installments: not a number between 1 and 48".to_string())?;
                let fields = InstallmentFields {
                    card_id: EntityId::from(card_id),
                    description: self.text("Description")?,
                    total_amount: self.amount("Total amount")?,
                    number_of_installments,
                    start_date: self.date("Start date")?,
                    is_paid: self.toggle("Paid")?,
                };
                checked(&fields)?;
                Submission::Installment(target, fields)
            }
        };
        Ok(submission)
    }
}

fn checked<V: Validate>(fields: &V) -> Result<(), String> {
    fields.validate().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use api_types::Record;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn type_into(form: &mut Form, label: &str, text: &str) {
        form.focus = form
            .fields
            .iter()
            .position(|field| field.label == label)
            .unwrap();
        for ch in text.chars() {
            form.input(ch);
        }
    }

    fn card(id: &str, name: &str) -> Card {
        Record::new(
            id,
            CardFields {
                name: name.to_string(),
                kind: CardType::Debit,
                number: "4111111111111111".to_string(),
                expiry_date: NaiveDate::from_ymd_opt(2028, 1, 1).unwrap(),
                limit: MoneyCents::from_major(5000),
                is_active: true,
                balance: MoneyCents::ZERO,
            },
        )
    }

    #[test]
    fn new_bill_parses_typed_values() {
        let mut form = Form::bill(None, today());
        assert_eq!(form.title(), "Add Bill");
        type_into(&mut form, "Name", "Electricity");
        type_into(&mut form, "Amount", "1.23,5");
        assert_eq!(
            form.submission(),
            Err("Amount: Invalid amount: invalid amount".to_string())
        );

        form.fields[1].input = Input::Text("1.234,5".to_string());
        let Ok(Submission::Bill(None, fields)) = form.submission() else {
            panic!("expected a bill");
        };
        assert_eq!(fields.name, "Electricity");
        assert_eq!(fields.amount, MoneyCents::new(123_450));
        assert_eq!(fields.due_date, today());
        assert_eq!(fields.category, "utilities");
        assert_eq!(fields.status, BillStatus::Pending);
    }

    #[test]
    fn validation_blocks_submission() {
        let mut form = Form::bill(None, today());
        type_into(&mut form, "Amount", "10");
        let err = form.submission().unwrap_err();
        assert!(err.contains("name"), "{err}");

        let mut form = Form::expense(None, today());
        type_into(&mut form, "Amount", "-5");
        assert!(form.submission().is_err());
    }

    #[test]
    fn edit_prefills_and_round_trips() {
        let income = Record::new(
            "i1",
            IncomeFields {
                date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                category: "Bonus".to_string(),
                amount: MoneyCents::new(4_500_050),
                description: "Q4".to_string(),
                is_recurring: true,
                recurring_period: Some(RecurringPeriod::Quarterly),
            },
        );
        let form = Form::income(Some(&income), today());
        assert_eq!(form.title(), "Edit Income");
        assert_eq!(form.fields[0].display(), "31.01.2024");
        assert_eq!(form.fields[1].display(), "‹ Bonus ›");

        let Ok(Submission::Income(Some(id), fields)) = form.submission() else {
            panic!("expected an income update");
        };
        assert_eq!(id, EntityId::from("i1"));
        assert_eq!(fields, income.fields);
    }

    #[test]
    fn non_recurring_income_drops_period() {
        let mut form = Form::income(None, today());
        type_into(&mut form, "Amount", "100");
        let Ok(Submission::Income(_, fields)) = form.submission() else {
            panic!("expected an income");
        };
        assert!(!fields.is_recurring);
        assert_eq!(fields.recurring_period, None);

        form.focus = 4;
        form.input(' ');
        form.focus = 5;
        form.cycle(-1);
        let Ok(Submission::Income(_, fields)) = form.submission() else {
            panic!("expected an income");
        };
        assert_eq!(fields.recurring_period, Some(RecurringPeriod::Yearly));
    }

    #[test]
    fn installment_needs_a_card() {
        let mut form = Form::installment(None, &[], today());
        type_into(&mut form, "Description", "Laptop");
        type_into(&mut form, "Total amount", "100");
        assert_eq!(form.submission(), Err("Card: add a card first".to_string()));

        let cards = [card("c1", "Bonus"), card("c2", "Maximum")];
        let mut form = Form::installment(None, &cards, today());
        type_into(&mut form, "Description", "Laptop");
        type_into(&mut form, "Total amount", "100");
        form.focus = 0;
        form.cycle(1);
        let Ok(Submission::Installment(None, fields)) = form.submission() else {
            panic!("expected an installment");
        };
        assert_eq!(fields.card_id, EntityId::from("c2"));
        assert_eq!(fields.monthly_payment().unwrap(), MoneyCents::from_major(100));
    }

    #[test]
    fn installment_count_is_bounded() {
        let cards = [card("c1", "Bonus")];
        let mut form = Form::installment(None, &cards, today());
        type_into(&mut form, "Description", "TV");
        type_into(&mut form, "Total amount", "4800");
        form.fields[3].input = Input::Text("49".to_string());
        assert!(form.submission().is_err());
        form.fields[3].input = Input::Text("48".to_string());
        assert!(form.submission().is_ok());
    }

    #[test]
    fn unloaded_card_shows_as_unknown() {
        let installment = Record::new(
            "p1",
            InstallmentFields {
                card_id: EntityId::from("gone"),
                description: "Phone".to_string(),
                total_amount: MoneyCents::from_major(1200),
                number_of_installments: 12,
                start_date: today(),
                is_paid: false,
            },
        );
        let form = Form::installment(Some(&installment), &[card("c1", "Bonus")], today());
        assert_eq!(form.fields[0].display(), format!("‹ {UNKNOWN_CARD} ›"));
        let Ok(Submission::Installment(_, fields)) = form.submission() else {
            panic!("expected an installment");
        };
        assert_eq!(fields.card_id, EntityId::from("gone"));
    }

    #[test]
    fn focus_wraps_and_backspace_edits_text() {
        let mut form = Form::card(None, today());
        form.prev_field();
        assert_eq!(form.focus, form.fields.len() - 1);
        form.next_field();
        assert_eq!(form.focus, 0);

        form.input('A');
        form.input('b');
        form.backspace();
        assert_eq!(form.fields[0].display(), "A");

        form.focus = 6;
        form.input('x');
        assert_eq!(form.fields[6].display(), "[x]");
        form.input(' ');
        assert_eq!(form.fields[6].display(), "[ ]");
    }
}
