use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use engine::{EngineError, MoneyCents};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Server-assigned identifier.
///
/// Backends disagree on whether ids are numbers or strings; both decode into the same string
/// form and are always encoded back as strings.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = EntityId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer id")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                if value.is_empty() {
                    return Err(E::custom("empty id"));
                }
                Ok(EntityId::from(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(EntityId(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(EntityId(value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// A stored entity: the server id and timestamps around the entity's own fields.
///
/// `F` alone is the create/update payload; the server answers with the whole record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<F> {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: F,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl<F> Record<F> {
    pub fn new(id: impl Into<EntityId>, fields: F) -> Self {
        Self {
            id: id.into(),
            fields,
            created_at: None,
            updated_at: None,
        }
    }
}

impl<F> std::ops::Deref for Record<F> {
    type Target = F;

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

/// Client-side invariants checked before a payload is sent.
pub trait Validate {
    fn validate(&self) -> Result<(), EngineError>;
}

fn ensure_not_empty(field: &'static str, value: &str) -> Result<(), EngineError> {
    if value.trim().is_empty() {
        return Err(EngineError::field(field, "must not be empty"));
    }
    Ok(())
}

fn ensure_non_negative(field: &'static str, value: MoneyCents) -> Result<(), EngineError> {
    if value.is_negative() {
        return Err(EngineError::InvalidAmount(format!("{field} must be >= 0")));
    }
    Ok(())
}

/// Calendar dates on the wire.
///
/// Encoded as `YYYY-MM-DD`. Decoding also takes full timestamps and keeps the date written
/// before the `T`, the way the forms prefill their date inputs.
pub mod date {
    use super::*;

    pub fn parse(value: &str) -> Result<NaiveDate, EngineError> {
        let trimmed = value.trim();
        let day = trimmed.split_once('T').map_or(trimmed, |(day, _)| day);
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|err| EngineError::InvalidDate(format!("{value}: {err}")))
    }

    pub fn serialize<S: serde::Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }
}

pub mod bill {
    use super::*;

    pub const CATEGORIES: [&str; 5] = ["utilities", "rent", "insurance", "subscription", "other"];

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum BillStatus {
        #[default]
        Pending,
        Paid,
        Overdue,
    }

    impl BillStatus {
        pub const ALL: [BillStatus; 3] = [Self::Pending, Self::Paid, Self::Overdue];

        pub fn as_str(self) -> &'static str {
            match self {
                Self::Pending => "pending",
                Self::Paid => "paid",
                Self::Overdue => "overdue",
            }
        }
    }

    impl TryFrom<&str> for BillStatus {
        type Error = EngineError;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            Self::ALL
                .into_iter()
                .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
                .ok_or_else(|| EngineError::field("status", format!("unknown status '{value}'")))
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BillFields {
        pub name: String,
        pub amount: MoneyCents,
        #[serde(with = "date")]
        pub due_date: NaiveDate,
        pub category: String,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub status: BillStatus,
    }

    impl BillFields {
        pub fn is_paid(&self) -> bool {
            self.status == BillStatus::Paid
        }

        /// Marked overdue by the server, or still pending after its due date.
        pub fn is_overdue(&self, today: NaiveDate) -> bool {
            match self.status {
                BillStatus::Overdue => true,
                BillStatus::Pending => self.due_date < today,
                BillStatus::Paid => false,
            }
        }
    }

    impl Validate for BillFields {
        fn validate(&self) -> Result<(), EngineError> {
            ensure_not_empty("name", &self.name)?;
            ensure_non_negative("amount", self.amount)?;
            ensure_not_empty("category", &self.category)
        }
    }

    pub type Bill = Record<BillFields>;
}

pub mod expense {
    use super::*;

    pub const CATEGORIES: [&str; 7] = [
        "Food & Dining",
        "Transportation",
        "Shopping",
        "Entertainment",
        "Healthcare",
        "Utilities",
        "Other",
    ];

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseFields {
        #[serde(with = "date")]
        pub date: NaiveDate,
        pub category: String,
        pub amount: MoneyCents,
        #[serde(default)]
        pub description: String,
    }

    impl Validate for ExpenseFields {
        fn validate(&self) -> Result<(), EngineError> {
            ensure_not_empty("category", &self.category)?;
            ensure_non_negative("amount", self.amount)
        }
    }

    pub type Expense = Record<ExpenseFields>;
}

pub mod income {
    use super::*;

    pub const CATEGORIES: [&str; 5] = ["Salary", "Freelance", "Investment", "Rental", "Other"];

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum RecurringPeriod {
        Monthly,
        Quarterly,
        Yearly,
    }

    impl RecurringPeriod {
        pub const ALL: [RecurringPeriod; 3] = [Self::Monthly, Self::Quarterly, Self::Yearly];

        pub fn as_str(self) -> &'static str {
            match self {
                Self::Monthly => "Monthly",
                Self::Quarterly => "Quarterly",
                Self::Yearly => "Yearly",
            }
        }
    }

    impl TryFrom<&str> for RecurringPeriod {
        type Error = EngineError;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            Self::ALL
                .into_iter()
                .find(|period| period.as_str().eq_ignore_ascii_case(value.trim()))
                .ok_or_else(|| {
                    EngineError::field("recurringPeriod", format!("unknown period '{value}'"))
                })
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeFields {
        #[serde(with = "date")]
        pub date: NaiveDate,
        pub category: String,
        pub amount: MoneyCents,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub is_recurring: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub recurring_period: Option<RecurringPeriod>,
    }

    impl IncomeFields {
        /// Chip text on the incomes table.
        pub fn recurrence_label(&self) -> &'static str {
            match (self.is_recurring, self.recurring_period) {
                (true, Some(period)) => period.as_str(),
                (true, None) => "Recurring",
                (false, _) => "One-time",
            }
        }
    }

    impl Validate for IncomeFields {
        fn validate(&self) -> Result<(), EngineError> {
            ensure_not_empty("category", &self.category)?;
            ensure_non_negative("amount", self.amount)?;
            if self.is_recurring && self.recurring_period.is_none() {
                return Err(EngineError::field(
                    "recurringPeriod",
                    "required for recurring incomes",
                ));
            }
            Ok(())
        }
    }

    pub type Income = Record<IncomeFields>;
}

pub mod card {
    use super::*;

    pub const MAX_NUMBER_LEN: usize = 16;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum CardType {
        Credit,
        Debit,
        Prepaid,
    }

    impl CardType {
        pub const ALL: [CardType; 3] = [Self::Credit, Self::Debit, Self::Prepaid];

        pub fn as_str(self) -> &'static str {
            match self {
                Self::Credit => "Credit",
                Self::Debit => "Debit",
                Self::Prepaid => "Prepaid",
            }
        }
    }

    impl TryFrom<&str> for CardType {
        type Error = EngineError;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            Self::ALL
                .into_iter()
                .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
                .ok_or_else(|| EngineError::field("type", format!("unknown card type '{value}'")))
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CardFields {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: CardType,
        pub number: String,
        #[serde(with = "date")]
        pub expiry_date: NaiveDate,
        pub limit: MoneyCents,
        #[serde(default = "default_active")]
        pub is_active: bool,
        #[serde(default)]
        pub balance: MoneyCents,
    }

    fn default_active() -> bool {
        true
    }

    impl CardFields {
        /// Credit left on the card (`limit - balance`), clamped at the bounds of [`MoneyCents`].
        pub fn available(&self) -> MoneyCents {
            self.limit.saturating_sub(self.balance)
        }
    }

    impl Validate for CardFields {
        fn validate(&self) -> Result<(), EngineError> {
            ensure_not_empty("name", &self.name)?;
            ensure_not_empty("number", &self.number)?;
            if self.number.chars().count() > MAX_NUMBER_LEN {
                return Err(EngineError::field(
                    "number",
                    format!("at most {MAX_NUMBER_LEN} characters"),
                ));
            }
            ensure_non_negative("limit", self.limit)
        }
    }

    pub type Card = Record<CardFields>;
}

pub mod installment {
    use engine::{Due, installments};

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InstallmentFields {
        pub card_id: EntityId,
        pub description: String,
        pub total_amount: MoneyCents,
        pub number_of_installments: u8,
        #[serde(with = "date")]
        pub start_date: NaiveDate,
        #[serde(default)]
        pub is_paid: bool,
    }

    impl InstallmentFields {
        pub fn monthly_payment(&self) -> Result<MoneyCents, EngineError> {
            installments::monthly_payment(self.total_amount, self.number_of_installments)
        }

        pub fn schedule(&self) -> Result<Vec<Due>, EngineError> {
            installments::schedule(
                self.total_amount,
                self.number_of_installments,
                self.start_date,
            )
        }

        pub fn status_label(&self) -> &'static str {
            if self.is_paid { "Paid" } else { "Active" }
        }
    }

    impl Validate for InstallmentFields {
        fn validate(&self) -> Result<(), EngineError> {
            ensure_not_empty("cardId", self.card_id.as_str())?;
            ensure_not_empty("description", &self.description)?;
            ensure_non_negative("totalAmount", self.total_amount)?;
            installments::ensure_count(self.number_of_installments)
        }
    }

    pub type Installment = Record<InstallmentFields>;
}
