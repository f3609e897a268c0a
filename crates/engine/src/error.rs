//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] returned when a money value cannot be parsed or breaks an invariant.
//! - [`InvalidInstallments`] returned when an installment count is out of range.
//! - [`InvalidDate`] returned when a date cannot be parsed or computed.
//! - [`InvalidField`] returned when a record field is empty or malformed.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidInstallments`]: EngineError::InvalidInstallments
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`InvalidField`]: EngineError::InvalidField
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid installments: {0}")]
    InvalidInstallments(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl EngineError {
    /// Shorthand for a field-level validation failure.
    pub fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
