//! Domain arithmetic shared by the store and the terminal UI: money in integer cents, the
//! locale-fixed formatting rules and the derived values shown on the dashboard.

pub use currency::Currency;
pub use error::EngineError;
pub use installments::{Due, MAX_INSTALLMENTS, MIN_INSTALLMENTS};
pub use money::MoneyCents;
pub use stats::Totals;

mod currency;
mod error;
pub mod format;
pub mod installments;
mod money;
mod stats;

pub type ResultEngine<T> = Result<T, EngineError>;
