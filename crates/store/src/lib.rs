//! Client-side state for the finance API.
//!
//! [`ResourceStore`] mirrors one REST collection; [`AppStore`] groups the five collections of the
//! application. Network access goes through [`Transport`], implemented over HTTP by
//! [`ApiClient`].

pub use api::{ApiClient, ApiError, ClientBuildError, Transport};
pub use app_store::{AppStore, Dispatch, Receipt, Settlement, Slot, UNKNOWN_CARD};
pub use dashboard::{CardSummary, Dashboard, Reminder};
pub use preferences::{Preferences, Toggle};
pub use resource::{Entity, Resource, ViewKey};
pub use store::{Operation, Outcome, Pending, Request, ResourceStore, Response, Settled, Ticket};

pub mod api;
mod app_store;
pub mod dashboard;
mod preferences;
mod resource;
pub mod resources;
mod store;
