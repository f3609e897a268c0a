//! The explicit application store: one [`ResourceStore`] per collection plus the preferences.
//!
//! Requests leave the store as [`Dispatch`] values, travel wherever the caller runs them and come
//! back as [`Settlement`]s; both are tagged with their collection so a single channel can carry
//! all of them.

use api_types::EntityId;
use engine::format;

use crate::{
    api::Transport,
    preferences::Preferences,
    resource::Resource,
    resources::{Bills, Cards, Expenses, Incomes, Installments},
    store::{Operation, Outcome, Pending, Request, ResourceStore, Settled, Ticket},
};

pub const UNKNOWN_CARD: &str = "Unknown Card";

#[derive(Debug, Default)]
pub struct AppStore {
    pub bills: ResourceStore<Bills>,
    pub expenses: ResourceStore<Expenses>,
    pub incomes: ResourceStore<Incomes>,
    pub cards: ResourceStore<Cards>,
    pub installments: ResourceStore<Installments>,
    pub preferences: Preferences,
}

/// A collection held by [`AppStore`].
pub trait Slot: Resource + Sized {
    fn store(app: &AppStore) -> &ResourceStore<Self>;
    fn store_mut(app: &mut AppStore) -> &mut ResourceStore<Self>;
    fn dispatch(pending: Pending<Self>) -> Dispatch;
}

/// What [`AppStore::apply`] did with a settlement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub resource: &'static str,
    pub ticket: Ticket,
    pub operation: Operation,
    pub outcome: Outcome,
}

macro_rules! slots {
    ($($variant:ident => $field:ident),+ $(,)?) => {
        /// A pending request of any collection.
        pub enum Dispatch {
            $($variant(Pending<$variant>),)+
        }

        /// A settled request of any collection.
        pub enum Settlement {
            $($variant(Settled<$variant>),)+
        }

        $(
            impl Slot for $variant {
                fn store(app: &AppStore) -> &ResourceStore<Self> {
                    &app.$field
                }

                fn store_mut(app: &mut AppStore) -> &mut ResourceStore<Self> {
                    &mut app.$field
                }

                fn dispatch(pending: Pending<Self>) -> Dispatch {
                    Dispatch::$variant(pending)
                }
            }
        )+

        impl Dispatch {
            pub async fn send<T: Transport>(self, api: &T) -> Settlement {
                match self {
                    $(Self::$variant(pending) => Settlement::$variant(pending.send(api).await),)+
                }
            }

            pub fn resource(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => <$variant as Resource>::PATH,)+
                }
            }

            pub fn operation(&self) -> Operation {
                match self {
                    $(Self::$variant(pending) => pending.operation(),)+
                }
            }

            pub fn ticket(&self) -> Ticket {
                match self {
                    $(Self::$variant(pending) => pending.ticket(),)+
                }
            }
        }

        impl AppStore {
            /// Applies a settlement to the store it belongs to.
            pub fn apply(&mut self, settlement: Settlement) -> Receipt {
                match settlement {
                    $(Settlement::$variant(settled) => Receipt {
                        resource: <$variant as Resource>::PATH,
                        ticket: settled.ticket(),
                        operation: settled.operation().clone(),
                        outcome: self.$field.settle(settled),
                    },)+
                }
            }

            /// `true` while any collection has a request in flight.
            pub fn is_loading(&self) -> bool {
                false $(|| self.$field.is_loading())+
            }

            /// Empties every collection; preferences are kept.
            pub fn clear(&mut self) {
                $(self.$field.clear();)+
            }
        }
    };
}

slots! {
    Bills => bills,
    Expenses => expenses,
    Incomes => incomes,
    Cards => cards,
    Installments => installments,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store<R: Slot>(&self) -> &ResourceStore<R> {
        R::store(self)
    }

    /// Registers a request with its collection.
    pub fn begin<R: Slot>(&mut self, request: Request<R>) -> Dispatch {
        R::dispatch(R::store_mut(self).begin(request))
    }

    /// Name and masked number of the card, or [`UNKNOWN_CARD`] when it is not loaded.
    pub fn card_label(&self, card_id: &EntityId) -> String {
        self.cards.get(card_id).map_or_else(
            || UNKNOWN_CARD.to_string(),
            |card| format::card_label(&card.name, &card.number),
        )
    }
}
