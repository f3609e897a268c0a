//! The generic resource store.
//!
//! A [`ResourceStore`] owns one collection, its secondary views and the status of the requests
//! issued for it. Each operation goes through three steps so callers can run the network part
//! wherever they like:
//!
//! 1. [`ResourceStore::begin`] marks the store as loading and hands out a [`Pending`] request;
//! 2. [`Pending::send`] performs exactly one HTTP call and yields a [`Settled`] result;
//! 3. [`ResourceStore::settle`] applies the result.
//!
//! Every `begin` draws a new [`Ticket`]. A list, view or update result is dropped when a newer
//! request for the same target has already been applied, so a slow response never overwrites a
//! fresher one, while a newer request that fails leaves room for the older answer. Creates and
//! deletes always apply.

use std::{collections::HashMap, fmt};

use api_types::EntityId;

use crate::{
    api::{ApiError, Transport},
    resource::{Entity, Resource, ViewKey, item_path, view_path},
};

/// Sequence number of a request, unique per store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// What a request does, without its payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    View(ViewKey),
    Create,
    Update(EntityId),
    Delete(EntityId),
}

impl Operation {
    fn is_sequenced(&self) -> bool {
        matches!(self, Self::List | Self::View(_) | Self::Update(_))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::View(key) => write!(f, "view {key}"),
            Self::Create => f.write_str("create"),
            Self::Update(id) => write!(f, "update {id}"),
            Self::Delete(id) => write!(f, "delete {id}"),
        }
    }
}

pub enum Request<R: Resource> {
    List,
    View(ViewKey),
    Create(R::Fields),
    Update(EntityId, R::Fields),
    Delete(EntityId),
}

impl<R: Resource> Request<R> {
    pub fn operation(&self) -> Operation {
        match self {
            Self::List => Operation::List,
            Self::View(key) => Operation::View(key.clone()),
            Self::Create(_) => Operation::Create,
            Self::Update(id, _) => Operation::Update(id.clone()),
            Self::Delete(id) => Operation::Delete(id.clone()),
        }
    }
}

/// Successful server answer.
pub enum Response<R: Resource> {
    Items(Vec<Entity<R>>),
    Item(Entity<R>),
    Removed,
}

/// A request that has been registered with its store but not sent yet.
pub struct Pending<R: Resource> {
    ticket: Ticket,
    request: Request<R>,
}

impl<R: Resource> Pending<R> {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn operation(&self) -> Operation {
        self.request.operation()
    }

    /// Issues the HTTP call for this request.
    pub async fn send<T: Transport>(self, api: &T) -> Settled<R> {
        let operation = self.request.operation();
        let result = match self.request {
            Request::List => api.get(R::PATH).await.map(Response::Items),
            Request::View(key) => api.get(&view_path::<R>(&key)).await.map(Response::Items),
            Request::Create(fields) => api.post(R::PATH, &fields).await.map(Response::Item),
            Request::Update(id, fields) => api
                .put(&item_path::<R>(&id), &fields)
                .await
                .map(Response::Item),
            Request::Delete(id) => api
                .delete(&item_path::<R>(&id))
                .await
                .map(|()| Response::Removed),
        };

        Settled {
            ticket: self.ticket,
            operation,
            result,
        }
    }

    /// Completes the request with an already known result.
    pub fn resolve(self, result: Result<Response<R>, ApiError>) -> Settled<R> {
        Settled {
            operation: self.request.operation(),
            ticket: self.ticket,
            result,
        }
    }
}

/// A finished request waiting to be applied to its store.
pub struct Settled<R: Resource> {
    ticket: Ticket,
    operation: Operation,
    result: Result<Response<R>, ApiError>,
}

impl<R: Resource> Settled<R> {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }
}

/// What [`ResourceStore::settle`] did with a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A newer request for the same target was already applied; the result was dropped.
    Stale,
    Failed(ApiError),
}

impl Outcome {
    /// `true` unless the request failed.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

pub struct ResourceStore<R: Resource> {
    items: Vec<Entity<R>>,
    views: HashMap<ViewKey, Vec<Entity<R>>>,
    error: Option<ApiError>,
    in_flight: usize,
    next_ticket: u64,
    /// Newest applied ticket per sequenced operation; emptied whenever nothing is in flight.
    applied: HashMap<Operation, Ticket>,
}

impl<R: Resource> Default for ResourceStore<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            views: HashMap::new(),
            error: None,
            in_flight: 0,
            next_ticket: 0,
            applied: HashMap::new(),
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceStore")
            .field("path", &R::PATH)
            .field("items", &self.items.len())
            .field("views", &self.views.len())
            .field("error", &self.error)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The primary collection, in server order.
    pub fn items(&self) -> &[Entity<R>] {
        &self.items
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity<R>> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// A secondary view, if it has been fetched.
    pub fn view(&self, key: &ViewKey) -> Option<&[Entity<R>]> {
        self.views.get(key).map(Vec::as_slice)
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// `true` while at least one request of this store is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Drops the collection, every view and the error.
    pub fn clear(&mut self) {
        self.items.clear();
        self.views.clear();
        self.error = None;
        self.applied.clear();
    }

    pub fn begin(&mut self, request: Request<R>) -> Pending<R> {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        let operation = request.operation();
        self.in_flight += 1;
        self.error = None;
        tracing::debug!(resource = R::PATH, ticket = ticket.0, %operation, "request pending");

        Pending { ticket, request }
    }

    pub fn settle(&mut self, settled: Settled<R>) -> Outcome {
        let Settled {
            ticket,
            operation,
            result,
        } = settled;
        self.in_flight = self.in_flight.saturating_sub(1);
        let outcome = self.resolve(ticket, &operation, result);
        if self.in_flight == 0 {
            self.applied.clear();
        }
        outcome
    }

    fn resolve(
        &mut self,
        ticket: Ticket,
        operation: &Operation,
        result: Result<Response<R>, ApiError>,
    ) -> Outcome {
        let superseded = self
            .applied
            .get(operation)
            .is_some_and(|applied| *applied > ticket);
        if superseded {
            tracing::debug!(resource = R::PATH, ticket = ticket.0, %operation, "stale result dropped");
            return Outcome::Stale;
        }

        let applied = result.and_then(|response| self.apply(operation, response));
        match applied {
            Ok(()) => {
                tracing::debug!(resource = R::PATH, ticket = ticket.0, %operation, "request fulfilled");
                if operation.is_sequenced() {
                    self.applied.insert(operation.clone(), ticket);
                }
                self.error = None;
                Outcome::Applied
            }
            Err(err) => {
                tracing::warn!(resource = R::PATH, ticket = ticket.0, %operation, "request rejected: {err}");
                self.error = Some(err.clone());
                Outcome::Failed(err)
            }
        }
    }

    fn apply(&mut self, operation: &Operation, response: Response<R>) -> Result<(), ApiError> {
        match (operation, response) {
            (Operation::List, Response::Items(items)) => self.items = items,
            (Operation::View(key), Response::Items(items)) => {
                self.views.insert(key.clone(), items);
            }
            (Operation::Create, Response::Item(item)) => self.items.push(item),
            (Operation::Update(_), Response::Item(item)) => self.replace(item),
            (Operation::Delete(id), Response::Removed) => self.remove(id),
            (operation, _) => {
                return Err(ApiError::Decode(format!(
                    "unexpected response for {operation}"
                )));
            }
        }
        Ok(())
    }

    fn replace(&mut self, item: Entity<R>) {
        match self.items.iter_mut().find(|current| current.id == item.id) {
            Some(current) => *current = item,
            None => {
                tracing::debug!(resource = R::PATH, id = %item.id, "updated record not loaded, appending");
                self.items.push(item);
            }
        }
    }

    fn remove(&mut self, id: &EntityId) {
        self.items.retain(|item| &item.id != id);
        for items in self.views.values_mut() {
            items.retain(|item| &item.id != id);
        }
    }

    pub async fn list<T: Transport>(&mut self, api: &T) -> Outcome {
        let settled = self.begin(Request::List).send(api).await;
        self.settle(settled)
    }

    pub async fn fetch_view<T: Transport>(&mut self, api: &T, key: ViewKey) -> Outcome {
        let settled = self.begin(Request::View(key)).send(api).await;
        self.settle(settled)
    }

    pub async fn create<T: Transport>(&mut self, api: &T, fields: R::Fields) -> Outcome {
        let settled = self.begin(Request::Create(fields)).send(api).await;
        self.settle(settled)
    }

    pub async fn update<T: Transport>(
        &mut self,
        api: &T,
        id: EntityId,
        fields: R::Fields,
    ) -> Outcome {
        let settled = self.begin(Request::Update(id, fields)).send(api).await;
        self.settle(settled)
    }

    pub async fn delete<T: Transport>(&mut self, api: &T, id: EntityId) -> Outcome {
        let settled = self.begin(Request::Delete(id)).send(api).await;
        self.settle(settled)
    }
}

#[cfg(test)]
mod tests {
    use api_types::Record;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    struct Notes;

    impl Resource for Notes {
        type Fields = Note;
        const PATH: &'static str = "notes";
    }

    fn note(id: &str, text: &str) -> Entity<Notes> {
        Record::new(
            id,
            Note {
                text: text.to_string(),
            },
        )
    }

    fn ids(items: &[Entity<Notes>]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    fn rejected() -> ApiError {
        ApiError::Rejected {
            status: 422,
            message: "text is required".to_string(),
        }
    }

    fn loaded(items: Vec<Entity<Notes>>) -> ResourceStore<Notes> {
        let mut store = ResourceStore::new();
        let pending = store.begin(Request::List);
        assert_eq!(store.settle(pending.resolve(Ok(Response::Items(items)))), Outcome::Applied);
        store
    }

    #[test]
    fn begin_sets_loading_and_clears_error() {
        let mut store = ResourceStore::<Notes>::new();
        let pending = store.begin(Request::Create(Note {
            text: String::new(),
        }));
        store.settle(pending.resolve(Err(rejected())));
        assert_eq!(store.error(), Some(&rejected()));
        assert!(!store.is_loading());

        let pending = store.begin(Request::List);
        assert!(store.is_loading());
        assert!(store.error().is_none());
        store.settle(pending.resolve(Ok(Response::Items(vec![]))));
        assert!(!store.is_loading());
    }

    #[test]
    fn list_replaces_collection() {
        let mut store = loaded(vec![note("1", "a"), note("2", "b")]);
        let pending = store.begin(Request::List);
        store.settle(pending.resolve(Ok(Response::Items(vec![note("3", "c")]))));
        assert_eq!(ids(store.items()), vec!["3"]);
    }

    #[test]
    fn create_appends_server_record() {
        let mut store = loaded(vec![note("1", "a")]);
        let pending = store.begin(Request::Create(Note {
            text: "b".to_string(),
        }));
        let outcome = store.settle(pending.resolve(Ok(Response::Item(note("srv-9", "b")))));
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(ids(store.items()), vec!["1", "srv-9"]);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = loaded(vec![note("1", "a"), note("2", "b"), note("3", "c")]);
        let pending = store.begin(Request::Update(
            EntityId::from("2"),
            Note {
                text: "B".to_string(),
            },
        ));
        store.settle(pending.resolve(Ok(Response::Item(note("2", "B")))));
        assert_eq!(ids(store.items()), vec!["1", "2", "3"]);
        assert_eq!(store.get(&EntityId::from("2")).unwrap().text, "B");
    }

    #[test]
    fn update_of_unloaded_record_appends_it() {
        let mut store = loaded(vec![note("1", "a")]);
        let pending = store.begin(Request::Update(
            EntityId::from("5"),
            Note {
                text: "e".to_string(),
            },
        ));
        let outcome = store.settle(pending.resolve(Ok(Response::Item(note("5", "e")))));
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(ids(store.items()), vec!["1", "5"]);
    }

    #[test]
    fn delete_removes_from_collection_and_views() {
        let mut store = loaded(vec![note("1", "a"), note("2", "b")]);
        let key = ViewKey::new("pinned");
        let pending = store.begin(Request::View(key.clone()));
        store.settle(pending.resolve(Ok(Response::Items(vec![note("2", "b")]))));

        let pending = store.begin(Request::Delete(EntityId::from("2")));
        store.settle(pending.resolve(Ok(Response::Removed)));
        assert_eq!(ids(store.items()), vec!["1"]);
        assert!(store.view(&key).unwrap().is_empty());
    }

    #[test]
    fn views_never_touch_primary_collection() {
        let mut store = loaded(vec![note("1", "a"), note("2", "b")]);
        let first = ViewKey::new("card/1");
        let second = ViewKey::new("card/2");

        let pending = store.begin(Request::View(first.clone()));
        store.settle(pending.resolve(Ok(Response::Items(vec![note("1", "a")]))));
        let pending = store.begin(Request::View(second.clone()));
        store.settle(pending.resolve(Ok(Response::Items(vec![]))));

        assert_eq!(ids(store.items()), vec!["1", "2"]);
        assert_eq!(ids(store.view(&first).unwrap()), vec!["1"]);
        assert!(store.view(&second).unwrap().is_empty());
        assert!(store.view(&ViewKey::new("card/3")).is_none());
    }

    #[test]
    fn failure_leaves_collection_untouched() {
        let mut store = loaded(vec![note("1", "a")]);
        let pending = store.begin(Request::Create(Note {
            text: String::new(),
        }));
        let outcome = store.settle(pending.resolve(Err(rejected())));
        assert_eq!(outcome, Outcome::Failed(rejected()));
        assert!(!outcome.is_success());
        assert_eq!(ids(store.items()), vec!["1"]);
        assert!(store.error().is_some());

        let pending = store.begin(Request::List);
        store.settle(pending.resolve(Ok(Response::Items(vec![note("1", "a")]))));
        assert!(store.error().is_none());
    }

    #[test]
    fn older_list_result_is_dropped() {
        let mut store = ResourceStore::<Notes>::new();
        let first = store.begin(Request::List);
        let second = store.begin(Request::List);

        let newer = store.settle(second.resolve(Ok(Response::Items(vec![note("new", "n")]))));
        assert_eq!(newer, Outcome::Applied);
        assert!(store.is_loading());

        let older = store.settle(first.resolve(Ok(Response::Items(vec![note("old", "o")]))));
        assert_eq!(older, Outcome::Stale);
        assert!(older.is_success());
        assert_eq!(ids(store.items()), vec!["new"]);
        assert!(!store.is_loading());
    }

    #[test]
    fn older_update_of_same_record_is_dropped() {
        let mut store = loaded(vec![note("1", "a")]);
        let id = EntityId::from("1");
        let first = store.begin(Request::Update(id.clone(), Note { text: "x".into() }));
        let second = store.begin(Request::Update(id.clone(), Note { text: "y".into() }));

        store.settle(second.resolve(Ok(Response::Item(note("1", "y")))));
        let outcome = store.settle(first.resolve(Ok(Response::Item(note("1", "x")))));
        assert_eq!(outcome, Outcome::Stale);
        assert_eq!(store.get(&id).unwrap().text, "y");
    }

    #[test]
    fn older_list_applies_when_newer_one_fails() {
        let mut store = ResourceStore::<Notes>::new();
        let first = store.begin(Request::List);
        let second = store.begin(Request::List);

        let newer = store.settle(second.resolve(Err(ApiError::Transport("reset".to_string()))));
        assert!(matches!(newer, Outcome::Failed(ApiError::Transport(_))));

        let older = store.settle(first.resolve(Ok(Response::Items(vec![note("1", "a")]))));
        assert_eq!(older, Outcome::Applied);
        assert_eq!(ids(store.items()), vec!["1"]);
        assert!(store.error().is_none());
    }

    #[test]
    fn older_update_applies_when_newer_one_is_rejected() {
        let mut store = loaded(vec![note("1", "a")]);
        let id = EntityId::from("1");
        let first = store.begin(Request::Update(id.clone(), Note { text: "x".into() }));
        let second = store.begin(Request::Update(id.clone(), Note { text: "y".into() }));

        assert_eq!(store.settle(second.resolve(Err(rejected()))), Outcome::Failed(rejected()));
        let outcome = store.settle(first.resolve(Ok(Response::Item(note("1", "x")))));
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(store.get(&id).unwrap().text, "x");
    }

    #[test]
    fn newer_result_arriving_last_still_applies() {
        let mut store = ResourceStore::<Notes>::new();
        let first = store.begin(Request::List);
        let second = store.begin(Request::List);

        store.settle(first.resolve(Ok(Response::Items(vec![note("old", "o")]))));
        let newer = store.settle(second.resolve(Ok(Response::Items(vec![note("new", "n")]))));
        assert_eq!(newer, Outcome::Applied);
        assert_eq!(ids(store.items()), vec!["new"]);
    }

    #[test]
    fn sequencing_state_is_pruned_once_idle() {
        let mut store = loaded(vec![note("1", "a"), note("2", "b")]);
        for id in ["1", "2"] {
            let pending = store.begin(Request::Update(EntityId::from(id), Note { text: "z".into() }));
            store.settle(pending.resolve(Ok(Response::Item(note(id, "z")))));
        }
        let pending = store.begin(Request::View(ViewKey::new("pinned")));
        let still_open = store.begin(Request::List);
        store.settle(pending.resolve(Ok(Response::Items(vec![]))));
        assert_eq!(store.applied.len(), 1);

        store.settle(still_open.resolve(Ok(Response::Items(vec![]))));
        assert!(store.applied.is_empty());

        let first = store.begin(Request::List);
        let second = store.begin(Request::List);
        store.settle(second.resolve(Ok(Response::Items(vec![]))));
        store.clear();
        assert!(store.applied.is_empty());
        assert_eq!(store.settle(first.resolve(Ok(Response::Items(vec![])))), Outcome::Applied);
    }

    #[test]
    fn stale_failure_does_not_set_error() {
        let mut store = ResourceStore::<Notes>::new();
        let first = store.begin(Request::List);
        let second = store.begin(Request::List);
        store.settle(second.resolve(Ok(Response::Items(vec![]))));
        assert_eq!(store.settle(first.resolve(Err(rejected()))), Outcome::Stale);
        assert!(store.error().is_none());
    }

    #[test]
    fn different_operations_apply_in_arrival_order() {
        let mut store = loaded(vec![note("1", "a"), note("2", "b")]);
        let list = store.begin(Request::List);
        let delete = store.begin(Request::Delete(EntityId::from("2")));

        store.settle(delete.resolve(Ok(Response::Removed)));
        store.settle(list.resolve(Ok(Response::Items(vec![note("1", "a"), note("2", "b")]))));
        assert_eq!(ids(store.items()), vec!["1", "2"]);
    }

    #[test]
    fn mismatched_response_is_an_error() {
        let mut store = ResourceStore::<Notes>::new();
        let pending = store.begin(Request::Create(Note { text: "a".into() }));
        let outcome = store.settle(pending.resolve(Ok(Response::Removed)));
        assert!(matches!(outcome, Outcome::Failed(ApiError::Decode(_))));
        assert!(store.items().is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = loaded(vec![note("1", "a")]);
        let pending = store.begin(Request::View(ViewKey::new("pinned")));
        store.settle(pending.resolve(Ok(Response::Items(vec![note("1", "a")]))));
        let pending = store.begin(Request::Create(Note { text: String::new() }));
        store.settle(pending.resolve(Err(rejected())));

        store.clear();
        assert!(store.items().is_empty());
        assert!(store.view(&ViewKey::new("pinned")).is_none());
        assert!(store.error().is_none());
    }
}
