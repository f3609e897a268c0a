use std::fmt;

use api_types::{EntityId, Record};
use serde::{Serialize, de::DeserializeOwned};

/// A REST collection the client mirrors.
///
/// Implementors are zero-sized markers naming the entity fields and the endpoint; see
/// [`crate::resources`].
pub trait Resource: Send + Sync + 'static {
    /// The entity without its id, as sent on create/update.
    type Fields: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Collection path relative to the API root (`bills`).
    const PATH: &'static str;
}

/// A stored entity of `R`.
pub type Entity<R> = Record<<R as Resource>::Fields>;

/// Name of a secondary, server-filtered list of a resource (`unpaid`, `card/7`).
///
/// The key doubles as the path segment after the collection path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewKey(String);

impl ViewKey {
    pub fn new(segment: impl Into<String>) -> Self {
        Self(segment.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn item_path<R: Resource>(id: &EntityId) -> String {
    format!("{}/{}", R::PATH, id)
}

pub(crate) fn view_path<R: Resource>(key: &ViewKey) -> String {
    format!("{}/{}", R::PATH, key)
}
