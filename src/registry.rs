//! Named collections owned by an explicit registry value.

use std::collections::HashMap;

use tracing::info;

use crate::collection::Collection;
use crate::error::{Error, Result};

/// Maps collection names to collections.
///
/// The registry is an ordinary value: callers create one, pass it where it
/// is needed and drop it to tear everything down.
///
/// ```
/// use vexdb::Registry;
///
/// let mut registry = Registry::new();
/// registry.create("docs");
/// registry.get_mut("docs").unwrap().add("v1", vec![1.0, 0.0]).unwrap();
///
/// // Creating again keeps the existing contents
/// registry.create("docs");
/// assert_eq!(registry.get("docs").unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    collections: HashMap<String, Collection>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Creates an empty collection under `name` unless one already exists.
    ///
    /// Returns `true` if a collection was created.
    pub fn create(&mut self, name: &str) -> bool {
        if self.collections.contains_key(name) {
            return false;
        }

        self.collections.insert(name.to_string(), Collection::new(name));
        info!(collection = %name, "created collection");
        true
    }

    /// Removes the collection and all of its entries.
    ///
    /// Returns `false` if no collection had that name.
    pub fn delete(&mut self, name: &str) -> bool {
        match self.collections.remove(name) {
            Some(collection) => {
                info!(collection = %name, entries = collection.len(), "deleted collection");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.get_mut(name)
    }

    /// Like [`get`](Registry::get), reporting a missing name as [`Error::CollectionNotFound`].
    pub fn collection(&self, name: &str) -> Result<&Collection> {
        self.get(name).ok_or_else(|| Error::CollectionNotFound(name.to_string()))
    }

    pub fn collection_mut(&mut self, name: &str) -> Result<&mut Collection> {
        self.get_mut(name).ok_or_else(|| Error::CollectionNotFound(name.to_string()))
    }

    /// Collection names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
