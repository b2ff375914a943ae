//! The collection module
//! Provide CRUD and top-k query methods over a named set of vectors

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::entry::{Entry, SearchHit};
use crate::error::{Error, Result};
use crate::index::Index;
use crate::metric::SimilarityMetric;
use crate::vector::{validate, Vector};

#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    entries: HashMap<String, Arc<Entry>>,
    index: Index,
    dimension: Option<usize>,
}

impl Collection {
    /// Creates a new empty collection.
    ///
    /// The collection starts with no dimension constraint. The dimension is
    /// pinned by the first vector added and released again once the
    /// collection is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use vexdb::Collection;
    ///
    /// let docs = Collection::new("docs");
    /// assert_eq!(docs.name(), "docs");
    /// assert!(docs.is_empty());
    /// ```
    pub fn new(name: impl Into<String>) -> Collection {
        Collection {
            name: name.into(),
            entries: HashMap::new(),
            index: Index::new(),
            dimension: None,
        }
    }

    /// Inserts or replaces the vector stored under `id`.
    ///
    /// The index is rebuilt before returning, so the next query sees the
    /// change. A rejected vector leaves the collection untouched.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyVector`] - the vector has no components
    /// * [`Error::InvalidValue`] - a component is NaN or infinite
    /// * [`Error::DimensionMismatch`] - the length differs from the collection's dimension
    ///
    /// # Examples
    ///
    /// ```
    /// use vexdb::{Collection, Error};
    ///
    /// let mut docs = Collection::new("docs");
    /// docs.add("v1", vec![1.0, 0.0, 0.0]).unwrap();
    ///
    /// let result = docs.add("v2", vec![1.0, 0.0]);
    /// assert_eq!(result, Err(Error::DimensionMismatch { expected: 3, actual: 2 }));
    /// ```
    pub fn add(&mut self, id: impl Into<String>, vector: Vector) -> Result<()> {
        self.upsert(id.into(), vector)
    }

    /// Replaces the vector stored under `id`, inserting it if absent.
    ///
    /// Behaves exactly like [`add`](Collection::add).
    pub fn update(&mut self, id: impl Into<String>, vector: Vector) -> Result<()> {
        self.upsert(id.into(), vector)
    }

    fn upsert(&mut self, id: String, vector: Vector) -> Result<()> {
        validate(&vector)?;
        match self.dimension {
            None => {
                self.dimension = Some(vector.len());
            }
            Some(expected) => {
                if vector.len() != expected {
                    return Err(Error::DimensionMismatch { expected, actual: vector.len() });
                }
            }
        }

        let entry = Arc::new(Entry::new(id.clone(), vector));
        let replaced = self.entries.insert(id.clone(), entry).is_some();
        self.index.rebuild(&self.entries);

        debug!(collection = %self.name, id = %id, replaced, "upserted entry");
        Ok(())
    }

    /// Removes the entry stored under `id`.
    ///
    /// Returns `true` if an entry was removed. Deleting an absent id is a
    /// no-op and does not touch the index.
    ///
    /// # Examples
    ///
    /// ```
    /// use vexdb::Collection;
    ///
    /// let mut docs = Collection::new("docs");
    /// docs.add("v1", vec![1.0, 2.0]).unwrap();
    ///
    /// assert!(docs.delete("v1"));
    /// assert!(!docs.delete("v1"));
    /// assert!(docs.get("v1").is_none());
    /// ```
    pub fn delete(&mut self, id: &str) -> bool {
        if self.entries.remove(id).is_none() {
            return false;
        }

        if self.entries.is_empty() {
            self.dimension = None;
        }
        self.index.rebuild(&self.entries);

        debug!(
            collection = %self.name,
            id = %id,
            remaining = self.entries.len(),
            "deleted entry"
        );
        true
    }

    /// Looks up an entry in the canonical entry set.
    ///
    /// The returned handle is shared: it stays valid and unchanged even if
    /// the entry is later updated or deleted.
    pub fn get(&self, id: &str) -> Option<Arc<Entry>> {
        self.entries.get(id).cloned()
    }

    /// Like [`get`](Collection::get), but reports a missing id as [`Error::EntryNotFound`].
    pub fn entry(&self, id: &str) -> Result<Arc<Entry>> {
        self.get(id).ok_or_else(|| Error::EntryNotFound(id.to_string()))
    }

    /// Returns the `top_k` entries that best match `vector` under `metric`,
    /// best first.
    ///
    /// # Examples
    ///
    /// ```
    /// use vexdb::{Collection, EuclideanDistance};
    ///
    /// let mut docs = Collection::new("docs");
    /// docs.add("v1", vec![1.0, 0.0, 0.0]).unwrap();
    /// docs.add("v2", vec![0.0, 1.0, 0.0]).unwrap();
    ///
    /// let results = docs.query(&[1.0, 0.0, 0.0], &EuclideanDistance, 1).unwrap();
    /// assert_eq!(results.len(), 1);
    /// assert_eq!(results[0].id(), "v1");
    /// ```
    pub fn query(
        &self,
        vector: &[f64],
        metric: &dyn SimilarityMetric,
        top_k: usize,
    ) -> Result<Vec<Arc<Entry>>> {
        let hits = self.query_scored(vector, metric, top_k)?;
        Ok(hits.into_iter().map(|hit| hit.entry).collect())
    }

    /// Same as [`query`](Collection::query) but keeps the score of each hit.
    ///
    /// # Errors
    ///
    /// Fails if the query vector is empty, holds a non-finite component, or
    /// its length differs from the collection's dimension. Querying an empty
    /// collection, or asking for zero hits, always succeeds with no hits.
    pub fn query_scored(
        &self,
        vector: &[f64],
        metric: &dyn SimilarityMetric,
        top_k: usize,
    ) -> Result<Vec<SearchHit>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }
        let Some(dimension) = self.dimension else {
            return Ok(Vec::new());
        };

        validate(vector)?;
        if vector.len() != dimension {
            return Err(Error::DimensionMismatch { expected: dimension, actual: vector.len() });
        }

        self.index.search(vector, metric, top_k)
    }

    /// Read-only view of every entry, keyed by id.
    pub fn all_entries(&self) -> &HashMap<String, Arc<Entry>> {
        &self.entries
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The length every vector in this collection must have, if pinned.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
