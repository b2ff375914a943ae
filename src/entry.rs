//! Stored records and search results.

use serde::Serialize;
use std::sync::Arc;

use crate::vector::Vector;

/// An immutable `(id, vector)` record.
///
/// Collections hand entries out as `Arc<Entry>`, so a handle stays valid
/// after the entry is overwritten or deleted in its collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    id: String,
    vector: Vector,
}

impl Entry {
    pub fn new(id: impl Into<String>, vector: Vector) -> Entry {
        Entry { id: id.into(), vector }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }
}

/// One ranked result of a top-k search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub entry: Arc<Entry>,
    pub score: f64,
}

impl SearchHit {
    pub fn id(&self) -> &str {
        self.entry.id()
    }
}
