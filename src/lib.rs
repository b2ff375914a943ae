//! # VexDB - An In-Memory Vector Collection Store
//!
//! VexDB keeps named collections of vectors in memory and answers exact
//! top-k queries under a pluggable similarity metric: Euclidean distance,
//! cosine similarity or dot product. Every mutation rebuilds the
//! collection's index before returning, so queries always see the current
//! entries.
//!
//! ## Example
//!
//! ```
//! use vexdb::{CosineSimilarity, EuclideanDistance, Registry};
//!
//! let mut registry = Registry::new();
//! registry.create("docs");
//!
//! let docs = registry.get_mut("docs").unwrap();
//! docs.add("v1", vec![1.0, 0.0, 0.0]).unwrap();
//! docs.add("v2", vec![0.0, 1.0, 0.0]).unwrap();
//! docs.add("v3", vec![0.7, 0.7, 0.0]).unwrap();
//!
//! // Nearest by distance
//! let results = docs.query(&[1.0, 0.0, 0.0], &EuclideanDistance, 2).unwrap();
//! assert_eq!(results[0].id(), "v1");
//!
//! // Most similar by angle, with scores
//! let hits = docs.query_scored(&[1.0, 0.0, 0.0], &CosineSimilarity, 2).unwrap();
//! assert_eq!(hits[1].id(), "v3");
//! ```

pub mod vector;
pub mod metric;
pub mod config;
mod collection;
mod entry;
mod error;
mod index;
mod registry;

pub use collection::Collection;
pub use config::ShellConfig;
pub use entry::{Entry, SearchHit};
pub use error::{Error, Result};
pub use index::Index;
pub use metric::{
    CosineSimilarity, DotProductSimilarity, EuclideanDistance, MetricKind, ScoreOrder,
    SimilarityMetric,
};
pub use registry::Registry;
pub use vector::Vector;
