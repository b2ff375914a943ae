//! Error types for the engine.

use thiserror::Error;

/// Errors returned by collections, metrics and the registry.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Two vectors that must agree on length do not.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension the operation required.
        expected: usize,
        /// The dimension that was supplied.
        actual: usize,
    },

    /// A zero-length vector was offered where a point is required.
    #[error("vector must have at least one component")]
    EmptyVector,

    /// A component is NaN or infinite.
    #[error("invalid value at index {index}: {value}")]
    InvalidValue {
        /// Position of the offending component.
        index: usize,
        /// The offending component.
        value: f64,
    },

    /// No collection is registered under the given name.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// No entry is stored under the given id.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// A metric name did not match any known metric.
    #[error("unknown metric '{0}', expected one of: euclidean, cosine, dot")]
    UnknownMetric(String),

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
