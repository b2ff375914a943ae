//! Brute-force top-k index.
//!
//! The index holds an immutable snapshot of a collection's entries. A rebuild
//! assembles a fresh snapshot and swaps it in whole, so a search only ever
//! scans a complete snapshot.
//!
//! Search keeps a bounded max-heap whose top is the worst candidate kept so
//! far. Each entry is scored once; it replaces the top only if it ranks
//! better, giving `O(n log k)` per query.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use tracing::trace;

use crate::entry::{Entry, SearchHit};
use crate::error::Result;
use crate::metric::{ScoreOrder, SimilarityMetric};

#[derive(Debug, Clone)]
pub struct Index {
    snapshot: Arc<[Arc<Entry>]>,
}

impl Default for Index {
    fn default() -> Self {
        Index { snapshot: Arc::from(Vec::new()) }
    }
}

impl Index {
    pub fn new() -> Index {
        Index::default()
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Arc<[Arc<Entry>]> {
        Arc::clone(&self.snapshot)
    }

    /// Replaces the snapshot with the current contents of `entries`.
    pub fn rebuild(&mut self, entries: &HashMap<String, Arc<Entry>>) {
        let snapshot: Vec<Arc<Entry>> = entries.values().cloned().collect();
        self.snapshot = Arc::from(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Returns the `top_k` best entries for `query`, best first.
    ///
    /// Equal scores are ordered by id ascending and NaN scores rank after
    /// every number. Scoring errors from the metric (dimension mismatch)
    /// abort the search.
    pub fn search(
        &self,
        query: &[f64],
        metric: &dyn SimilarityMetric,
        top_k: usize,
    ) -> Result<Vec<SearchHit>> {
        if top_k == 0 || self.snapshot.is_empty() {
            return Ok(Vec::new());
        }

        let order = metric.score_order();
        let capacity = top_k.min(self.snapshot.len()) + 1;
        let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(capacity);

        for entry in self.snapshot.iter() {
            let score = metric.compute(query, entry.vector())?;
            let candidate = Candidate { score, order, entry };

            if heap.len() < top_k {
                heap.push(candidate);
            } else if let Some(mut worst) = heap.peek_mut() {
                if candidate < *worst {
                    *worst = candidate;
                }
            }
        }

        trace!(scanned = self.snapshot.len(), kept = heap.len(), top_k, "index search");

        // Ascending by rank, so the best candidate comes first
        let hits = heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| SearchHit { entry: Arc::clone(c.entry), score: c.score })
            .collect();

        Ok(hits)
    }
}

/// Heap element ordered by rank: `Greater` means worse.
struct Candidate<'a> {
    score: f64,
    order: ScoreOrder,
    entry: &'a Arc<Entry>,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN is worse than any number in either direction
        let by_score = match (self.score.is_nan(), other.score.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match self.order {
                ScoreOrder::LowerIsBetter => self.score.partial_cmp(&other.score),
                ScoreOrder::HigherIsBetter => other.score.partial_cmp(&self.score),
            }
            .unwrap_or(Ordering::Equal),
        };
        by_score.then_with(|| self.entry.id().cmp(other.entry.id()))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}
